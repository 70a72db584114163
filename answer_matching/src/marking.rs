//! Automatic marking of the correctness of answer options.

use log::debug;

use crate::config::*;
use crate::{answer_option_is_same_as_factual, answer_option_matches_factual};
use crate::{distance_from_factual, extract_numeric_parts};

/// Decides whether the chosen answer option is correct, wrong or very wrong.
///
/// When no very wrong answer has been curated, the answer is very wrong if it is
/// more than one answer option away from the correct answer. This only applies to
/// numerical questions: for other questions, the answer is simply wrong.
///
/// Arguments:
/// * `chosen_answer_option` the answer option to mark
/// * `answer_options` all the answer options of the question, including the chosen one
/// * `correct_answer` the factual correct answer
/// * `very_wrong_answer` the factual very wrong answer. It may be empty.
pub fn auto_mark_correctness(
    chosen_answer_option: &str,
    answer_options: &[String],
    correct_answer: &str,
    very_wrong_answer: &str,
) -> Result<Correctness, MarkingErrors> {
    if correct_answer.trim().is_empty() {
        return Err(MarkingErrors::NoFactualAnswer);
    }

    let correct_answer_options: Vec<&String> = answer_options
        .iter()
        .filter(|ao| answer_option_matches_factual(ao, correct_answer))
        .collect();
    let has_very_wrong_answer = !very_wrong_answer.trim().is_empty();
    if correct_answer_options.is_empty() {
        return Err(MarkingErrors::NoMatchingOption {
            factual_answer: correct_answer.to_string(),
            numeric: !has_very_wrong_answer,
        });
    }

    let is_very_wrong = if has_very_wrong_answer {
        answer_option_is_same_as_factual(chosen_answer_option, very_wrong_answer)
    } else {
        match distance_from_factual(chosen_answer_option, answer_options, correct_answer) {
            Ok(d) => d > 1,
            // Not all questions can be ranked, they are simply never very wrong.
            Err(DistanceErrors::NoCorrectAnswerFound) | Err(DistanceErrors::NonNumericOptions) => {
                false
            }
            Err(e) => return Err(MarkingErrors::Distance(e)),
        }
    };

    let is_correct = correct_answer_options
        .iter()
        .any(|ao| ao.as_str() == chosen_answer_option);

    let res = if is_correct {
        Correctness::Correct
    } else if is_very_wrong {
        Correctness::VeryWrong
    } else {
        Correctness::Wrong
    };
    debug!(
        "auto_mark_correctness: {:?} (correct: {:?}, very wrong: {:?}) -> {:?}",
        chosen_answer_option, correct_answer, very_wrong_answer, res
    );
    Ok(res)
}

/// A question with all its answer options and its factual answers.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Question {
    pub answer_options: Vec<String>,
    pub correct_answer: String,
    pub very_wrong_answer: String,
}

impl Question {
    pub fn new(
        answer_options: &[String],
        correct_answer: &str,
        very_wrong_answer: &str,
    ) -> Question {
        Question {
            answer_options: answer_options.to_vec(),
            correct_answer: correct_answer.to_string(),
            very_wrong_answer: very_wrong_answer.to_string(),
        }
    }

    pub fn mark(&self, chosen_answer_option: &str) -> Result<Correctness, MarkingErrors> {
        auto_mark_correctness(
            chosen_answer_option,
            &self.answer_options,
            &self.correct_answer,
            &self.very_wrong_answer,
        )
    }

    /// Marks every answer option, in order.
    pub fn mark_all(&self) -> Vec<Result<Correctness, MarkingErrors>> {
        self.answer_options.iter().map(|ao| self.mark(ao)).collect()
    }
}

/// The share of respondents per correctness.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct CorrectnessShares {
    pub correct: f64,
    pub wrong: f64,
    pub very_wrong: f64,
}

impl CorrectnessShares {
    /// Aggregates the shares of the answer options.
    ///
    /// Each share is read from the rollup of the answer option (`"12.50%"` or `"0.125"`).
    /// Answer options without a correctness or with an unreadable share are skipped.
    pub fn from_rollups<'a, I>(rollups: I) -> CorrectnessShares
    where
        I: IntoIterator<Item = (Option<Correctness>, &'a str)>,
    {
        let mut res = CorrectnessShares::default();
        for (correctness, rollup) in rollups {
            let share = match (correctness, extract_numeric_parts(rollup)) {
                (Some(c), NumericParts::Single(x)) => (c, x),
                _ => continue,
            };
            match share.0 {
                Correctness::Correct => res.correct += share.1,
                Correctness::Wrong => res.wrong += share.1,
                Correctness::VeryWrong => res.very_wrong += share.1,
            }
        }
        res
    }
}
