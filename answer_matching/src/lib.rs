/*!
Matching of survey answer options against curated factual answers.

Survey platforms render the same answer in many different ways: `"14"` and
`"14 pounds"`, `"34%"` and a `"30-40%"` bucket, `"$10 billion"` and
`"10 billion"`. This crate decides whether an answer option represents a factual
answer, and how many answer options away from it a chosen option is, so that
imported survey results can be marked automatically.

```
use answer_matching::*;

assert!(answer_option_matches_factual("30-40%", "34%"));
assert!(answer_option_matches_factual("14 pounds", "14"));

let options = vec!["1".to_string(), "2".to_string(), "3".to_string()];
assert_eq!(distance_from_factual("3", &options, "1"), Ok(2));
```
*/

mod config;
pub mod manual;
pub mod mapping;
pub mod marking;
mod normalize;
mod numeric;
mod survey_name;

pub use crate::config::*;
pub use crate::mapping::{map_question, map_question_ids};
pub use crate::marking::{auto_mark_correctness, CorrectnessShares, Question};
pub use crate::normalize::normalize_key;
pub use crate::numeric::{extract_numeric_parts, is_numeric};
pub use crate::survey_name::parse_survey_name;

/// True if the answer option is the factual answer, textually or numerically.
///
/// This is the entry point to decide if an answer option represents a factual answer.
pub fn answer_option_matches_factual(answer_option: &str, factual_answer: &str) -> bool {
    answer_option_is_same_as_factual(answer_option, factual_answer)
        || answer_option_matches_factual_numerically(answer_option, factual_answer)
}

pub fn answer_option_is_same_as_factual(answer_option: &str, factual_answer: &str) -> bool {
    normalize_key(answer_option) == normalize_key(factual_answer)
}

/// Matches for example `"14"` to `"14 pounds"` or `"34%"` to `"30-40%"`.
///
/// Only the first numerical part of the factual answer is compared.
pub fn answer_option_matches_factual_numerically(
    answer_option: &str,
    factual_answer: &str,
) -> bool {
    let factual = match extract_numeric_parts(factual_answer).first() {
        Some(x) => x,
        None => return false,
    };
    match extract_numeric_parts(answer_option) {
        NumericParts::Empty => false,
        NumericParts::Single(x) => x == factual,
        NumericParts::Range(low, high) => low <= factual && factual <= high,
    }
}

fn lower(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Computes how many answer options separate the chosen answer option from the
/// closest answer option that matches the factual answer.
///
/// The answer options are ordered by their smallest numerical part. The distance is
/// counted in positions in this order, not as a numerical difference.
///
/// Arguments:
/// * `chosen_answer_option` the option to evaluate
/// * `answer_options` all the options of the question
/// * `factual_answer` the reference answer
///
/// A chosen option that matches the factual answer is always at distance 0, even when
/// the options are not numerical.
pub fn distance_from_factual(
    chosen_answer_option: &str,
    answer_options: &[String],
    factual_answer: &str,
) -> Result<usize, DistanceErrors> {
    let chosen = lower(chosen_answer_option);
    let factual = lower(factual_answer);

    match answer_options.len() {
        0 => return Err(DistanceErrors::InvalidInput("Empty answerOptions array given")),
        1 => return Err(DistanceErrors::InvalidInput("Only one answer option given")),
        _ => {}
    }

    let correct_answer_options: Vec<&String> = answer_options
        .iter()
        .filter(|ao| answer_option_matches_factual(ao, &factual))
        .collect();
    if correct_answer_options.is_empty() {
        return Err(DistanceErrors::NoCorrectAnswerFound);
    }

    if correct_answer_options.iter().any(|ao| lower(ao) == chosen) {
        return Ok(0);
    }

    // All the answer options must be numerical (integers, floats, percentages or ranges of such)
    let mut minimums: Vec<f64> = Vec::with_capacity(answer_options.len());
    for ao in answer_options.iter() {
        let m = extract_numeric_parts(ao)
            .min()
            .ok_or(DistanceErrors::NonNumericOptions)?;
        minimums.push(m);
    }
    minimums.sort_by(|a, b| a.total_cmp(b));
    minimums.dedup();

    let position = |m: f64| minimums.iter().position(|x| *x == m);

    let chosen_min = extract_numeric_parts(&chosen)
        .min()
        .ok_or(DistanceErrors::NonNumericOptions)?;
    let chosen_pos = position(chosen_min).ok_or(DistanceErrors::InvalidInput(
        "Chosen answer option not found among the answer options",
    ))?;

    let mut best: Option<usize> = None;
    for ao in correct_answer_options {
        // Correct options are numerical at this point.
        let pos = extract_numeric_parts(ao).min().and_then(position);
        if let Some(pos) = pos {
            let d = pos.abs_diff(chosen_pos);
            best = Some(best.map_or(d, |b| b.min(d)));
        }
    }
    best.ok_or(DistanceErrors::NoCorrectAnswerFound)
}
