// ********* Value types ***********

use std::error::Error;
use std::fmt::Display;

/// The numerical interpretation of an answer option.
///
/// An answer option is either not numerical at all, a single value (`"14 pounds"`)
/// or a range of values (`"30-40%"`). Percentages are always stored divided by 100.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum NumericParts {
    Empty,
    Single(f64),
    /// A closed range. The lower bound is expected to come first but this
    /// is not enforced.
    Range(f64, f64),
}

impl NumericParts {
    /// The first numerical part, which is what a factual answer is reduced to.
    pub fn first(&self) -> Option<f64> {
        match *self {
            NumericParts::Empty => None,
            NumericParts::Single(x) => Some(x),
            NumericParts::Range(x, _) => Some(x),
        }
    }

    /// The smallest numerical part. Used to order answer options.
    pub fn min(&self) -> Option<f64> {
        match *self {
            NumericParts::Empty => None,
            NumericParts::Single(x) => Some(x),
            NumericParts::Range(x, y) => Some(x.min(y)),
        }
    }
}

/// The outcome of looking for the batch number of one survey series in a survey name.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum BatchNumber {
    /// The survey name does not refer to this series.
    NotReferenced,
    /// Nothing could be recognized in the survey name.
    Unrecognized,
    Batch(String),
}

impl BatchNumber {
    pub fn as_batch(&self) -> Option<&str> {
        match self {
            BatchNumber::Batch(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum SurveySeries {
    WorldViews,
    CountryViews,
    Study,
}

impl SurveySeries {
    /// The order in which the series are tried when mapping a question.
    pub const ALL: [SurveySeries; 3] = [
        SurveySeries::WorldViews,
        SurveySeries::CountryViews,
        SurveySeries::Study,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SurveySeries::WorldViews => "world_views",
            SurveySeries::CountryViews => "country_views",
            SurveySeries::Study => "study",
        }
    }

    pub fn from_label(label: &str) -> Option<SurveySeries> {
        SurveySeries::ALL
            .iter()
            .find(|s| s.label() == label.trim())
            .cloned()
    }
}

/// The batch numbers found in a survey name, one per survey series.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SurveyBatchNumbers {
    pub world_views: BatchNumber,
    pub country_views: BatchNumber,
    pub study: BatchNumber,
}

impl SurveyBatchNumbers {
    pub fn get(&self, series: SurveySeries) -> &BatchNumber {
        match series {
            SurveySeries::WorldViews => &self.world_views,
            SurveySeries::CountryViews => &self.country_views,
            SurveySeries::Study => &self.study,
        }
    }
}

/// The correctness of an answer option, as recorded in the answers sheet.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Correctness {
    Correct,
    Wrong,
    VeryWrong,
}

impl Correctness {
    pub fn code(&self) -> &'static str {
        match self {
            Correctness::Correct => "1",
            Correctness::Wrong => "2",
            Correctness::VeryWrong => "3",
        }
    }

    pub fn from_code(code: &str) -> Option<Correctness> {
        match code.trim() {
            "1" => Some(Correctness::Correct),
            "2" => Some(Correctness::Wrong),
            "3" => Some(Correctness::VeryWrong),
            _ => None,
        }
    }
}

/// One entry of the reference sheet: a curated question with its factual answers.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ReferenceQuestion {
    pub series: SurveySeries,
    pub question_id: String,
    pub question_text: String,
    pub batch_number: String,
    pub correct_answer: String,
    pub very_wrong_answer: String,
}

// ******** Errors *********

/// Errors when computing how far a chosen answer option is from the factual answer.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum DistanceErrors {
    /// The answer options cannot be ranked.
    InvalidInput(&'static str),
    NoCorrectAnswerFound,
    NonNumericOptions,
}

impl Error for DistanceErrors {}

impl Display for DistanceErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceErrors::InvalidInput(msg) => write!(f, "{}", msg),
            DistanceErrors::NoCorrectAnswerFound => write!(f, "No correct answer option found"),
            DistanceErrors::NonNumericOptions => write!(f, "Answer options not all numerical"),
        }
    }
}

/// Errors that prevent an answer option from being auto-marked.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum MarkingErrors {
    NoFactualAnswer,
    NoMatchingOption { factual_answer: String, numeric: bool },
    Distance(DistanceErrors),
}

impl Error for MarkingErrors {}

impl Display for MarkingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkingErrors::NoFactualAnswer => {
                write!(f, "(No factual answer provided in input sheet)")
            }
            MarkingErrors::NoMatchingOption {
                factual_answer,
                numeric: true,
            } => write!(
                f,
                "(No answer option numerically matching the correct answer \"{}\" found)",
                factual_answer
            ),
            MarkingErrors::NoMatchingOption { factual_answer, .. } => write!(
                f,
                "(No answer option matching the correct answer \"{}\" found)",
                factual_answer
            ),
            MarkingErrors::Distance(e) => write!(f, "({})", e),
        }
    }
}

/// Errors when mapping a survey question to the reference questions.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum MappingErrors {
    MissingSurveyName,
    /// The survey does not belong to the requested series.
    NotApplicable,
    NoBatchNumber {
        series: SurveySeries,
        survey_name: String,
    },
    NoMatchingQuestion {
        series: SurveySeries,
        batch_number: String,
        fuzzy_question_text: String,
    },
    /// No series produced exactly one reference question.
    Unmapped,
}

impl Error for MappingErrors {}

impl Display for MappingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingErrors::MissingSurveyName => write!(f, "(No survey name available)"),
            MappingErrors::NotApplicable => write!(f, "n/a"),
            MappingErrors::NoBatchNumber {
                series,
                survey_name,
            } => write!(
                f,
                "(No {} batch number found in survey name {})",
                series.label(),
                survey_name
            ),
            MappingErrors::NoMatchingQuestion {
                series,
                batch_number,
                fuzzy_question_text,
            } => write!(
                f,
                "(No questions found within {} batch {}, fuzzy-searching for \"{}\")",
                series.label(),
                batch_number,
                fuzzy_question_text
            ),
            MappingErrors::Unmapped => write!(f, "(Question ID not mapped)"),
        }
    }
}
