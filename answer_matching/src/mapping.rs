//! Mapping of survey questions to the curated reference questions.

use log::{debug, info};

use crate::config::*;
use crate::normalize::normalize_key;
use crate::survey_name::parse_survey_name;

fn is_missing_survey_name(survey_name: &str) -> bool {
    matches!(survey_name.trim(), "" | "#N/A" | "...")
}

/// Finds the reference questions of one survey series that correspond to a survey question.
///
/// The reference questions must belong to the batch found in the survey name and have
/// the same question text, up to the normalization of [crate::normalize_key].
pub fn map_question_ids<'a>(
    survey_name: &str,
    question_text: &str,
    series: SurveySeries,
    references: &'a [ReferenceQuestion],
) -> Result<Vec<&'a ReferenceQuestion>, MappingErrors> {
    if is_missing_survey_name(survey_name) {
        return Err(MappingErrors::MissingSurveyName);
    }

    let batch_numbers = parse_survey_name(survey_name);
    let batch_number = match batch_numbers.get(series) {
        BatchNumber::NotReferenced => return Err(MappingErrors::NotApplicable),
        BatchNumber::Unrecognized => {
            return Err(MappingErrors::NoBatchNumber {
                series,
                survey_name: survey_name.to_string(),
            })
        }
        BatchNumber::Batch(s) => s.clone(),
    };

    let fuzzy_question_text = normalize_key(question_text);
    let fuzzy_batch_number = normalize_key(&batch_number);
    let matches: Vec<&ReferenceQuestion> = references
        .iter()
        .filter(|r| r.series == series)
        .filter(|r| !r.question_text.trim().is_empty() && !r.batch_number.trim().is_empty())
        .filter(|r| normalize_key(&r.question_text) == fuzzy_question_text)
        .filter(|r| normalize_key(&r.batch_number) == fuzzy_batch_number)
        .collect();

    debug!(
        "map_question_ids: series: {:?} batch: {:?} text: {:?} matches: {:?}",
        series,
        batch_number,
        fuzzy_question_text,
        matches.len()
    );

    if matches.is_empty() {
        return Err(MappingErrors::NoMatchingQuestion {
            series,
            batch_number,
            fuzzy_question_text,
        });
    }
    Ok(matches)
}

/// Maps a survey question to a single reference question.
///
/// The series are tried in order (world views, country views, study). The first series
/// with exactly one matching reference question is used.
pub fn map_question<'a>(
    survey_name: &str,
    question_text: &str,
    references: &'a [ReferenceQuestion],
) -> Result<&'a ReferenceQuestion, MappingErrors> {
    let mut last_error = MappingErrors::Unmapped;
    for series in SurveySeries::ALL {
        match map_question_ids(survey_name, question_text, series, references) {
            Ok(matches) => {
                if let [single] = matches.as_slice() {
                    info!(
                        "map_question: {:?} in {:?} mapped to {} question {}",
                        question_text,
                        survey_name,
                        series.label(),
                        single.question_id
                    );
                    return Ok(*single);
                }
                // Ambiguous within this series.
                last_error = MappingErrors::Unmapped;
            }
            Err(MappingErrors::NotApplicable) => {}
            Err(MappingErrors::MissingSurveyName) => return Err(MappingErrors::MissingSurveyName),
            Err(e) => last_error = e,
        }
    }
    Err(last_error)
}
