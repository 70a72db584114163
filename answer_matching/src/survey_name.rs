use crate::config::{BatchNumber, SurveyBatchNumbers};
use crate::numeric::extract_numeric_parts;

const WORLD_VIEWS_MARKERS: [&str; 2] = ["World Views ", "Worldviews "];
const COUNTRY_VIEWS_MARKERS: [&str; 1] = ["Country Views "];
const STUDY_MARKERS: [&str; 2] = ["Study Survey ", "Study "];

// Country views surveys that were also run as study surveys.
const STUDY_REMAPS: [(&str, &str); 3] = [("383", "1/c383"), ("384", "2/c384"), ("385", "3/c385")];

// The first world views surveys share their reference questions.
const WORLD_VIEWS_HISTORICAL_RANGE: &str = "1-80";

fn batch_number(survey_name: &str, markers: &[&str]) -> BatchNumber {
    if !markers.iter().any(|m| survey_name.contains(m)) {
        return BatchNumber::NotReferenced;
    }
    match extract_numeric_parts(survey_name).first() {
        Some(x) => BatchNumber::Batch((x as i64).to_string()),
        None => BatchNumber::Unrecognized,
    }
}

/// Finds the batch numbers of the survey series referred to by a survey name.
///
/// ```
/// use answer_matching::{parse_survey_name, BatchNumber};
///
/// let batches = parse_survey_name("Country Views 383");
/// assert_eq!(batches.country_views, BatchNumber::Batch("383".to_string()));
/// assert_eq!(batches.study, BatchNumber::Batch("1/c383".to_string()));
/// assert_eq!(batches.world_views, BatchNumber::NotReferenced);
/// ```
pub fn parse_survey_name(survey_name: &str) -> SurveyBatchNumbers {
    let mut world_views = batch_number(survey_name, &WORLD_VIEWS_MARKERS);
    let country_views = batch_number(survey_name, &COUNTRY_VIEWS_MARKERS);
    let mut study = batch_number(survey_name, &STUDY_MARKERS);

    if let Some(cv) = country_views.as_batch() {
        if let Some((_, remap)) = STUDY_REMAPS.iter().find(|(from, _)| *from == cv) {
            study = BatchNumber::Batch(remap.to_string());
        }
    }

    let in_historical_range = matches!(
        world_views.as_batch().map(|s| s.parse::<i64>()),
        Some(Ok(n)) if n > 0 && n < 81
    );
    if in_historical_range {
        world_views = BatchNumber::Batch(WORLD_VIEWS_HISTORICAL_RANGE.to_string());
    }

    let nothing_found = [&world_views, &country_views, &study]
        .iter()
        .all(|b| **b == BatchNumber::NotReferenced);
    if nothing_found {
        return SurveyBatchNumbers {
            world_views: BatchNumber::Unrecognized,
            country_views: BatchNumber::Unrecognized,
            study: BatchNumber::Unrecognized,
        };
    }

    SurveyBatchNumbers {
        world_views,
        country_views,
        study,
    }
}
