use log::{debug, info, warn};

use answer_matching::*;
use snafu::prelude::*;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::automark::config_reader::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;

pub const STDOUT: &str = "stdout";

#[derive(Debug, Snafu)]
pub enum AutoMarkError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No worksheet in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Missing worksheet {name} in {path}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display("Several worksheets in {path}, the worksheet name must be provided"))]
    AmbiguousWorksheet { path: String },
    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Missing parent directory of the configuration file"))]
    MissingParentDir {},
    #[snafu(display("No {what} file provided"))]
    MissingSource { what: String },
    #[snafu(display("Unknown input type {provider}"))]
    UnknownProvider { provider: String },
    #[snafu(display("Missing column {column} in {path}"))]
    MissingColumn { column: String, path: String },
    #[snafu(display("Unknown series {series} on line {lineno} of {path}"))]
    UnknownSeries {
        series: String,
        path: String,
        lineno: usize,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type AutoMarkResult<T> = Result<T, AutoMarkError>;

/// An answer option of a question, as exported from the survey platform.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AnswerRow {
    pub survey_id: String,
    pub survey_name: String,
    pub question_number: String,
    pub question_text: String,
    pub answer: String,
    /// The share of respondents who chose this answer option.
    pub answer_by_percent: String,
    /// The manual mark, if any.
    pub correctness: String,
}

#[derive(PartialEq, Debug, Clone)]
struct MarkedAnswer {
    answer: String,
    // The correctness code, or the reason why the answer could not be marked.
    auto_marked_correctness: String,
    correctness: String,
}

#[derive(PartialEq, Debug, Clone)]
struct MarkedQuestion {
    survey_id: String,
    survey_name: String,
    question_number: String,
    question_text: String,
    mapping: Result<ReferenceQuestion, MappingErrors>,
    answers: Vec<MarkedAnswer>,
    shares: CorrectnessShares,
}

// Questions are returned in the order of their first answer option.
fn group_by_question(rows: &[AnswerRow]) -> Vec<Vec<&AnswerRow>> {
    let mut positions: HashMap<(&str, &str), usize> = HashMap::new();
    let mut groups: Vec<Vec<&AnswerRow>> = Vec::new();
    for row in rows.iter() {
        let key = (row.survey_id.as_str(), row.question_number.as_str());
        let pos = *positions.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[pos].push(row);
    }
    groups
}

fn mark_question(rows: &[&AnswerRow], references: &[ReferenceQuestion]) -> Option<MarkedQuestion> {
    let first = rows.first()?;
    let mapping = map_question(&first.survey_name, &first.question_text, references).cloned();
    debug!(
        "mark_question: survey {:?} question {:?}: {:?}",
        first.survey_id, first.question_number, mapping
    );

    let auto_marks: Vec<String> = match &mapping {
        Ok(reference) => {
            let answer_options: Vec<String> = rows.iter().map(|r| r.answer.clone()).collect();
            let question = Question::new(
                &answer_options,
                &reference.correct_answer,
                &reference.very_wrong_answer,
            );
            question
                .mark_all()
                .into_iter()
                .map(|res| match res {
                    Ok(c) => c.code().to_string(),
                    Err(e) => e.to_string(),
                })
                .collect()
        }
        Err(e) => rows.iter().map(|_| e.to_string()).collect(),
    };

    // The manual marks take precedence. They are only filled in when no answer
    // option of the question has been marked by hand.
    let has_manual_marks = rows.iter().any(|r| !r.correctness.is_empty());
    if has_manual_marks {
        info!(
            "mark_question: survey {:?} question {:?} already marked",
            first.survey_id, first.question_number
        );
    }
    let answers: Vec<MarkedAnswer> = rows
        .iter()
        .zip(auto_marks)
        .map(|(r, auto)| {
            let correctness = if has_manual_marks || Correctness::from_code(&auto).is_none() {
                r.correctness.clone()
            } else {
                auto.clone()
            };
            MarkedAnswer {
                answer: r.answer.clone(),
                auto_marked_correctness: auto,
                correctness,
            }
        })
        .collect();

    let shares = CorrectnessShares::from_rollups(
        answers
            .iter()
            .zip(rows.iter())
            .map(|(a, r)| (Correctness::from_code(&a.correctness), r.answer_by_percent.as_str())),
    );

    Some(MarkedQuestion {
        survey_id: first.survey_id.clone(),
        survey_name: first.survey_name.clone(),
        question_number: first.question_number.clone(),
        question_text: first.question_text.clone(),
        mapping,
        answers,
        shares,
    })
}

fn mark_answers(rows: &[AnswerRow], references: &[ReferenceQuestion]) -> Vec<MarkedQuestion> {
    group_by_question(rows)
        .iter()
        .filter_map(|group| mark_question(group, references))
        .collect()
}

fn format_share(share: f64) -> String {
    format!("{:.2}%", share * 100.0)
}

fn marked_questions_to_json(questions: &[MarkedQuestion]) -> Vec<JSValue> {
    let mut l: Vec<JSValue> = Vec::new();
    for q in questions.iter() {
        let answers: Vec<JSValue> = q
            .answers
            .iter()
            .map(|a| {
                json!({
                    "answer": a.answer,
                    "autoMarkedCorrectness": a.auto_marked_correctness,
                    "correctness": a.correctness,
                })
            })
            .collect();
        let (mapped_id, notes, correct, very_wrong) = match &q.mapping {
            Ok(r) => (
                json!(r.question_id),
                "".to_string(),
                r.correct_answer.clone(),
                r.very_wrong_answer.clone(),
            ),
            Err(e) => (JSValue::Null, e.to_string(), "".to_string(), "".to_string()),
        };
        let js = json!({
            "surveyId": q.survey_id,
            "surveyName": q.survey_name,
            "questionNumber": q.question_number,
            "questionText": q.question_text,
            "mappedQuestionId": mapped_id,
            "mappingNotes": notes,
            "correctAnswerAtTimeOfImport": correct,
            "veryWrongAnswerAtTimeOfImport": very_wrong,
            "answers": answers,
            "summary": {
                "correct": format_share(q.shares.correct),
                "wrong": format_share(q.shares.wrong),
                "veryWrong": format_share(q.shares.very_wrong),
            },
        });
        l.push(js);
    }
    l
}

fn read_table(cfs: &FileSource) -> AutoMarkResult<io_common::Table> {
    info!("Attempting to read file {:?}", cfs.file_path);
    match cfs.provider.as_str() {
        PROVIDER_CSV => io_csv::read_csv_table(&cfs.file_path),
        PROVIDER_XLSX => io_excel::read_excel_table(&cfs.file_path, cfs),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }
}

/// Combines the configuration file (if any) with the command line arguments.
fn build_config(args: &Args) -> AutoMarkResult<MarkingConfig> {
    let mut config = match &args.config {
        Some(config_path) => {
            let root_dir: PathBuf = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            read_config(config_path)?.resolved(&root_dir)
        }
        None => MarkingConfig::default(),
    };

    let with_overrides = |path: &str| {
        let mut source = FileSource::from_path(path, args.input_type.clone());
        source.excel_worksheet_name = args.excel_worksheet_name.clone();
        source
    };
    if let Some(p) = &args.answers {
        config.answers_source = Some(with_overrides(p));
    }
    if let Some(p) = &args.facts {
        config.facts_source = Some(with_overrides(p));
    }
    if let Some(p) = &args.out {
        config.output_settings.output_path = Some(p.clone());
    }
    Ok(config)
}

/// Reads the answers and the facts, marks all the answers and returns the summary.
pub fn run_marking(config: &MarkingConfig) -> AutoMarkResult<JSValue> {
    let answers_source = config
        .answers_source
        .as_ref()
        .context(MissingSourceSnafu { what: "answers" })?;
    let facts_source = config
        .facts_source
        .as_ref()
        .context(MissingSourceSnafu { what: "facts" })?;

    let answer_rows = io_common::read_answer_rows(&read_table(answers_source)?)?;
    let references = io_common::read_reference_questions(&read_table(facts_source)?)?;
    info!(
        "run_marking: {} answer options, {} reference questions",
        answer_rows.len(),
        references.len()
    );

    let marked = mark_answers(&answer_rows, &references);
    let unmapped = marked.iter().filter(|q| q.mapping.is_err()).count();
    if unmapped > 0 {
        warn!("run_marking: {} questions could not be mapped", unmapped);
    }
    Ok(json!({ "questions": marked_questions_to_json(&marked) }))
}

fn check_reference(result_js: &JSValue, summary_path: &str) -> AutoMarkResult<()> {
    let summary_ref = read_summary(summary_path)?;
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
    let pretty_js_stats = serde_json::to_string_pretty(result_js).context(ParsingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference string");
        print_diff(
            pretty_js_summary_ref.as_str(),
            pretty_js_stats.as_ref(),
            "\n",
        );
        whatever!("Difference detected between the marked answers and the reference")
    }
    Ok(())
}

pub fn run(args: &Args) -> AutoMarkResult<()> {
    let config = build_config(args)?;
    info!("config: {:?}", config);

    let result_js = run_marking(&config)?;
    let pretty_js = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    match config.output_settings.output_path.as_deref() {
        Some(path) if path != STDOUT => {
            fs::write(path, &pretty_js).context(WritingOutputSnafu { path })?;
            info!("Marked answers written to {:?}", path);
        }
        _ => println!("{}", pretty_js),
    }

    if let Some(summary_path) = &args.reference {
        check_reference(&result_js, summary_path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_marking_test(test_name: &str) {
        let test_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data");
        info!("Running test {}", test_name);
        let config_path = format!("{}/{}/{}_config.json", test_dir, test_name, test_name);
        let summary_path = format!(
            "{}/{}/{}_expected_summary.json",
            test_dir, test_name, test_name
        );
        let root_dir = Path::new(&config_path).parent().unwrap().to_path_buf();

        let res = read_config(&config_path).and_then(|c| {
            let js = run_marking(&c.resolved(&root_dir))?;
            check_reference(&js, &summary_path)
        });
        if let Err(e) = res {
            panic!("Test {} failed: {}", test_name, e);
        }
    }

    fn row(survey_id: &str, question_number: &str, answer: &str, correctness: &str) -> AnswerRow {
        AnswerRow {
            survey_id: survey_id.to_string(),
            survey_name: "World Views 90".to_string(),
            question_number: question_number.to_string(),
            question_text: "How many?".to_string(),
            answer: answer.to_string(),
            answer_by_percent: "25%".to_string(),
            correctness: correctness.to_string(),
        }
    }

    fn references() -> Vec<ReferenceQuestion> {
        vec![ReferenceQuestion {
            series: SurveySeries::WorldViews,
            question_id: "wv-90-1".to_string(),
            question_text: "How many ?".to_string(),
            batch_number: "90".to_string(),
            correct_answer: "1".to_string(),
            very_wrong_answer: "".to_string(),
        }]
    }

    #[test]
    fn groups_in_order() {
        let rows = vec![
            row("1", "2", "a", ""),
            row("1", "1", "b", ""),
            row("1", "2", "c", ""),
            row("2", "2", "d", ""),
        ];
        let groups = group_by_question(&rows);
        let answers: Vec<Vec<&str>> = groups
            .iter()
            .map(|g| g.iter().map(|r| r.answer.as_str()).collect())
            .collect();
        assert_eq!(answers, vec![vec!["a", "c"], vec!["b"], vec!["d"]]);
    }

    #[test]
    fn auto_marks_fill_in_correctness() {
        let rows: Vec<AnswerRow> = ["1", "2", "3", "4"]
            .iter()
            .map(|a| row("1", "1", a, ""))
            .collect();
        let marked = mark_answers(&rows, &references());
        assert_eq!(marked.len(), 1);
        let codes: Vec<&str> = marked[0]
            .answers
            .iter()
            .map(|a| a.correctness.as_str())
            .collect();
        assert_eq!(codes, vec!["1", "2", "3", "3"]);
        assert_eq!(marked[0].shares.correct, 0.25);
        assert_eq!(marked[0].shares.very_wrong, 0.5);
    }

    #[test]
    fn manual_marks_are_kept() {
        let rows = vec![
            row("1", "1", "1", ""),
            row("1", "1", "2", "1"),
            row("1", "1", "3", ""),
        ];
        let marked = mark_answers(&rows, &references());
        let answers = &marked[0].answers;
        assert_eq!(answers[0].auto_marked_correctness, "1");
        assert_eq!(answers[0].correctness, "");
        assert_eq!(answers[1].correctness, "1");
        assert_eq!(answers[2].auto_marked_correctness, "3");
    }

    #[test]
    fn unmapped_question() {
        let mut rows = vec![row("1", "1", "1", ""), row("1", "1", "2", "")];
        for r in rows.iter_mut() {
            r.survey_name = "#N/A".to_string();
        }
        let marked = mark_answers(&rows, &references());
        assert_eq!(marked[0].mapping, Err(MappingErrors::MissingSurveyName));
        assert_eq!(
            marked[0].answers[0].auto_marked_correctness,
            "(No survey name available)"
        );
        assert_eq!(marked[0].answers[0].correctness, "");
    }

    #[test]
    fn world_views_example() {
        run_marking_test("world_views");
    }

    #[test]
    fn study_remap_example() {
        run_marking_test("study_remap");
    }
}
