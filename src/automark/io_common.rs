// Primitives shared by the readers: a table of strings with a header row, and the
// conversion of tables into answer rows and reference questions.

use std::collections::HashMap;

use crate::automark::*;

pub const COL_SURVEY_ID: &str = "Survey ID";
pub const COL_SURVEY_NAME: &str = "Survey Name";
pub const COL_QUESTION_NUMBER: &str = "Question number";
pub const COL_QUESTION_TEXT: &str = "Question text";
pub const COL_ANSWER: &str = "Answer";
pub const COL_ANSWER_BY_PERCENT: &str = "Answer by percent";
pub const COL_CORRECTNESS: &str = "Correctness of answer option";

pub const COL_SERIES: &str = "Series";
pub const COL_QUESTION_ID: &str = "Question ID";
pub const COL_QUESTION: &str = "Question";
pub const COL_BATCH_NUMBER: &str = "Batch number";
pub const COL_CORRECT_ANSWER: &str = "Correct answer";
pub const COL_VERY_WRONG_ANSWER: &str = "Very wrong answer";

/// The content of a worksheet or a CSV file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Table {
    pub path: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    fn column_indexes(&self) -> HashMap<String, usize> {
        self.header
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().to_string(), idx))
            .collect()
    }

    fn column_index(&self, name: &str) -> AutoMarkResult<usize> {
        self.column_indexes()
            .get(name)
            .cloned()
            .context(MissingColumnSnafu {
                column: name,
                path: self.path.clone(),
            })
    }

    fn optional_column_index(&self, name: &str) -> Option<usize> {
        self.column_indexes().get(name).cloned()
    }

    /// The rows with at least one non-blank cell, with their line number in the file.
    fn filled_rows(&self) -> impl Iterator<Item = (usize, &Vec<String>)> {
        self.rows
            .iter()
            .enumerate()
            // The header is on the first line
            .map(|(idx, row)| (idx + 2, row))
            .filter(|(_, row)| row.iter().any(|c| !c.trim().is_empty()))
    }
}

fn cell(row: &[String], idx: Option<usize>) -> String {
    idx.and_then(|i| row.get(i))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

pub fn read_answer_rows(table: &Table) -> AutoMarkResult<Vec<AnswerRow>> {
    let survey_id = Some(table.column_index(COL_SURVEY_ID)?);
    let survey_name = Some(table.column_index(COL_SURVEY_NAME)?);
    let question_number = Some(table.column_index(COL_QUESTION_NUMBER)?);
    let question_text = Some(table.column_index(COL_QUESTION_TEXT)?);
    let answer = Some(table.column_index(COL_ANSWER)?);
    let answer_by_percent = table.optional_column_index(COL_ANSWER_BY_PERCENT);
    let correctness = table.optional_column_index(COL_CORRECTNESS);

    let res: Vec<AnswerRow> = table
        .filled_rows()
        .map(|(_, row)| AnswerRow {
            survey_id: cell(row, survey_id),
            survey_name: cell(row, survey_name),
            question_number: cell(row, question_number),
            question_text: cell(row, question_text),
            answer: cell(row, answer),
            answer_by_percent: cell(row, answer_by_percent),
            correctness: cell(row, correctness),
        })
        .collect();
    debug!("read_answer_rows: {}: {} rows", table.path, res.len());
    Ok(res)
}

pub fn read_reference_questions(table: &Table) -> AutoMarkResult<Vec<ReferenceQuestion>> {
    let series = Some(table.column_index(COL_SERIES)?);
    let question_id = Some(table.column_index(COL_QUESTION_ID)?);
    let question = Some(table.column_index(COL_QUESTION)?);
    let batch_number = Some(table.column_index(COL_BATCH_NUMBER)?);
    let correct_answer = Some(table.column_index(COL_CORRECT_ANSWER)?);
    let very_wrong_answer = table.optional_column_index(COL_VERY_WRONG_ANSWER);

    let mut res: Vec<ReferenceQuestion> = Vec::new();
    for (lineno, row) in table.filled_rows() {
        let series_label = cell(row, series);
        let s = SurveySeries::from_label(&series_label).context(UnknownSeriesSnafu {
            series: series_label.clone(),
            path: table.path.clone(),
            lineno,
        })?;
        res.push(ReferenceQuestion {
            series: s,
            question_id: cell(row, question_id),
            question_text: cell(row, question),
            batch_number: cell(row, batch_number),
            correct_answer: cell(row, correct_answer),
            very_wrong_answer: cell(row, very_wrong_answer),
        });
    }
    debug!(
        "read_reference_questions: {}: {} reference questions",
        table.path,
        res.len()
    );
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(header: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            path: "test".to_string(),
            header: header.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn answer_rows() {
        let t = table(
            &["Answer", " Survey ID ", "Survey Name", "Question number", "Question text"],
            &[
                &["14 pounds", "12", "World Views 3", "1", "How heavy?"],
                &["", "", "", "", ""],
                &["15 pounds", "12", "World Views 3"],
            ],
        );
        let rows = read_answer_rows(&t).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].answer, "14 pounds");
        assert_eq!(rows[0].survey_id, "12");
        assert_eq!(rows[0].correctness, "");
        // Short rows are padded with empty cells.
        assert_eq!(rows[1].question_text, "");
    }

    #[test]
    fn missing_column() {
        let t = table(&["Answer"], &[]);
        let err = read_answer_rows(&t).unwrap_err();
        assert_eq!(err.to_string(), "Missing column Survey ID in test");
    }

    #[test]
    fn reference_questions() {
        let header = [
            "Series",
            "Question ID",
            "Question",
            "Batch number",
            "Correct answer",
        ];
        let t = table(&header, &[&["study", "st-1", "How many?", "12", "14"]]);
        let refs = read_reference_questions(&t).unwrap();
        assert_eq!(refs[0].series, SurveySeries::Study);
        assert_eq!(refs[0].very_wrong_answer, "");

        let t = table(&header, &[&["other", "x-1", "How many?", "12", "14"]]);
        let err = read_reference_questions(&t).unwrap_err();
        assert_eq!(err.to_string(), "Unknown series other on line 2 of test");
    }
}
