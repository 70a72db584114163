/*!

This is the long-form manual for `answer_matching` and `automark`.

## Matching rules

An answer option matches a factual answer when:
* both are the same after normalization (case, accents and most punctuation are ignored), or
* the answer option is a number equal to the first number of the factual answer, or
* the answer option is a range (`"30-40%"`) containing the first number of the factual answer.

Numbers are read from the text of the answer option: `"14 pounds"`, `"$14 billion"`, `"About 14"`
are all read as `14`. Percentages are divided by 100, so that `"14%"` and `"0.14"` are the same.
Only the first number is read: `"Between 300 and 700"` is read as `300`.

## Auto-marking

Each answer option of a question receives a correctness code:
* `1` correct: the answer option matches the correct answer
* `3` very wrong: the answer option matches the curated very wrong answer. If no very wrong answer
  was curated, an answer option that is more than one answer option away from the correct answer
  is very wrong. This only applies to questions where all the answer options are numbers.
* `2` wrong: all the other answer options

When the answer options of a question were already marked by hand, the manual marks are kept.

## Input formats

`automark` reads two tables. Both can be provided as CSV (`csv`) or Excel (`xlsx`) files.
The first row of each table contains the column titles. The order of the columns does not matter.

### Answers

One row per answer option of a question, as exported from the survey platform.

| column | content |
| ------ | ------- |
| `Survey ID` | identifier of the survey |
| `Survey Name` | title of the survey, for example `World Views 123` |
| `Question number` | position of the question in the survey |
| `Question text` | the text of the question |
| `Answer` | the text of the answer option |
| `Answer by percent` | (optional) share of respondents, for example `12.50%` |
| `Correctness of answer option` | (optional) manual mark: `1`, `2` or `3` |

### Facts

One row per curated reference question.

| column | content |
| ------ | ------- |
| `Series` | `world_views`, `country_views` or `study` |
| `Question ID` | identifier of the reference question |
| `Question` | the text of the question, compared with `Question text` |
| `Batch number` | the batch of the survey series, for example `1-80` or `1/c383` |
| `Correct answer` | the factual correct answer |
| `Very wrong answer` | (optional) the factual very wrong answer |

## Survey names

The batch number is read from the survey name:
* `World Views 123` or `Worldviews 123`: world views batch `123`. The batches 1 to 80 share their
  questions, and are all reported as batch `1-80`.
* `Country Views 123`: country views batch `123`. The country views 383, 384 and 385 were also
  run as study batches `1/c383`, `2/c384` and `3/c385`.
* `Study Survey 123` or `Study 123`: study batch `123`.

## Configuration file

Instead of command line flags, a JSON configuration file can be provided with `--config`:

```json
{
  "answersSource": { "provider": "csv", "filePath": "answers.csv" },
  "factsSource": { "provider": "xlsx", "filePath": "facts.xlsx", "excelWorksheetName": "facts" },
  "outputSettings": { "outputPath": "marked.json" }
}
```

The file paths are relative to the location of the configuration file.

## Output

The marked answers are written as JSON, one entry per question, in the order of the answers table:

```json
{
  "questions": [
    {
      "surveyId": "101",
      "surveyName": "World Views 90",
      "questionNumber": "1",
      "questionText": "How many people live in extreme poverty?",
      "mappedQuestionId": "wv-90-1",
      "mappingNotes": "",
      "correctAnswerAtTimeOfImport": "Around 700 million",
      "veryWrongAnswerAtTimeOfImport": "",
      "answers": [
        { "answer": "Around 200 million", "autoMarkedCorrectness": "2", "correctness": "2" }
      ],
      "summary": { "correct": "40.00%", "wrong": "40.00%", "veryWrong": "20.00%" }
    }
  ]
}
```

When the question could not be mapped, `mappedQuestionId` is `null` and `mappingNotes` explains
why. `autoMarkedCorrectness` is either a correctness code or the reason why the answer option
could not be marked. `correctness` keeps the manual marks when the question has any.

*/
