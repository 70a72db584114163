use crate::automark::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

pub const PROVIDER_CSV: &str = "csv";
pub const PROVIDER_XLSX: &str = "xlsx";

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl FileSource {
    /// A source for the given file, guessing the provider from the extension when it
    /// is not specified.
    pub fn from_path(file_path: &str, provider: Option<String>) -> FileSource {
        let provider = provider.unwrap_or_else(|| {
            let is_excel = Path::new(file_path)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
                .unwrap_or(false);
            let provider = if is_excel { PROVIDER_XLSX } else { PROVIDER_CSV };
            provider.to_string()
        });
        FileSource {
            provider,
            file_path: file_path.to_string(),
            excel_worksheet_name: None,
        }
    }

    /// The paths of the configuration file are relative to its directory.
    pub fn resolved(&self, root_dir: &Path) -> FileSource {
        let p: PathBuf = root_dir.join(&self.file_path);
        FileSource {
            file_path: p.display().to_string(),
            ..self.clone()
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct MarkingConfig {
    #[serde(rename = "answersSource")]
    pub answers_source: Option<FileSource>,
    #[serde(rename = "factsSource")]
    pub facts_source: Option<FileSource>,
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
}

impl MarkingConfig {
    pub fn resolved(&self, root_dir: &Path) -> MarkingConfig {
        let output_path = match &self.output_settings.output_path {
            Some(p) if p != STDOUT => Some(root_dir.join(p).display().to_string()),
            x => x.clone(),
        };
        MarkingConfig {
            answers_source: self.answers_source.as_ref().map(|fs| fs.resolved(root_dir)),
            facts_source: self.facts_source.as_ref().map(|fs| fs.resolved(root_dir)),
            output_settings: OutputSettings { output_path },
        }
    }
}

pub fn read_config(path: &str) -> AutoMarkResult<MarkingConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: MarkingConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> AutoMarkResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config() {
        let js = r#"{
            "answersSource": { "provider": "csv", "filePath": "answers.csv" },
            "factsSource": {
                "provider": "xlsx",
                "filePath": "facts.xlsx",
                "excelWorksheetName": "facts"
            }
        }"#;
        let config: MarkingConfig = serde_json::from_str(js).unwrap();
        let resolved = config.resolved(Path::new("/data"));
        let answers = resolved.answers_source.unwrap();
        assert_eq!(answers.provider, "csv");
        assert_eq!(answers.file_path, "/data/answers.csv");
        let facts = resolved.facts_source.unwrap();
        assert_eq!(facts.excel_worksheet_name, Some("facts".to_string()));
        assert_eq!(resolved.output_settings.output_path, None);
    }

    #[test]
    fn provider_from_extension() {
        assert_eq!(FileSource::from_path("a/b.XLSX", None).provider, "xlsx");
        assert_eq!(FileSource::from_path("a/b.csv", None).provider, "csv");
        assert_eq!(FileSource::from_path("a/b", None).provider, "csv");
        assert_eq!(
            FileSource::from_path("a/b.csv", Some("xlsx".to_string())).provider,
            "xlsx"
        );
    }
}
