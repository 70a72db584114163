use clap::Parser;

/// This is a program to mark the answers of imported surveys against curated factual answers.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON file describing the answers and facts sources.
    /// For more information about the file format, read the manual of the answer_matching crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, optional) The table of answer options exported from the survey platform.
    /// Setting this option overrides the answers source of the --config option.
    #[clap(short, long, value_parser)]
    pub answers: Option<String>,

    /// (file path, optional) The table of curated reference questions and their factual answers.
    /// Setting this option overrides the facts source of the --config option.
    #[clap(short, long, value_parser)]
    pub facts: Option<String>,

    /// (csv or xlsx) The type of the --answers and --facts files. By default, it is guessed from
    /// the file extension.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using Excel files with several worksheets, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the marked answers will be written in JSON
    /// format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the expected marked answers in JSON format. If
    /// provided, automark will check that its output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
