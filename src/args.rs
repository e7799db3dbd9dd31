use clap::Parser;

/// This is a ranked ballot tabulation program using the Schulze method.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON file describing the election: the output settings, the ballot sources and
    /// optionally the list of candidates. See the manual of schulze_voting for the file format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing the outcome of an election in JSON format. If provided, schulze will
    /// check that the tabulated output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be written in JSON format to the given
    /// location. Setting this option overrides the output directory that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, optional) If specified, the ballot table read from the inputs is written in JSON format to the given
    /// location, one record per voter and ranked candidate.
    #[clap(long, value_parser)]
    pub normalized_out: Option<String>,

    /// (file path or empty) The file containing the ballots. Setting this option overrides the ballot sources that may
    /// be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default json) The type of the input: json, csv, excel or jotform.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default Email) The column identifying the voter.
    #[clap(long, value_parser)]
    pub voter_column: Option<String>,

    /// (default Preference) The column containing the name of the ranked candidate.
    #[clap(long, value_parser)]
    pub candidate_column: Option<String>,

    /// (default Position) The column containing the rank, starting at 1 for the first choice.
    #[clap(long, value_parser)]
    pub rank_column: Option<String>,

    /// When using a jotform input, the column containing the full ranking of each respondent.
    #[clap(long, value_parser)]
    pub preference_column: Option<String>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
