use crate::args::Args;
use crate::tally::io_common::{simplify_file_name, TableColumns};
use crate::tally::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use std::path::Path;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "contestDate")]
    pub contest_date: Option<String>,
    #[serde(rename = "contestJurisdiction")]
    pub contest_jurisdiction: Option<String>,
    #[serde(rename = "contestOffice")]
    pub contest_office: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    pub date: Option<String>,
    pub jurisdiction: Option<String>,
    pub office: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct BallotSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "voterColumn")]
    pub voter_column: Option<String>,
    #[serde(rename = "candidateColumn")]
    pub candidate_column: Option<String>,
    #[serde(rename = "rankColumn")]
    pub rank_column: Option<String>,
    // Only for the jotform provider
    #[serde(rename = "preferenceColumn")]
    pub preference_column: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl BallotSource {
    pub fn columns(&self) -> TableColumns {
        let default = TableColumns::default();
        TableColumns {
            voter: self.voter_column.clone().unwrap_or(default.voter),
            candidate: self.candidate_column.clone().unwrap_or(default.candidate),
            rank: self.rank_column.clone().unwrap_or(default.rank),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ConfigCandidate {
    pub name: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "ballotSources", default)]
    pub ballot_sources: Vec<BallotSource>,
    pub candidates: Option<Vec<ConfigCandidate>>,
}

pub fn parse_config(contents: &str) -> TallyResult<ElectionConfig> {
    serde_json::from_str(contents).context(ParsingJsonSnafu {})
}

/// Reads a configuration file. The file paths of the sources are resolved
/// against the directory of the configuration.
pub fn read_config(path: &str) -> TallyResult<ElectionConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let mut config = parse_config(&contents)?;
    let root = Path::new(path)
        .parent()
        .context(MissingParentDirSnafu { path })?;
    for source in config.ballot_sources.iter_mut() {
        source.file_path = root.join(&source.file_path).display().to_string();
    }
    Ok(config)
}

/// Assembles the configuration of a run from the configuration file (if any)
/// and the command line. The command line takes precedence.
pub fn resolve_config(args: &Args) -> TallyResult<ElectionConfig> {
    let mut config = match args.config.as_ref() {
        Some(p) => read_config(p)?,
        None => ElectionConfig {
            output_settings: OutputSettings {
                contest_name: args
                    .input
                    .as_deref()
                    .map(simplify_file_name)
                    .unwrap_or_else(|| "contest".to_string()),
                ..OutputSettings::default()
            },
            ballot_sources: Vec::new(),
            candidates: None,
        },
    };

    if let Some(input) = args.input.as_ref() {
        config.ballot_sources = vec![BallotSource {
            provider: args.input_type.clone().unwrap_or_else(|| "json".to_string()),
            file_path: input.clone(),
            ..BallotSource::default()
        }];
    } else if let Some(input_type) = args.input_type.as_ref() {
        for source in config.ballot_sources.iter_mut() {
            source.provider = input_type.clone();
        }
    }

    for source in config.ballot_sources.iter_mut() {
        if args.voter_column.is_some() {
            source.voter_column = args.voter_column.clone();
        }
        if args.candidate_column.is_some() {
            source.candidate_column = args.candidate_column.clone();
        }
        if args.rank_column.is_some() {
            source.rank_column = args.rank_column.clone();
        }
        if args.preference_column.is_some() {
            source.preference_column = args.preference_column.clone();
        }
        if args.excel_worksheet_name.is_some() {
            source.excel_worksheet_name = args.excel_worksheet_name.clone();
        }
    }
    debug!("resolve_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> TallyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
