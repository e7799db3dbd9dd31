use log::{debug, info, warn};

use schulze_voting::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::tally::config_reader::*;
use crate::tally::io_common::{assemble_ballots, table_candidates};

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;
mod io_jotform;
mod io_json;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TallyError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Worksheet {name} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("The spreadsheet {path} has no content"))]
    EmptyExcel { path: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON content"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error serializing JSON content"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading CSV content"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Column {column:?} not found"))]
    MissingColumn { column: String },
    #[snafu(display("Row {lineno}: cannot read cell {content}"))]
    BadCell { lineno: usize, content: String },
    #[snafu(display("Row {lineno}: rank {content:?} is not a positive integer"))]
    BadRank { lineno: usize, content: String },
    #[snafu(display("Row {lineno}: choice {content:?} is not of the form '<position>: <name>'"))]
    BadChoice { lineno: usize, content: String },
    #[snafu(display("The configuration file {path} has no parent directory"))]
    MissingParentDir { path: String },
    #[snafu(display("No ballot source: use --input or a configuration file with ballotSources"))]
    NoBallotSource {},
    #[snafu(display("Provider not implemented: {provider:?}"))]
    UnknownProvider { provider: String },
    #[snafu(display("Tabulation failed: {source}"))]
    Voting { source: VotingErrors },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TallyResult<T> = Result<T, TallyError>;

/// One row of the normalized ballot table: a voter ranked a candidate at a position.
#[derive(PartialEq, Debug, Clone)]
pub struct TableRow {
    pub voter: String,
    pub candidate: String,
    pub rank: u32,
    /// Only filled by the survey decoder.
    pub points: Option<f64>,
    pub submitted: Option<String>,
}

/// The normalized table, as written by `--normalized-out`.
#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
struct NormalizedRecord {
    #[serde(rename = "Submission Date", skip_serializing_if = "Option::is_none")]
    submitted: Option<String>,
    #[serde(rename = "Email")]
    voter: String,
    #[serde(rename = "Preference")]
    candidate: String,
    #[serde(rename = "Position")]
    rank: u32,
    #[serde(rename = "Points", skip_serializing_if = "Option::is_none")]
    points: Option<f64>,
}

/// Where the results of a run are written, besides the ranking on stdout.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RunOptions {
    pub out: Option<String>,
    pub normalized_out: Option<String>,
    pub reference: Option<String>,
}

fn matrix_to_json(candidates: &[String], rows: &[Vec<f64>]) -> JSValue {
    let mut m: JSMap<String, JSValue> = JSMap::new();
    for (name, row) in candidates.iter().zip(rows.iter()) {
        let mut inner: JSMap<String, JSValue> = JSMap::new();
        for (other, value) in candidates.iter().zip(row.iter()) {
            if other != name {
                inner.insert(other.clone(), json!(value));
            }
        }
        m.insert(name.clone(), JSValue::Object(inner));
    }
    JSValue::Object(m)
}

fn result_to_json(rs: &SchulzeResult) -> JSValue {
    let ranking: Vec<JSValue> = rs
        .tiers
        .iter()
        .map(|t| json!({"rank": t.rank, "candidates": t.candidates, "score": t.score}))
        .collect();
    json!({
        "candidates": rs.candidates,
        "ranking": ranking,
        "pairwise": matrix_to_json(&rs.candidates, &rs.pairwise),
        "strongestPaths": matrix_to_json(&rs.candidates, &rs.strongest_paths),
    })
}

fn build_summary_js(config: &ElectionConfig, rs: &SchulzeResult) -> JSValue {
    let c = OutputConfig {
        contest: config.output_settings.contest_name.clone(),
        date: config.output_settings.contest_date.clone(),
        jurisdiction: config.output_settings.contest_jurisdiction.clone(),
        office: config.output_settings.contest_office.clone(),
    };
    json!({
        "config": c,
        "results": result_to_json(rs) })
}

fn read_table(source: &BallotSource) -> TallyResult<Vec<TableRow>> {
    let path = source.file_path.clone();
    info!("Attempting to read ballot file {:?}", path);
    let columns = source.columns();
    let rows = match source.provider.as_str() {
        "json" => io_json::read_json_table(&path, &columns),
        "csv" => io_csv::read_csv_table(&path, &columns),
        "excel" => io_excel::read_excel_table(
            &path,
            source.excel_worksheet_name.as_deref(),
            &columns,
        ),
        "jotform" => io_jotform::read_jotform(
            &path,
            source
                .preference_column
                .as_deref()
                .unwrap_or(io_jotform::DEFAULT_PREFERENCE_COLUMN),
            &columns.voter,
        ),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }?;
    debug!("read_table: {:?}: {:?} rows", path, rows.len());
    Ok(rows)
}

fn write_normalized(path: &str, rows: &[TableRow]) -> TallyResult<()> {
    let records: Vec<NormalizedRecord> = rows
        .iter()
        .map(|r| NormalizedRecord {
            submitted: r.submitted.clone(),
            voter: r.voter.clone(),
            candidate: r.candidate.clone(),
            rank: r.rank,
            points: r.points,
        })
        .collect();
    let contents = serde_json::to_string_pretty(&records).context(SerializingJsonSnafu {})?;
    fs::write(path, contents).context(WritingFileSnafu { path })?;
    info!("Normalized table written to {:?}", path);
    Ok(())
}

fn summary_path(config: &ElectionConfig, opts: &RunOptions) -> Option<String> {
    if opts.out.is_some() {
        return opts.out.clone();
    }
    config
        .output_settings
        .output_directory
        .as_ref()
        .map(|dir| {
            let file_name = format!("{}_summary.json", config.output_settings.contest_name);
            Path::new(dir).join(file_name).display().to_string()
        })
}

/// Reads all the ballot sources of the configuration and ranks the candidates.
pub fn run_election(config: &ElectionConfig, opts: &RunOptions) -> TallyResult<SchulzeResult> {
    ensure!(!config.ballot_sources.is_empty(), NoBallotSourceSnafu {});
    info!("config: {:?}", config);

    let mut rows: Vec<TableRow> = Vec::new();
    for source in config.ballot_sources.iter() {
        let mut file_rows = read_table(source)?;
        rows.append(&mut file_rows);
    }
    if rows.is_empty() {
        warn!("run_election: no ballot found in the sources");
    }

    if let Some(p) = opts.normalized_out.as_ref() {
        write_normalized(p, &rows)?;
    }

    let ballots = assemble_ballots(&rows);
    let candidates: Vec<String> = match config.candidates.as_ref() {
        Some(cs) => cs.iter().map(|c| c.name.clone()).collect(),
        None => table_candidates(&rows),
    };
    info!(
        "run_election: {:?} ballots, {:?} candidates",
        ballots.len(),
        candidates.len()
    );

    let result = run_schulze(&ballots, Some(&candidates)).context(VotingSnafu {})?;

    print!("{}", render_ranking(&result.ranking()));

    let result_js = build_summary_js(config, &result);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(SerializingJsonSnafu {})?;

    match summary_path(config, opts) {
        Some(p) if p == "stdout" => {
            println!("{}", pretty_js_stats);
        }
        Some(p) => {
            fs::write(&p, &pretty_js_stats).context(WritingFileSnafu { path: p.clone() })?;
            info!("Summary written to {:?}", p);
        }
        None => {}
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = opts.reference.as_ref() {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(SerializingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return ReferenceMismatchSnafu {}.fail();
        }
    }

    Ok(result)
}
