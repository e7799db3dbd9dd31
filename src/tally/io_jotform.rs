// Decoding the raw export of a ranking survey, where a single cell holds the
// full ranking of a respondent, one "<position>: <name>" line per choice.

use std::io;

use crate::tally::{
    io_common::{assign_points, column_index, make_default_id, parse_rank},
    *,
};

pub const DEFAULT_PREFERENCE_COLUMN: &str = "Ordina i film in base alle tue preferenze";

const SUBMISSION_DATE_COLUMN: &str = "Submission Date";

pub fn read_jotform(
    path: &str,
    preference_column: &str,
    voter_column: &str,
) -> TallyResult<Vec<TableRow>> {
    let rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    parse_jotform(rdr, preference_column, voter_column, make_default_id(path))
}

fn parse_jotform<R: io::Read>(
    mut rdr: csv::Reader<R>,
    preference_column: &str,
    voter_column: &str,
    default_id: impl Fn(usize) -> String,
) -> TallyResult<Vec<TableRow>> {
    let header: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu {})?
        .iter()
        .map(|s| s.trim().to_string())
        .collect();
    debug!("parse_jotform: header: {:?}", header);
    let pref_idx = column_index(&header, preference_column)?;
    let voter_idx_o = column_index(&header, voter_column).ok();
    if voter_idx_o.is_none() {
        warn!(
            "parse_jotform: no column {:?}, respondents are identified by their line",
            voter_column
        );
    }
    let date_idx_o = column_index(&header, SUBMISSION_DATE_COLUMN).ok();

    let mut res: Vec<TableRow> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu {})?;
        let voter = voter_idx_o
            .and_then(|i| line.get(i))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default_id(lineno));
        let submitted = date_idx_o
            .and_then(|i| line.get(i))
            .map(|s| s.trim().to_string());
        let cell = line.get(pref_idx).unwrap_or("");
        for item in cell.lines().map(str::trim).filter(|s| !s.is_empty()) {
            let (rank, candidate) = parse_choice(lineno, item)?;
            res.push(TableRow {
                voter: voter.clone(),
                candidate,
                rank,
                points: None,
                submitted: submitted.clone(),
            });
        }
    }
    debug!("parse_jotform: {:?} choices", res.len());
    assign_points(&mut res);
    Ok(res)
}

fn parse_choice(lineno: usize, item: &str) -> TallyResult<(u32, String)> {
    let (position, name) = item
        .split_once(':')
        .context(BadChoiceSnafu { lineno, content: item })?;
    let name = name.trim();
    ensure!(
        !name.is_empty(),
        BadChoiceSnafu {
            lineno,
            content: item
        }
    );
    let rank = parse_rank(lineno, position)?;
    Ok((rank, name.to_string()))
}
