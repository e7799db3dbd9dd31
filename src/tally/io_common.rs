use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::tally::*;

/// The names of the columns holding the voter, the candidate and the rank.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TableColumns {
    pub voter: String,
    pub candidate: String,
    pub rank: String,
}

impl Default for TableColumns {
    fn default() -> Self {
        TableColumns {
            voter: "Email".to_string(),
            candidate: "Preference".to_string(),
            rank: "Position".to_string(),
        }
    }
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

pub fn make_default_id(path: &str) -> impl Fn(usize) -> String {
    let simplified_file_name = simplify_file_name(path);
    move |lineno| format!("{}-{:08}", simplified_file_name, lineno)
}

pub fn column_index(header: &[String], column: &str) -> TallyResult<usize> {
    header
        .iter()
        .position(|h| h == column)
        .context(MissingColumnSnafu { column })
}

pub fn parse_rank(lineno: usize, content: &str) -> TallyResult<u32> {
    let s = content.trim();
    s.parse::<u32>()
        .ok()
        .or_else(|| {
            s.parse::<f64>()
                .ok()
                .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= u32::MAX as f64)
                .map(|f| f as u32)
        })
        .filter(|rank| *rank >= 1)
        .context(BadRankSnafu { lineno, content })
}

/// Builds the rows of a table given as a header and string records.
/// Records without a candidate or without a voter are skipped.
pub fn rows_from_table(
    header: &[String],
    records: &[(usize, Vec<String>)],
    columns: &TableColumns,
) -> TallyResult<Vec<TableRow>> {
    let voter_idx = column_index(header, &columns.voter)?;
    let candidate_idx = column_index(header, &columns.candidate)?;
    let rank_idx = column_index(header, &columns.rank)?;

    let mut res: Vec<TableRow> = Vec::new();
    for (lineno, record) in records.iter() {
        let candidate = record.get(candidate_idx).cloned().unwrap_or_default();
        if candidate.is_empty() {
            debug!("rows_from_table: line {:?}: no candidate, skipping", lineno);
            continue;
        }
        let voter = record.get(voter_idx).cloned().unwrap_or_default();
        if voter.is_empty() {
            debug!("rows_from_table: line {:?}: no voter, skipping", lineno);
            continue;
        }
        let rank_s = record.get(rank_idx).map(String::as_str).unwrap_or("");
        let rank = parse_rank(*lineno, rank_s)?;
        res.push(TableRow {
            voter,
            candidate,
            rank,
            points: None,
            submitted: None,
        });
    }
    Ok(res)
}

/// One ballot per voter, in order of first appearance of the voter.
/// The choices of each voter are sorted by rank.
pub fn assemble_ballots(rows: &[TableRow]) -> Vec<Ballot> {
    let mut voters: Vec<&String> = Vec::new();
    let mut by_voter: HashMap<&String, Vec<&TableRow>> = HashMap::new();
    for row in rows.iter() {
        by_voter
            .entry(&row.voter)
            .or_insert_with(|| {
                voters.push(&row.voter);
                Vec::new()
            })
            .push(row);
    }

    let mut ballots: Vec<Ballot> = Vec::new();
    for voter in voters {
        let mut voter_rows = by_voter.remove(voter).unwrap_or_default();
        voter_rows.sort_by_key(|r| r.rank);
        let choices: Vec<String> = voter_rows.iter().map(|r| r.candidate.clone()).collect();
        debug!("assemble_ballots: voter {:?}: {:?}", voter, choices);
        ballots.push(Ballot::new(&choices));
    }
    ballots
}

/// The distinct candidate names of the table, in order of first appearance.
pub fn table_candidates(rows: &[TableRow]) -> Vec<String> {
    let mut seen: HashSet<&String> = HashSet::new();
    rows.iter()
        .filter(|r| seen.insert(&r.candidate))
        .map(|r| r.candidate.clone())
        .collect()
}

/// Scales the positions between 1 (first position) and 0 (last position
/// found in the table). With a single position, every row gets 1.
pub fn assign_points(rows: &mut [TableRow]) {
    let max_rank = rows.iter().map(|r| r.rank).max().unwrap_or(0);
    for row in rows.iter_mut() {
        row.points = Some(if max_rank > 1 {
            f64::from(max_rank - row.rank) / f64::from(max_rank - 1)
        } else {
            1.0
        });
    }
}
