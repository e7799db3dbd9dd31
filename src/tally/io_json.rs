// Reading the normalized ballot table stored as JSON.

use crate::tally::io_common::{parse_rank, TableColumns};
use crate::tally::*;

pub fn read_json_table(path: &str, columns: &TableColumns) -> TallyResult<Vec<TableRow>> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    parse_json_table(&contents, columns)
}

/// Accepts a list of records, or a table stored column by column where each
/// column maps a row index to a value.
pub fn parse_json_table(contents: &str, columns: &TableColumns) -> TallyResult<Vec<TableRow>> {
    let js: JSValue = serde_json::from_str(contents).context(ParsingJsonSnafu {})?;
    let records: Vec<JSMap<String, JSValue>> = match js {
        JSValue::Array(elts) => {
            let mut records = Vec::new();
            for (idx, elt) in elts.into_iter().enumerate() {
                match elt {
                    JSValue::Object(obj) => records.push(obj),
                    x => BadCellSnafu {
                        lineno: idx + 1,
                        content: x.to_string(),
                    }
                    .fail()?,
                }
            }
            records
        }
        JSValue::Object(cols) => records_from_columns(&cols, columns)?,
        x => whatever!("parse_json_table: expected a list or an object, got {}", x),
    };
    debug!("parse_json_table: {:?} records", records.len());

    let mut res: Vec<TableRow> = Vec::new();
    for (idx, record) in records.iter().enumerate() {
        if let Some(row) = row_from_record(idx + 1, record, columns)? {
            res.push(row);
        }
    }
    Ok(res)
}

fn column<'a>(
    cols: &'a JSMap<String, JSValue>,
    name: &str,
) -> TallyResult<&'a JSMap<String, JSValue>> {
    match cols.get(name) {
        Some(JSValue::Object(c)) => Ok(c),
        Some(x) => BadCellSnafu {
            lineno: 0_usize,
            content: x.to_string(),
        }
        .fail(),
        None => MissingColumnSnafu { column: name }.fail(),
    }
}

// Turns the columnar layout into records, ordering the rows by their index.
fn records_from_columns(
    cols: &JSMap<String, JSValue>,
    columns: &TableColumns,
) -> TallyResult<Vec<JSMap<String, JSValue>>> {
    let selected: Vec<(&String, &JSMap<String, JSValue>)> = vec![
        (&columns.voter, column(cols, &columns.voter)?),
        (&columns.candidate, column(cols, &columns.candidate)?),
        (&columns.rank, column(cols, &columns.rank)?),
    ];

    let mut index: Vec<&String> = selected[1].1.keys().collect();
    index.sort_by_key(|k| (k.parse::<u64>().unwrap_or(u64::MAX), k.to_string()));

    let records = index
        .iter()
        .map(|key| {
            let mut record: JSMap<String, JSValue> = JSMap::new();
            for (name, col) in selected.iter() {
                if let Some(value) = col.get(key.as_str()) {
                    record.insert(name.to_string(), value.clone());
                }
            }
            record
        })
        .collect();
    Ok(records)
}

fn cell_to_string(value: &JSValue) -> Option<String> {
    match value {
        JSValue::String(s) => Some(s.clone()),
        JSValue::Number(n) => Some(n.to_string()),
        JSValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn row_from_record(
    lineno: usize,
    record: &JSMap<String, JSValue>,
    columns: &TableColumns,
) -> TallyResult<Option<TableRow>> {
    let candidate = match record.get(&columns.candidate).and_then(cell_to_string) {
        Some(c) if !c.is_empty() => c,
        _ => {
            debug!("row_from_record: row {:?}: no candidate, skipping", lineno);
            return Ok(None);
        }
    };
    let voter = match record.get(&columns.voter) {
        None | Some(JSValue::Null) => "".to_string(),
        Some(v) => cell_to_string(v).context(BadCellSnafu {
            lineno,
            content: format!("{:?}", record),
        })?,
    };
    if voter.is_empty() {
        debug!("row_from_record: row {:?}: no voter, skipping", lineno);
        return Ok(None);
    }
    let rank = match record.get(&columns.rank) {
        Some(JSValue::Number(n)) => parse_rank(lineno, &n.to_string())?,
        Some(JSValue::String(s)) => parse_rank(lineno, s)?,
        other => {
            return BadRankSnafu {
                lineno,
                content: format!("{:?}", other),
            }
            .fail()
        }
    };
    Ok(Some(TableRow {
        voter,
        candidate,
        rank,
        points: None,
        submitted: None,
    }))
}
