// Reading the normalized ballot table stored as CSV.

use std::io;

use crate::tally::{
    io_common::{rows_from_table, TableColumns},
    *,
};

pub fn read_csv_table(path: &str, columns: &TableColumns) -> TallyResult<Vec<TableRow>> {
    let rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    table_from_csv(rdr, columns)
}

fn table_from_csv<R: io::Read>(
    mut rdr: csv::Reader<R>,
    columns: &TableColumns,
) -> TallyResult<Vec<TableRow>> {
    let header: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu {})?
        .iter()
        .map(|s| s.trim().to_string())
        .collect();
    debug!("table_from_csv: header: {:?}", header);

    let mut records: Vec<(usize, Vec<String>)> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is the first line.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu {})?;
        records.push((lineno, line.iter().map(|s| s.trim().to_string()).collect()));
    }
    rows_from_table(&header, &records, columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tally::io_common::assemble_ballots;

    fn parse_csv_table(contents: &str, columns: &TableColumns) -> TallyResult<Vec<TableRow>> {
        let rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(contents.as_bytes());
        table_from_csv(rdr, columns)
    }

    #[test]
    fn reads_table() {
        let rows = parse_csv_table(
            "Email,Preference,Position,Comment\n\
             a@x,Alien,1,\n\
             a@x,Brazil,2,great\n\
             b@x,,1,\n\
             b@x,Brazil,1,\n",
            &TableColumns::default(),
        )
        .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].candidate, "Brazil");
        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[2].voter, "b@x");
    }

    #[test]
    fn bad_rank_reports_the_line() {
        let res = parse_csv_table(
            "Email,Preference,Position\na@x,Alien,1\na@x,Brazil,second\n",
            &TableColumns::default(),
        );
        assert!(matches!(
            res,
            Err(TallyError::BadRank { lineno: 3, .. })
        ));
    }

    #[test]
    fn short_lines_have_no_voter() {
        let rows = parse_csv_table(
            "Preference,Position,Email\nAlien,1\nBrazil,1,b@x\n",
            &TableColumns::default(),
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].voter, "b@x");
    }

    #[test]
    fn anonymous_rows_are_not_merged_into_a_ballot() {
        let rows = parse_csv_table(
            "Email,Preference,Position\n,Alien,1\n,Brazil,2\n,Brazil,1\n,Alien,2\nb@x,Alien,1\n",
            &TableColumns::default(),
        )
        .unwrap();
        let ballots = assemble_ballots(&rows);
        assert_eq!(ballots.len(), 1);
        assert_eq!(ballots[0].candidates, vec!["Alien"]);
        assert!(run_schulze(&ballots, None).is_ok());
    }

    #[test]
    fn missing_file() {
        let res = read_csv_table("/nonexistent/votes.csv", &TableColumns::default());
        assert!(matches!(res, Err(TallyError::CsvOpen { .. })));
    }
}
