use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::tally::{
    io_common::{rows_from_table, TableColumns},
    *,
};

/// Reads the normalized ballot table from a worksheet. Without a worksheet
/// name, the first worksheet is used.
pub fn read_excel_table(
    path: &str,
    worksheet: Option<&str>,
    columns: &TableColumns,
) -> TallyResult<Vec<TableRow>> {
    let wrange = get_range(path, worksheet)?;
    table_from_range(path, &wrange, columns)
}

fn table_from_range(
    path: &str,
    wrange: &calamine::Range<DataType>,
    columns: &TableColumns,
) -> TallyResult<Vec<TableRow>> {
    let mut iter = wrange.rows();
    let header: Vec<String> = iter
        .next()
        .context(EmptyExcelSnafu { path })?
        .iter()
        .map(|c| cell_to_string(c).trim().to_string())
        .collect();
    debug!("read_excel_table: header: {:?}", header);

    // Spreadsheet rows are numbered from 1, the header included.
    let records: Vec<(usize, Vec<String>)> = iter
        .enumerate()
        .map(|(idx, row)| {
            let cells = row.iter().map(|c| cell_to_string(c).trim().to_string());
            (idx + 2, cells.collect())
        })
        .collect();
    rows_from_table(&header, &records, columns)
}

fn get_range(path: &str, worksheet: Option<&str>) -> TallyResult<calamine::Range<DataType>> {
    debug!(
        "read_excel_table: path: {:?} worksheet: {:?}",
        path, worksheet
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange_r = match worksheet {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?,
    };
    wrange_r.context(OpeningExcelSnafu { path })
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::Empty => "".to_string(),
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        // Spreadsheets commonly store integers as floats.
        DataType::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        x => x.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(cell_to_string(&DataType::Empty), "");
        assert_eq!(cell_to_string(&DataType::Float(2.0)), "2");
        assert_eq!(cell_to_string(&DataType::Float(2.5)), "2.5");
        assert_eq!(cell_to_string(&DataType::Int(3)), "3");
        assert_eq!(
            cell_to_string(&DataType::String("Alien".to_string())),
            "Alien"
        );
    }

    fn sheet(rows: &[&[DataType]]) -> calamine::Range<DataType> {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(1) as u32;
        let mut range = calamine::Range::new((0, 0), (rows.len() as u32 - 1, width - 1));
        for (i, row) in rows.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                range.set_value((i as u32, j as u32), cell.clone());
            }
        }
        range
    }

    fn s(v: &str) -> DataType {
        DataType::String(v.to_string())
    }

    #[test]
    fn reads_worksheet_and_skips_anonymous_rows() {
        let range = sheet(&[
            &[s("Email"), s("Preference"), s("Position")],
            &[s("a@x"), s("Alien"), DataType::Float(1.0)],
            &[DataType::Empty, s("Brazil"), DataType::Float(1.0)],
            &[s("a@x"), s("Brazil"), DataType::Int(2)],
            &[DataType::Empty, s("Alien"), DataType::Float(2.0)],
        ]);
        let rows = table_from_range("votes.xlsx", &range, &TableColumns::default()).unwrap();
        let got: Vec<(&str, &str, u32)> = rows
            .iter()
            .map(|r| (r.voter.as_str(), r.candidate.as_str(), r.rank))
            .collect();
        assert_eq!(got, vec![("a@x", "Alien", 1), ("a@x", "Brazil", 2)]);
    }

    #[test]
    fn bad_rank_reports_the_spreadsheet_row() {
        let range = sheet(&[
            &[s("Email"), s("Preference"), s("Position")],
            &[s("a@x"), s("Alien"), DataType::Float(1.5)],
        ]);
        let res = table_from_range("votes.xlsx", &range, &TableColumns::default());
        assert!(matches!(res, Err(TallyError::BadRank { lineno: 2, .. })));
    }

    #[test]
    fn missing_workbook() {
        let res = read_excel_table("/nonexistent/votes.xlsx", None, &TableColumns::default());
        assert!(matches!(res, Err(TallyError::OpeningExcel { .. })));
    }
}
