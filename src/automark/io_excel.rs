// Primitives for reading Excel (xlsx) files.

use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::automark::{io_common::Table, *};

fn read_cell(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        // Identifiers and question numbers are often stored as floats.
        DataType::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        DataType::Float(f) => f.to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::Bool(b) => b.to_string(),
        // "#N/A" and the like
        DataType::Error(e) => e.to_string(),
        DataType::Empty => "".to_string(),
        other => format!("{:?}", other),
    }
}

fn get_range(path: &str, cfs: &FileSource) -> AutoMarkResult<calamine::Range<DataType>> {
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        path, &cfs.excel_worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = cfs.excel_worksheet_name.as_deref() {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                path,
                name: worksheet_name,
            })?
            .context(OpeningExcelSnafu { path })?;
        return Ok(wrange);
    }

    let all_worksheets = workbook.worksheets();
    match all_worksheets.as_slice() {
        [] => EmptyExcelSnafu { path }.fail(),
        [(worksheet_name, wrange)] => {
            debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet_name);
            Ok(wrange.clone())
        }
        _ => AmbiguousWorksheetSnafu { path }.fail(),
    }
}

pub fn read_excel_table(path: &str, cfs: &FileSource) -> AutoMarkResult<Table> {
    let wrange = get_range(path, cfs)?;

    let mut iter = wrange.rows();
    let header: Vec<String> = iter
        .next()
        .context(EmptyExcelSnafu { path })?
        .iter()
        .map(read_cell)
        .collect();
    debug!("read_excel_table: header: {:?}", header);

    let rows: Vec<Vec<String>> = iter.map(|row| row.iter().map(read_cell).collect()).collect();
    Ok(Table {
        path: path.to_string(),
        header,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(read_cell(&DataType::Float(12.0)), "12");
        assert_eq!(read_cell(&DataType::Float(0.125)), "0.125");
        assert_eq!(read_cell(&DataType::Int(7)), "7");
        assert_eq!(read_cell(&DataType::String("30-40%".to_string())), "30-40%");
        assert_eq!(read_cell(&DataType::Empty), "");
    }
}
