//! Delimited numeric tables, one series per column.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::{PlotError, PlotResult};

/// Columns of numbers with their header labels.
///
/// Empty cells read as `NaN`, so columns of different lengths can share a file.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub columns: Vec<Vec<f64>>,
}

impl DataTable {
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn nrows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Finite values of column `index`.
    pub fn finite(&self, index: usize) -> Vec<f64> {
        self.columns
            .get(index)
            .map(|c| c.iter().copied().filter(|v| v.is_finite()).collect())
            .unwrap_or_default()
    }
}

pub fn read_table(path: impl AsRef<Path>, delimiter: char) -> PlotResult<DataTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(e.kind(), format!("Error opening table {}: {}", path.display(), e))
    })?;
    let table = read_table_from_reader(BufReader::new(file), delimiter)?;
    debug!(
        "read {} columns x {} rows from {}",
        table.ncols(),
        table.nrows(),
        path.display()
    );
    Ok(table)
}

/// Parse a table. Blank lines and lines starting with `#` are skipped. A
/// first row that is not entirely numeric is the header; otherwise columns
/// are named `col1`, `col2`, ...
pub fn read_table_from_reader<R: BufRead>(reader: R, delimiter: char) -> PlotResult<DataTable> {
    let mut headers: Option<Vec<String>> = None;
    let mut columns: Vec<Vec<f64>> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();

        if headers.is_none() && columns.is_empty() {
            if fields.iter().any(|f| !f.is_empty() && f.parse::<f64>().is_err()) {
                headers = Some(fields.iter().map(|f| f.to_string()).collect());
                columns = vec![Vec::new(); fields.len()];
                continue;
            }
            headers = Some((1..=fields.len()).map(|n| format!("col{}", n)).collect());
            columns = vec![Vec::new(); fields.len()];
        }

        if fields.len() != columns.len() {
            return Err(PlotError::InvalidData(format!(
                "Malformed line {} (expected {} columns, got {}): {}",
                i + 1,
                columns.len(),
                fields.len(),
                line
            )));
        }
        for (col, field) in fields.iter().enumerate() {
            let value = if field.is_empty() {
                f64::NAN
            } else {
                field.parse::<f64>().map_err(|_| {
                    PlotError::InvalidData(format!(
                        "Invalid value '{}' at line {}, column {}",
                        field,
                        i + 1,
                        col + 1
                    ))
                })?
            };
            columns[col].push(value);
        }
    }

    let headers = headers.ok_or(PlotError::EmptyData)?;
    Ok(DataTable { headers, columns })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_header_and_columns() {
        let data = "# run 7\nx,signal,background\n0,1.5,0.5\n1,2.5,\n\n2,3.5,0.7\n";
        let table = read_table_from_reader(Cursor::new(data), ',').unwrap();
        assert_eq!(table.headers, ["x", "signal", "background"]);
        assert_eq!(table.nrows(), 3);
        assert_eq!(table.columns[1], vec![1.5, 2.5, 3.5]);
        assert!(table.columns[2][1].is_nan());
        assert_eq!(table.finite(2), vec![0.5, 0.7]);
    }

    #[test]
    fn test_headerless_table() {
        let table = read_table_from_reader(Cursor::new("1\t2\n3\t4\n"), '\t').unwrap();
        assert_eq!(table.headers, ["col1", "col2"]);
        assert_eq!(table.columns[0], vec![1.0, 3.0]);
    }

    #[test]
    fn test_malformed_rows() {
        let err = read_table_from_reader(Cursor::new("a,b\n1,2\n3\n"), ',').unwrap_err();
        assert!(err.to_string().contains("Malformed line 3"));
        let err = read_table_from_reader(Cursor::new("a,b\n1,two\n"), ',').unwrap_err();
        assert!(err.to_string().contains("Invalid value 'two' at line 2, column 2"));
    }

    #[test]
    fn test_empty_input() {
        let err = read_table_from_reader(Cursor::new("# nothing\n"), ',').unwrap_err();
        assert!(matches!(err, PlotError::EmptyData));
    }
}
