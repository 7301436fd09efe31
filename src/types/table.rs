//! Tabular side data scraped from pages and consumed by the puzzle flow.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;

use super::error::SearchResult;

/// A rectangular table of string cells under named columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given column names.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with empty cells, long rows truncated.
    pub fn push_row<S: Into<String>>(&mut self, row: impl IntoIterator<Item = S>) {
        let mut cells: Vec<String> = row.into_iter().map(Into::into).collect();
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows in insertion order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one column in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    /// Stack tables in order.
    ///
    /// The result's columns are the ordered union of every input's columns.
    /// Cells for columns an input lacks are left empty.
    pub fn concat<'a>(tables: impl IntoIterator<Item = &'a Table>) -> Table {
        let tables: Vec<&Table> = tables.into_iter().collect();

        // A repeated name keeps one output column per occurrence: the k-th
        // "clue" of any input lands in the k-th "clue" of the output.
        let mut columns: Vec<String> = Vec::new();
        let mappings: Vec<Vec<usize>> = tables
            .iter()
            .map(|table| {
                let mut seen: HashMap<&str, usize> = HashMap::new();
                table
                    .columns
                    .iter()
                    .map(|col| {
                        let nth = seen.entry(col.as_str()).or_insert(0);
                        let slot = columns
                            .iter()
                            .enumerate()
                            .filter(|(_, existing)| *existing == col)
                            .map(|(i, _)| i)
                            .nth(*nth);
                        *nth += 1;
                        slot.unwrap_or_else(|| {
                            columns.push(col.clone());
                            columns.len() - 1
                        })
                    })
                    .collect()
            })
            .collect();

        let mut out = Table {
            columns,
            rows: Vec::new(),
        };
        for (table, mapping) in tables.iter().zip(&mappings) {
            for row in &table.rows {
                let mut cells = vec![String::new(); out.columns.len()];
                for (i, cell) in row.iter().enumerate() {
                    cells[mapping[i]] = cell.clone();
                }
                out.rows.push(cells);
            }
        }
        out
    }

    /// Read a table from CSV; the first record is the header.
    pub fn from_csv_reader(reader: impl Read) -> SearchResult<Self> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let mut table = Table::new(rdr.headers()?.iter());
        for record in rdr.records() {
            table.push_row(record?.iter());
        }
        Ok(table)
    }

    /// Read a table from a CSV file.
    pub fn from_csv_path(path: &Path) -> SearchResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Write the table as CSV with a header record.
    pub fn write_csv(&self, writer: impl Write) -> SearchResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
