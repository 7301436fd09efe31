//! Matrix strategy — adjacency lookup in a square boolean table.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::graph::{Discovery, GraphSearcher};
use crate::types::{SearchError, SearchResult};

/// Square boolean relation keyed by the same labels on both axes.
///
/// `cell(r, c) == true` means an edge from `r` to `c`.
#[derive(Debug, Clone)]
pub struct AdjacencyMatrix {
    labels: Vec<String>,
    cells: Vec<Vec<bool>>,
    index: HashMap<String, usize>,
}

impl AdjacencyMatrix {
    /// Build a matrix, checking that it is square and labels are unique.
    pub fn new(labels: Vec<String>, cells: Vec<Vec<bool>>) -> SearchResult<Self> {
        if cells.len() != labels.len() {
            return Err(SearchError::InvalidMatrix(format!(
                "{} labels but {} rows",
                labels.len(),
                cells.len()
            )));
        }
        for (label, row) in labels.iter().zip(&cells) {
            if row.len() != labels.len() {
                return Err(SearchError::InvalidMatrix(format!(
                    "row {:?} has {} cells, expected {}",
                    label,
                    row.len(),
                    labels.len()
                )));
            }
        }

        let mut index = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), i).is_some() {
                return Err(SearchError::InvalidMatrix(format!(
                    "duplicate label {:?}",
                    label
                )));
            }
        }

        Ok(Self {
            labels,
            cells,
            index,
        })
    }

    /// Build from `(source, target)` edge pairs over the given labels.
    pub fn from_edges(labels: &[&str], edges: &[(&str, &str)]) -> SearchResult<Self> {
        let n = labels.len();
        let mut matrix = Self::new(
            labels.iter().map(|l| l.to_string()).collect(),
            vec![vec![false; n]; n],
        )?;
        for &(src, dst) in edges {
            let r = matrix.position(src)?;
            let c = matrix.position(dst)?;
            matrix.cells[r][c] = true;
        }
        Ok(matrix)
    }

    /// Read a matrix from CSV.
    ///
    /// The header is `<corner>,L1,...,Ln`; each row is `Li,c1,...,cn`, with row
    /// labels in the same order as the header. Cells accept `1`/`0`,
    /// `true`/`false` in any case; empty cells are `false`.
    pub fn from_csv_reader(reader: impl Read) -> SearchResult<Self> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let labels: Vec<String> = rdr
            .headers()?
            .iter()
            .skip(1)
            .map(|h| h.trim().to_string())
            .collect();

        let mut cells = Vec::with_capacity(labels.len());
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            let row_label = record.get(0).map(str::trim).unwrap_or_default();
            match labels.get(i) {
                Some(expected) if expected == row_label => {}
                _ => {
                    return Err(SearchError::InvalidMatrix(format!(
                        "row {} is labelled {:?}, which does not match the header",
                        i, row_label
                    )))
                }
            }
            let row = record
                .iter()
                .skip(1)
                .map(parse_cell)
                .collect::<SearchResult<Vec<bool>>>()?;
            cells.push(row);
        }

        Self::new(labels, cells)
    }

    /// Read a matrix from a CSV file.
    pub fn from_csv_path(path: &Path) -> SearchResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Labels in row/column order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if the matrix has no nodes.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether the edge `src -> dst` exists.
    pub fn has_edge(&self, src: &str, dst: &str) -> SearchResult<bool> {
        Ok(self.cells[self.position(src)?][self.position(dst)?])
    }

    /// Column labels with a truthy cell in `label`'s row, in column order.
    pub fn neighbors(&self, label: &str) -> SearchResult<Vec<String>> {
        let row = &self.cells[self.position(label)?];
        Ok(self
            .labels
            .iter()
            .zip(row)
            .filter(|(_, edge)| **edge)
            .map(|(l, _)| l.clone())
            .collect())
    }

    fn position(&self, label: &str) -> SearchResult<usize> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| SearchError::UnknownNode(label.to_string()))
    }
}

fn parse_cell(raw: &str) -> SearchResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" | "" => Ok(false),
        other => Err(SearchError::InvalidMatrix(format!(
            "cell {:?} is not a boolean",
            other
        ))),
    }
}

/// Discovery over an [`AdjacencyMatrix`]. Records each node label in the order.
#[derive(Debug, Clone)]
pub struct MatrixDiscovery {
    matrix: AdjacencyMatrix,
}

impl MatrixDiscovery {
    pub fn new(matrix: AdjacencyMatrix) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> &AdjacencyMatrix {
        &self.matrix
    }
}

impl Discovery for MatrixDiscovery {
    type Node = String;
    type Payload = String;

    fn visit_and_get_children(
        &mut self,
        node: &String,
        order: &mut Vec<String>,
    ) -> SearchResult<Vec<String>> {
        order.push(node.clone());
        self.matrix.neighbors(node)
    }
}

/// Graph searcher over an adjacency matrix.
pub type MatrixSearcher = GraphSearcher<MatrixDiscovery>;

impl MatrixSearcher {
    /// Create a searcher over `matrix`.
    pub fn from_matrix(matrix: AdjacencyMatrix) -> Self {
        GraphSearcher::new(MatrixDiscovery::new(matrix))
    }
}
