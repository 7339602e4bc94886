// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Sparse parity-check graph.
//!
//! `m` check nodes (rows) and `n` variable nodes (columns). Both adjacency views
//! are kept and always agree. Edges are numbered row-major so every edge of a
//! check occupies a contiguous range of edge ids, which lets the decoder keep
//! its messages in flat `O(edges)` storage.

use crate::errors::{LdpcError, LdpcResult};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;

/// Serialized form: the column count and the per-check variable lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GraphRepr {
    cols: usize,
    rows: Vec<Vec<usize>>,
}

/// Bipartite parity-check graph of an LDPC code.
///
/// # Example
///
/// ```
/// use ldpc_decoder::ParityCheckGraph;
///
/// let h = ParityCheckGraph::from_rows(4, vec![vec![0, 1, 3], vec![1, 2, 3]]).unwrap();
/// assert_eq!(h.rows(), 2);
/// assert_eq!(h.cols(), 4);
/// assert_eq!(h.col(3), &[0, 1]);
/// assert!(h.is_codeword(&[1, 1, 1, 0]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GraphRepr", into = "GraphRepr")]
pub struct ParityCheckGraph {
    cols: usize,
    row_adj: Vec<Vec<usize>>,
    col_adj: Vec<Vec<usize>>,
    /// `row_offsets[j]..row_offsets[j + 1]` are the edge ids of check `j`
    row_offsets: Vec<usize>,
    /// Edge ids of variable `i`, aligned with `col_adj[i]`
    col_edges: Vec<Vec<usize>>,
}

/// One `fill` per variable. `cols` comes from user data, so the allocation
/// is fallible.
fn per_column<T: Clone>(cols: usize, fill: T) -> LdpcResult<Vec<T>> {
    let mut column = Vec::new();
    column.try_reserve_exact(cols).map_err(|e| {
        LdpcError::graph(format!("cannot allocate {} variable nodes: {}", cols, e))
    })?;
    column.resize(cols, fill);
    Ok(column)
}

impl ParityCheckGraph {
    /// Builds the graph from per-check adjacency lists.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable index is `>= cols` or appears twice in
    /// the same row.
    pub fn from_rows(cols: usize, rows: Vec<Vec<usize>>) -> LdpcResult<Self> {
        let mut col_adj = per_column(cols, Vec::new())?;
        let mut col_edges = per_column(cols, Vec::new())?;
        let mut row_offsets = Vec::with_capacity(rows.len() + 1);
        let mut seen = per_column(cols, usize::MAX)?;
        let mut edge = 0;

        for (j, row) in rows.iter().enumerate() {
            row_offsets.push(edge);
            for &i in row {
                if i >= cols {
                    return Err(LdpcError::index_out_of_range(i, cols, format!("row {}", j)));
                }
                if seen[i] == j {
                    return Err(LdpcError::graph(format!(
                        "variable {} appears more than once in row {}",
                        i, j
                    )));
                }
                seen[i] = j;
                col_adj[i].push(j);
                col_edges[i].push(edge);
                edge += 1;
            }
        }
        row_offsets.push(edge);

        Ok(Self {
            cols,
            row_adj: rows,
            col_adj,
            row_offsets,
            col_edges,
        })
    }

    /// Builds the graph from both adjacency views and checks that they agree:
    /// `i` is in `rows[j]` iff `j` is in `columns[i]`.
    ///
    /// The per-variable ordering of `columns` is kept.
    pub fn from_adjacency(
        cols: usize,
        rows: Vec<Vec<usize>>,
        columns: Vec<Vec<usize>>,
    ) -> LdpcResult<Self> {
        if columns.len() != cols {
            return Err(LdpcError::graph(format!(
                "expected {} column adjacency lists, got {}",
                cols,
                columns.len()
            )));
        }

        let mut graph = Self::from_rows(cols, rows)?;

        for (i, given) in columns.iter().enumerate() {
            let mut expected = graph.col_adj[i].clone();
            let mut sorted = given.clone();
            expected.sort_unstable();
            sorted.sort_unstable();
            if expected != sorted {
                return Err(LdpcError::graph(format!(
                    "adjacency views disagree at variable {}: rows give {:?}, columns give {:?}",
                    i, expected, given
                )));
            }
        }

        // Reorder each variable's edges to follow the supplied column order.
        for (i, given) in columns.into_iter().enumerate() {
            let edges = given
                .iter()
                .map(|&j| {
                    let pos = graph.row_adj[j].iter().position(|&v| v == i);
                    // Consistency was verified above.
                    graph.row_offsets[j] + pos.unwrap_or_default()
                })
                .collect();
            graph.col_edges[i] = edges;
            graph.col_adj[i] = given;
        }

        Ok(graph)
    }

    /// Builds the graph from a dense 0/1 matrix.
    pub fn from_dense(matrix: &[Vec<u8>]) -> LdpcResult<Self> {
        let cols = matrix.first().map_or(0, Vec::len);
        let mut rows = Vec::with_capacity(matrix.len());

        for (j, dense_row) in matrix.iter().enumerate() {
            if dense_row.len() != cols {
                return Err(LdpcError::graph(format!(
                    "row {} has {} entries, expected {}",
                    j,
                    dense_row.len(),
                    cols
                )));
            }
            let mut row = Vec::new();
            for (i, &bit) in dense_row.iter().enumerate() {
                match bit {
                    0 => {}
                    1 => row.push(i),
                    other => {
                        return Err(LdpcError::graph(format!(
                            "entry ({}, {}) is {}, expected 0 or 1",
                            j, i, other
                        )))
                    }
                }
            }
            rows.push(row);
        }

        Self::from_rows(cols, rows)
    }

    /// Parses the `{ cols, rows }` form. Malformed YAML is an
    /// [`LdpcError::Yaml`]; a well-formed but invalid graph is an
    /// [`LdpcError::Graph`].
    pub fn from_yaml_str(yaml: &str) -> LdpcResult<Self> {
        let repr: GraphRepr = serde_yaml::from_str(yaml)?;
        Self::try_from(repr)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> LdpcResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Number of check nodes `m`.
    pub fn rows(&self) -> usize {
        self.row_adj.len()
    }

    /// Number of variable nodes `n`.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Message length `k = n - m` for a full-rank systematic code.
    pub fn message_len(&self) -> usize {
        self.cols.saturating_sub(self.rows())
    }

    pub fn edge_count(&self) -> usize {
        self.row_offsets.last().copied().unwrap_or(0)
    }

    /// Variables incident to check `j`.
    pub fn row(&self, j: usize) -> &[usize] {
        &self.row_adj[j]
    }

    /// Checks incident to variable `i`.
    pub fn col(&self, i: usize) -> &[usize] {
        &self.col_adj[i]
    }

    /// Edge ids of check `j`, in the order of [`row`](Self::row).
    pub fn row_edges(&self, j: usize) -> Range<usize> {
        self.row_offsets[j]..self.row_offsets[j + 1]
    }

    /// Edge ids of variable `i`, in the order of [`col`](Self::col).
    pub fn col_edges(&self, i: usize) -> &[usize] {
        &self.col_edges[i]
    }

    /// Parity of every check against `candidate`, one entry per row.
    ///
    /// # Panics
    ///
    /// Panics if `candidate` is shorter than `cols()`.
    pub fn syndrome(&self, candidate: &[u8]) -> Vec<u8> {
        self.row_adj
            .iter()
            .map(|row| row.iter().fold(0u8, |acc, &i| acc ^ candidate[i]))
            .collect()
    }

    /// True iff every check has even parity over `candidate`.
    pub fn is_codeword(&self, candidate: &[u8]) -> bool {
        self.row_adj
            .iter()
            .all(|row| row.iter().fold(0u8, |acc, &i| acc ^ candidate[i]) == 0)
    }

    /// Number of checks with odd parity over `candidate`.
    pub fn unsatisfied_checks(&self, candidate: &[u8]) -> usize {
        self.syndrome(candidate).iter().filter(|&&s| s != 0).count()
    }

    pub fn to_dense(&self) -> Vec<Vec<u8>> {
        self.row_adj
            .iter()
            .map(|row| {
                let mut dense = vec![0u8; self.cols];
                for &i in row {
                    dense[i] = 1;
                }
                dense
            })
            .collect()
    }
}

impl TryFrom<GraphRepr> for ParityCheckGraph {
    type Error = LdpcError;

    fn try_from(repr: GraphRepr) -> Result<Self, Self::Error> {
        Self::from_rows(repr.cols, repr.rows)
    }
}

impl From<ParityCheckGraph> for GraphRepr {
    fn from(graph: ParityCheckGraph) -> Self {
        GraphRepr {
            cols: graph.cols,
            rows: graph.row_adj,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Helper: H * c over GF(2) on the dense matrix
    fn dense_syndrome(h: &[Vec<u8>], c: &[u8]) -> Vec<u8> {
        h.iter()
            .map(|row| {
                row.iter()
                    .zip(c.iter())
                    .fold(0u8, |acc, (h_val, c_val)| (acc + h_val * c_val) % 2)
            })
            .collect()
    }

    fn hamming_8_4() -> ParityCheckGraph {
        ParityCheckGraph::from_rows(
            8,
            vec![
                vec![0, 1, 2, 4],
                vec![0, 1, 3, 5],
                vec![0, 2, 3, 6],
                vec![1, 2, 3, 7],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_dimensions() {
        let h = hamming_8_4();
        assert_eq!(h.rows(), 4);
        assert_eq!(h.cols(), 8);
        assert_eq!(h.message_len(), 4);
        assert_eq!(h.edge_count(), 16);
        assert_eq!(h.col(0), &[0, 1, 2]);
        assert_eq!(h.col(7), &[3]);
    }

    #[test]
    fn test_edge_ids_agree_between_views() {
        let h = hamming_8_4();
        for i in 0..h.cols() {
            for (&j, &e) in h.col(i).iter().zip(h.col_edges(i)) {
                let range = h.row_edges(j);
                assert!(range.contains(&e));
                assert_eq!(h.row(j)[e - range.start], i);
            }
        }
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let err = ParityCheckGraph::from_rows(3, vec![vec![0, 3]]).unwrap_err();
        assert!(matches!(err, LdpcError::Graph { .. }));
    }

    #[test]
    fn test_rejects_unallocatable_column_count() {
        for yaml in [
            "cols: 1000000000000\nrows: []\n",
            "cols: 18446744073709551615\nrows: []\n",
        ] {
            let err = ParityCheckGraph::from_yaml_str(yaml).unwrap_err();
            assert!(matches!(err, LdpcError::Graph { .. }), "{}: {}", yaml, err);
        }
    }

    #[test]
    fn test_rejects_duplicate_index() {
        assert!(ParityCheckGraph::from_rows(3, vec![vec![1, 1]]).is_err());
        // The same variable in different rows is fine.
        assert!(ParityCheckGraph::from_rows(3, vec![vec![1], vec![1]]).is_ok());
    }

    #[test]
    fn test_from_adjacency_consistency() {
        let rows = vec![vec![0, 1], vec![1, 2]];
        let columns = vec![vec![0], vec![1, 0], vec![1]];
        let good = ParityCheckGraph::from_adjacency(3, rows.clone(), columns).unwrap();
        assert_eq!(good.col(1), &[1, 0]);
        assert_eq!(good.col_edges(1), &[2, 1]);

        let bad = ParityCheckGraph::from_adjacency(3, rows, vec![vec![0], vec![1], vec![1]]);
        assert!(bad.is_err());
    }

    #[test]
    fn test_from_dense_rejects_bad_input() {
        assert!(ParityCheckGraph::from_dense(&[vec![1, 0], vec![1]]).is_err());
        assert!(ParityCheckGraph::from_dense(&[vec![1, 2]]).is_err());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let yaml = "cols: 4\nrows:\n  - [0, 1, 3]\n  - [1, 2, 3]\n";
        let h = ParityCheckGraph::from_yaml_str(yaml).unwrap();
        assert_eq!(h.rows(), 2);
        let back = serde_yaml::to_string(&h).unwrap();
        assert_eq!(ParityCheckGraph::from_yaml_str(&back).unwrap(), h);

        let err = ParityCheckGraph::from_yaml_str("cols: 2\nrows:\n  - [0, 5]\n").unwrap_err();
        assert!(matches!(err, LdpcError::Graph { .. }));
        let err = ParityCheckGraph::from_yaml_str("cols: [2]\n").unwrap_err();
        assert!(matches!(err, LdpcError::Yaml(_)));
    }

    #[test]
    fn test_syndrome_of_codeword_is_zero() {
        let h = hamming_8_4();
        let codeword = [1, 0, 1, 1, 0, 0, 1, 0];
        assert!(h.is_codeword(&codeword));
        assert_eq!(h.syndrome(&codeword), vec![0; 4]);

        let mut noisy = codeword;
        noisy[0] ^= 1;
        assert!(!h.is_codeword(&noisy));
        assert_eq!(h.unsatisfied_checks(&noisy), 3);
    }

    fn arb_dense() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<u8>)> {
        (1usize..6, 2usize..12).prop_flat_map(|(m, n)| {
            (
                prop::collection::vec(prop::collection::vec(0u8..2, n), m),
                prop::collection::vec(0u8..2, n),
            )
        })
    }

    proptest! {
        #[test]
        fn syndrome_matches_dense((dense, candidate) in arb_dense()) {
            let h = ParityCheckGraph::from_dense(&dense).unwrap();
            let expected = dense_syndrome(&dense, &candidate);
            prop_assert_eq!(h.syndrome(&candidate), expected.clone());
            prop_assert_eq!(h.is_codeword(&candidate), expected.iter().all(|&s| s == 0));
        }

        #[test]
        fn dense_roundtrip((dense, _c) in arb_dense()) {
            let h = ParityCheckGraph::from_dense(&dense).unwrap();
            prop_assert_eq!(h.to_dense(), dense);
        }

        #[test]
        fn views_agree((dense, _c) in arb_dense()) {
            let h = ParityCheckGraph::from_dense(&dense).unwrap();
            for j in 0..h.rows() {
                for &i in h.row(j) {
                    prop_assert!(h.col(i).contains(&j));
                }
            }
            for i in 0..h.cols() {
                for &j in h.col(i) {
                    prop_assert!(h.row(j).contains(&i));
                }
            }
        }
    }
}
