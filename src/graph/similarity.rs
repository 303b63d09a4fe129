//! Cosine-similarity graph in Compressed Sparse Row form.
//!
//! CSR stores edges contiguously, which is exactly what power iteration
//! needs: repeated passes over all outgoing edges of every node. Rows are
//! normalized at construction so stored weights are transition probabilities.
//!
//! The conceptual matrix is symmetric with a zero diagonal and entries in
//! `[0, 1]`; only non-zero entries are materialized, so a window of n
//! sentences costs O(n²) similarity evaluations but far less storage than a
//! dense matrix.

use rayon::prelude::*;

use crate::tfidf::TermVector;

/// Row-normalized sentence similarity graph.
#[derive(Debug, Clone)]
pub struct SimilarityGraph {
    /// Number of sentences (nodes).
    pub num_nodes: usize,
    /// Node i's edges live at `col_idx[row_ptr[i]..row_ptr[i + 1]]`.
    row_ptr: Vec<usize>,
    /// Target nodes per edge.
    col_idx: Vec<u32>,
    /// Transition probabilities per edge; each non-empty row sums to 1.
    weights: Vec<f64>,
}

impl SimilarityGraph {
    /// Build the graph from per-sentence TF-IDF vectors.
    ///
    /// Every pair is compared with cosine similarity; the diagonal is forced
    /// to zero (no self-loops) and each row is normalized to sum to 1. Rows
    /// are computed in parallel and the result is deterministic.
    pub fn from_vectors(vectors: &[TermVector]) -> Self {
        let n = vectors.len();

        let rows: Vec<Vec<(u32, f64)>> = vectors
            .par_iter()
            .enumerate()
            .map(|(i, vi)| {
                if vi.is_empty() {
                    return Vec::new();
                }
                let mut row = Vec::new();
                for (j, vj) in vectors.iter().enumerate() {
                    if j == i {
                        continue;
                    }
                    let sim = vi.cosine_similarity(vj);
                    if sim > 0.0 {
                        row.push((j as u32, sim));
                    }
                }
                row
            })
            .collect();

        let mut row_ptr = Vec::with_capacity(n + 1);
        let mut col_idx = Vec::new();
        let mut weights = Vec::new();
        row_ptr.push(0);

        for row in rows {
            let row_sum: f64 = row.iter().map(|(_, w)| w).sum();
            if row_sum > 0.0 {
                for (target, weight) in row {
                    col_idx.push(target);
                    weights.push(weight / row_sum);
                }
            }
            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes: n,
            row_ptr,
            col_idx,
            weights,
        }
    }

    /// Iterate over the outgoing transition edges of a node.
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.row_ptr[node];
        let end = self.row_ptr[node + 1];
        (start..end).map(move |i| (self.col_idx[i], self.weights[i]))
    }

    /// Whether a node has no similarity to any other sentence.
    ///
    /// The ranker redistributes such a row uniformly over the other nodes so
    /// the sentence still receives a baseline score.
    pub fn is_zero_row(&self, node: usize) -> bool {
        self.row_ptr[node] == self.row_ptr[node + 1]
    }

    /// Nodes with no outgoing similarity mass.
    pub fn zero_rows(&self) -> Vec<u32> {
        (0..self.num_nodes as u32)
            .filter(|&n| self.is_zero_row(n as usize))
            .collect()
    }

    /// Total number of stored directed edges.
    pub fn num_edges(&self) -> usize {
        self.col_idx.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }
}

impl Default for SimilarityGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            weights: Vec::new(),
        }
    }
}
