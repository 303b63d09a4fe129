//! TextRank: power iteration over the sentence similarity graph.
//!
//! Implements the damped update
//! `scores(k+1) = (1 − d) + d · Mᵗ · scores(k)`
//! with proper handling of zero-similarity rows, whose transition mass is
//! redistributed uniformly over the other sentences so isolated sentences
//! still receive a baseline score.
//!
//! Scores are left unnormalized: under this formulation they need not sum
//! to 1, and they are only ever compared, never read as probabilities.

use crate::error::SummarizeError;
use crate::graph::SimilarityGraph;
use crate::pipeline::progress::CancelToken;

/// TextRank ranker configuration.
#[derive(Debug, Clone)]
pub struct TextRank {
    /// Damping factor (probability of following the graph vs. restarting).
    pub damping: f64,
    /// Iteration cap; hitting it is not an error.
    pub max_iterations: usize,
    /// L1 convergence threshold.
    pub epsilon: f64,
}

impl Default for TextRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            epsilon: 1e-6,
        }
    }
}

impl TextRank {
    /// Create a ranker with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Run power iteration on a graph.
    ///
    /// Returns the last computed scores even when convergence wasn't reached
    /// within the cap (`converged = false`); TextRank scores are only used
    /// for relative ordering. Checks the cancellation token between
    /// iterations and returns [`SummarizeError::Cancelled`] when triggered.
    pub fn run(
        &self,
        graph: &SimilarityGraph,
        cancel: &CancelToken,
    ) -> Result<RankResult, SummarizeError> {
        let n = graph.num_nodes;
        if n == 0 {
            return Ok(RankResult::new(vec![], 0, 0.0, true));
        }
        if n == 1 {
            return Ok(RankResult::new(vec![1.0], 0, 0.0, true));
        }

        let mut scores = vec![1.0 / n as f64; n];
        let mut new_scores = vec![0.0; n];

        // Zero rows are the analog of dangling nodes: their mass spreads
        // uniformly over the other n - 1 sentences (self excluded, matching
        // the zero diagonal).
        let zero_rows = graph.zero_rows();
        let spread = 1.0 / (n - 1) as f64;

        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta > self.epsilon {
            if cancel.is_cancelled() {
                return Err(SummarizeError::Cancelled);
            }
            iterations += 1;

            let zero_mass: f64 = zero_rows.iter().map(|&i| scores[i as usize]).sum();
            new_scores.fill(1.0 - self.damping + self.damping * zero_mass * spread);
            for &i in &zero_rows {
                // A zero row does not feed itself.
                new_scores[i as usize] -= self.damping * scores[i as usize] * spread;
            }

            for (node, &node_score) in scores.iter().enumerate() {
                for (neighbor, weight) in graph.neighbors(node) {
                    new_scores[neighbor as usize] += self.damping * node_score * weight;
                }
            }

            delta = scores
                .iter()
                .zip(new_scores.iter())
                .map(|(old, new)| (old - new).abs())
                .sum();

            std::mem::swap(&mut scores, &mut new_scores);
        }

        Ok(RankResult::new(
            scores,
            iterations,
            delta,
            delta <= self.epsilon,
        ))
    }
}

/// Outcome of a ranking run.
#[derive(Debug, Clone)]
pub struct RankResult {
    /// One finite, non-negative importance score per sentence.
    pub scores: Vec<f64>,
    /// Iterations actually performed.
    pub iterations: usize,
    /// Final L1 delta between the last two iterations.
    pub delta: f64,
    /// Whether the delta dropped below the threshold within the cap.
    pub converged: bool,
}

impl RankResult {
    fn new(scores: Vec<f64>, iterations: usize, delta: f64, converged: bool) -> Self {
        Self {
            scores,
            iterations,
            delta,
            converged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tfidf::TfIdf;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn graph_of(lists: Vec<Vec<String>>) -> SimilarityGraph {
        SimilarityGraph::from_vectors(&TfIdf::weigh(&lists).vectors)
    }

    #[test]
    fn test_symmetric_triangle_equal_scores() {
        // Three sentences pairwise sharing one term each: fully symmetric.
        let graph = graph_of(vec![
            toks(&["a", "b"]),
            toks(&["b", "c"]),
            toks(&["c", "a"]),
        ]);
        let result = TextRank::new().run(&graph, &CancelToken::new()).unwrap();

        assert!(result.converged);
        let first = result.scores[0];
        for score in &result.scores {
            assert!((score - first).abs() < 1e-4);
        }
    }

    #[test]
    fn test_central_sentence_ranks_highest() {
        // Sentence 0 shares vocabulary with everyone; the others only with 0.
        let graph = graph_of(vec![
            toks(&["hub", "one", "two", "three"]),
            toks(&["one", "alpha"]),
            toks(&["two", "beta"]),
            toks(&["three", "gamma"]),
        ]);
        let result = TextRank::new().run(&graph, &CancelToken::new()).unwrap();

        let hub = result.scores[0];
        for &score in &result.scores[1..] {
            assert!(hub > score);
        }
    }

    #[test]
    fn test_isolated_sentence_gets_baseline_score() {
        let graph = graph_of(vec![
            toks(&["shared", "words", "here"]),
            toks(&["shared", "words", "there"]),
            toks(&["totally", "unrelated", "gibberish"]),
        ]);
        let result = TextRank::new().run(&graph, &CancelToken::new()).unwrap();

        assert!(result.scores[2] > 0.0);
        assert!(result.scores[2].is_finite());
    }

    #[test]
    fn test_all_scores_finite_and_positive() {
        let graph = graph_of(vec![
            toks(&["a"]),
            Vec::new(),
            toks(&["b"]),
            toks(&["a", "b"]),
        ]);
        let result = TextRank::new().run(&graph, &CancelToken::new()).unwrap();

        for score in &result.scores {
            assert!(score.is_finite());
            assert!(*score > 0.0);
        }
    }

    #[test]
    fn test_iteration_cap_returns_best_effort() {
        let graph = graph_of(vec![
            toks(&["a", "b"]),
            toks(&["b", "c"]),
            toks(&["c", "a"]),
        ]);
        let result = TextRank::new()
            .with_max_iterations(1)
            .with_epsilon(0.0)
            .run(&graph, &CancelToken::new())
            .unwrap();

        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
        assert_eq!(result.scores.len(), 3);
    }

    #[test]
    fn test_empty_and_single_node_graphs() {
        let empty = SimilarityGraph::default();
        let result = TextRank::new().run(&empty, &CancelToken::new()).unwrap();
        assert!(result.scores.is_empty());
        assert!(result.converged);

        let single = graph_of(vec![toks(&["lonely"])]);
        let result = TextRank::new().run(&single, &CancelToken::new()).unwrap();
        assert_eq!(result.scores, vec![1.0]);
    }

    #[test]
    fn test_cancellation_between_iterations() {
        let graph = graph_of(vec![
            toks(&["a", "b"]),
            toks(&["b", "c"]),
            toks(&["c", "a"]),
        ]);
        let cancel = CancelToken::new();
        cancel.cancel();

        let err = TextRank::new().run(&graph, &cancel).unwrap_err();
        assert_eq!(err, SummarizeError::Cancelled);
    }

    #[test]
    fn test_damping_flattens_scores() {
        let lists = vec![
            toks(&["hub", "one", "two", "three"]),
            toks(&["one", "alpha"]),
            toks(&["two", "beta"]),
            toks(&["three", "gamma"]),
        ];
        let graph = graph_of(lists);

        let low = TextRank::new()
            .with_damping(0.5)
            .run(&graph, &CancelToken::new())
            .unwrap();
        let high = TextRank::new()
            .with_damping(0.95)
            .run(&graph, &CancelToken::new())
            .unwrap();

        // Relative spread, since the damped formulation is unnormalized.
        let spread = |r: &RankResult| {
            let max = r.scores.iter().cloned().fold(f64::MIN, f64::max);
            let min = r.scores.iter().cloned().fold(f64::MAX, f64::min);
            (max - min) / max
        };
        assert!(spread(&high) > spread(&low));
    }
}
