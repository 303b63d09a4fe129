//! TF-IDF term weighting over a fixed sentence collection.
//!
//! Weighting is always scoped to a chunk or chapter, never the whole
//! multi-megabyte document at once, so vocabulary maps stay bounded by the
//! window size. Vectors are sparse, sorted by interned term ID, and carry a
//! precomputed L2 norm so pairwise cosine similarity is a single merge-join.

use rustc_hash::FxHashMap;

/// Sparse TF-IDF vector for one sentence.
///
/// Invariant: `terms` is sorted by term ID, all weights are positive, and
/// `norm` is the L2 norm of the weights. An empty vector (sentence with no
/// informative terms) is legal and yields zero similarity to everything.
#[derive(Debug, Clone, Default)]
pub struct TermVector {
    terms: Vec<(u32, f64)>,
    norm: f64,
}

impl TermVector {
    fn from_weights(mut terms: Vec<(u32, f64)>) -> Self {
        terms.sort_unstable_by_key(|&(id, _)| id);
        let norm = terms.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        Self { terms, norm }
    }

    /// Whether the sentence had no informative terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of non-zero dimensions.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// L2 norm of the weights.
    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// Cosine similarity with another vector, in `[0, 1]`.
    ///
    /// Zero when either vector is empty — never a division error.
    pub fn cosine_similarity(&self, other: &TermVector) -> f64 {
        if self.norm == 0.0 || other.norm == 0.0 {
            return 0.0;
        }
        let mut dot = 0.0;
        let (mut i, mut j) = (0, 0);
        while i < self.terms.len() && j < other.terms.len() {
            let (a_id, a_w) = self.terms[i];
            let (b_id, b_w) = other.terms[j];
            match a_id.cmp(&b_id) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        dot / (self.norm * other.norm)
    }
}

/// TF-IDF vectors for a sentence collection, plus vocabulary statistics.
#[derive(Debug, Clone)]
pub struct TfIdf {
    /// One vector per sentence, in input order.
    pub vectors: Vec<TermVector>,
    /// Number of distinct terms across the collection.
    pub vocabulary_size: usize,
}

impl TfIdf {
    /// Weight a fixed sentence collection given its token lists.
    ///
    /// Term frequency is normalized by the sentence's token count (zero-token
    /// sentences get an all-zero vector, not a division error), and
    /// `idf(t) = ln(N / (df(t) + 1)) + 1` keeps weights positive even for
    /// terms present in every sentence.
    pub fn weigh(token_lists: &[Vec<String>]) -> TfIdf {
        let n = token_lists.len();

        // Intern terms and count document frequency in one pass.
        let mut term_ids: FxHashMap<&str, u32> = FxHashMap::default();
        let mut df: Vec<u32> = Vec::new();
        let mut counts_per_sentence: Vec<FxHashMap<u32, u32>> = Vec::with_capacity(n);

        for tokens in token_lists {
            let mut counts: FxHashMap<u32, u32> = FxHashMap::default();
            for token in tokens {
                let next_id = term_ids.len() as u32;
                let id = *term_ids.entry(token.as_str()).or_insert(next_id);
                if id as usize == df.len() {
                    df.push(0);
                }
                *counts.entry(id).or_insert(0) += 1;
            }
            for &id in counts.keys() {
                df[id as usize] += 1;
            }
            counts_per_sentence.push(counts);
        }

        let idf: Vec<f64> = df
            .iter()
            .map(|&d| (n as f64 / (d as f64 + 1.0)).ln() + 1.0)
            .collect();

        let vectors = token_lists
            .iter()
            .zip(counts_per_sentence)
            .map(|(tokens, counts)| {
                if tokens.is_empty() {
                    return TermVector::default();
                }
                let token_count = tokens.len() as f64;
                let weights = counts
                    .into_iter()
                    .map(|(id, count)| {
                        let tf = count as f64 / token_count;
                        (id, tf * idf[id as usize])
                    })
                    .collect();
                TermVector::from_weights(weights)
            })
            .collect();

        TfIdf {
            vectors,
            vocabulary_size: term_ids.len(),
        }
    }

    /// Whether the whole collection produced no terms at all
    /// (e.g. every sentence was stop-words and punctuation).
    pub fn vocabulary_is_empty(&self) -> bool {
        self.vocabulary_size == 0
    }
}
