//! TF-IDF document vectors over a small, fixed corpus

use crate::error::{Result, ScreenerError};
use std::collections::{BTreeMap, HashMap};

/// Vector space fitted on a set of tokenized documents.
///
/// Weights are raw term counts times the smoothed idf
/// `ln((1 + n) / (1 + df)) + 1`, and every vector is L2 normalized.
#[derive(Debug, Clone)]
pub struct TfidfSpace {
    vocabulary: BTreeMap<String, usize>,
    vectors: Vec<Vec<f64>>,
}

impl TfidfSpace {
    pub fn fit<S: AsRef<str>>(documents: &[&[S]]) -> Result<Self> {
        if documents.is_empty() {
            return Err(ScreenerError::Scoring("Cannot fit TF-IDF on an empty corpus".to_string()));
        }

        let mut vocabulary = BTreeMap::new();
        for doc in documents {
            for token in doc.iter() {
                vocabulary.entry(token.as_ref().to_string()).or_insert(0);
            }
        }
        if vocabulary.is_empty() {
            return Err(ScreenerError::Scoring("Empty vocabulary".to_string()));
        }
        for (index, slot) in vocabulary.values_mut().enumerate() {
            *slot = index;
        }

        let counts: Vec<HashMap<usize, usize>> = documents
            .iter()
            .map(|doc| {
                let mut tf = HashMap::new();
                for token in doc.iter() {
                    *tf.entry(vocabulary[token.as_ref()]).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let mut document_frequency = vec![0usize; vocabulary.len()];
        for tf in &counts {
            for &term in tf.keys() {
                document_frequency[term] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let vectors = counts
            .iter()
            .map(|tf| {
                let mut vector = vec![0.0; idf.len()];
                for (&term, &count) in tf {
                    vector[term] = count as f64 * idf[term];
                }
                normalize(&mut vector);
                vector
            })
            .collect();

        Ok(Self { vocabulary, vectors })
    }

    pub fn dimension(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vector(&self, document: usize) -> Option<&[f64]> {
        self.vectors.get(document).map(Vec::as_slice)
    }

    /// Normalized weight of `term` in a fitted document
    pub fn weight(&self, document: usize, term: &str) -> Option<f64> {
        let index = *self.vocabulary.get(term)?;
        self.vector(document).map(|v| v[index])
    }

    /// Cosine similarity between two fitted documents, in `[0, 1]`
    pub fn similarity(&self, a: usize, b: usize) -> Result<f64> {
        let (va, vb) = match (self.vector(a), self.vector(b)) {
            (Some(va), Some(vb)) => (va, vb),
            _ => {
                return Err(ScreenerError::Scoring(format!(
                    "Document index out of range: {} / {} of {}",
                    a,
                    b,
                    self.vectors.len()
                )))
            }
        };

        cosine_similarity(va, vb)
    }
}

pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(ScreenerError::Scoring(format!(
            "Vector dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(ScreenerError::Scoring("Zero-length document vector".to_string()));
    }

    let similarity = dot_product / (norm_a * norm_b);
    if !similarity.is_finite() {
        return Err(ScreenerError::Scoring(format!("Non-finite similarity: {}", similarity)));
    }

    Ok(similarity.clamp(0.0, 1.0))
}

fn normalize(vector: &mut [f64]) {
    let norm = vector.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|x| *x /= norm);
    }
}
