//! TF-IDF vectorizer with a vocabulary fixed at fit time.
//!
//! Tokens are lowercase runs of two or more word characters. A document
//! becomes raw term counts × smoothed idf, L2-normalized. Terms unseen
//! during fitting are ignored.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"))
}

/// Split `text` into lowercase tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    token_pattern()
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Fitted TF-IDF transform.
#[derive(Debug, Clone, PartialEq)]
pub struct TfIdfVectorizer {
    /// Term -> column index.
    vocabulary: HashMap<String, usize>,
    /// Terms in column order.
    terms: Vec<String>,
    /// Inverse document frequency per column.
    idf: Vec<f64>,
}

impl TfIdfVectorizer {
    /// Build a vectorizer from terms (in column order) and their idf weights.
    ///
    /// Used when loading an artifact; `terms` and `idf` must be the same length.
    pub fn from_parts(terms: Vec<String>, idf: Vec<f64>) -> Self {
        debug_assert_eq!(terms.len(), idf.len());
        let vocabulary = terms
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
        Self {
            vocabulary,
            terms,
            idf,
        }
    }

    /// Fit on a corpus, keeping at most `max_features` terms.
    ///
    /// Terms are ranked by total frequency across the corpus (ties broken
    /// alphabetically); the kept terms are then ordered alphabetically to
    /// assign columns. `idf = ln((1 + n) / (1 + df)) + 1`.
    pub fn fit(documents: &[String], max_features: usize) -> Self {
        let n_documents = documents.len();
        let mut term_frequency: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let tokens = tokenize(doc);
            let mut seen = std::collections::HashSet::new();
            for token in tokens {
                *term_frequency.entry(token.clone()).or_insert(0) += 1;
                if seen.insert(token.clone()) {
                    *document_frequency.entry(token).or_insert(0) += 1;
                }
            }
        }

        let mut ranked: Vec<(String, usize)> = term_frequency.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(t, _)| t).collect();
        terms.sort();

        let idf = terms
            .iter()
            .map(|t| {
                let df = document_frequency.get(t).copied().unwrap_or(0);
                ((1.0 + n_documents as f64) / (1.0 + df as f64)).ln() + 1.0
            })
            .collect();

        Self::from_parts(terms, idf)
    }

    /// Transform one document into a dense vector of length
    /// [`vocabulary_size`](Self::vocabulary_size).
    pub fn transform(&self, document: &str) -> Vec<f64> {
        let mut x = vec![0.0; self.terms.len()];
        for token in tokenize(document) {
            if let Some(idx) = self.index_of(&token) {
                x[idx] += 1.0;
            }
        }

        for (value, idf) in x.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let norm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in &mut x {
                *value /= norm;
            }
        }
        x
    }

    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Terms in column order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Idf weights in column order.
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Column index of `term`, if it is in the vocabulary.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }
}
