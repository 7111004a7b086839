//! Relevance scoring: page features → rounded model prediction.

use crate::extraction::PageFeatures;
use std::sync::Arc;

/// A model that maps page text to a relevance score.
pub trait RelevanceModel: Send + Sync {
    fn predict(&self, text: &str) -> f64;
}

/// Applies a [`RelevanceModel`] to extracted page features.
#[derive(Clone)]
pub struct RelevanceScorer {
    model: Arc<dyn RelevanceModel>,
}

impl RelevanceScorer {
    pub fn new(model: Arc<dyn RelevanceModel>) -> Self {
        Self { model }
    }

    /// Score `features`, or return 0.0 without touching the model when
    /// extraction produced nothing.
    pub fn score(&self, features: Option<&PageFeatures>) -> f64 {
        match features {
            Some(f) => round2(self.model.predict(&f.blob())),
            None => 0.0,
        }
    }
}

impl std::fmt::Debug for RelevanceScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelevanceScorer").finish_non_exhaustive()
    }
}

/// Round to 2 decimal places, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingModel {
        calls: AtomicUsize,
        value: f64,
    }

    impl RelevanceModel for CountingModel {
        fn predict(&self, _text: &str) -> f64 {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.value
        }
    }

    #[test]
    fn test_missing_features_score_zero_without_model_call() {
        let model = Arc::new(CountingModel {
            calls: AtomicUsize::new(0),
            value: 42.0,
        });
        let scorer = RelevanceScorer::new(model.clone());

        assert_eq!(scorer.score(None), 0.0);
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_score_rounds_prediction() {
        let model = Arc::new(CountingModel {
            calls: AtomicUsize::new(0),
            value: 73.45678,
        });
        let scorer = RelevanceScorer::new(model.clone());

        let features = PageFeatures::default();
        assert_eq!(scorer.score(Some(&features)), 73.46);
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.0), 1.0);
        assert_eq!(round2(-3.14159), -3.14);
        assert_eq!(round2(0.125), 0.12);
    }
}
