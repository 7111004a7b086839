//! Fit the vectorizer and regressor, then write both artifacts.

use crate::dataset::Sample;
use anyhow::{Context, Result};
use seo_lens::model::{FittedModel, LinearRegressor, TfIdfVectorizer};
use std::path::Path;
use tracing::info;

/// What a training run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainSummary {
    pub samples: usize,
    pub vocabulary: usize,
    pub r_squared: f64,
}

pub fn fit(samples: &[Sample], max_features: usize) -> Result<(FittedModel, TrainSummary)> {
    let docs: Vec<String> = samples.iter().map(Sample::text).collect();
    let targets: Vec<f64> = samples.iter().map(|s| s.seo_score).collect();

    let vectorizer = TfIdfVectorizer::fit(&docs, max_features);
    info!(vocabulary = vectorizer.vocabulary_size(), "fitted vectorizer");

    let rows: Vec<Vec<f64>> = docs.iter().map(|d| vectorizer.transform(d)).collect();
    let regressor = LinearRegressor::fit(&rows, &targets).context("failed to fit regressor")?;
    let r_squared = regressor.r_squared(&rows, &targets);

    let summary = TrainSummary {
        samples: samples.len(),
        vocabulary: vectorizer.vocabulary_size(),
        r_squared,
    };
    let model = FittedModel::new(vectorizer, regressor)?;
    Ok((model, summary))
}

pub fn run(samples: &[Sample], max_features: usize, out_dir: &Path) -> Result<TrainSummary> {
    let (model, summary) = fit(samples, max_features)?;
    model
        .save_dir(out_dir)
        .with_context(|| format!("failed to write artifacts to {}", out_dir.display()))?;
    info!(
        samples = summary.samples,
        vocabulary = summary.vocabulary,
        r_squared = summary.r_squared,
        out_dir = %out_dir.display(),
        "model and vectorizer saved"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seo_lens::model::RelevanceModel;

    fn sample(title: &str, content: &str, score: f64) -> Sample {
        Sample {
            title: title.to_string(),
            meta: String::new(),
            content: content.to_string(),
            seo_score: score,
        }
    }

    #[test]
    fn test_run_writes_loadable_artifacts() {
        let samples = vec![
            sample("Rust guide", "ownership borrowing lifetimes", 90.0),
            sample("Spam", "cheap pills cheap pills", 10.0),
            sample("Rust news", "release notes ownership", 75.0),
        ];
        let dir = tempfile::tempdir().unwrap();

        let summary = run(&samples, 1000, dir.path()).unwrap();
        assert_eq!(summary.samples, 3);
        assert!(summary.r_squared > 0.99);

        let model = FittedModel::load_dir(dir.path()).unwrap();
        assert_eq!(model.vectorizer().vocabulary_size(), summary.vocabulary);
        let predicted = model.predict(&samples[1].text());
        assert!((predicted - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_max_features_bounds_vocabulary() {
        let samples = vec![
            sample("alpha beta gamma", "delta epsilon", 1.0),
            sample("zeta eta", "theta iota kappa", 2.0),
        ];
        let (_, summary) = fit(&samples, 3).unwrap();
        assert_eq!(summary.vocabulary, 3);
    }
}
