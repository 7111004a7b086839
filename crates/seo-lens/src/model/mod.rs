//! The relevance model: a TF-IDF vectorizer feeding a linear regressor.
//!
//! Both halves are fitted offline by `seo-lens-train`, persisted as two
//! binary artifacts, and loaded once at startup into an immutable
//! [`FittedModel`] that every request reads without locking.

pub mod artifact;
pub mod regressor;
pub mod scorer;
pub mod vectorizer;

pub use regressor::LinearRegressor;
pub use scorer::{RelevanceModel, RelevanceScorer};
pub use vectorizer::TfIdfVectorizer;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// File name of the persisted vectorizer inside a model directory.
pub const VECTORIZER_FILE: &str = "seo_vectorizer.bin";
/// File name of the persisted regressor inside a model directory.
pub const REGRESSOR_FILE: &str = "seo_model.bin";

/// Errors raised while loading, saving or fitting the model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: not a {expected} artifact")]
    BadMagic { path: PathBuf, expected: &'static str },
    #[error("{path}: unsupported artifact version {version}")]
    UnsupportedVersion { path: PathBuf, version: u16 },
    #[error("{path}: corrupt artifact: {reason}")]
    Corrupt { path: PathBuf, reason: String },
    #[error("regressor has {coefficients} coefficients but the vocabulary has {vocabulary} terms")]
    DimensionMismatch {
        coefficients: usize,
        vocabulary: usize,
    },
    #[error("cannot fit on an empty training set")]
    EmptyTrainingSet,
    #[error("training rows ({rows}) and targets ({targets}) differ in length")]
    LengthMismatch { rows: usize, targets: usize },
}

/// Fitted vectorizer + regressor pair. Immutable once built.
#[derive(Debug, Clone)]
pub struct FittedModel {
    vectorizer: TfIdfVectorizer,
    regressor: LinearRegressor,
}

impl FittedModel {
    /// Pair a vectorizer with a regressor, checking their dimensions agree.
    pub fn new(vectorizer: TfIdfVectorizer, regressor: LinearRegressor) -> Result<Self, ModelError> {
        if regressor.dimension() != vectorizer.vocabulary_size() {
            return Err(ModelError::DimensionMismatch {
                coefficients: regressor.dimension(),
                vocabulary: vectorizer.vocabulary_size(),
            });
        }
        Ok(Self {
            vectorizer,
            regressor,
        })
    }

    /// Load both artifacts from `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self, ModelError> {
        let vectorizer_path = dir.join(VECTORIZER_FILE);
        let regressor_path = dir.join(REGRESSOR_FILE);

        let vectorizer = artifact::read_vectorizer(&vectorizer_path)?;
        let regressor = artifact::read_regressor(&regressor_path)?;
        let model = Self::new(vectorizer, regressor)?;

        info!(
            vocabulary = model.vectorizer.vocabulary_size(),
            dir = %dir.display(),
            "loaded relevance model"
        );
        Ok(model)
    }

    /// Write both artifacts into `dir`, creating it if needed.
    pub fn save_dir(&self, dir: &Path) -> Result<(), ModelError> {
        std::fs::create_dir_all(dir).map_err(|source| ModelError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        artifact::write_vectorizer(&dir.join(VECTORIZER_FILE), &self.vectorizer)?;
        artifact::write_regressor(&dir.join(REGRESSOR_FILE), &self.regressor)?;
        Ok(())
    }

    pub fn vectorizer(&self) -> &TfIdfVectorizer {
        &self.vectorizer
    }
}

impl RelevanceModel for FittedModel {
    fn predict(&self, text: &str) -> f64 {
        let x = self.vectorizer.transform(text);
        self.regressor.predict(&x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_model() -> FittedModel {
        let docs = vec![
            "rust web server".to_string(),
            "python web scraping".to_string(),
            "rust systems programming".to_string(),
        ];
        let vectorizer = TfIdfVectorizer::fit(&docs, 1000);
        let rows: Vec<Vec<f64>> = docs.iter().map(|d| vectorizer.transform(d)).collect();
        let regressor = LinearRegressor::fit(&rows, &[80.0, 40.0, 70.0]).unwrap();
        FittedModel::new(vectorizer, regressor).unwrap()
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let vectorizer = TfIdfVectorizer::fit(&["alpha beta".to_string()], 10);
        let regressor = LinearRegressor::new(vec![1.0; 5], 0.0);
        let err = FittedModel::new(vectorizer, regressor).unwrap_err();
        assert!(matches!(
            err,
            ModelError::DimensionMismatch {
                coefficients: 5,
                vocabulary: 2
            }
        ));
    }

    #[test]
    fn test_save_and_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        let model = tiny_model();
        model.save_dir(dir.path()).unwrap();

        let loaded = FittedModel::load_dir(dir.path()).unwrap();
        let text = "rust web server";
        assert!((loaded.predict(text) - model.predict(text)).abs() < 1e-9);
    }

    #[test]
    fn test_load_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = FittedModel::load_dir(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }

    #[test]
    fn test_fitted_model_reproduces_training_targets() {
        let model = tiny_model();
        assert!((model.predict("rust web server") - 80.0).abs() < 1e-6);
        assert!((model.predict("python web scraping") - 40.0).abs() < 1e-6);
    }
}
