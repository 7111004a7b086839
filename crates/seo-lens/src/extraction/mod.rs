//! HTML parsing helpers and the relevance feature extractor.

pub mod features;

pub use features::{FeatureExtractor, PageFeatures};

use scraper::Selector;
use thiserror::Error;

/// Errors raised while parsing fetched HTML.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid CSS selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },
}

/// Compile a CSS selector, turning a parse failure into an [`ExtractError`].
pub(crate) fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}
