//! Heuristic analyzers and the simulated metrics.
//!
//! Each analyzer fetches the page itself and returns an [`Outcome`]: the
//! measured value, or a fallback drawn from the [`Simulator`] when the
//! fetch or parse failed. Analyzers never return errors.

pub mod images;
pub mod meta_tags;
pub mod security;
pub mod simulated;

pub use images::ImageAnalyzer;
pub use meta_tags::MetaTagAnalyzer;
pub use security::SecurityAnalyzer;
pub use simulated::{RandomSimulator, Simulator};

use std::fmt::Display;
use tracing::warn;

/// Result of one analyzer run.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// The value was measured from the page.
    Measured(T),
    /// Measurement failed; `value` is a placeholder.
    Fallback { value: T, reason: String },
}

impl<T> Outcome<T> {
    /// Turn a measurement attempt into an outcome, generating a fallback
    /// value on error.
    pub fn resolve<E: Display>(
        analyzer: &'static str,
        url: &str,
        result: Result<T, E>,
        fallback: impl FnOnce() -> T,
    ) -> Self {
        match result {
            Ok(value) => Outcome::Measured(value),
            Err(e) => {
                let reason = e.to_string();
                warn!(analyzer, url, error = %reason, "analyzer failed, using fallback");
                Outcome::Fallback {
                    value: fallback(),
                    reason,
                }
            }
        }
    }

    pub fn value(self) -> T {
        match self {
            Outcome::Measured(v) => v,
            Outcome::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback { .. })
    }
}

/// Errors an analyzer can hit before falling back.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Fetch(#[from] crate::acquisition::FetchError),
    #[error(transparent)]
    Extract(#[from] crate::extraction::ExtractError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_measured() {
        let outcome: Outcome<u8> = Outcome::resolve("test", "u", Ok::<_, String>(7), || 0);
        assert_eq!(outcome, Outcome::Measured(7));
        assert!(!outcome.is_fallback());
    }

    #[test]
    fn test_resolve_fallback() {
        let outcome: Outcome<u8> =
            Outcome::resolve("test", "u", Err::<u8, _>("boom".to_string()), || 9);
        assert!(outcome.is_fallback());
        assert_eq!(
            outcome.clone(),
            Outcome::Fallback {
                value: 9,
                reason: "boom".to_string()
            }
        );
        assert_eq!(outcome.value(), 9);
    }
}
