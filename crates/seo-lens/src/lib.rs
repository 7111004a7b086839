//! SEO Lens: fetch a page, score it, report on it.
//!
//! The serving path is: [`server`] → [`aggregator::Aggregator`] →
//! {[`extraction`] → [`model::RelevanceScorer`]} and the heuristic
//! analyzers in [`analysis`]. Every analyzer recovers from its own
//! failures, so a report is always fully populated.

pub mod acquisition;
pub mod aggregator;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod extraction;
pub mod model;
pub mod report;
pub mod server;

pub use aggregator::{Aggregator, Analyze};
pub use report::{AnalysisReport, Readability};
