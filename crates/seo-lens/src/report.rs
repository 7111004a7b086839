//! The fixed-shape report returned for every analyzed URL.

use serde::{Deserialize, Serialize};

/// Broken-link detection is not implemented; the report carries a constant.
pub const BROKEN_LINKS_PLACEHOLDER: u32 = 2;

/// Accessibility scoring is not implemented; the report carries a constant.
pub const ACCESSIBILITY_PLACEHOLDER: u32 = 88;

/// Readability label for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Readability {
    Excellent,
    Good,
    Average,
    Poor,
}

impl Readability {
    /// All labels, in descending order of quality.
    pub const ALL: [Readability; 4] = [
        Readability::Excellent,
        Readability::Good,
        Readability::Average,
        Readability::Poor,
    ];
}

/// Flat SEO report for a single URL.
///
/// Every field is always present. Analyzers that fail substitute a
/// fallback value instead of leaving a hole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Relevance score predicted by the fitted model, rounded to 2 decimals.
    pub seo_score: f64,
    /// Page load time in milliseconds (simulated).
    pub page_speed: u32,
    /// Readability label (simulated).
    pub readability: Readability,
    /// Number of broken links (placeholder).
    pub broken_links: u32,
    /// Accessibility score (placeholder).
    pub accessibility: u32,
    /// Whether the page is mobile friendly (simulated).
    pub mobile_friendly: bool,
    /// Security posture, 0-100.
    pub security_score: u8,
    /// Essential meta tags found, 0-15.
    pub meta_tags: u8,
    /// Percentage of optimized images, 0-100.
    pub images_optimized: u8,
}
