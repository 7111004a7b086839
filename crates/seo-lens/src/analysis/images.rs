//! Image optimization: alt text, modern formats, lazy loading, dimensions.

use super::{AnalyzeError, Outcome, Simulator};
use crate::acquisition::HttpClient;
use crate::extraction::{selector, ExtractError};
use scraper::node::Element;
use scraper::Html;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Per-image score at which an image counts as optimized.
pub const OPTIMIZED_THRESHOLD: u32 = 60;

const MODERN_FORMATS: [&str; 2] = [".webp", ".avif"];
const LEGACY_FORMATS: [&str; 3] = [".jpg", ".jpeg", ".png"];

pub struct ImageAnalyzer {
    client: HttpClient,
    timeout: Duration,
    simulator: Arc<dyn Simulator>,
}

impl ImageAnalyzer {
    pub fn new(client: HttpClient, timeout: Duration, simulator: Arc<dyn Simulator>) -> Self {
        Self {
            client,
            timeout,
            simulator,
        }
    }

    pub async fn analyze(&self, url: &str) -> Outcome<u8> {
        let result = self.measure(url).await;
        Outcome::resolve("images", url, result, || self.simulator.images_fallback())
    }

    async fn measure(&self, url: &str) -> Result<u8, AnalyzeError> {
        let page = self.client.get(url, self.timeout).await?;
        let optimized = optimized_percentage(&page.body)?;
        debug!(url = %page.url, status = page.status, optimized, "scored images");
        Ok(optimized)
    }
}

/// Score one `<img>` element out of 100.
pub fn image_score(img: &Element) -> u32 {
    let mut score = 0;

    if non_empty(img, "alt").is_some() {
        score += 40;
    }

    if let Some(src) = non_empty(img, "src") {
        score += 20;
        let src = src.to_lowercase();
        if MODERN_FORMATS.iter().any(|ext| src.contains(ext)) {
            score += 20;
        } else if LEGACY_FORMATS.iter().any(|ext| src.contains(ext)) {
            score += 10;
        }
    }

    if img.attr("loading") == Some("lazy") {
        score += 10;
    }

    if non_empty(img, "width").is_some() && non_empty(img, "height").is_some() {
        score += 10;
    }

    score
}

fn non_empty<'a>(img: &'a Element, name: &str) -> Option<&'a str> {
    img.attr(name).filter(|v| !v.is_empty())
}

/// Percentage (0-100) of images scoring at least [`OPTIMIZED_THRESHOLD`].
/// A page without images is fully optimized.
pub fn optimized_percentage(html: &str) -> Result<u8, ExtractError> {
    let document = Html::parse_document(html);
    let scores: Vec<u32> = document
        .select(&selector("img")?)
        .map(|img| image_score(img.value()))
        .collect();

    if scores.is_empty() {
        return Ok(100);
    }

    let optimized = scores.iter().filter(|&&s| s >= OPTIMIZED_THRESHOLD).count();
    let pct = optimized as f64 / scores.len() as f64 * 100.0;
    Ok(pct.round_ties_even() as u8)
}
