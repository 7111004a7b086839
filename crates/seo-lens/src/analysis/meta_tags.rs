//! Meta-tag coverage: how many essential SEO tags a page declares.

use super::{AnalyzeError, Outcome, Simulator};
use crate::acquisition::HttpClient;
use crate::extraction::{selector, ExtractError};
use scraper::Html;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Highest score the analyzer reports.
pub const MAX_META_SCORE: u8 = 15;

/// Meta `name` / `property` values that count toward the score.
pub const ESSENTIAL_TAGS: [&str; 15] = [
    "title",
    "description",
    "keywords",
    "author",
    "viewport",
    "robots",
    "canonical",
    "og:title",
    "og:description",
    "og:image",
    "twitter:card",
    "twitter:title",
    "twitter:description",
    "charset",
    "language",
];

pub struct MetaTagAnalyzer {
    client: HttpClient,
    timeout: Duration,
    simulator: Arc<dyn Simulator>,
}

impl MetaTagAnalyzer {
    pub fn new(client: HttpClient, timeout: Duration, simulator: Arc<dyn Simulator>) -> Self {
        Self {
            client,
            timeout,
            simulator,
        }
    }

    pub async fn analyze(&self, url: &str) -> Outcome<u8> {
        let result = self.measure(url).await;
        Outcome::resolve("meta_tags", url, result, || self.simulator.meta_tags_fallback())
    }

    async fn measure(&self, url: &str) -> Result<u8, AnalyzeError> {
        let page = self.client.get(url, self.timeout).await?;
        let count = count_meta_tags(&page.body)?;
        debug!(url = %page.url, status = page.status, count, "counted meta tags");
        Ok(count)
    }
}

/// Score the meta-tag coverage of an HTML document, capped at
/// [`MAX_META_SCORE`].
///
/// A non-empty `<title>` counts once, and a `<meta name="title">` counts
/// again on its own.
pub fn count_meta_tags(html: &str) -> Result<u8, ExtractError> {
    let document = Html::parse_document(html);
    let mut count: u32 = 0;

    let has_title = document
        .select(&selector("title")?)
        .next()
        .is_some_and(|t| t.text().next().is_some_and(|s| !s.is_empty()));
    if has_title {
        count += 1;
    }

    for meta in document.select(&selector("meta")?) {
        let attr = |name: &str| meta.value().attr(name).unwrap_or_default().to_lowercase();
        let name = attr("name");
        let property = attr("property");

        if ESSENTIAL_TAGS.contains(&name.as_str()) || ESSENTIAL_TAGS.contains(&property.as_str()) {
            count += 1;
        } else if attr("http-equiv") == "content-type" && meta.html().contains("charset") {
            count += 1;
        }
    }

    if document.select(&selector(r#"link[rel~="canonical"]"#)?).next().is_some() {
        count += 1;
    }

    Ok(count.min(MAX_META_SCORE as u32) as u8)
}
