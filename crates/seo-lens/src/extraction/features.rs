//! Extract the text the relevance model scores: title, meta description,
//! and the first 1000 characters of visible text.

use super::{selector, ExtractError};
use crate::acquisition::HttpClient;
use scraper::Html;
use std::time::Duration;
use tracing::warn;

/// Maximum number of visible-text characters kept per page.
pub const MAX_TEXT_CHARS: usize = 1000;

/// Elements whose text is never rendered.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Text features of a single page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageFeatures {
    pub title: String,
    pub description: String,
    /// Visible text, already truncated to [`MAX_TEXT_CHARS`].
    pub text: String,
}

impl PageFeatures {
    /// Space-joined title, description and text, as fed to the vectorizer.
    pub fn blob(&self) -> String {
        format!("{} {} {}", self.title, self.description, self.text)
    }
}

/// Fetches pages and pulls out [`PageFeatures`].
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    client: HttpClient,
    timeout: Duration,
}

impl FeatureExtractor {
    pub fn new(client: HttpClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Fetch `url` and extract its features.
    ///
    /// Returns `None` on any fetch or parse failure.
    pub async fn extract(&self, url: &str) -> Option<PageFeatures> {
        let page = match self.client.get(url, self.timeout).await {
            Ok(page) => page,
            Err(e) => {
                warn!(url, error = %e, "feature extraction failed");
                return None;
            }
        };

        match parse_features(&page.body) {
            Ok(features) => Some(features),
            Err(e) => {
                warn!(url, error = %e, "feature extraction failed");
                None
            }
        }
    }
}

/// Parse [`PageFeatures`] out of an HTML document.
pub fn parse_features(html: &str) -> Result<PageFeatures, ExtractError> {
    let document = Html::parse_document(html);

    let title = document
        .select(&selector("title")?)
        .next()
        .map(|t| t.text().collect::<String>())
        .unwrap_or_default();

    // First exact (case-sensitive) name="description" wins.
    let description = document
        .select(&selector(r#"meta[name="description"]"#)?)
        .next()
        .and_then(|m| m.value().attr("content"))
        .unwrap_or_default()
        .to_string();

    let text: String = visible_text(&document).chars().take(MAX_TEXT_CHARS).collect();

    Ok(PageFeatures {
        title,
        description,
        text,
    })
}

fn visible_text(document: &Html) -> String {
    let mut out = String::new();
    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            out.push_str(text);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::http_client::DEFAULT_USER_AGENT;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_features() {
        let html = r#"<html><head>
            <title>Rust Crates</title>
            <meta name="description" content="All about crates">
            <meta name="description" content="second one is ignored">
            <script>var tracking = 1;</script>
            <style>body { color: red }</style>
        </head><body><h1>Hello</h1><p>World</p></body></html>"#;

        let features = parse_features(html).unwrap();
        assert_eq!(features.title, "Rust Crates");
        assert_eq!(features.description, "All about crates");
        assert!(features.text.contains("Hello"));
        assert!(features.text.contains("World"));
        assert!(!features.text.contains("tracking"));
        assert!(!features.text.contains("color"));
    }

    #[test]
    fn test_description_name_is_case_sensitive() {
        let html = r#"<html><head><meta name="Description" content="nope"></head></html>"#;
        let features = parse_features(html).unwrap();
        assert_eq!(features.description, "");
        assert_eq!(features.title, "");
    }

    #[test]
    fn test_text_truncated_to_char_limit() {
        let body = "é".repeat(MAX_TEXT_CHARS * 2);
        let html = format!("<html><body><p>{body}</p></body></html>");
        let features = parse_features(&html).unwrap();
        assert_eq!(features.text.chars().count(), MAX_TEXT_CHARS);
    }

    #[test]
    fn test_blob_joins_with_spaces() {
        let features = PageFeatures {
            title: "T".to_string(),
            description: "D".to_string(),
            text: "X".to_string(),
        };
        assert_eq!(features.blob(), "T D X");
        assert_eq!(PageFeatures::default().blob(), "  ");
    }

    #[tokio::test]
    async fn test_extract_from_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<html><head><title>Shop</title></head><body>Buy things</body></html>",
            ))
            .mount(&server)
            .await;

        let extractor = FeatureExtractor::new(
            HttpClient::new(DEFAULT_USER_AGENT).unwrap(),
            Duration::from_secs(5),
        );
        let features = extractor.extract(&server.uri()).await.unwrap();
        assert_eq!(features.title, "Shop");
        assert!(features.text.contains("Buy things"));
    }

    #[tokio::test]
    async fn test_extract_unreachable_returns_none() {
        let extractor = FeatureExtractor::new(
            HttpClient::new(DEFAULT_USER_AGENT).unwrap(),
            Duration::from_secs(2),
        );
        assert!(extractor.extract("http://127.0.0.1:1/").await.is_none());
        assert!(extractor.extract("").await.is_none());
    }
}
