//! Security posture: HTTPS, security headers, and a live certificate check.

use super::{AnalyzeError, Outcome, Simulator};
use crate::acquisition::{CertificateProbe, HttpClient};
use reqwest::header::HeaderMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const HTTPS_POINTS: u32 = 30;
pub const CERTIFICATE_POINTS: u32 = 10;
pub const MAX_SECURITY_SCORE: u8 = 100;

/// Security headers and the points their presence earns. Values are not
/// inspected.
pub const SECURITY_HEADERS: [(&str, u32); 7] = [
    ("strict-transport-security", 15),
    ("content-security-policy", 15),
    ("x-frame-options", 10),
    ("x-content-type-options", 10),
    ("x-xss-protection", 10),
    ("referrer-policy", 5),
    ("permissions-policy", 5),
];

pub struct SecurityAnalyzer {
    client: HttpClient,
    timeout: Duration,
    probe: Arc<dyn CertificateProbe>,
    simulator: Arc<dyn Simulator>,
}

impl SecurityAnalyzer {
    pub fn new(
        client: HttpClient,
        timeout: Duration,
        probe: Arc<dyn CertificateProbe>,
        simulator: Arc<dyn Simulator>,
    ) -> Self {
        Self {
            client,
            timeout,
            probe,
            simulator,
        }
    }

    pub async fn analyze(&self, url: &str) -> Outcome<u8> {
        let result = self.measure(url).await;
        Outcome::resolve("security", url, result, || self.simulator.security_fallback())
    }

    async fn measure(&self, url: &str) -> Result<u8, AnalyzeError> {
        let page = self.client.get(url, self.timeout).await?;
        // Already validated by `get`.
        let parsed = Url::parse(url).ok();

        let mut certificate_ok = false;
        if let Some(host) = parsed
            .as_ref()
            .filter(|u| u.scheme() == "https")
            .and_then(|u| u.host_str())
        {
            certificate_ok = match self.probe.has_peer_certificate(host, 443).await {
                Ok(ok) => ok,
                Err(e) => {
                    debug!(host, error = %e, "certificate probe failed");
                    false
                }
            };
        }

        let https = parsed.is_some_and(|u| u.scheme() == "https");
        let score = security_score(https, &page.headers, certificate_ok);
        debug!(
            url = %page.url,
            status = page.status,
            https,
            certificate_ok,
            score,
            "scored security"
        );
        Ok(score)
    }
}

/// Combine the scheme, the response headers and the certificate check into
/// a score capped at [`MAX_SECURITY_SCORE`].
pub fn security_score(https: bool, headers: &HeaderMap, certificate_ok: bool) -> u8 {
    let mut score = 0;
    if https {
        score += HTTPS_POINTS;
    }
    for (name, points) in SECURITY_HEADERS {
        if headers.contains_key(name) {
            score += points;
        }
    }
    if https && certificate_ok {
        score += CERTIFICATE_POINTS;
    }
    score.min(MAX_SECURITY_SCORE as u32) as u8
}
