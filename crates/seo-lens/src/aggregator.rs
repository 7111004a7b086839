//! Runs every analyzer for a URL and assembles the report.

use crate::acquisition::{CertificateProbe, HttpClient};
use crate::analysis::{ImageAnalyzer, MetaTagAnalyzer, SecurityAnalyzer, Simulator};
use crate::config::AnalysisConfig;
use crate::extraction::FeatureExtractor;
use crate::model::{RelevanceModel, RelevanceScorer};
use crate::report::{AnalysisReport, ACCESSIBILITY_PLACEHOLDER, BROKEN_LINKS_PLACEHOLDER};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Produces a report for a URL. Never fails.
#[async_trait]
pub trait Analyze: Send + Sync {
    async fn analyze(&self, url: &str) -> AnalysisReport;
}

/// The production analysis pipeline.
pub struct Aggregator {
    extractor: FeatureExtractor,
    scorer: RelevanceScorer,
    meta_tags: MetaTagAnalyzer,
    security: SecurityAnalyzer,
    images: ImageAnalyzer,
    simulator: Arc<dyn Simulator>,
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator").finish_non_exhaustive()
    }
}

impl Aggregator {
    pub fn new(
        config: &AnalysisConfig,
        client: HttpClient,
        model: Arc<dyn RelevanceModel>,
        probe: Arc<dyn CertificateProbe>,
        simulator: Arc<dyn Simulator>,
    ) -> Self {
        Self {
            extractor: FeatureExtractor::new(client.clone(), config.feature_timeout),
            scorer: RelevanceScorer::new(model),
            meta_tags: MetaTagAnalyzer::new(client.clone(), config.fetch_timeout, simulator.clone()),
            security: SecurityAnalyzer::new(
                client.clone(),
                config.fetch_timeout,
                probe,
                simulator.clone(),
            ),
            images: ImageAnalyzer::new(client, config.fetch_timeout, simulator.clone()),
            simulator,
        }
    }
}

#[async_trait]
impl Analyze for Aggregator {
    async fn analyze(&self, url: &str) -> AnalysisReport {
        let start = Instant::now();

        let features = self.extractor.extract(url).await;
        let seo_score = self.scorer.score(features.as_ref());

        let meta_tags = self.meta_tags.analyze(url).await;
        let security = self.security.analyze(url).await;
        let images = self.images.analyze(url).await;

        let fallbacks = [&meta_tags, &security, &images]
            .iter()
            .filter(|o| o.is_fallback())
            .count()
            + usize::from(features.is_none());

        let report = AnalysisReport {
            seo_score,
            page_speed: self.simulator.page_speed_ms(),
            readability: self.simulator.readability(),
            broken_links: BROKEN_LINKS_PLACEHOLDER,
            accessibility: ACCESSIBILITY_PLACEHOLDER,
            mobile_friendly: self.simulator.mobile_friendly(),
            security_score: security.value(),
            meta_tags: meta_tags.value(),
            images_optimized: images.value(),
        };

        info!(
            url,
            seo_score = report.seo_score,
            fallbacks,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "analysis complete"
        );
        report
    }
}
