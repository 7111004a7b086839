//! Runtime configuration for the analyzer pipeline and the HTTP server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Port used when neither `--port` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 5000;

/// Per-fetch timeouts for the analysis pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Timeout for the relevance feature fetch.
    pub feature_timeout: Duration,
    /// Timeout for each heuristic analyzer's fetch.
    pub fetch_timeout: Duration,
    /// Timeout for the TLS certificate handshake.
    pub tls_timeout: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            feature_timeout: Duration::from_secs(5),
            fetch_timeout: Duration::from_secs(10),
            tls_timeout: Duration::from_secs(5),
        }
    }
}

/// Where and how the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    pub port: u16,
    /// Bind every interface instead of loopback only.
    pub public: bool,
    /// Directory holding the model artifacts.
    pub model_dir: PathBuf,
    pub analysis: AnalysisConfig,
}

impl ServeConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        let ip = if self.public {
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        } else {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        };
        SocketAddr::new(ip, self.port)
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            public: false,
            model_dir: PathBuf::from("."),
            analysis: AnalysisConfig::default(),
        }
    }
}
