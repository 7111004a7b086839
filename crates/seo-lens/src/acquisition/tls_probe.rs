//! TLS certificate probe used by the security analyzer.
//!
//! Opens a TCP connection to `host:port`, performs a verified TLS handshake
//! against the webpki root store, and reports whether the server presented
//! a certificate.

use async_trait::async_trait;
use rustls::pki_types::ServerName;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;

/// Errors raised by a certificate probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("invalid server name '{0}'")]
    InvalidServerName(String),
    #[error("TLS configuration error: {0}")]
    Config(#[from] rustls::Error),
    #[error("connection failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("probe timed out after {0:?}")]
    Timeout(Duration),
}

/// Something that can check whether a host serves a TLS certificate.
#[async_trait]
pub trait CertificateProbe: Send + Sync {
    /// Returns `Ok(true)` if the handshake succeeded and yielded a peer
    /// certificate.
    async fn has_peer_certificate(&self, host: &str, port: u16) -> Result<bool, ProbeError>;
}

/// Production probe backed by `tokio-rustls`.
pub struct RustlsProbe {
    connector: TlsConnector,
    timeout: Duration,
}

impl RustlsProbe {
    /// Create a probe with the given handshake timeout.
    pub fn new(timeout: Duration) -> Result<Self, ProbeError> {
        let roots = rustls::RootCertStore {
            roots: webpki_roots::TLS_SERVER_ROOTS.to_vec(),
        };
        let config = rustls::ClientConfig::builder_with_provider(Arc::new(
            rustls::crypto::ring::default_provider(),
        ))
        .with_safe_default_protocol_versions()?
        .with_root_certificates(roots)
        .with_no_client_auth();

        Ok(Self {
            connector: TlsConnector::from(Arc::new(config)),
            timeout,
        })
    }

    async fn handshake(&self, host: &str, port: u16) -> Result<bool, ProbeError> {
        let server_name = ServerName::try_from(host.to_string())
            .map_err(|_| ProbeError::InvalidServerName(host.to_string()))?;
        let tcp = TcpStream::connect((host, port)).await?;
        let tls = self.connector.connect(server_name, tcp).await?;
        let (_, session) = tls.get_ref();
        Ok(session
            .peer_certificates()
            .is_some_and(|certs| !certs.is_empty()))
    }
}

#[async_trait]
impl CertificateProbe for RustlsProbe {
    async fn has_peer_certificate(&self, host: &str, port: u16) -> Result<bool, ProbeError> {
        tokio::time::timeout(self.timeout, self.handshake(host, port))
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))?
    }
}
