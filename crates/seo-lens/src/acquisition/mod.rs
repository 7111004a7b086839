//! Network acquisition: page fetches and TLS certificate probing.

pub mod http_client;
pub mod tls_probe;

pub use http_client::{FetchError, HttpClient, PageResponse};
pub use tls_probe::{CertificateProbe, ProbeError, RustlsProbe};
