// ── Runtime connection configuration ──
//
// These types describe *how* to reach the catalog API. They never touch
// disk: the CLI (via shopfront-config) builds a `CatalogConfig` and hands
// it in.

use std::time::Duration;

use url::Url;

/// Default API root for a local json-server backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed development servers).
    DangerAcceptInvalid,
}

/// Configuration for talking to a single catalog API.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API root (e.g., `http://localhost:8080`).
    pub api_url: Url,
    /// TLS verification strategy.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Per-request timeout used unless a profile or flag sets one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

impl CatalogConfig {
    /// Config for `api_url` with strict TLS and the default timeout.
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            tls: TlsVerification::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
