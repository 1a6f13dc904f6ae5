//! Network and preview configuration types for the preview server.

use std::time::Duration;

/// Top-level network configuration for the server.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Bind address for the server.
    pub host: String,
    /// Port to listen on. 0 means OS-assigned.
    pub port: u16,
    /// Allowed CORS origins.
    pub cors_origins: Vec<String>,
    /// Maximum time to wait for a request to complete.
    pub request_timeout: Duration,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Where the preview handler is mounted.
#[derive(Debug, Clone, Default)]
pub struct PreviewConfig {
    /// Path prefix under which previews are served. Empty serves at `/`.
    pub mount: String,
}

impl PreviewConfig {
    #[must_use]
    pub fn new(mount: impl Into<String>) -> Self {
        Self {
            mount: mount.into(),
        }
    }

    /// Mount prefix with a leading slash and no trailing slash, or empty.
    #[must_use]
    pub fn normalized_mount(&self) -> String {
        let trimmed = self.mount.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }
}
