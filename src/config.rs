use anyhow::{Context, Result};

/// Authentication and transport configuration
///
/// Built either explicitly (library embedding) or from environment
/// variables with defaults (`from_env`, which also loads a `.env` file
/// if present).
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// API base URL, e.g. "https://api.example.com"
    pub base_url: String,

    /// Path of the refresh exchange endpoint
    pub refresh_path: String,

    /// Upper bound on a single refresh exchange, in seconds
    pub refresh_timeout_secs: u64,

    /// HTTP connect timeout in seconds
    pub connect_timeout_secs: u64,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
}

impl AuthConfig {
    /// Create a configuration with defaults for everything but the base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            refresh_path: "/auth/refresh".to_string(),
            refresh_timeout_secs: 30,
            connect_timeout_secs: 30,
            request_timeout_secs: 300,
        }
    }

    /// Load configuration from the environment with priority: ENV > defaults
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let base_url = std::env::var("AUTH_BASE_URL")
            .context("AUTH_BASE_URL is required (set it in the environment or .env)")?;

        Ok(Self {
            base_url,

            refresh_path: std::env::var("AUTH_REFRESH_PATH")
                .unwrap_or_else(|_| "/auth/refresh".to_string()),

            refresh_timeout_secs: env_u64("AUTH_REFRESH_TIMEOUT", 30),

            connect_timeout_secs: env_u64("HTTP_CONNECT_TIMEOUT", 30),

            request_timeout_secs: env_u64("HTTP_REQUEST_TIMEOUT", 300),
        })
    }

    pub fn with_refresh_path(mut self, path: impl Into<String>) -> Self {
        self.refresh_path = path.into();
        self
    }

    pub fn with_refresh_timeout_secs(mut self, secs: u64) -> Self {
        self.refresh_timeout_secs = secs;
        self
    }
}

/// Parse a u64 environment variable, falling back to a default
fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
