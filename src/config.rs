use reqwest::Url;

/// Default upstream: the public Microsoft 365 roadmap API.
pub const DEFAULT_API_URL: &str = "https://www.microsoft.com/releasecommunications/api/v1/m365";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_url: Url,
}

impl ServerConfig {
    /// Load configuration from environment.
    ///
    /// - `ROADMAP_API_URL` (optional) — base URL of the roadmap API
    pub fn from_env() -> Result<Self, String> {
        match std::env::var("ROADMAP_API_URL") {
            Ok(raw) => Self::with_api_url(&raw),
            Err(_) => Self::with_api_url(DEFAULT_API_URL),
        }
    }

    pub fn with_api_url(raw: &str) -> Result<Self, String> {
        let api_url = Url::parse(raw.trim())
            .map_err(|e| format!("ROADMAP_API_URL is not a valid URL: {e}"))?;

        if !matches!(api_url.scheme(), "http" | "https") {
            return Err("ROADMAP_API_URL must use http or https".to_string());
        }

        Ok(Self { api_url })
    }
}
