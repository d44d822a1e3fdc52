use std::rc::Rc;
use std::time::Duration;

use tokio::time::Instant;

use crate::config::ServerConfig;
use crate::handlers::catalog::ToolCatalog;
use crate::metrics::ToolMetrics;
use crate::roadmap::{ResultCache, RoadmapError, RoadmapFetcher};
use crate::schema::SchemaValidationError;

/// Failures while assembling the server before it reads any request.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("tool schema error: {0}")]
    Schema(#[from] SchemaValidationError),
    #[error("HTTP client error: {0}")]
    Http(#[from] RoadmapError),
}

/// Everything a request handler needs, built once per process.
pub struct ServerContext {
    pub config: ServerConfig,
    pub cache: Rc<ResultCache>,
    pub fetcher: RoadmapFetcher,
    pub metrics: ToolMetrics,
    pub catalog: ToolCatalog,
    started_at: Instant,
}

impl ServerContext {
    pub fn new(config: ServerConfig) -> Result<Self, StartupError> {
        let cache = Rc::new(ResultCache::new());
        let fetcher = RoadmapFetcher::new(config.api_url.clone(), Rc::clone(&cache))?;
        let catalog = ToolCatalog::new()?;

        Ok(Self {
            config,
            cache,
            fetcher,
            metrics: ToolMetrics::new(),
            catalog,
            started_at: Instant::now(),
        })
    }

    /// Override the upstream request deadline.
    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.fetcher = self.fetcher.with_timeout(timeout);
        self
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }
}
