use std::rc::Rc;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};

use super::cache::{ResultCache, UNFILTERED_KEY};
use super::error::RoadmapError;
use super::filter::Filter;
use super::item::RoadmapItem;

/// Hard deadline for one upstream request, body included (30 seconds).
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("roadmap-mcp-server/", env!("CARGO_PKG_VERSION"));

/// Longest slice of an error body carried into an upstream error.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Roadmap API client fronted by a [`ResultCache`].
#[derive(Debug)]
pub struct RoadmapFetcher {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    cache: Rc<ResultCache>,
}

impl RoadmapFetcher {
    pub fn new(base_url: Url, cache: Rc<ResultCache>) -> Result<Self, RoadmapError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url,
            timeout: UPSTREAM_TIMEOUT,
            cache,
        })
    }

    /// Override the request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch the items matching `filter`, serving from cache when fresh.
    ///
    /// Only a successful response is cached. A request that outlives the
    /// deadline is dropped, which cancels it.
    pub async fn fetch(&self, filter: Option<&Filter>) -> Result<Rc<Vec<RoadmapItem>>, RoadmapError> {
        let key = filter.map_or(UNFILTERED_KEY, Filter::as_str);

        if let Some(items) = self.cache.lookup(key) {
            debug!(key, count = items.len(), "cache hit");
            return Ok(items);
        }
        debug!(key, "cache miss");

        let items = match tokio::time::timeout(self.timeout, self.request(filter)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(key, "roadmap request timed out after {}s", self.timeout.as_secs());
                return Err(RoadmapError::Timeout(self.timeout));
            }
        };

        let items = Rc::new(items);
        self.cache.store(key, Rc::clone(&items));
        Ok(items)
    }

    async fn request(&self, filter: Option<&Filter>) -> Result<Vec<RoadmapItem>, RoadmapError> {
        let mut req = self
            .client
            .get(self.base_url.clone())
            .header(ACCEPT, "application/json");
        if let Some(filter) = filter {
            req = req.query(&[("$filter", filter.as_str())]);
        }

        debug!(url = %self.base_url, filter = filter.map(Filter::as_str), "requesting roadmap items");

        let resp = req.send().await.map_err(|e| {
            warn!("roadmap request failed: {e}");
            RoadmapError::Transport(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "roadmap API returned an error status");
            return Err(RoadmapError::Upstream {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let body = resp.text().await?;
        let items = decode_items(&body)?;
        debug!(count = items.len(), "decoded roadmap items");
        Ok(items)
    }
}

/// Pull the `value` array out of a response body.
///
/// A missing or non-array `value` yields no items, and array elements that
/// are not JSON objects are skipped. Every object becomes an item, whatever
/// the shape of its fields. Only a body that is not JSON at all is an error.
pub fn decode_items(body: &str) -> Result<Vec<RoadmapItem>, RoadmapError> {
    let envelope: Value =
        serde_json::from_str(body).map_err(|e| RoadmapError::Decode(e.to_string()))?;

    let raw = match envelope {
        Value::Object(mut fields) => fields.remove("value"),
        _ => None,
    };

    let items = match raw {
        Some(Value::Array(elements)) => elements
            .into_iter()
            .enumerate()
            .filter_map(|(index, element)| match element {
                Value::Object(fields) => Some(RoadmapItem::from(fields)),
                other => {
                    warn!(index, "skipping non-object roadmap element: {other}");
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(items)
}
