//! Operational tools: liveness, call metrics, and cache management.
//!
//! These are callable through `tools/call` but not advertised by
//! `tools/list`.

use serde_json::json;
use tracing::info;

use crate::context::ServerContext;
use crate::protocol::ToolResult;

pub const SERVER_STATUS: &str = "server.status";
pub const SERVER_METRICS: &str = "server.metrics";
pub const CACHE_INSPECT: &str = "cache.inspect";
pub const CACHE_CLEAR: &str = "cache.clear";

pub fn is_operation(name: &str) -> bool {
    matches!(name, SERVER_STATUS | SERVER_METRICS | CACHE_INSPECT | CACHE_CLEAR)
}

/// Run an operational tool. Returns `None` for any other name.
pub fn handle(name: &str, ctx: &ServerContext) -> Option<ToolResult> {
    let payload = match name {
        SERVER_STATUS => json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "uptimeSeconds": ctx.uptime().as_secs(),
            "cacheSize": ctx.cache.len(),
        }),
        SERVER_METRICS => json!({
            "tools": ctx.metrics.snapshot(),
            "cacheSize": ctx.cache.len(),
        }),
        CACHE_INSPECT => json!(ctx.cache.stats()),
        CACHE_CLEAR => {
            let cleared = ctx.cache.clear();
            info!(cleared, "cache cleared");
            json!({ "cleared": cleared })
        }
        _ => return None,
    };

    Some(ToolResult::text(payload.to_string()))
}
