//! MCP server for the Microsoft 365 roadmap.
//!
//! Exposes eight read-only query tools (`get_roadmap_items`, `search_roadmap`,
//! `filter_by_product`, ...) over JSON-RPC 2.0 stdio transport. Each call is
//! translated into at most one `GET` against the roadmap API, with results
//! held briefly in an in-process cache.

pub mod config;
pub mod context;
pub mod handlers;
pub mod metrics;
pub mod protocol;
pub mod roadmap;
pub mod server;

pub mod schema;
