//! Roadmap data access: the item model, filter construction, the result
//! cache, and the upstream HTTP fetcher.

pub mod cache;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod item;

pub use cache::{CacheStats, ResultCache};
pub use error::RoadmapError;
pub use fetcher::RoadmapFetcher;
pub use filter::{escape_literal, sanitize, FieldRule, Filter, Literal};
pub use item::RoadmapItem;
