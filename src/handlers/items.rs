use crate::context::ServerContext;
use crate::protocol::{GetRoadmapItemParams, GetRoadmapItemsParams, SearchRoadmapParams};
use crate::roadmap::{FieldRule, Filter, Literal, RoadmapError, RoadmapItem};

use super::envelope::ItemsEnvelope;
use super::bounded_limit;

/// Handle a `get_roadmap_items` tool call.
///
/// The optional filter is a caller-written expression, so it goes through
/// the sanitizer rather than the field builder. A filter that sanitizes to
/// nothing means "no filter".
pub async fn get_roadmap_items(
    params: GetRoadmapItemsParams,
    ctx: &ServerContext,
) -> Result<ItemsEnvelope, RoadmapError> {
    let limit = bounded_limit(params.limit)?;
    // An offset past any addressable index is simply past the end.
    let offset = usize::try_from(params.offset).unwrap_or(usize::MAX);
    let filter = match params.filter.as_deref() {
        Some(raw) => Filter::from_expression(raw)?,
        None => None,
    };

    let items = ctx.fetcher.fetch(filter.as_ref()).await?;
    Ok(ItemsEnvelope::page(&items, offset, limit).with_filter(filter.as_ref()))
}

/// Handle a `search_roadmap` tool call.
///
/// Matching happens locally over the unfiltered collection.
pub async fn search_roadmap(
    params: SearchRoadmapParams,
    ctx: &ServerContext,
) -> Result<ItemsEnvelope, RoadmapError> {
    let limit = bounded_limit(params.limit)?;
    let needle = params.keyword.trim().to_lowercase();
    if needle.is_empty() {
        return Err(RoadmapError::Validation("keyword must not be blank".into()));
    }

    let items = ctx.fetcher.fetch(None).await?;
    let matches: Vec<RoadmapItem> = items
        .iter()
        .filter(|item| item.mentions(&needle))
        .cloned()
        .collect();

    let mut envelope = ItemsEnvelope::head(&matches, limit);
    envelope.keyword = Some(params.keyword);
    Ok(envelope)
}

/// Handle a `get_roadmap_item` tool call.
pub async fn get_roadmap_item(
    params: GetRoadmapItemParams,
    ctx: &ServerContext,
) -> Result<ItemsEnvelope, RoadmapError> {
    let id: u64 = params
        .id
        .trim()
        .parse()
        .map_err(|_| RoadmapError::Validation(format!("id must be numeric, got {:?}", params.id)))?;

    let filter = FieldRule::ID.matching(Literal::Int(id));
    let items = ctx.fetcher.fetch(Some(&filter)).await?;

    match items.first() {
        Some(item) => Ok(ItemsEnvelope::single(item.clone(), items.len()).with_filter(Some(&filter))),
        None => Err(RoadmapError::NotFound(id.to_string())),
    }
}
