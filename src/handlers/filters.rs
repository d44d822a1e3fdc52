use chrono::NaiveDate;

use crate::context::ServerContext;
use crate::protocol::{
    DateType, FilterByDateParams, FilterByProductParams, FilterByReleasePhaseParams,
    FilterByStatusParams, FilterRoadmapParams,
};
use crate::roadmap::{FieldRule, Filter, Literal, RoadmapError};

use super::envelope::ItemsEnvelope;
use super::bounded_limit;

/// Handle a `filter_by_product` tool call.
pub async fn filter_by_product(
    params: FilterByProductParams,
    ctx: &ServerContext,
) -> Result<ItemsEnvelope, RoadmapError> {
    let product = params.product.trim();
    if product.is_empty() {
        return Err(RoadmapError::Validation("product must not be blank".into()));
    }

    let filter = FieldRule::PRODUCT.matching(Literal::Str(product));
    fetch_head(ctx, filter, params.limit).await
}

/// Handle a `filter_by_release_phase` tool call.
pub async fn filter_by_release_phase(
    params: FilterByReleasePhaseParams,
    ctx: &ServerContext,
) -> Result<ItemsEnvelope, RoadmapError> {
    let filter = FieldRule::RELEASE_RING.matching(Literal::Str(params.phase.as_str()));
    fetch_head(ctx, filter, params.limit).await
}

/// Handle a `filter_by_status` tool call.
pub async fn filter_by_status(
    params: FilterByStatusParams,
    ctx: &ServerContext,
) -> Result<ItemsEnvelope, RoadmapError> {
    let filter = FieldRule::STATUS.matching(Literal::Str(params.status.as_str()));
    fetch_head(ctx, filter, params.limit).await
}

/// Handle a `filter_by_date` tool call.
pub async fn filter_by_date(
    params: FilterByDateParams,
    ctx: &ServerContext,
) -> Result<ItemsEnvelope, RoadmapError> {
    let month = params.date.trim();
    NaiveDate::parse_from_str(&format!("{month}-01"), "%Y-%m-%d").map_err(|_| {
        RoadmapError::Validation(format!("date must be YYYY-MM, got {:?}", params.date))
    })?;

    let rule = match params.date_type {
        DateType::GeneralAvailability => FieldRule::GENERAL_AVAILABILITY_DATE,
        DateType::Preview => FieldRule::PREVIEW_AVAILABILITY_DATE,
    };
    fetch_head(ctx, rule.matching(Literal::Str(month)), params.limit).await
}

/// Handle a `filter_roadmap` tool call.
pub async fn filter_roadmap(
    params: FilterRoadmapParams,
    ctx: &ServerContext,
) -> Result<ItemsEnvelope, RoadmapError> {
    let filter = Filter::from_expression(&params.filter)?.ok_or_else(|| {
        RoadmapError::InvalidFilter("expression is empty after sanitization".into())
    })?;
    fetch_head(ctx, filter, params.limit).await
}

async fn fetch_head(
    ctx: &ServerContext,
    filter: Filter,
    limit: u32,
) -> Result<ItemsEnvelope, RoadmapError> {
    let limit = bounded_limit(limit)?;
    let items = ctx.fetcher.fetch(Some(&filter)).await?;
    Ok(ItemsEnvelope::head(&items, limit).with_filter(Some(&filter)))
}
