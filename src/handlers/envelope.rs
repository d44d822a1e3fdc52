use serde::Serialize;

use crate::roadmap::{Filter, RoadmapItem};

/// Success payload shared by every roadmap tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemsEnvelope {
    pub total: usize,
    pub returned: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    pub items: Vec<RoadmapItem>,
}

impl ItemsEnvelope {
    /// The `[offset, offset + limit)` window of `all`.
    pub fn page(all: &[RoadmapItem], offset: usize, limit: usize) -> Self {
        let total = all.len();
        let start = offset.min(total);
        let end = offset.saturating_add(limit).min(total);
        let items = all[start..end].to_vec();

        Self {
            total,
            returned: items.len(),
            offset: Some(offset),
            limit: Some(limit),
            has_more: Some(offset.saturating_add(limit) < total),
            filter: None,
            keyword: None,
            items,
        }
    }

    /// The first `limit` items of `all`.
    pub fn head(all: &[RoadmapItem], limit: usize) -> Self {
        Self::page(all, 0, limit)
    }

    pub fn single(item: RoadmapItem, total: usize) -> Self {
        Self {
            total,
            returned: 1,
            offset: None,
            limit: None,
            has_more: None,
            filter: None,
            keyword: None,
            items: vec![item],
        }
    }

    pub fn with_filter(mut self, filter: Option<&Filter>) -> Self {
        self.filter = filter.map(|f| f.as_str().to_string());
        self
    }
}
