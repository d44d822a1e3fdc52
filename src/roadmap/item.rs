use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single roadmap record as returned by the upstream API.
///
/// Only the fields this server filters or searches on are named. A named
/// field is populated only when its value has the expected shape; anything
/// else, explicit nulls included, stays in `extra` and is written back out
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct RoadmapItem {
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_rings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_instances: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general_availability_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_availability_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for RoadmapItem {
    fn from(mut extra: Map<String, Value>) -> Self {
        Self {
            id: extra.remove("id").unwrap_or(Value::Null),
            title: take(&mut extra, "title"),
            description: take(&mut extra, "description"),
            status: take(&mut extra, "status"),
            products: take(&mut extra, "products"),
            platforms: take(&mut extra, "platforms"),
            release_rings: take(&mut extra, "releaseRings"),
            cloud_instances: take(&mut extra, "cloudInstances"),
            general_availability_date: take(&mut extra, "generalAvailabilityDate"),
            preview_availability_date: take(&mut extra, "previewAvailabilityDate"),
            extra,
        }
    }
}

/// Move `key` out of `fields` when it decodes as `T`; otherwise leave it.
fn take<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    let parsed = match fields.get(key) {
        None | Some(Value::Null) => return None,
        Some(raw) => T::deserialize(raw).ok()?,
    };
    fields.remove(key);
    Some(parsed)
}

impl RoadmapItem {
    /// Case-insensitive substring match against title or description.
    ///
    /// `needle` must already be lowercased.
    pub fn mentions(&self, needle: &str) -> bool {
        let hit = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(needle))
        };
        hit(&self.title) || hit(&self.description)
    }
}
