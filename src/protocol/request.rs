use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// JSON-RPC 2.0 ID, either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RpcId {
    Number(i64),
    Str(String),
}

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Option<RpcId>,
    pub method: String,
    pub params: Option<serde_json::Value>,
}

/// MCP `initialize` params.
#[derive(Debug, Clone, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: Option<String>,
    #[serde(rename = "clientInfo")]
    pub client_info: Option<ClientInfo>,
}

/// Client information sent during `initialize`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientInfo {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Parameters for `tools/call`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Roadmap tool arguments
// ---------------------------------------------------------------------------

/// Upper bound on `limit` for every tool.
pub const MAX_LIMIT: u32 = 1000;

const DEFAULT_LIMIT: u32 = 100;
const DEFAULT_SEARCH_LIMIT: u32 = 20;

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_search_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}

/// Accept any integer-valued JSON number, so `10.0` reads as `10`.
///
/// Floats beyond `u64::MAX` saturate.
fn whole_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    let value = match (number.as_u64(), number.as_f64()) {
        (Some(n), _) => n,
        (None, Some(f)) if f >= 0.0 && f.fract() == 0.0 => f as u64,
        _ => {
            return Err(D::Error::custom(format!(
                "expected a non-negative whole number, got {number}"
            )))
        }
    };
    T::try_from(value).map_err(|_| D::Error::custom(format!("{value} is out of range")))
}

/// Parameters for the `get_roadmap_items` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct GetRoadmapItemsParams {
    #[serde(default = "default_limit", deserialize_with = "whole_number")]
    pub limit: u32,
    #[serde(default, deserialize_with = "whole_number")]
    pub offset: u64,
    pub filter: Option<String>,
}

/// Parameters for the `search_roadmap` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRoadmapParams {
    pub keyword: String,
    #[serde(default = "default_search_limit", deserialize_with = "whole_number")]
    pub limit: u32,
}

/// Parameters for the `get_roadmap_item` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct GetRoadmapItemParams {
    /// Numeric roadmap ID, passed as a string.
    pub id: String,
}

/// Parameters for the `filter_by_product` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterByProductParams {
    pub product: String,
    #[serde(default = "default_limit", deserialize_with = "whole_number")]
    pub limit: u32,
}

/// Parameters for the `filter_by_release_phase` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterByReleasePhaseParams {
    pub phase: ReleasePhase,
    #[serde(default = "default_limit", deserialize_with = "whole_number")]
    pub limit: u32,
}

/// Parameters for the `filter_by_status` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterByStatusParams {
    pub status: RoadmapStatus,
    #[serde(default = "default_limit", deserialize_with = "whole_number")]
    pub limit: u32,
}

/// Parameters for the `filter_by_date` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterByDateParams {
    /// Month in `YYYY-MM` form.
    pub date: String,
    #[serde(rename = "dateType", default)]
    pub date_type: DateType,
    #[serde(default = "default_limit", deserialize_with = "whole_number")]
    pub limit: u32,
}

/// Parameters for the `filter_roadmap` tool.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterRoadmapParams {
    pub filter: String,
    #[serde(default = "default_limit", deserialize_with = "whole_number")]
    pub limit: u32,
}

/// Release ring an item is shipping through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleasePhase {
    #[serde(rename = "General Availability")]
    GeneralAvailability,
    #[serde(rename = "Public Preview")]
    PublicPreview,
    #[serde(rename = "In Development")]
    InDevelopment,
    #[serde(rename = "Rolling Out")]
    RollingOut,
}

impl ReleasePhase {
    pub const ALL: [ReleasePhase; 4] = [
        Self::GeneralAvailability,
        Self::PublicPreview,
        Self::InDevelopment,
        Self::RollingOut,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeneralAvailability => "General Availability",
            Self::PublicPreview => "Public Preview",
            Self::InDevelopment => "In Development",
            Self::RollingOut => "Rolling Out",
        }
    }
}

/// Lifecycle status of a roadmap item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoadmapStatus {
    #[serde(rename = "In development")]
    InDevelopment,
    #[serde(rename = "Rolling out")]
    RollingOut,
    #[serde(rename = "Launched")]
    Launched,
}

impl RoadmapStatus {
    pub const ALL: [RoadmapStatus; 3] = [Self::InDevelopment, Self::RollingOut, Self::Launched];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InDevelopment => "In development",
            Self::RollingOut => "Rolling out",
            Self::Launched => "Launched",
        }
    }
}

/// Which availability date `filter_by_date` compares against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DateType {
    #[default]
    GeneralAvailability,
    Preview,
}
