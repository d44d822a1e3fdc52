use std::collections::HashMap;

use serde_json::{json, Value};

use crate::protocol::{ReleasePhase, RoadmapStatus, MAX_LIMIT};
use crate::schema::{CompiledSchema, SchemaValidationError};

pub const GET_ROADMAP_ITEMS: &str = "get_roadmap_items";
pub const SEARCH_ROADMAP: &str = "search_roadmap";
pub const GET_ROADMAP_ITEM: &str = "get_roadmap_item";
pub const FILTER_BY_PRODUCT: &str = "filter_by_product";
pub const FILTER_BY_RELEASE_PHASE: &str = "filter_by_release_phase";
pub const FILTER_BY_STATUS: &str = "filter_by_status";
pub const FILTER_BY_DATE: &str = "filter_by_date";
pub const FILTER_ROADMAP: &str = "filter_roadmap";

/// Longest free-form filter expression accepted.
pub const MAX_FILTER_CHARS: u64 = 1000;

/// Longest keyword or product name accepted.
pub const MAX_TERM_CHARS: u64 = 200;

/// The advertised tools and their compiled argument schemas.
pub struct ToolCatalog {
    definitions: Vec<Value>,
    schemas: HashMap<&'static str, CompiledSchema>,
}

impl ToolCatalog {
    pub fn new() -> Result<Self, SchemaValidationError> {
        let tools = tool_definitions();
        let mut schemas = HashMap::new();
        let mut definitions = Vec::with_capacity(tools.len());

        for (name, description, input_schema) in tools {
            schemas.insert(name, CompiledSchema::compile(&input_schema)?);
            definitions.push(json!({
                "name": name,
                "description": description,
                "inputSchema": input_schema,
            }));
        }

        Ok(Self { definitions, schemas })
    }

    /// Tool list in `tools/list` shape.
    pub fn definitions(&self) -> &[Value] {
        &self.definitions
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Check tool arguments against the advertised schema.
    ///
    /// Unknown tool names pass; dispatch rejects those separately.
    pub fn validate(&self, name: &str, arguments: &Value) -> Result<(), SchemaValidationError> {
        match self.schemas.get(name) {
            Some(schema) => schema.validate(arguments),
            None => Ok(()),
        }
    }
}

fn limit_schema(default: u32) -> Value {
    json!({
        "type": "integer",
        "minimum": 1,
        "maximum": MAX_LIMIT,
        "default": default,
        "description": "Maximum number of items to return"
    })
}

fn tool_definitions() -> Vec<(&'static str, &'static str, Value)> {
    let phases: Vec<&str> = ReleasePhase::ALL.iter().map(|p| p.as_str()).collect();
    let statuses: Vec<&str> = RoadmapStatus::ALL.iter().map(|s| s.as_str()).collect();

    vec![
        (
            GET_ROADMAP_ITEMS,
            "List roadmap items with pagination and an optional OData filter",
            json!({
                "type": "object",
                "properties": {
                    "limit": limit_schema(100),
                    "offset": {
                        "type": "integer",
                        "minimum": 0,
                        "default": 0,
                        "description": "Number of items to skip"
                    },
                    "filter": {
                        "type": "string",
                        "maxLength": MAX_FILTER_CHARS,
                        "description": "OData filter expression, e.g. status eq 'Launched'"
                    }
                },
                "additionalProperties": false
            }),
        ),
        (
            SEARCH_ROADMAP,
            "Search roadmap item titles and descriptions for a keyword (case-insensitive)",
            json!({
                "type": "object",
                "required": ["keyword"],
                "properties": {
                    "keyword": {
                        "type": "string",
                        "minLength": 1,
                        "maxLength": MAX_TERM_CHARS,
                        "description": "Text to look for"
                    },
                    "limit": limit_schema(20)
                },
                "additionalProperties": false
            }),
        ),
        (
            GET_ROADMAP_ITEM,
            "Fetch a single roadmap item by its numeric ID",
            json!({
                "type": "object",
                "required": ["id"],
                "properties": {
                    "id": {
                        "type": "string",
                        "pattern": "^[0-9]{1,19}$",
                        "description": "Roadmap item ID"
                    }
                },
                "additionalProperties": false
            }),
        ),
        (
            FILTER_BY_PRODUCT,
            "List roadmap items that include a product, e.g. Microsoft Teams",
            json!({
                "type": "object",
                "required": ["product"],
                "properties": {
                    "product": {
                        "type": "string",
                        "minLength": 1,
                        "maxLength": MAX_TERM_CHARS,
                        "description": "Product name"
                    },
                    "limit": limit_schema(100)
                },
                "additionalProperties": false
            }),
        ),
        (
            FILTER_BY_RELEASE_PHASE,
            "List roadmap items in a release phase",
            json!({
                "type": "object",
                "required": ["phase"],
                "properties": {
                    "phase": {
                        "type": "string",
                        "enum": phases,
                        "description": "Release phase"
                    },
                    "limit": limit_schema(100)
                },
                "additionalProperties": false
            }),
        ),
        (
            FILTER_BY_STATUS,
            "List roadmap items with a lifecycle status",
            json!({
                "type": "object",
                "required": ["status"],
                "properties": {
                    "status": {
                        "type": "string",
                        "enum": statuses,
                        "description": "Lifecycle status"
                    },
                    "limit": limit_schema(100)
                },
                "additionalProperties": false
            }),
        ),
        (
            FILTER_BY_DATE,
            "List roadmap items by general availability or preview month",
            json!({
                "type": "object",
                "required": ["date"],
                "properties": {
                    "date": {
                        "type": "string",
                        "pattern": "^[0-9]{4}-(0[1-9]|1[0-2])$",
                        "description": "Month in YYYY-MM form"
                    },
                    "dateType": {
                        "type": "string",
                        "enum": ["generalAvailability", "preview"],
                        "default": "generalAvailability",
                        "description": "Which availability date to match"
                    },
                    "limit": limit_schema(100)
                },
                "additionalProperties": false
            }),
        ),
        (
            FILTER_ROADMAP,
            "List roadmap items matching a custom OData filter expression",
            json!({
                "type": "object",
                "required": ["filter"],
                "properties": {
                    "filter": {
                        "type": "string",
                        "minLength": 1,
                        "maxLength": MAX_FILTER_CHARS,
                        "description": "OData filter expression, e.g. products/any(p:p eq 'Microsoft Teams')"
                    },
                    "limit": limit_schema(100)
                },
                "additionalProperties": false
            }),
        ),
    ]
}
