use jsonschema::validator_for;
use serde_json::{json, Value};

use roadmap_mcp_server::protocol::{McpErrorCode, McpErrorResponse};
use roadmap_mcp_server::roadmap::RoadmapError;

/// Error envelope schema (v0) — frozen.
const ERROR_SCHEMA: &str = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "title": "Roadmap MCP Error Response v0",
  "type": "object",
  "required": ["error"],
  "additionalProperties": false,
  "properties": {
    "error": {
      "type": "object",
      "required": ["code", "message"],
      "additionalProperties": false,
      "properties": {
        "code": {
          "type": "string",
          "enum": [
            "validation_error",
            "invalid_filter",
            "not_found",
            "unknown_tool",
            "timeout",
            "upstream_error",
            "internal_error"
          ]
        },
        "message": {
          "type": "string",
          "minLength": 1
        },
        "status": {
          "type": "integer",
          "minimum": 100,
          "maximum": 599
        }
      }
    },
    "context": {
      "type": "object",
      "required": ["tool", "arguments"],
      "additionalProperties": false,
      "properties": {
        "tool": { "type": "string" },
        "arguments": {}
      }
    }
  }
}"#;

#[test]
fn golden_mcp_error_schema_validation() {
    // 1. Build a canonical error response
    let response = McpErrorResponse::canonical(McpErrorCode::NotFound);

    let json_str = serde_json::to_string_pretty(&response).unwrap();
    let json_value: Value = serde_json::from_str(&json_str).unwrap();

    // 2. Validate against schema
    let schema_json: Value = serde_json::from_str(ERROR_SCHEMA).unwrap();
    let validator = validator_for(&schema_json).unwrap();
    assert!(validator.is_valid(&json_value), "MCP error JSON must satisfy v0 schema");

    // 3. Golden snapshot (byte-identical, stable)
    let expected = r#"{
  "error": {
    "code": "not_found",
    "message": "Roadmap item not found"
  }
}"#;

    assert_eq!(json_str.trim(), expected.trim(), "MCP error JSON snapshot mismatch");
}

#[test]
fn roadmap_errors_produce_schema_valid_envelopes() {
    let schema_json: Value = serde_json::from_str(ERROR_SCHEMA).unwrap();
    let validator = validator_for(&schema_json).unwrap();

    let errors = [
        RoadmapError::Validation("limit must be between 1 and 1000, got 0".into()),
        RoadmapError::InvalidFilter("expression contains forbidden keyword: DROP".into()),
        RoadmapError::NotFound("42".into()),
        RoadmapError::Timeout(std::time::Duration::from_secs(30)),
        RoadmapError::Upstream { status: 502, message: "bad gateway".into() },
        RoadmapError::Decode("expected value at line 1 column 1".into()),
    ];

    for err in &errors {
        let envelope = McpErrorResponse::from(err)
            .with_context("filter_roadmap", json!({ "filter": "x" }));
        let value = serde_json::to_value(&envelope).unwrap();
        assert!(validator.is_valid(&value), "invalid envelope for {err:?}: {value}");
    }
}

#[test]
fn upstream_error_carries_status_and_maps_to_internal_rpc_code() {
    let err = RoadmapError::Upstream { status: 429, message: "slow down".into() };
    let envelope = McpErrorResponse::from(&err);

    assert_eq!(envelope.error.code, McpErrorCode::UpstreamError);
    assert_eq!(envelope.error.status, Some(429));
    assert_eq!(envelope.error.code.json_rpc_code(), -32603);
    assert_eq!(McpErrorCode::ValidationError.json_rpc_code(), -32602);
}
