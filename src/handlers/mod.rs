pub mod catalog;
pub mod envelope;
pub mod filters;
pub mod items;
pub mod operations;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::context::ServerContext;
use crate::protocol::{
    InitializeParams, JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpErrorCode,
    McpErrorResponse, ToolCallParams, ToolResult, MAX_LIMIT,
};
use crate::roadmap::RoadmapError;
use crate::schema::SchemaValidationError;

use catalog::{
    FILTER_BY_DATE, FILTER_BY_PRODUCT, FILTER_BY_RELEASE_PHASE, FILTER_BY_STATUS, FILTER_ROADMAP,
    GET_ROADMAP_ITEM, GET_ROADMAP_ITEMS, SEARCH_ROADMAP,
};
use envelope::ItemsEnvelope;

/// Dispatch a JSON-RPC request to the appropriate handler.
///
/// Returns `None` for notifications (no response required).
pub async fn dispatch(req: &JsonRpcRequest, ctx: &ServerContext) -> Option<JsonRpcResponse> {
    match req.method.as_str() {
        "initialize" => {
            let params: Option<InitializeParams> = req
                .params
                .as_ref()
                .and_then(|v| serde_json::from_value(v.clone()).ok());
            let client = params.as_ref().and_then(|p| p.client_info.as_ref());
            debug!(
                client = client.and_then(|c| c.name.as_deref()).unwrap_or("unknown"),
                client_version = client.and_then(|c| c.version.as_deref()),
                protocol = params.as_ref().and_then(|p| p.protocol_version.as_deref()),
                "initialize"
            );

            let result = serde_json::json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": "roadmap-mcp-server",
                    "version": env!("CARGO_PKG_VERSION")
                }
            });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "notifications/initialized" => None,

        "ping" => Some(JsonRpcResponse::success(req.id.clone(), serde_json::json!({}))),

        "tools/list" => {
            let result = serde_json::json!({ "tools": ctx.catalog.definitions() });
            Some(JsonRpcResponse::success(req.id.clone(), result))
        }

        "tools/call" => {
            let params: ToolCallParams = match &req.params {
                Some(v) => match serde_json::from_value(v.clone()) {
                    Ok(p) => p,
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            req.id.clone(),
                            JsonRpcError::invalid_params(format!(
                                "Invalid tools/call params: {e}"
                            )),
                        ));
                    }
                },
                None => {
                    return Some(JsonRpcResponse::error(
                        req.id.clone(),
                        JsonRpcError::invalid_params("Missing params for tools/call"),
                    ));
                }
            };

            if !ctx.catalog.contains(&params.name) && !operations::is_operation(&params.name) {
                let err = McpErrorResponse::new(
                    McpErrorCode::UnknownTool,
                    format!("Unknown tool: {}", params.name),
                );
                return Some(JsonRpcResponse::error(req.id.clone(), err.into()));
            }

            let tool_result = dispatch_tool_call(&params, ctx).await;
            let result_json = serde_json::to_value(&tool_result).expect("ToolResult must serialize to JSON Value");
            Some(JsonRpcResponse::success(req.id.clone(), result_json))
        }

        _ => Some(JsonRpcResponse::error(
            req.id.clone(),
            JsonRpcError::method_not_found(&req.method),
        )),
    }
}

/// Run one tool call and record it in the metrics.
///
/// Every failure comes back as an `isError` result carrying the tool name
/// and the arguments it was called with.
pub async fn dispatch_tool_call(params: &ToolCallParams, ctx: &ServerContext) -> ToolResult {
    let name = params.name.as_str();

    let result = match operations::handle(name, ctx) {
        Some(result) => result,
        None => {
            let arguments = params
                .arguments
                .clone()
                .unwrap_or_else(|| Value::Object(Default::default()));

            match run_tool(name, &arguments, ctx).await {
                Ok(envelope) => match serde_json::to_string(&envelope) {
                    Ok(json) => ToolResult::text(json),
                    Err(e) => {
                        warn!(tool = name, "serialization failed: {e}");
                        McpErrorResponse::canonical(McpErrorCode::InternalError)
                            .with_context(name, arguments)
                            .into()
                    }
                },
                Err(err) => {
                    warn!(tool = name, "tool call failed: {err}");
                    McpErrorResponse::from(&err).with_context(name, arguments).into()
                }
            }
        }
    };

    ctx.metrics.record(name, result.is_error);
    result
}

async fn run_tool(
    name: &str,
    arguments: &Value,
    ctx: &ServerContext,
) -> Result<ItemsEnvelope, RoadmapError> {
    ctx.catalog
        .validate(name, arguments)
        .map_err(|e| match e {
            SchemaValidationError::ValidationFailed(detail) => RoadmapError::Validation(detail),
            other => RoadmapError::Validation(other.to_string()),
        })?;
    debug!(tool = name, "arguments validated");

    match name {
        GET_ROADMAP_ITEMS => items::get_roadmap_items(parse_arguments(arguments)?, ctx).await,
        SEARCH_ROADMAP => items::search_roadmap(parse_arguments(arguments)?, ctx).await,
        GET_ROADMAP_ITEM => items::get_roadmap_item(parse_arguments(arguments)?, ctx).await,
        FILTER_BY_PRODUCT => filters::filter_by_product(parse_arguments(arguments)?, ctx).await,
        FILTER_BY_RELEASE_PHASE => {
            filters::filter_by_release_phase(parse_arguments(arguments)?, ctx).await
        }
        FILTER_BY_STATUS => filters::filter_by_status(parse_arguments(arguments)?, ctx).await,
        FILTER_BY_DATE => filters::filter_by_date(parse_arguments(arguments)?, ctx).await,
        FILTER_ROADMAP => filters::filter_roadmap(parse_arguments(arguments)?, ctx).await,
        _ => Err(RoadmapError::Validation(format!("Unknown tool: {name}"))),
    }
}

fn parse_arguments<T: DeserializeOwned>(arguments: &Value) -> Result<T, RoadmapError> {
    serde_json::from_value(arguments.clone()).map_err(|e| RoadmapError::Validation(e.to_string()))
}

/// Reject a `limit` outside `1..=MAX_LIMIT`.
pub(crate) fn bounded_limit(limit: u32) -> Result<usize, RoadmapError> {
    if (1..=MAX_LIMIT).contains(&limit) {
        Ok(limit as usize)
    } else {
        Err(RoadmapError::Validation(format!(
            "limit must be between 1 and {MAX_LIMIT}, got {limit}"
        )))
    }
}
