pub mod request;
pub mod response;

pub use request::{
    DateType, FilterByDateParams, FilterByProductParams, FilterByReleasePhaseParams,
    FilterByStatusParams, FilterRoadmapParams, GetRoadmapItemParams, GetRoadmapItemsParams,
    InitializeParams, JsonRpcRequest, ReleasePhase, RoadmapStatus, RpcId, SearchRoadmapParams,
    ToolCallParams, MAX_LIMIT,
};
pub use response::{
    ErrorContext, JsonRpcError, JsonRpcResponse, McpError, McpErrorCode, McpErrorResponse,
    ToolResult, ToolResultContent,
};
