//! End-to-end tests of the newline-delimited JSON-RPC loop.

mod common;

use std::time::Duration;

use common::{Reply, StubUpstream};
use roadmap_mcp_server::server::McpServer;
use serde_json::{json, Value};
use tokio::io::AsyncReadExt;

/// Feed `lines` to a server built on `stub` and collect every response line.
async fn converse(stub: &StubUpstream, lines: &[Value]) -> Vec<Value> {
    let ctx = stub.context().with_upstream_timeout(Duration::from_millis(200));
    let mut server = McpServer::new(ctx);

    let input: String = lines.iter().map(|line| format!("{line}\n")).collect();
    let (output, mut responses) = tokio::io::duplex(64 * 1024);

    server.run_with(input.as_bytes(), output).await.unwrap();

    let mut raw = String::new();
    responses.read_to_string(&mut raw).await.unwrap();
    raw.lines()
        .map(|line| serde_json::from_str(line).expect("each response is one JSON line"))
        .collect()
}

fn initialize() -> [Value; 2] {
    [
        json!({ "jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {} }),
        json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
    ]
}

#[tokio::test]
async fn tool_calls_answer_in_completion_order() {
    let stub = StubUpstream::start(Reply::Hang).await;

    let mut lines = initialize().to_vec();
    lines.push(json!({
        "jsonrpc": "2.0", "id": 2, "method": "tools/call",
        "params": { "name": "get_roadmap_items", "arguments": {} }
    }));
    lines.push(json!({
        "jsonrpc": "2.0", "id": 3, "method": "tools/call",
        "params": { "name": "server.status" }
    }));

    let responses = converse(&stub, &lines).await;
    let ids: Vec<&Value> = responses.iter().map(|r| &r["id"]).collect();
    assert_eq!(ids, vec![&json!(1), &json!(3), &json!(2)], "slow call must not block the fast one");

    // Input hit EOF long before the slow call finished; its answer still arrives.
    let slow = &responses[2]["result"];
    assert_eq!(slow["isError"], true);
    let text: Value = serde_json::from_str(slow["content"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(text["error"]["code"], "timeout");
}

#[tokio::test]
async fn requests_before_initialize_are_refused() {
    let stub = StubUpstream::start(Reply::items(json!([]))).await;

    let lines = [
        json!({ "jsonrpc": "2.0", "id": 7, "method": "tools/list" }),
        json!({ "jsonrpc": "1.0", "id": 8, "method": "initialize" }),
    ];

    let responses = converse(&stub, &lines).await;
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["id"], 7);
    assert_eq!(responses[0]["error"]["code"], -32600);
    assert_eq!(responses[0]["error"]["message"], "Server not initialized");
    assert_eq!(responses[1]["id"], 8);
    assert_eq!(responses[1]["error"]["code"], -32600);
    assert_eq!(stub.request_count(), 0);
}
