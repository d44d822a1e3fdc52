//! Stub roadmap API for integration tests.
//!
//! Serves one canned reply to every request on a loopback port and records
//! each request head so tests can assert on URLs, filters, and headers.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use roadmap_mcp_server::config::ServerConfig;
use roadmap_mcp_server::context::ServerContext;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone)]
pub enum Reply {
    /// Status code and raw body.
    Body(u16, String),
    /// Accept the request and never answer.
    Hang,
}

impl Reply {
    pub fn items(items: Value) -> Self {
        Reply::Body(200, json!({ "value": items }).to_string())
    }
}

pub struct StubUpstream {
    pub url: String,
    heads: Arc<Mutex<Vec<String>>>,
}

impl StubUpstream {
    pub async fn start(reply: Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let addr = listener.local_addr().expect("stub addr");
        let heads = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&heads);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let reply = reply.clone();
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    serve_one(stream, reply, recorded).await;
                });
            }
        });

        Self {
            url: format!("http://{addr}/api/v1/m365"),
            heads,
        }
    }

    /// Raw request heads, oldest first.
    pub fn heads(&self) -> Vec<String> {
        self.heads.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.heads.lock().unwrap().len()
    }

    /// Decoded `$filter` of every request, `None` when absent.
    pub fn filters(&self) -> Vec<Option<String>> {
        self.heads()
            .iter()
            .map(|head| {
                let target = head
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or("/");
                let url = reqwest::Url::parse(&format!("http://stub{target}")).unwrap();
                url.query_pairs()
                    .find(|(k, _)| k == "$filter")
                    .map(|(_, v)| v.into_owned())
            })
            .collect()
    }

    pub fn context(&self) -> ServerContext {
        let config = ServerConfig::with_api_url(&self.url).unwrap();
        ServerContext::new(config).unwrap()
    }
}

async fn serve_one(mut stream: TcpStream, reply: Reply, heads: Arc<Mutex<Vec<String>>>) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    heads
        .lock()
        .unwrap()
        .push(String::from_utf8_lossy(&buf).into_owned());

    match reply {
        Reply::Hang => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        Reply::Body(status, body) => {
            let response = format!(
                "HTTP/1.1 {status} Stub\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\
                 \r\n\
                 {body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    }
}

/// `count` roadmap items with ids 1..=count.
pub fn numbered_items(count: usize) -> Value {
    let items: Vec<Value> = (1..=count)
        .map(|i| {
            json!({
                "id": i,
                "title": format!("Roadmap item {i}"),
                "description": "Routine platform improvement",
                "status": "In development",
                "products": ["Microsoft Teams"],
            })
        })
        .collect();
    Value::Array(items)
}

/// Parse the JSON text of a tool result.
pub fn result_json(result: &roadmap_mcp_server::protocol::ToolResult) -> Value {
    serde_json::from_str(&result.content[0].text).expect("tool result is JSON")
}
