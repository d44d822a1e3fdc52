use roadmap_mcp_server::config::ServerConfig;
use roadmap_mcp_server::context::ServerContext;
use roadmap_mcp_server::server::McpServer;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // stdout carries the protocol; logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    let ctx = match ServerContext::new(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("startup error: {e}");
            std::process::exit(1);
        }
    };

    let mut server = McpServer::new(ctx);
    if let Err(e) = server.run().await {
        error!("fatal error: {e}");
        std::process::exit(1);
    }
}
