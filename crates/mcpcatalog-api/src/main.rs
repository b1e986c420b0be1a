use mcpcatalog_api::{logging, ApiConfig, ApiServer};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env()?;
    let _guard = logging::init_tracing(config.log_dir.as_deref())?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "[Api] Starting McpCatalog API"
    );

    let server = ApiServer::open(config, None)?;
    server
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("[Api] Failed to listen for shutdown signal: {}", e);
            }
        })
        .await
}
