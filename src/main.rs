use std::net::SocketAddr;

use dotenvy::dotenv;
use retro_blog::config::{AppState, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("retro_blog=info,tower_http=info")),
        )
        .init();

    let cfg = Config::init()?;
    tracing::info!("🚀 Starting retro-blog backend...");

    // 1. Database Connection + migrations
    let db = retro_blog::database::connect(&cfg.database).await?;
    tracing::info!("✅ Database connected, schema up to date");

    // 2. Router
    let app = retro_blog::app(AppState { db: db.clone() });

    // 3. Start Server
    let addr: SocketAddr = format!("{}:{}", cfg.server_host, cfg.server_port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🎯 Server ready! Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await?;
    tracing::info!("👋 Shut down cleanly");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
