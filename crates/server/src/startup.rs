use std::{env, net::SocketAddr, path::PathBuf};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ServerState};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load config from `config.toml`, falling back to env vars for the
/// bind address when the file is absent.
fn load_config() -> anyhow::Result<configs::AppConfig> {
    let mut cfg = configs::load_default().unwrap_or_else(|_| {
        let mut fallback = configs::AppConfig::default();
        if let Ok(host) = env::var("SERVER_HOST") {
            fallback.server.host = host;
        }
        if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            fallback.server.port = port;
        }
        fallback
    });
    cfg.normalize_and_validate()?;
    Ok(cfg)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config()?;

    // Upload directory must exist before the first image lands
    let upload_dir = PathBuf::from(&cfg.storage.upload_dir);
    tokio::fs::create_dir_all(&upload_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", upload_dir.display()))?;

    // DB connection + schema
    let db = models::db::connect_with_config(&cfg.database).await?;
    Migrator::up(&db, None).await?;

    let state = ServerState { db, upload_dir };

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(cors, state);

    // Bind and serve
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, "starting quebragalho server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
