use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Connect using `config.toml` when present, otherwise `.env`/`DATABASE_URL`.
pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    let _ = dotenvy::dotenv();
    let mut cfg = configs::load_default()
        .map(|c| c.database)
        .unwrap_or_default();
    cfg.normalize_from_env();
    cfg.validate()?;
    connect_with_config(&cfg).await
}

/// Connect with explicit pool settings; used by tests to widen the pool.
pub async fn connect_with_config(
    cfg: &configs::DatabaseConfig,
) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(cfg.sqlx_logging);
    let db = Database::connect(opts).await?;
    Ok(db)
}
