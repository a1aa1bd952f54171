mod assets;
mod audit;
mod config;
mod db;
mod entities;
mod error;
mod models;
mod readiness;
mod routes;
mod storage;
mod templates;
mod uploads;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    config::Config,
    storage::{MemoryStore, ObjectStore, S3Store},
};

pub struct AppState {
    pub db: DatabaseConnection,
    pub store: Arc<dyn ObjectStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,screendock=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let db = db::connect_and_migrate(&config.database_url).await?;

    let store: Arc<dyn ObjectStore> = match &config.s3 {
        Some(s3) => Arc::new(S3Store::new(s3).await),
        None => {
            tracing::warn!("S3_BUCKET not set; using in-memory object store");
            Arc::new(MemoryStore::new())
        }
    };

    let state = Arc::new(AppState { db, store, config: config.clone() });
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
