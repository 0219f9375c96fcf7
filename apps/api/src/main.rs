mod applications;
mod auth;
mod blobs;
mod companies;
mod config;
mod db;
mod errors;
mod jobs;
mod models;
mod response;
mod routes;
mod state;
mod store;
mod users;
mod validation;

use anyhow::{Context, Result};
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::blobs::{BlobStore, MemoryBlobStore, S3BlobStore};
use crate::config::{Config, S3Settings, StorageBackend};
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{JobBoardStore, MemoryStore, PgStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    let crate_target = env!("CARGO_PKG_NAME").replace('-', "_");
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{crate_target}={},tower_http=info", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Job Board API v{}", env!("CARGO_PKG_VERSION"));

    let (store, blobs) = build_storage(&config).await?;
    info!(
        "Application status transitions: {:?}",
        config.transition_policy
    );

    let state = AppState {
        store,
        blobs,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_storage(config: &Config) -> Result<(Arc<dyn JobBoardStore>, Arc<dyn BlobStore>)> {
    match config.storage {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres backend")?;
            let s3 = config
                .s3
                .as_ref()
                .context("S3 settings are required for the postgres backend")?;

            let pool = create_pool(database_url).await?;
            let client = build_s3_client(s3).await;
            info!("S3 client initialized (bucket: {})", s3.bucket);

            Ok((
                Arc::new(PgStore::new(pool)),
                Arc::new(S3BlobStore::new(client, s3.bucket.clone())),
            ))
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on exit");
            Ok((Arc::new(MemoryStore::new()), Arc::new(MemoryBlobStore::new())))
        }
    }
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(s3: &S3Settings) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &s3.access_key_id,
        &s3.secret_access_key,
        None,
        None,
        "jobboard-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&s3.endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
