//! School API server: loads config, connects the store, serves the router over HTTPS.
//!
//! Run from repo root: `cargo run -p school-server`
//! Expects `cert.pem` / `key.pem` in the working directory unless TLS_CERT / TLS_KEY are set.

use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use school_api::{app, AppState, Config, MemoryStore, PgStore, StoreKind};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("school_api=info,school_server=info,tower_http=info")),
        )
        .init();

    // rustls only speaks TLS 1.2 and 1.3, so 1.2 is the floor.
    let tls = RustlsConfig::from_pem_file(&config.tls_cert, &config.tls_key).await?;

    let router = match config.store {
        StoreKind::Postgres => app(AppState::new(PgStore::connect(&config).await?)),
        StoreKind::Memory => {
            tracing::warn!("using in-memory store, data is not persisted");
            app(AppState::new(MemoryStore::seeded()))
        }
    };

    let handle = Handle::new();
    tokio::spawn(shutdown_on_ctrl_c(handle.clone()));

    tracing::info!("listening on https://{}", config.addr());
    axum_server::bind_rustls(config.addr(), tls)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;
    Ok(())
}

async fn shutdown_on_ctrl_c(handle: Handle) {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutting down");
        handle.graceful_shutdown(Some(Duration::from_secs(10)));
    }
}
