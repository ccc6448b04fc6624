mod config;
mod errors;
mod export;
mod models;
mod render;
mod routes;
mod schema;
mod settings;
mod state;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::client::HttpPdfRenderer;
use crate::routes::build_router;
use crate::settings::persist::FileStore;
use crate::settings::store::ResumeStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume builder API v{}", env!("CARGO_PKG_VERSION"));

    // Build the store over the file-backed state directory and hydrate once.
    let backend = FileStore::new(&config.data_dir);
    let mut store = ResumeStore::new(Box::new(backend));
    store.hydrate();
    info!(
        "Store hydrated (template: {})",
        store.template().as_str()
    );

    // PDF renderer backend (external print-to-PDF service)
    let pdf = Arc::new(HttpPdfRenderer::new(config.renderer_url.clone()));
    info!("PDF renderer client initialized ({})", config.renderer_url);

    // Build app state
    let state = AppState {
        store: Arc::new(Mutex::new(store)),
        pdf,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
