mod config;
mod db;
mod errors;
mod extract;
mod gemini;
mod models;
mod parser;
mod pipeline;
mod routes;
mod session;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::gemini::GeminiClient;
use crate::parser::ResumeStructurer;
use crate::pipeline::Pipeline;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;
use crate::store::ledger::JsonLedger;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Parser API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite and the resumes table
    let db = create_pool(&config.database_url).await?;
    store::resumes::init_db(&db).await?;

    // Ledger file and upload archive directory
    let ledger = Arc::new(JsonLedger::new(&config.ledger_path));
    info!("Ledger file: {}", ledger.path().display());
    tokio::fs::create_dir_all(&config.upload_dir).await?;
    info!("Upload folder set to: {}", config.upload_dir);

    // Initialize Redis-backed sessions
    let redis = redis::Client::open(config.redis_url.clone())?;
    let sessions = SessionStore::new(redis);
    info!("Redis client initialized");

    // Initialize the Gemini client
    let model = Arc::new(GeminiClient::new(config.google_api_key.clone()));
    info!("Gemini client initialized (model: {})", gemini::MODEL);

    // Assemble the pipeline
    let pipeline = Pipeline::new(ResumeStructurer::new(model), ledger, db.clone());

    // Build app state
    let state = AppState {
        db,
        pipeline,
        sessions,
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
