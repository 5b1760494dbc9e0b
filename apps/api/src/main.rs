mod config;
mod errors;
mod extraction;
mod routes;
mod scoring;
mod screening;
mod state;
mod upload;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::DocumentTextExtractor;
use crate::routes::build_router;
use crate::scoring::{ResumeScorer, WebhookScorer};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Intake API v{}", env!("CARGO_PKG_VERSION"));

    let extractor = Arc::new(DocumentTextExtractor::new(config.extraction_mode));
    info!("Document extractor initialized (mode: {})", extractor.mode().as_str());

    let scorer: Option<Arc<dyn ResumeScorer>> = match &config.scoring_webhook_url {
        Some(url) => {
            let scorer = WebhookScorer::new(
                url.clone(),
                Duration::from_secs(config.scoring_timeout_secs),
            )?
            .with_backoff_base(Duration::from_millis(config.scoring_retry_base_ms));
            info!("Scoring webhook configured: {url}");
            Some(Arc::new(scorer))
        }
        None => {
            warn!("SCORING_WEBHOOK_URL not set; resume analysis is disabled");
            None
        }
    };

    let state = AppState {
        config: config.clone(),
        extractor,
        scorer,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
