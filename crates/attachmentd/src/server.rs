//! HTTP server for attachmentd

use crate::config::ServerConfig;
use crate::routes;
use crate::store::ResultStore;
use crate::submission::QuizService;
use anyhow::{Context, Result};
use attachment_common::{research_info, scale_info, QuestionBank, ResearchInfo, ScaleInfo};
use axum::http::HeaderValue;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Application state shared across handlers
pub struct AppState {
    pub service: QuizService,
    pub scale: ScaleInfo,
    pub research: ResearchInfo,
}

impl AppState {
    pub fn new(bank: QuestionBank, store: Arc<dyn ResultStore>) -> Self {
        Self {
            service: QuizService::new(Arc::new(bank), store),
            scale: scale_info(),
            research: research_info(),
        }
    }
}

/// CORS policy from the configured origin list.
///
/// Credentials are not allowed: browsers reject them alongside a wildcard
/// origin.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Build the application router
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let state = Arc::new(state);

    Router::new()
        .merge(routes::root_routes())
        .merge(routes::quiz_routes())
        .with_state(state)
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until ctrl-c
pub async fn run(state: AppState, config: &ServerConfig) -> Result<()> {
    let app = router(state, config);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Shutting down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
