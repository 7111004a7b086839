//! HTTP API: `POST /analyze` and `GET /health`.

use crate::aggregator::Analyze;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, Instrument};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<dyn Analyze>,
}

/// Body of `POST /analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors surfaced to API clients.
#[derive(Debug)]
pub enum ApiError {
    UrlRequired,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::UrlRequired => (StatusCode::BAD_REQUEST, "URL required"),
        };
        (
            status,
            Json(ErrorBody {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Build the API router. CORS allows every origin.
pub fn router(analyzer: Arc<dyn Analyze>) -> Router {
    Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { analyzer })
}

/// Serve `router` on `addr` until ctrl-c.
pub async fn serve(addr: SocketAddr, router: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("received shutdown signal");
        })
        .await
}

async fn analyze_handler(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<crate::AnalysisReport>, ApiError> {
    let url = match body {
        Ok(Json(AnalyzeRequest { url: Some(url) })) if !url.is_empty() => url,
        Ok(_) => return Err(ApiError::UrlRequired),
        Err(rejection) => {
            debug!(error = %rejection, "rejected analyze body");
            return Err(ApiError::UrlRequired);
        }
    };

    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("analyze", %request_id, url = %url);
    let report = state.analyzer.analyze(&url).instrument(span).await;
    Ok(Json(report))
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
