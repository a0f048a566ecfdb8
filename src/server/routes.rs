//! Axum route handlers for the learnhub HTTP server.
//!
//! # Routes
//!
//! - `GET  /health`                 - Returns `{"status": "ok", ...}`
//! - `POST /chat`                   - Resolve one chat message
//! - `POST /demos/mean`             - Mean of comma-separated numbers
//! - `POST /demos/excel/:function`  - SUM / AVERAGE / MAX / MIN
//! - `GET  /demos/sample`           - Random sample data set

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::chat::handler::chat_handler;
use crate::chat::keyword_table::KeywordTable;
use crate::chat::resolver::ChatResolver;
use crate::demos::numbers::{self, Aggregate, FunctionResult, MeanSummary};
use crate::demos::sample::SampleData;
use crate::utilities::errors::DemoError;

/// Shared application state for the HTTP server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Chat resolver shared by every request.
    pub resolver: ChatResolver,
}

impl AppState {
    pub fn new(resolver: ChatResolver) -> Self {
        Self { resolver }
    }

    /// Offline-only state with the built-in keyword table.
    pub fn offline() -> Self {
        Self::new(ChatResolver::new(KeywordTable::builtin()))
    }
}

impl FromRef<AppState> for ChatResolver {
    fn from_ref(state: &AppState) -> Self {
        state.resolver.clone()
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .route("/demos/mean", post(mean_handler))
        .route("/demos/excel/:function", post(excel_handler))
        .route("/demos/sample", get(sample_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Body of the number-list demos.
#[derive(Debug, Clone, Deserialize)]
pub struct NumbersRequest {
    pub input: String,
}

type ApiError = (StatusCode, Json<Value>);

fn bad_request(err: DemoError) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": err.to_string() })),
    )
}

/// GET /health - liveness probe.
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "learnhub",
        "remote_enabled": state.resolver.remote_enabled(),
    }))
}

/// POST /demos/mean
async fn mean_handler(Json(request): Json<NumbersRequest>) -> Result<Json<MeanSummary>, ApiError> {
    numbers::mean_summary(&request.input)
        .map(Json)
        .map_err(bad_request)
}

/// POST /demos/excel/:function
async fn excel_handler(
    Path(function): Path<String>,
    Json(request): Json<NumbersRequest>,
) -> Result<Json<FunctionResult>, ApiError> {
    let function: Aggregate = function.parse().map_err(bad_request)?;
    numbers::evaluate(function, &request.input)
        .map(Json)
        .map_err(bad_request)
}

/// GET /demos/sample
async fn sample_handler() -> Json<SampleData> {
    Json(SampleData::random())
}
