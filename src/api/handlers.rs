//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{
    CatalogResponse, CreateConversationRequest, ErrorResponse, QueuedResponse, SuccessResponse,
    TurnRequest,
};
use super::AppState;
use crate::persona::{Difficulty, Product};
use crate::runtime::ConversationSnapshot;
use crate::selection::{Selection, SelectionError};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Selection screens
        .route("/api/catalog", get(get_catalog))
        // Conversation lifecycle
        .route("/api/conversations", post(create_conversation))
        .route(
            "/api/conversations/:id",
            get(get_conversation).delete(go_back),
        )
        .route("/api/conversations/:id/turns", post(submit_turn))
        // SSE streaming
        .route("/api/conversations/:id/stream", get(stream_conversation))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Catalog
// ============================================================

async fn get_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse::build())
}

// ============================================================
// Conversation Lifecycle
// ============================================================

async fn create_conversation(
    State(state): State<AppState>,
    Json(req): Json<CreateConversationRequest>,
) -> Result<Json<ConversationSnapshot>, AppError> {
    let mut selection = Selection::default();
    if let Some(key) = req.difficulty.as_deref() {
        selection = selection.choose_difficulty(Difficulty::resolve(key));
    }
    if let Some(key) = req.product.as_deref() {
        selection = selection.choose_product(Product::resolve(key))?;
    }
    let (difficulty, product) = selection.ready()?;

    let snapshot = state.manager.start(difficulty, product).await;
    tracing::info!(
        conv_id = %snapshot.id,
        difficulty = difficulty.key(),
        product = product.key(),
        "Conversation started"
    );

    Ok(Json(snapshot))
}

async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConversationSnapshot>, AppError> {
    state
        .manager
        .snapshot(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(&id))
}

async fn submit_turn(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<TurnRequest>,
) -> Result<(StatusCode, Json<QueuedResponse>), AppError> {
    if !state.manager.submit_user_turn(&id, req.text).await {
        return Err(AppError::not_found(&id));
    }
    Ok((StatusCode::ACCEPTED, Json(QueuedResponse { queued: true })))
}

async fn go_back(State(state): State<AppState>, Path(id): Path<String>) -> Json<SuccessResponse> {
    state.manager.go_back(&id).await;
    Json(SuccessResponse { ok: true })
}

async fn stream_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (snapshot, broadcast_rx) = state
        .manager
        .subscribe(&id)
        .await
        .ok_or_else(|| AppError::not_found(&id))?;

    Ok(sse_stream(snapshot, broadcast_rx))
}

async fn get_version() -> &'static str {
    concat!("sales-trainer ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    NotFound(String),
    UnprocessableEntity(String),
}

impl AppError {
    fn not_found(id: &str) -> Self {
        AppError::NotFound(format!("Conversation not found: {id}"))
    }
}

impl From<SelectionError> for AppError {
    fn from(e: SelectionError) -> Self {
        AppError::UnprocessableEntity(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
