//! Axum route handlers for the second brain HTTP API.

use crate::dashboard;
use crate::store::{MemoryStore, StoreError};
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use second_brain_types::*;
use std::sync::Arc;
use std::time::Instant;

pub struct AppState {
    pub store: MemoryStore,
    pub start_time: Instant,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse::new(msg)))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", axum::routing::get(dashboard::dashboard))
        .route(
            "/api/memories",
            axum::routing::get(list_memories).post(create_memory),
        )
        .route("/api/status", axum::routing::get(status))
        .with_state(state)
}

// GET /api/memories
pub async fn list_memories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListMemoriesResponse>, ApiError> {
    match state.store.list_recent().await {
        Ok(memories) => Ok(Json(ListMemoriesResponse { memories })),
        Err(e) => {
            log::error!("GET /api/memories error: {}", e);
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load memories",
            ))
        }
    }
}

// POST /api/memories
//
// The body is parsed by hand so that any unparseable payload, whatever its
// content type, maps to the same 400. Valid JSON that is not an object
// (`null`, arrays, scalars) carries no fields and counts as an empty draft.
pub async fn create_memory(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateMemoryResponse>), ApiError> {
    let invalid = |e: serde_json::Error| {
        log::warn!("POST /api/memories rejected body: {}", e);
        api_error(StatusCode::BAD_REQUEST, "Invalid request")
    };

    let draft = match serde_json::from_slice::<serde_json::Value>(&body).map_err(invalid)? {
        value @ serde_json::Value::Object(_) => {
            serde_json::from_value::<MemoryDraft>(value).map_err(invalid)?
        }
        _ => MemoryDraft::default(),
    };

    match state.store.insert(draft).await {
        Ok(memory) => {
            log::info!("Saved memory {} ({})", memory.id, memory.category);
            Ok((StatusCode::CREATED, Json(CreateMemoryResponse { memory })))
        }
        Err(StoreError::InvalidInput(e)) => {
            log::warn!("POST /api/memories invalid input: {:?}", e);
            Err(api_error(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e @ StoreError::Unavailable(_)) => {
            log::error!("POST /api/memories error: {}", e);
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save memory",
            ))
        }
    }
}

// GET /api/status
pub async fn status(State(state): State<Arc<AppState>>) -> Json<ServiceStatus> {
    Json(ServiceStatus {
        running: true,
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
