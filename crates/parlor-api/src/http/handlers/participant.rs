//! Participant registration and listing handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use parlor_types::error::ChatError;
use parlor_types::participant::{Participant, RegisterRequest};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /participants - Join the room under a display name.
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(body) = body.map_err(|e| ChatError::Validation(e.body_text()))?;
    state.room.register(body).await?;
    Ok(StatusCode::CREATED)
}

/// GET /participants - Everyone currently in the room.
pub async fn list_participants(
    State(state): State<AppState>,
) -> Result<Json<Vec<Participant>>, AppError> {
    let participants = state.room.list_participants().await?;
    Ok(Json(participants))
}
