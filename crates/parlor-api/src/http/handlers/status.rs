//! Heartbeat handler.

use axum::extract::State;
use axum::http::StatusCode;

use crate::http::error::AppError;
use crate::http::extractors::identity::Identity;
use crate::state::AppState;

/// POST /status - Keep the caller from being swept as inactive.
pub async fn heartbeat(
    State(state): State<AppState>,
    Identity(name): Identity,
) -> Result<StatusCode, AppError> {
    state.room.heartbeat(&name).await?;
    Ok(StatusCode::OK)
}
