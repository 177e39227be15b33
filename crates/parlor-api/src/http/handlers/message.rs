//! Message handlers: post, list, edit, delete.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use parlor_types::error::ChatError;
use parlor_types::message::{Message, MessageRequest};

use crate::http::error::AppError;
use crate::http::extractors::identity::Identity;
use crate::http::extractors::query::MessageListQuery;
use crate::state::AppState;

fn json_body(
    body: Result<Json<MessageRequest>, JsonRejection>,
) -> Result<MessageRequest, AppError> {
    body.map(|Json(b)| b)
        .map_err(|e| AppError::Chat(ChatError::Validation(e.body_text())))
}

/// POST /messages - Post a message as the `User` header's participant.
pub async fn post_message(
    State(state): State<AppState>,
    Identity(sender): Identity,
    body: Result<Json<MessageRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let body = json_body(body)?;
    state.room.post_message(&sender, &body).await?;
    Ok(StatusCode::CREATED)
}

/// GET /messages?limit=N - Messages visible to the caller, newest first.
pub async fn list_messages(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Query(query): Query<MessageListQuery>,
) -> Result<Json<Vec<Message>>, AppError> {
    let limit = query.limit()?;
    let messages = state.room.list_messages(&caller, limit).await?;
    Ok(Json(messages))
}

/// PUT /messages/{id} - Rewrite one of the caller's messages.
pub async fn edit_message(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Path(id): Path<String>,
    body: Result<Json<MessageRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let body = json_body(body)?;
    state.room.edit_message(&caller, &id, &body).await?;
    Ok(StatusCode::CREATED)
}

/// DELETE /messages/{id} - Remove one of the caller's messages.
pub async fn delete_message(
    State(state): State<AppState>,
    Identity(caller): Identity,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.room.delete_message(&caller, &id).await?;
    Ok(StatusCode::OK)
}
