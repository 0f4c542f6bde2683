//! Message endpoints - the four CRUD operations

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Message, MessageRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{MessageBody, Username};

/// Both fields are checked together so a missing and an empty field
/// produce the same response.
const CREATE_FIELDS_REQUIRED: &str = "Both body and username are required";
const BODY_REQUIRED: &str = "Body is required";

/// Create message request
#[derive(Deserialize)]
pub struct CreateMessageRequest {
    pub body: Option<String>,
    pub username: Option<String>,
}

/// Update message request
#[derive(Deserialize)]
pub struct UpdateMessageRequest {
    pub body: Option<String>,
}

/// Message response
#[derive(Serialize)]
pub struct MessageResponse {
    pub id: i64,
    pub body: String,
    pub username: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Message> for MessageResponse {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            body: m.body,
            username: m.username,
            created_at: m.created_at.to_rfc3339(),
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}

/// Delete confirmation response
#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// GET /messages - list all messages, oldest first
async fn list_messages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MessageResponse>>, ApiError> {
    let messages = MessageRepo::new(&state.pool).list_all().await?;

    Ok(Json(messages.into_iter().map(MessageResponse::from).collect()))
}

/// POST /messages - create a message
async fn create_message(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateMessageRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let body = req.body.as_deref().and_then(|s| MessageBody::new(s).ok());
    let username = req.username.as_deref().and_then(|s| Username::new(s).ok());

    let (Some(body), Some(username)) = (body, username) else {
        return Err(ApiError::BadRequest {
            message: CREATE_FIELDS_REQUIRED,
        });
    };

    let message = MessageRepo::new(&state.pool).create(body, username).await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}

/// PATCH /messages/{id} - update a message's body
async fn update_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateMessageRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    // 404 takes precedence over 400 for a missing id
    let repo = MessageRepo::new(&state.pool);
    repo.get(id).await?;

    let Some(body) = req.body.as_deref().and_then(|s| MessageBody::new(s).ok()) else {
        return Err(ApiError::BadRequest {
            message: BODY_REQUIRED,
        });
    };

    let message = repo.update_body(id, body).await?;

    Ok(Json(MessageResponse::from(message)))
}

/// DELETE /messages/{id} - delete a message permanently
async fn delete_message(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    MessageRepo::new(&state.pool).delete(id).await?;

    Ok(Json(DeleteResponse {
        message: "Message deleted successfully",
    }))
}

/// Message routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/messages", get(list_messages).post(create_message))
        .route("/messages/{id}", patch(update_message).delete(delete_message))
}
