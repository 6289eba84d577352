//! Router for the session API (attachment and history)

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::{get, post},
};

use super::public::{AttachmentInfo, HistoryResponse, UploadResponse};
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::core::AppError;
use crate::session::Attachment;

type SharedState = Arc<RwLock<AppState>>;

/// Inline image data is capped well above typical photo sizes
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Store the `file` field of a multipart upload as the attachment
async fn upload(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut attachment = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(String::from)
            .ok_or(AppError::validation("Upload is missing a file name."))?;
        let content_type = field.content_type().map(String::from);
        let data = field.bytes().await?;
        attachment = Some(Attachment::upload(
            &file_name,
            content_type.as_deref(),
            data,
        )?);
        break;
    }
    let attachment = attachment.ok_or(AppError::validation("Upload a file in the `file` field."))?;

    let mut shared_state = state.write().expect("Unable to write share state");
    let replaced = shared_state.session.attach(attachment);
    let current = shared_state
        .session
        .attachment()
        .ok_or(AppError::validation("Upload was not stored."))?;

    Ok(Json(UploadResponse {
        attachment: AttachmentInfo::from(current),
        replaced,
    }))
}

async fn current_attachment(State(state): State<SharedState>) -> Json<Option<AttachmentInfo>> {
    let shared_state = state.read().expect("Unable to read share state");
    Json(shared_state.session.attachment().map(AttachmentInfo::from))
}

async fn remove_attachment(State(state): State<SharedState>) -> StatusCode {
    state
        .write()
        .expect("Unable to write share state")
        .session
        .detach();
    StatusCode::NO_CONTENT
}

async fn history(State(state): State<SharedState>) -> Json<HistoryResponse> {
    let shared_state = state.read().expect("Unable to read share state");
    Json(HistoryResponse {
        history: shared_state.session.log().entries().to_vec(),
    })
}

async fn clear_history(State(state): State<SharedState>) -> StatusCode {
    state
        .write()
        .expect("Unable to write share state")
        .session
        .clear_history();
    StatusCode::NO_CONTENT
}

/// Create the session router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/attachment",
            post(upload)
                .get(current_attachment)
                .delete(remove_attachment)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/history", get(history).delete(clear_history))
}
