//! Public API types

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;

use crate::core::AppError;

// Errors

pub enum ApiError {
    App(AppError),
    // Keeps axum's own status, e.g. 413 for an upload over the body limit
    Multipart(MultipartError),
}

/// Validation problems are the caller's to fix and come back as a 400
/// warning. Failed model calls are a 502 carrying the message the UI
/// shows verbatim.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = match self {
            Self::App(err) => err,
            Self::Multipart(err) => {
                let msg = err.body_text();
                tracing::warn!("{}", msg);
                return (err.status(), Json(json!({ "warning": msg }))).into_response();
            }
        };
        match &err {
            AppError::Validation(msg) => {
                tracing::warn!("{}", msg);
                (StatusCode::BAD_REQUEST, Json(json!({ "warning": msg }))).into_response()
            }
            AppError::RemoteCall(e) => {
                tracing::error!("{:#}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": err.user_message() })),
                )
                    .into_response()
            }
            AppError::MissingCredential { .. } => {
                tracing::error!("{}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::Multipart(err)
    }
}

// Re-export public types from each route

pub mod ai {
    pub use crate::api::routes::ai::public::*;
}

pub mod session {
    pub use crate::api::routes::session::public::*;
}
