//! Router for the model-backed actions. Each handler builds its
//! request under a read lock, releases it for the model call, then
//! records the exchange under a write lock.

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State, routing::post};

use super::public::{AnalyzeRequest, AskRequest, Exchange};
use crate::ai::{Dispatcher, Request};
use crate::api::public::ApiError;
use crate::api::state::AppState;
use crate::core::AppError;

type SharedState = Arc<RwLock<AppState>>;

async fn dispatch(
    state: &SharedState,
    build: impl FnOnce(&AppState) -> Result<Request, AppError>,
) -> Result<Json<Exchange>, ApiError> {
    let (dispatcher, request): (Dispatcher, Request) = {
        let shared_state = state.read().expect("Unable to read share state");
        (shared_state.dispatcher.clone(), build(&*shared_state)?)
    };

    let exchange = dispatcher.send(&request).await?;

    state
        .write()
        .expect("Unable to write share state")
        .session
        .record(exchange.clone());

    Ok(Json(exchange))
}

/// Describe the current attachment
async fn describe(State(state): State<SharedState>) -> Result<Json<Exchange>, ApiError> {
    dispatch(&state, |s| Request::describe(&s.session)).await
}

/// Ask a question about the current attachment
async fn ask(
    State(state): State<SharedState>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<Exchange>, ApiError> {
    dispatch(&state, |s| Request::ask(&s.session, &payload.question)).await
}

/// Text-only prompt
async fn analyze(
    State(state): State<SharedState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<Exchange>, ApiError> {
    dispatch(&state, |_| Request::analyze(&payload.prompt)).await
}

/// Create the ai router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/describe", post(describe))
        .route("/ask", post(ask))
        .route("/analyze", post(analyze))
}
