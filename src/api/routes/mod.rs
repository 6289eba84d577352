//! API routes module

pub mod ai;
pub mod session;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Attachment and history routes
        .merge(session::router())
        // Describe, ask and analyze
        .merge(ai::router())
}
