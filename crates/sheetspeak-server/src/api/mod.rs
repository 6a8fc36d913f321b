mod examples;
mod health;
mod sessions;

use axum::Router;

use crate::AppState;

pub use sessions::{CreateSessionRequest, InstructionRequest, InstructionResponse, SessionResponse};

/// Create the API router
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(examples::router())
        .merge(sessions::router())
}
