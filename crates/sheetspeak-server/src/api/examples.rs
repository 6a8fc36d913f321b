use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::presets::EXAMPLE_INSTRUCTIONS;
use crate::AppState;

#[derive(Serialize)]
struct ExamplesResponse {
    examples: &'static [&'static str],
}

async fn list_examples() -> Json<ExamplesResponse> {
    Json(ExamplesResponse {
        examples: EXAMPLE_INSTRUCTIONS,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/examples", get(list_examples))
}
