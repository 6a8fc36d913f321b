use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sheetspeak_agent::{IntentKind, Session};
use sheetspeak_core::{CellValue, Grid, SheetError};

use crate::codec;
use crate::error::AppError;
use crate::presets::{sample_rows, SAMPLE_FILE_NAME, SAMPLE_SHEET_NAME};
use crate::AppState;

/// Sheet name used when a client loads rows without naming them
const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Request to open a session, optionally with a dataset
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub rows: Option<Vec<Vec<CellValue>>>,
    pub sheet_name: Option<String>,
    pub file_name: Option<String>,
    /// Start from the built-in sample instead of `rows`
    pub sample: bool,
}

/// Request to replace a session's dataset
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadGridRequest {
    pub rows: Vec<Vec<CellValue>>,
    #[serde(default)]
    pub sheet_name: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CsvParams {
    pub sheet_name: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InstructionRequest {
    pub instruction: String,
}

/// Snapshot of a session for clients
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: Uuid,
    pub sheet_name: String,
    pub file_name: String,
    pub grid: Option<Grid>,
    pub history: Vec<String>,
    pub export_name: String,
}

impl SessionResponse {
    fn new(id: Uuid, session: &Session) -> Self {
        Self {
            id,
            sheet_name: session.sheet_name().to_string(),
            file_name: session.file_name().to_string(),
            grid: session.grid().cloned(),
            history: session.history().to_vec(),
            export_name: session.export_name(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionResponse {
    pub grid: Grid,
    pub message: String,
    pub intent: IntentKind,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Create a new session
async fn create_session(
    State(state): State<AppState>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let Json(req) = payload?;
    let (id, session) = state.sessions.create().await?;
    let mut session = session.lock().await;

    if req.sample {
        session.load(sample_rows(), SAMPLE_SHEET_NAME, SAMPLE_FILE_NAME);
    } else if let Some(rows) = req.rows {
        session.load_upload(
            rows,
            req.sheet_name.unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
            req.file_name.as_deref().unwrap_or_default(),
        );
    }

    Ok((StatusCode::CREATED, Json(SessionResponse::new(id, &session))))
}

/// Get a session by ID
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.get(id).await?;
    let session = session.lock().await;
    Ok(Json(SessionResponse::new(id, &session)))
}

/// Delete a session
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {} not found", id)))
    }
}

/// Replace the dataset with rows of JSON scalars
async fn load_grid(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<LoadGridRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, AppError> {
    let Json(req) = payload?;
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;

    session.load_upload(
        req.rows,
        req.sheet_name.unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
        req.file_name.as_deref().unwrap_or_default(),
    );
    Ok(Json(SessionResponse::new(id, &session)))
}

/// Replace the dataset with the built-in sample
async fn load_sample(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;

    session.load(sample_rows(), SAMPLE_SHEET_NAME, SAMPLE_FILE_NAME);
    Ok(Json(SessionResponse::new(id, &session)))
}

/// Replace the dataset with the CSV request body
async fn import_csv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<CsvParams>,
    body: String,
) -> Result<Json<SessionResponse>, AppError> {
    let rows = codec::read_csv(&body)?;
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;

    session.load_upload(
        rows,
        params.sheet_name.unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
        params.file_name.as_deref().unwrap_or_default(),
    );
    Ok(Json(SessionResponse::new(id, &session)))
}

/// Download the current grid as CSV
async fn export_csv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.sessions.get(id).await?;
    let session = session.lock().await;

    let grid = session.grid().ok_or(SheetError::NoDataset)?;
    let body = codec::write_csv(grid)?;
    let disposition = format!(
        "attachment; filename=\"{}.csv\"",
        session.export_name().replace('"', "_")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// Interpret one instruction against the session's grid
async fn run_instruction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<InstructionRequest>, JsonRejection>,
) -> Result<Json<InstructionResponse>, AppError> {
    let Json(req) = payload?;
    let session = state.sessions.get(id).await?;
    let mut session = session.lock().await;

    let applied = session.run(&req.instruction)?;
    tracing::info!(%id, intent = %applied.intent, "instruction applied");

    let grid = session.grid().cloned().ok_or(SheetError::NoDataset)?;
    Ok(Json(InstructionResponse {
        grid,
        message: applied.message,
        intent: applied.intent,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        .route("/api/sessions/:id/grid", put(load_grid))
        .route("/api/sessions/:id/sample", post(load_sample))
        .route("/api/sessions/:id/csv", get(export_csv).put(import_csv))
        .route("/api/sessions/:id/instructions", post(run_instruction))
}
