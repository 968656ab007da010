//! REST API handlers.

use std::path::Path as FsPath;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        multipart::{Field, MultipartError},
        Multipart, Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::{error, warn};

use super::types::{is_client_error, ErrorResponse};
use crate::error::{ErrorKind, MazeError};
use crate::lock::DEFAULT_LOCK_TIMEOUT;
use crate::maze::{
    Direction, InvalidMazeReason, MazeDefinition, MazeId, MazeRegistry, MAX_MAZE_BYTES,
};
use crate::session::{GameState, SessionId, SessionManager};

/// Multipart field carrying the maze text.
pub const UPLOAD_FIELD: &str = "file";

/// Name given to mazes uploaded without a usable file name.
pub const DEFAULT_MAZE_NAME: &str = "maze";

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub mazes: Arc<MazeRegistry>,
    pub sessions: Arc<SessionManager>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_lock_timeout(DEFAULT_LOCK_TIMEOUT)
    }

    pub fn with_lock_timeout(lock_timeout: Duration) -> Self {
        let mazes = Arc::new(MazeRegistry::with_lock_timeout(lock_timeout));
        let sessions = Arc::new(SessionManager::with_lock_timeout(
            Arc::clone(&mazes),
            lock_timeout,
        ));
        Self { mazes, sessions }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidMaze | ErrorKind::InvalidOperation => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::InternalFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn api_error(operation: &'static str, err: MazeError) -> ApiError {
    let kind = err.kind();
    if !is_client_error(kind) {
        error!(operation, error = %err, "request failed");
    }
    (status_for(kind), Json(ErrorResponse::from_error(&err)))
}

/// Maze name from an uploaded file name: the file stem, or the default.
pub fn maze_name_from_file(file_name: Option<&str>) -> String {
    file_name
        .and_then(|f| FsPath::new(f).file_stem())
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(DEFAULT_MAZE_NAME)
        .to_string()
}

fn malformed_upload(e: MultipartError) -> ApiError {
    (
        e.status(),
        Json(ErrorResponse::bad_request("Malformed upload").with_details(e.body_text())),
    )
}

/// Read an upload field, stopping as soon as it exceeds [`MAX_MAZE_BYTES`].
async fn read_upload(mut field: Field<'_>) -> Result<Vec<u8>, ApiError> {
    let mut bytes = Vec::new();
    loop {
        match field.chunk().await {
            Ok(Some(chunk)) => {
                bytes.extend_from_slice(&chunk);
                if bytes.len() > MAX_MAZE_BYTES {
                    break;
                }
            }
            Ok(None) => return Ok(bytes),
            // Body limit hit before the field ended.
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => break,
            Err(e) => return Err(malformed_upload(e)),
        }
    }

    let size = bytes.len().max(MAX_MAZE_BYTES + 1);
    warn!(size, "rejected oversize maze upload");
    let reason = InvalidMazeReason::TooLarge { size };
    Err(api_error("upload", MazeError::InvalidMaze(reason)))
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}

/// API information endpoint.
pub async fn api_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "maze-server",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}

/// Upload a maze file (multipart field `file`).
pub async fn upload_maze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MazeId>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(malformed_upload)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let name = maze_name_from_file(field.file_name());
        let bytes = read_upload(field).await?;

        // Invalid UTF-8 becomes U+FFFD and is rejected as an illegal character.
        let text = String::from_utf8_lossy(&bytes);
        let id = state
            .mazes
            .upload(name, &text)
            .await
            .map_err(|e| api_error("upload", e))?;
        return Ok(Json(id));
    }

    Err((
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request("No file uploaded")),
    ))
}

/// List all uploaded mazes.
pub async fn list_mazes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Arc<MazeDefinition>>>, ApiError> {
    let mazes = state
        .mazes
        .list()
        .await
        .map_err(|e| api_error("list_mazes", e))?;
    Ok(Json(mazes))
}

/// Start a session on a maze.
pub async fn initialize_session(
    State(state): State<AppState>,
    Path(maze_id): Path<String>,
) -> Result<Json<GameState>, ApiError> {
    let game = state
        .sessions
        .initialize(&MazeId::from(maze_id))
        .await
        .map_err(|e| api_error("initialize", e))?;
    Ok(Json(game))
}

/// Move a session one step. The body is a direction name or ordinal.
pub async fn make_move(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(direction): Json<Direction>,
) -> Result<Json<GameState>, ApiError> {
    let id: SessionId = session_id
        .parse()
        .map_err(|e| api_error("make_move", e))?;

    let game = state
        .sessions
        .make_move(&id, direction)
        .await
        .map_err(|e| api_error("make_move", e))?;
    Ok(Json(game))
}

/// List all sessions.
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<GameState>>, ApiError> {
    let sessions = state
        .sessions
        .list()
        .await
        .map_err(|e| api_error("list_sessions", e))?;
    Ok(Json(sessions))
}

/// Get one session.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<GameState>, ApiError> {
    let id: SessionId = session_id
        .parse()
        .map_err(|e| api_error("get_session", e))?;

    let game = state
        .sessions
        .get(&id)
        .await
        .map_err(|e| api_error("get_session", e))?;
    Ok(Json(game))
}

/// Remove every maze and session.
pub async fn clear_all(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state
        .sessions
        .clear_all()
        .await
        .map_err(|e| api_error("clear_all", e))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Direction names in ordinal order.
pub async fn directions() -> Json<Vec<&'static str>> {
    Json(Direction::ALL.iter().map(|d| d.name()).collect())
}
