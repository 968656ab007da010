//! API request and response types.

use serde::Serialize;

use crate::error::{ErrorKind, MazeError};

/// Generic API error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "SESSION_NOT_FOUND").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    /// Build the response body for an engine error.
    ///
    /// Internal failures never expose their cause.
    pub fn from_error(err: &MazeError) -> Self {
        let code = match err {
            MazeError::InvalidMaze(_) => "INVALID_MAZE",
            MazeError::MazeNotFound(_) => "MAZE_NOT_FOUND",
            MazeError::SessionNotFound(_) => "SESSION_NOT_FOUND",
            MazeError::GameComplete => "GAME_COMPLETE",
            MazeError::InvalidMove(_) => "INVALID_MOVE",
            MazeError::LockTimeout | MazeError::Internal(_) | MazeError::Io(_) => {
                return Self::internal_error("An unexpected error occurred");
            }
        };
        Self::new(code, err.to_string())
    }
}

impl From<&MazeError> for ErrorResponse {
    fn from(err: &MazeError) -> Self {
        Self::from_error(err)
    }
}

/// Whether an error kind is the caller's fault.
pub fn is_client_error(kind: ErrorKind) -> bool {
    !matches!(kind, ErrorKind::InternalFailure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Direction, InvalidMazeReason};

    #[test]
    fn test_error_response_serialization() {
        let err = ErrorResponse::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("TEST_ERROR"));
        assert!(json.contains("Test message"));
        assert!(!json.contains("details")); // skip_serializing_if
    }

    #[test]
    fn test_from_invalid_maze() {
        let err = MazeError::InvalidMaze(InvalidMazeReason::DuplicateExit(
            crate::maze::Position::new(3, 1),
        ));
        let body = ErrorResponse::from(&err);
        assert_eq!(body.code, "INVALID_MAZE");
        assert!(body.message.contains("duplicate exit"));
        assert!(body.details.is_none());
    }

    #[test]
    fn test_from_invalid_move() {
        let body = ErrorResponse::from(&MazeError::InvalidMove(Direction::Up));
        assert_eq!(body.code, "INVALID_MOVE");
        assert_eq!(body.message, "invalid move: Up");
    }

    #[test]
    fn test_internal_message_is_generic() {
        let body = ErrorResponse::from(&MazeError::LockTimeout);
        assert_eq!(body.code, "INTERNAL_ERROR");
        assert_eq!(body.message, "An unexpected error occurred");
        assert!(body.details.is_none());
    }

    #[test]
    fn test_is_client_error() {
        assert!(is_client_error(ErrorKind::InvalidMaze));
        assert!(is_client_error(ErrorKind::NotFound));
        assert!(is_client_error(ErrorKind::InvalidOperation));
        assert!(!is_client_error(ErrorKind::InternalFailure));
    }
}
