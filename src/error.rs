//! Error types for maze-server.

use thiserror::Error;

use crate::maze::{Direction, InvalidMazeReason};

/// Main error type for maze-server operations.
#[derive(Error, Debug)]
pub enum MazeError {
    /// Uploaded grid failed validation. Nothing was registered.
    #[error("invalid maze: {0}")]
    InvalidMaze(#[from] InvalidMazeReason),

    /// Maze with the given ID was not found.
    #[error("maze not found: {0}")]
    MazeNotFound(String),

    /// Session with the given ID was not found.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// Move attempted on a session that already reached the exit.
    #[error("game already complete")]
    GameComplete,

    /// Target cell is a wall or outside the grid.
    #[error("invalid move: {0}")]
    InvalidMove(Direction),

    /// A lock could not be acquired before the deadline.
    #[error("timed out waiting for internal lock")]
    LockTimeout,

    /// Unexpected internal fault.
    #[error("internal error: {0}")]
    Internal(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of [`MazeError`], used by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Grid failed validation.
    InvalidMaze,
    /// Unknown maze or session id.
    NotFound,
    /// Illegal move, or move after completion.
    InvalidOperation,
    /// Anything unexpected.
    InternalFailure,
}

impl MazeError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidMaze(_) => ErrorKind::InvalidMaze,
            Self::MazeNotFound(_) | Self::SessionNotFound(_) => ErrorKind::NotFound,
            Self::GameComplete | Self::InvalidMove(_) => ErrorKind::InvalidOperation,
            Self::LockTimeout | Self::Internal(_) | Self::Io(_) => ErrorKind::InternalFailure,
        }
    }
}

/// Convenience Result type for maze-server operations.
pub type Result<T> = std::result::Result<T, MazeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_not_found_display() {
        let err = MazeError::SessionNotFound("abc".into());
        assert!(err.to_string().contains("abc"));
        assert!(err.to_string().contains("not found"));
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_invalid_move_display() {
        let err = MazeError::InvalidMove(Direction::Left);
        assert_eq!(err.to_string(), "invalid move: Left");
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_game_complete_kind() {
        let err = MazeError::GameComplete;
        assert!(err.to_string().contains("already complete"));
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_invalid_maze_conversion() {
        let err: MazeError = InvalidMazeReason::MissingStart.into();
        assert_eq!(err.kind(), ErrorKind::InvalidMaze);
        assert!(err.to_string().contains("missing start"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MazeError = io_err.into();
        assert!(matches!(err, MazeError::Io(_)));
        assert_eq!(err.kind(), ErrorKind::InternalFailure);
    }

    #[test]
    fn test_lock_timeout_kind() {
        assert_eq!(MazeError::LockTimeout.kind(), ErrorKind::InternalFailure);
    }
}
