//! Session storage and move handling.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

use super::{GameState, SessionId};
use crate::error::MazeError;
use crate::lock::{acquire, DEFAULT_LOCK_TIMEOUT};
use crate::maze::{Direction, MazeId, MazeRegistry};
use crate::Result;

/// Counts of entries dropped by [`SessionManager::clear_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearSummary {
    pub mazes: usize,
    pub sessions: usize,
}

/// Thread-safe storage for game sessions.
///
/// Every operation that needs both maps takes the session lock first and the
/// maze lock second. A move holds the session write lock from lookup to
/// update, so moves on one session are applied one at a time.
pub struct SessionManager {
    registry: Arc<MazeRegistry>,
    sessions: RwLock<BTreeMap<SessionId, GameState>>,
    lock_timeout: Duration,
}

impl SessionManager {
    /// Create an empty session manager backed by `registry`.
    pub fn new(registry: Arc<MazeRegistry>) -> Self {
        Self::with_lock_timeout(registry, DEFAULT_LOCK_TIMEOUT)
    }

    /// Create an empty session manager that waits at most `lock_timeout` for its lock.
    pub fn with_lock_timeout(registry: Arc<MazeRegistry>, lock_timeout: Duration) -> Self {
        Self {
            registry,
            sessions: RwLock::new(BTreeMap::new()),
            lock_timeout,
        }
    }

    /// The maze registry sessions are resolved against.
    pub fn registry(&self) -> &Arc<MazeRegistry> {
        &self.registry
    }

    async fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<SessionId, GameState>>> {
        acquire("sessions", self.lock_timeout, self.sessions.read()).await
    }

    async fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<SessionId, GameState>>> {
        acquire("sessions", self.lock_timeout, self.sessions.write()).await
    }

    /// Start a new session on the start cell of `maze_id`.
    pub async fn initialize(&self, maze_id: &MazeId) -> Result<GameState> {
        let mut sessions = self.write().await?;
        let maze = {
            let mazes = self.registry.read().await?;
            mazes.get(maze_id).cloned().ok_or_else(|| {
                warn!(maze_id = %maze_id, "cannot start session: maze not found");
                MazeError::MazeNotFound(maze_id.to_string())
            })?
        };

        let mut session_id = SessionId::new();
        while sessions.contains_key(&session_id) {
            session_id = SessionId::new();
        }

        let state = GameState::new(session_id, &maze);
        sessions.insert(session_id, state.clone());

        info!(
            session_id = %session_id,
            maze_id = %maze_id,
            position = %state.current_position,
            "session initialized"
        );
        Ok(state)
    }

    /// Move the session one step in `direction`.
    ///
    /// Fails with `SessionNotFound` for unknown sessions, `GameComplete` once
    /// the exit was reached, `MazeNotFound` if the maze was cleared and
    /// `InvalidMove` for walls and grid edges. Failures change nothing.
    pub async fn make_move(&self, session_id: &SessionId, direction: Direction) -> Result<GameState> {
        let mut sessions = self.write().await?;
        let state = sessions.get_mut(session_id).ok_or_else(|| {
            warn!(session_id = %session_id, "session not found");
            MazeError::SessionNotFound(session_id.to_string())
        })?;

        if state.is_complete {
            return Err(MazeError::GameComplete);
        }

        let maze = {
            let mazes = self.registry.read().await?;
            mazes
                .get(&state.maze_id)
                .cloned()
                .ok_or_else(|| {
                    warn!(
                        session_id = %session_id,
                        maze_id = %state.maze_id,
                        "session maze not found"
                    );
                    MazeError::MazeNotFound(state.maze_id.to_string())
                })?
        };

        if let Err(e) = state.apply_move(&maze, direction) {
            debug!(
                session_id = %session_id,
                %direction,
                position = %state.current_position,
                "move rejected"
            );
            return Err(e);
        }

        debug!(
            session_id = %session_id,
            %direction,
            position = %state.current_position,
            "move applied"
        );
        if state.is_complete {
            info!(session_id = %session_id, maze_id = %state.maze_id, "game completed");
        }

        Ok(state.clone())
    }

    /// Get a copy of one session.
    pub async fn get(&self, session_id: &SessionId) -> Result<GameState> {
        let sessions = self.read().await?;
        sessions.get(session_id).cloned().ok_or_else(|| {
            warn!(session_id = %session_id, "session not found");
            MazeError::SessionNotFound(session_id.to_string())
        })
    }

    /// Copies of all sessions, ordered by session ID.
    pub async fn list(&self) -> Result<Vec<GameState>> {
        let sessions = self.read().await?;
        Ok(sessions.values().cloned().collect())
    }

    /// Number of active sessions.
    pub async fn count(&self) -> Result<usize> {
        let sessions = self.read().await?;
        Ok(sessions.len())
    }

    /// Drop every session and every maze in one step.
    ///
    /// Both locks are held while clearing, so no caller can observe one map
    /// cleared and the other not.
    pub async fn clear_all(&self) -> Result<ClearSummary> {
        let mut sessions = self.write().await?;
        let mut mazes = self.registry.write().await?;

        let summary = ClearSummary {
            mazes: mazes.clear(),
            sessions: sessions.len(),
        };
        sessions.clear();

        info!(
            mazes = summary.mazes,
            sessions = summary.sessions,
            "cleared all mazes and sessions"
        );
        Ok(summary)
    }
}
