//! Maze definition storage.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, warn};
use uuid::Uuid;

use super::cell::Position;
use super::grid::{parse_grid, Grid};
use crate::error::MazeError;
use crate::lock::{acquire, DEFAULT_LOCK_TIMEOUT};
use crate::Result;

/// Unique identifier for an uploaded maze.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MazeId(String);

impl MazeId {
    /// Generate a fresh random (v4 UUID) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MazeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for MazeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MazeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for MazeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated maze. Immutable once registered.
#[derive(Debug, Clone, Serialize)]
pub struct MazeDefinition {
    pub id: MazeId,
    pub name: String,
    pub grid: Grid,
    pub start: Position,
    pub exit: Position,
}

/// Insertion-ordered maze map.
#[derive(Debug, Default)]
pub(crate) struct MazeMap {
    entries: Vec<Arc<MazeDefinition>>,
    index: HashMap<MazeId, usize>,
}

impl MazeMap {
    pub(crate) fn get(&self, id: &MazeId) -> Option<&Arc<MazeDefinition>> {
        self.index.get(id).and_then(|&i| self.entries.get(i))
    }

    fn insert(&mut self, maze: Arc<MazeDefinition>) -> Result<()> {
        if self.index.contains_key(&maze.id) {
            return Err(MazeError::Internal(format!("maze id collision: {}", maze.id)));
        }
        self.index.insert(maze.id.clone(), self.entries.len());
        self.entries.push(maze);
        Ok(())
    }

    pub(crate) fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.index.clear();
        removed
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Thread-safe registry of uploaded mazes.
///
/// Readers share the lock; uploads and clears take it exclusively. Listing
/// order is upload order.
pub struct MazeRegistry {
    mazes: RwLock<MazeMap>,
    lock_timeout: Duration,
}

impl MazeRegistry {
    /// Create an empty registry with the default lock timeout.
    pub fn new() -> Self {
        Self::with_lock_timeout(DEFAULT_LOCK_TIMEOUT)
    }

    /// Create an empty registry that waits at most `lock_timeout` for its lock.
    pub fn with_lock_timeout(lock_timeout: Duration) -> Self {
        Self {
            mazes: RwLock::new(MazeMap::default()),
            lock_timeout,
        }
    }

    pub(crate) async fn read(&self) -> Result<RwLockReadGuard<'_, MazeMap>> {
        acquire("mazes", self.lock_timeout, self.mazes.read()).await
    }

    pub(crate) async fn write(&self) -> Result<RwLockWriteGuard<'_, MazeMap>> {
        acquire("mazes", self.lock_timeout, self.mazes.write()).await
    }

    /// Validate, parse and register maze text.
    ///
    /// Returns the new maze's ID. A rejected upload leaves the registry untouched.
    pub async fn upload(&self, name: impl Into<String>, raw: &str) -> Result<MazeId> {
        let name = name.into();
        let parsed = parse_grid(raw).map_err(|reason| {
            warn!(name = %name, %reason, "rejected maze upload");
            MazeError::InvalidMaze(reason)
        })?;

        let maze = Arc::new(MazeDefinition {
            id: MazeId::new(),
            name,
            grid: parsed.grid,
            start: parsed.start,
            exit: parsed.exit,
        });
        let id = maze.id.clone();

        self.write().await?.insert(Arc::clone(&maze))?;

        info!(
            maze_id = %id,
            name = %maze.name,
            width = maze.grid.width(),
            height = maze.grid.height(),
            start = %maze.start,
            exit = %maze.exit,
            "maze uploaded"
        );
        Ok(id)
    }

    /// Snapshot of all registered mazes in upload order.
    pub async fn list(&self) -> Result<Vec<Arc<MazeDefinition>>> {
        let mazes = self.read().await?;
        Ok(mazes.entries.clone())
    }

    /// Look up a maze by ID.
    pub async fn get(&self, id: &MazeId) -> Result<Arc<MazeDefinition>> {
        let mazes = self.read().await?;
        mazes.get(id).cloned().ok_or_else(|| {
            warn!(maze_id = %id, "maze not found");
            MazeError::MazeNotFound(id.to_string())
        })
    }

    /// Number of registered mazes.
    pub async fn count(&self) -> Result<usize> {
        let mazes = self.read().await?;
        Ok(mazes.len())
    }

    /// Remove every maze. Returns how many were removed.
    ///
    /// Sessions on removed mazes fail later moves with `MazeNotFound`; use
    /// [`SessionManager::clear_all`](crate::SessionManager::clear_all) to
    /// drop both together.
    pub async fn clear(&self) -> Result<usize> {
        let removed = self.write().await?.clear();
        info!(removed, "cleared mazes");
        Ok(removed)
    }
}

impl Default for MazeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
