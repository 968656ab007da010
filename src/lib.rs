//! # maze-server
//!
//! In-memory maze registry and game-session engine.
//!
//! Clients upload ASCII grid mazes, start play sessions on them and move one
//! step at a time until they reach the exit. The engine is safe to share
//! between any number of concurrent requests.
//!
//! ## Features
//!
//! - **Maze validation**: rectangular grids of `S`, `E`, `O`, `X` with exactly
//!   one start and one exit, rejected with a specific reason otherwise
//! - **Sessions**: per-player position tracking with legal-move computation
//! - **Bounded locking**: every lock wait is capped, and cancelling a request
//!   never leaves a half-applied change
//! - **HTTP API**: axum router in [`api`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use maze_server::{Direction, MazeRegistry, SessionManager};
//!
//! #[tokio::main]
//! async fn main() -> maze_server::Result<()> {
//!     maze_server::logging::try_init("info").ok();
//!
//!     let mazes = Arc::new(MazeRegistry::new());
//!     let sessions = SessionManager::new(Arc::clone(&mazes));
//!
//!     let maze_id = mazes.upload("corridor", "XXXXX\nXSOEX\nXXXXX").await?;
//!     let game = sessions.initialize(&maze_id).await?;
//!     let game = sessions.make_move(&game.session_id, Direction::Right).await?;
//!
//!     println!("now at {}", game.current_position);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod lock;
pub mod logging;
pub mod maze;
pub mod session;

// Re-export commonly used types
pub use error::{ErrorKind, MazeError, Result};
pub use maze::{
    Cell, Direction, Grid, InvalidMazeReason, MazeDefinition, MazeId, MazeRegistry, Position,
};
pub use session::{ClearSummary, GameState, SessionId, SessionManager};
