//! Game session management.
//!
//! This module provides session identification, the per-session move
//! engine, and the shared session store.

mod id;
mod manager;
mod state;

pub use id::SessionId;
pub use manager::{ClearSummary, SessionManager};
pub use state::{available_moves, GameState};
