//! HTTP layer for maze-server.
//!
//! A thin axum adapter over [`MazeRegistry`](crate::MazeRegistry) and
//! [`SessionManager`](crate::SessionManager). Engine errors map to status
//! codes here and nowhere else.
//!
//! ## Endpoints
//!
//! ### Health & Info
//! - `GET /health` - Health check
//! - `GET /api` - API information
//!
//! ### Mazes
//! - `POST /api/maze/upload` - Upload a maze file (multipart field `file`)
//! - `GET /api/maze/available` - List uploaded mazes
//! - `DELETE /api/maze/clear` - Remove all mazes and sessions
//! - `GET /api/maze/directions` - Direction names in ordinal order
//!
//! ### Sessions
//! - `POST /api/maze/initialize/{mazeId}` - Start a session
//! - `POST /api/maze/move/{sessionId}` - Move one step (body: `"Right"` or `2`)
//! - `GET /api/maze/sessions` - List sessions
//! - `GET /api/maze/sessions/{sessionId}` - Get one session
//!
//! ## Example
//!
//! ```no_run
//! use maze_server::api::{ServerConfig, serve};
//!
//! #[tokio::main]
//! async fn main() -> maze_server::Result<()> {
//!     let config = ServerConfig::new("127.0.0.1", 5000);
//!     serve(config).await
//! }
//! ```

pub mod handlers;
pub mod router;
pub mod types;

// Re-export commonly used types
pub use handlers::{status_for, AppState};
pub use router::{create_router, create_router_with_state, serve, serve_with_state, ServerConfig};
pub use types::ErrorResponse;
