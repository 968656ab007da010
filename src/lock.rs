//! Bounded lock acquisition.
//!
//! Lock order across the crate is: session map, then maze map. Code holding
//! the maze lock must never wait on the session lock.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::MazeError;
use crate::Result;

/// Default upper bound on waiting for either map's lock.
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Await a lock future, giving up with [`MazeError::LockTimeout`] after `timeout`.
///
/// Cancelling the caller drops the pending acquisition, so no guard outlives it.
pub async fn acquire<F, G>(lock: &'static str, timeout: Duration, fut: F) -> Result<G>
where
    F: Future<Output = G>,
{
    tokio::time::timeout(timeout, fut).await.map_err(|_| {
        warn!(lock, timeout_ms = timeout.as_millis() as u64, "lock acquisition timed out");
        MazeError::LockTimeout
    })
}
