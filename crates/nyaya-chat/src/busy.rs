//! Per-session concurrency guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::service::ChatError;

/// Guard that clears the session's `busy` flag on drop, ensuring it is
/// always released even if the future is cancelled or an early return
/// occurs.
pub(crate) struct BusyGuard {
    flag: Arc<AtomicBool>,
}

impl BusyGuard {
    /// Attempt to acquire the busy flag. Returns `Err` if a turn is already
    /// in flight for the session.
    pub(crate) fn acquire(flag: Arc<AtomicBool>) -> Result<Self, ChatError> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(ChatError::Busy);
        }
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
