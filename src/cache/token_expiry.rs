use std::sync::Weak;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::cache::token_cache::CachedToken;

// ~30 years; lifetimes past the instant range never fire
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Background task clearing one cached token after its lifetime.
///
/// The task holds only a weak reference to the slot and clears it only while
/// the slot still holds the token of the same `generation`. Dropping the
/// handle aborts the task, so replacing or dropping the cached token cancels
/// its timer.
#[derive(Debug)]
pub(crate) struct ExpiryTask {
    handle: AbortHandle,
}

impl ExpiryTask {
    pub(crate) fn schedule(slot: Weak<RwLock<Option<CachedToken>>>, generation: u64, ttl: Duration) -> Self {
        let now = Instant::now();
        let deadline = now.checked_add(ttl).unwrap_or_else(|| now + FAR_FUTURE);
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let Some(slot) = slot.upgrade() else {
                return;
            };
            let mut slot = slot.write().await;
            match slot.as_ref() {
                Some(cached) if cached.generation == generation => {
                    *slot = None;
                    info!(generation, "access token expired, removed from cache");
                }
                _ => debug!(generation, "expiry fired for a replaced token, ignoring"),
            }
        })
        .abort_handle();

        Self { handle }
    }
}

impl Drop for ExpiryTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
