use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::cache::token::AccessToken;
use crate::cache::token_expiry::ExpiryTask;
use crate::error::AuthError;

#[derive(Debug)]
pub(crate) struct CachedToken {
    pub(crate) token: AccessToken,
    pub(crate) generation: u64,
    _expiry: ExpiryTask,
}

/// Holds at most one access token per client.
///
/// A token is either absent, which forces a refresh, or presumed valid until
/// its expiry task clears it. Concurrent refreshes are serialized: callers
/// that waited for the refresh lock reuse the token fetched by the first one.
#[derive(Debug, Default)]
pub struct TokenCache {
    slot: Arc<RwLock<Option<CachedToken>>>,
    refresh: Mutex<()>,
    generation: AtomicU64,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached token, if any.
    pub async fn current(&self) -> Option<AccessToken> {
        self.slot.read().await.as_ref().map(|cached| cached.token.clone())
    }

    /// Return the cached token or run `fetch` once to obtain a new one.
    ///
    /// A failed fetch leaves the cache empty so the next call tries again.
    pub async fn ensure_token<F, Fut>(&self, fetch: F) -> Result<AccessToken, AuthError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AccessToken, AuthError>>,
    {
        if let Some(token) = self.current().await {
            return Ok(token);
        }

        let _refresh = self.refresh.lock().await;
        if let Some(token) = self.current().await {
            debug!("token refreshed by a concurrent caller, reusing it");
            return Ok(token);
        }

        let token = fetch().await?;
        self.store(token.clone()).await;
        Ok(token)
    }

    /// Put `token` into the cache and schedule its invalidation
    /// `expires_in_seconds` from now. Replaces any cached token.
    pub async fn store(&self, token: AccessToken) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let ttl = Duration::from_secs(token.expires_in_seconds);

        // scheduled under the write lock so the timer can never observe the
        // slot before this token is in it
        let mut slot = self.slot.write().await;
        let expiry = ExpiryTask::schedule(Arc::downgrade(&self.slot), generation, ttl);
        info!(
            generation,
            expires_in = token.expires_in_seconds,
            expires_at = %token.expires_at(),
            "access token cached"
        );
        *slot = Some(CachedToken {
            token,
            generation,
            _expiry: expiry,
        });
    }

    /// Drop the cached token; the next [`ensure_token`](Self::ensure_token)
    /// call fetches a new one.
    pub async fn invalidate(&self) {
        if self.slot.write().await.take().is_some() {
            info!("access token invalidated");
        }
    }
}
