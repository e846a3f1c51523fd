use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::dns::{Addrs, Name, Resolve, Resolving};
use tokio::time::Instant;
use tracing::debug;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone)]
struct CacheEntry {
    addrs: Vec<SocketAddr>,
    resolved_at: Instant,
}

/// Resolver that remembers lookups for `ttl`.
///
/// Owned by one transport; clones share the same cache. Expired entries are
/// dropped whenever a new lookup is stored.
#[derive(Debug, Clone)]
pub struct CachingResolver {
    ttl: Duration,
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
}

impl CachingResolver {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn cached(&self, host: &str) -> Option<Vec<SocketAddr>> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .get(host)
            .filter(|entry| entry.resolved_at.elapsed() < self.ttl)
            .map(|entry| entry.addrs.clone())
    }

    fn remember(&self, host: String, addrs: Vec<SocketAddr>) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.retain(|_, entry| entry.resolved_at.elapsed() < self.ttl);
        entries.insert(host, CacheEntry { addrs, resolved_at: Instant::now() });
    }

    pub async fn lookup(&self, host: &str) -> io::Result<Vec<SocketAddr>> {
        if let Some(addrs) = self.cached(host) {
            debug!(host, "dns cache hit");
            return Ok(addrs);
        }
        // port is replaced by the connector
        let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, 0)).await?.collect();
        debug!(host, count = addrs.len(), "dns resolved");
        if !addrs.is_empty() {
            self.remember(host.to_owned(), addrs.clone());
        }
        Ok(addrs)
    }
}

impl Resolve for CachingResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let resolver = self.clone();
        Box::pin(async move {
            let addrs: Addrs = Box::new(resolver.lookup(name.as_str()).await?.into_iter());
            Ok::<_, BoxError>(addrs)
        })
    }
}
