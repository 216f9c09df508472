//! Read-through cache with time-based revalidation and tag invalidation
//!
//! Entries expire after a fixed time-to-live. Every entry is registered under
//! one or more tags; invalidating a tag drops all of its entries at once.
//! Each invalidation bumps an epoch counter, and a load that started under an
//! older epoch is returned to its caller but never stored.
//!
//! The tag index only grows on insert. Once a tag holds more keys than the
//! cache can, keys whose entries expired or were evicted are pruned from it.

use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use moka::sync::Cache;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;

/// Default revalidation window.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Maximum cache entries.
const MAX_ENTRIES: u64 = 1_000;

/// Hit/miss counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Tagged read-through cache
pub struct TaggedCache<V: Clone + Send + Sync + 'static> {
    cache: Cache<String, V>,
    tags: DashMap<String, HashSet<String>>,
    epoch: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone + Send + Sync + 'static> TaggedCache<V> {
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(ttl)
            .build();
        Self {
            cache,
            tags: DashMap::new(),
            epoch: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        match self.cache.get(key) {
            Some(v) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(v)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Return the cached value for `key`, or run `loader` and cache its
    /// result under `tags`. Loader errors are returned and not cached.
    pub async fn get_or_load<F, Fut>(&self, key: &str, tags: &[&str], loader: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        if let Some(hit) = self.get(key) {
            return Ok(hit);
        }

        let started = self.epoch.load(Ordering::Acquire);
        let value = loader().await?;

        if self.epoch.load(Ordering::Acquire) == started {
            for tag in tags {
                self.tags
                    .entry((*tag).to_string())
                    .or_default()
                    .insert(key.to_string());
            }
            self.cache.insert(key.to_string(), value.clone());

            // An invalidation may have landed between the check and the insert
            if self.epoch.load(Ordering::Acquire) != started {
                self.cache.invalidate(key);
            }
            self.prune_tags(tags);
        } else {
            debug!("Discarding stale load for cache key {}", key);
        }

        Ok(value)
    }

    /// Forget keys that no longer have a live entry, for any of `tags` that
    /// has outgrown the cache capacity
    fn prune_tags(&self, tags: &[&str]) {
        let oversized = tags.iter().any(|tag| {
            self.tags
                .get(*tag)
                .map_or(false, |keys| keys.len() > MAX_ENTRIES as usize)
        });
        if !oversized {
            return;
        }

        self.cache.run_pending_tasks();
        for tag in tags {
            if let Some(mut keys) = self.tags.get_mut(*tag) {
                let before = keys.len();
                keys.retain(|k| self.cache.contains_key(k));
                debug!("Pruned {} stale keys from cache tag {}", before - keys.len(), tag);
            }
        }
    }

    /// Number of keys currently indexed under `tag`
    pub fn tagged_len(&self, tag: &str) -> usize {
        self.tags.get(tag).map_or(0, |keys| keys.len())
    }

    /// Drop every entry registered under `tag`
    pub fn invalidate_tag(&self, tag: &str) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        if let Some((_, keys)) = self.tags.remove(tag) {
            debug!("Invalidating {} cache entries tagged {}", keys.len(), tag);
            for key in keys {
                self.cache.invalidate(&key);
            }
        }
    }

    pub fn invalidate_all(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        self.tags.clear();
        self.cache.invalidate_all();
        debug!("Invalidated all cache entries");
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<V: Clone + Send + Sync + 'static> Default for TaggedCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
