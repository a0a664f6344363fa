//! Injected TTL request cache.
//!
//! The cache is a port handed explicitly to whatever needs it, never a
//! process-wide map. [`CachedReferenceSource`] is the one consumer in this
//! crate: it keeps reference lists warm per field key for one TTL window.

use std::cell::RefCell;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

use crate::ports::{ReferenceEntry, ReferenceSource};

/// Clock seam so expiry is testable without sleeping.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Keyed request cache with per-entry TTL.
pub trait RequestCache {
    /// Fresh value for `key`, or `None` if absent or past its TTL.
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value, ttl: Duration);
    /// Drop `key` immediately, regardless of remaining TTL.
    fn expire(&mut self, key: &str);
}

struct CacheSlot {
    value: Value,
    expires_at: Instant,
}

/// In-memory [`RequestCache`] over an injected [`Clock`].
///
/// Stale slots are dropped lazily: a read past the deadline reports a miss
/// and the next `set` for the key overwrites the slot.
pub struct MemoryCache<C = SystemClock> {
    clock: C,
    slots: IndexMap<String, CacheSlot>,
}

impl MemoryCache<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryCache<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            slots: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<C: Clock> RequestCache for MemoryCache<C> {
    fn get(&self, key: &str) -> Option<Value> {
        let slot = self.slots.get(key)?;
        if self.clock.now() >= slot.expires_at {
            debug!("cache slot {key:?} past its deadline");
            return None;
        }
        Some(slot.value.clone())
    }

    fn set(&mut self, key: &str, value: Value, ttl: Duration) {
        let expires_at = self.clock.now() + ttl;
        self.slots
            .insert(key.to_string(), CacheSlot { value, expires_at });
    }

    fn expire(&mut self, key: &str) {
        self.slots.shift_remove(key);
    }
}

/// Decorates a [`ReferenceSource`] with per-field-key TTL caching.
///
/// The controller and the select controls hit reference lists on every
/// validation pass; one fetch per TTL window is enough.
pub struct CachedReferenceSource<S, C = MemoryCache> {
    inner: S,
    cache: RefCell<C>,
    ttl: Duration,
}

impl<S: ReferenceSource> CachedReferenceSource<S, MemoryCache> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self::with_cache(inner, MemoryCache::new(), ttl)
    }
}

impl<S: ReferenceSource, C: RequestCache> CachedReferenceSource<S, C> {
    pub fn with_cache(inner: S, cache: C, ttl: Duration) -> Self {
        Self {
            inner,
            cache: RefCell::new(cache),
            ttl,
        }
    }

    /// Drop the cached list for `field_key`, forcing a refetch on next use.
    pub fn invalidate(&self, field_key: &str) {
        self.cache.borrow_mut().expire(field_key);
    }
}

impl<S: ReferenceSource, C: RequestCache> ReferenceSource for CachedReferenceSource<S, C> {
    fn entries(&self, field_key: &str) -> Vec<ReferenceEntry> {
        if let Some(hit) = self.cache.borrow().get(field_key) {
            if let Ok(entries) = serde_json::from_value(hit) {
                debug!("reference cache hit for {field_key:?}");
                return entries;
            }
        }
        let fresh = self.inner.entries(field_key);
        if let Ok(value) = serde_json::to_value(&fresh) {
            self.cache.borrow_mut().set(field_key, value, self.ttl);
        }
        fresh
    }
}
