// src/core/query_cache.rs
//! Response cache keyed by request signature (endpoint path).
//!
//! Reads go through `begin` → fetch → `complete`/`abandon`. Successful
//! mutations call `invalidate` on the keys whose backend state they changed,
//! so the next read goes back to the backend. A fetch that was already in
//! flight when its key got invalidated is discarded on completion.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const EVENT_LOG_CAPACITY: usize = 64;
const DEFAULT_IN_FLIGHT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    Stored(QueryKey),
    Invalidated(QueryKey),
    /// A fetch finished after its key was invalidated; the value was dropped
    Discarded(QueryKey),
}

/// Proof that the holder owns the fetch for a key
#[derive(Debug)]
pub struct FetchTicket {
    key: QueryKey,
    id: u64,
}

impl FetchTicket {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

#[derive(Debug)]
pub enum Lookup<T> {
    Fresh(T),
    /// Someone else is fetching this key right now
    InFlight,
    /// Nothing usable cached; the caller must fetch and report back
    Miss(FetchTicket),
}

#[derive(Debug)]
enum Slot {
    InFlight { ticket: u64, started_at: Instant },
    Ready { value: serde_json::Value, fetched_at: Instant },
}

#[derive(Debug)]
pub struct QueryCache {
    slots: HashMap<QueryKey, Slot>,
    stale_after: Option<Duration>,
    in_flight_timeout: Duration,
    next_ticket: u64,
    events: VecDeque<CacheEvent>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(None, DEFAULT_IN_FLIGHT_TIMEOUT)
    }
}

impl QueryCache {
    /// `stale_after: None` keeps entries until invalidated.
    /// `in_flight_timeout` bounds how long an abandoned fetch can block readers.
    pub fn new(stale_after: Option<Duration>, in_flight_timeout: Duration) -> Self {
        Self {
            slots: HashMap::new(),
            stale_after,
            in_flight_timeout,
            next_ticket: 0,
            events: VecDeque::new(),
        }
    }

    pub fn with_stale_after(stale_after: Option<Duration>) -> Self {
        Self::new(stale_after, DEFAULT_IN_FLIGHT_TIMEOUT)
    }

    pub fn begin<T: DeserializeOwned>(&mut self, key: &QueryKey) -> Lookup<T> {
        let now = Instant::now();

        match self.slots.get(key) {
            Some(Slot::Ready { value, fetched_at }) => {
                let stale = self
                    .stale_after
                    .is_some_and(|limit| now.duration_since(*fetched_at) >= limit);
                if !stale {
                    match serde_json::from_value::<T>(value.clone()) {
                        Ok(typed) => return Lookup::Fresh(typed),
                        Err(e) => warn!("Cached value for {} has unexpected shape: {}", key, e),
                    }
                }
            }
            Some(Slot::InFlight { started_at, .. }) => {
                if now.duration_since(*started_at) < self.in_flight_timeout {
                    return Lookup::InFlight;
                }
                warn!("Fetch for {} exceeded its window, taking it over", key);
            }
            None => {}
        }

        self.next_ticket += 1;
        let id = self.next_ticket;
        self.slots.insert(
            key.clone(),
            Slot::InFlight {
                ticket: id,
                started_at: now,
            },
        );
        debug!("Cache miss for {}, fetch #{} started", key, id);

        Lookup::Miss(FetchTicket {
            key: key.clone(),
            id,
        })
    }

    /// Store a fetched value. Returns `false` when the key was invalidated
    /// (or re-fetched) while this fetch was in flight.
    pub fn complete<T: Serialize>(&mut self, ticket: FetchTicket, value: &T) -> bool {
        if !self.owns(&ticket) {
            debug!("Dropping late result for {}", ticket.key);
            self.record(CacheEvent::Discarded(ticket.key));
            return false;
        }

        match serde_json::to_value(value) {
            Ok(json) => {
                self.slots.insert(
                    ticket.key.clone(),
                    Slot::Ready {
                        value: json,
                        fetched_at: Instant::now(),
                    },
                );
                self.record(CacheEvent::Stored(ticket.key));
                true
            }
            Err(e) => {
                warn!("Could not cache value for {}: {}", ticket.key, e);
                self.slots.remove(&ticket.key);
                false
            }
        }
    }

    /// Release a fetch that failed; failures are never cached
    pub fn abandon(&mut self, ticket: FetchTicket) {
        if self.owns(&ticket) {
            self.slots.remove(&ticket.key);
        }
    }

    pub fn invalidate(&mut self, key: &QueryKey) {
        self.slots.remove(key);
        debug!("Invalidated {}", key);
        self.record(CacheEvent::Invalidated(key.clone()));
    }

    /// Read a ready value without starting a fetch
    pub fn peek<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        match self.slots.get(key) {
            Some(Slot::Ready { value, .. }) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }

    pub fn is_in_flight(&self, key: &QueryKey) -> bool {
        matches!(self.slots.get(key), Some(Slot::InFlight { .. }))
    }

    pub fn events(&self) -> impl Iterator<Item = &CacheEvent> {
        self.events.iter()
    }

    fn owns(&self, ticket: &FetchTicket) -> bool {
        matches!(
            self.slots.get(&ticket.key),
            Some(Slot::InFlight { ticket: id, .. }) if *id == ticket.id
        )
    }

    fn record(&mut self, event: CacheEvent) {
        if self.events.len() == EVENT_LOG_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> QueryKey {
        QueryKey::new("/api/resumes/42/cover-letters")
    }

    fn miss(cache: &mut QueryCache) -> FetchTicket {
        match cache.begin::<Vec<String>>(&key()) {
            Lookup::Miss(ticket) => ticket,
            other => panic!("expected miss, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_then_read_back() {
        let mut cache = QueryCache::default();
        let ticket = miss(&mut cache);
        assert!(cache.is_in_flight(&key()));
        assert!(matches!(cache.begin::<Vec<String>>(&key()), Lookup::InFlight));

        assert!(cache.complete(ticket, &vec!["letter".to_string()]));
        match cache.begin::<Vec<String>>(&key()) {
            Lookup::Fresh(value) => assert_eq!(value, vec!["letter"]),
            other => panic!("expected fresh, got {:?}", other),
        }
    }

    #[test]
    fn test_invalidate_forces_refetch() {
        let mut cache = QueryCache::default();
        let ticket = miss(&mut cache);
        cache.complete(ticket, &vec!["old".to_string()]);

        cache.invalidate(&key());
        assert!(cache.peek::<Vec<String>>(&key()).is_none());
        assert!(matches!(cache.begin::<Vec<String>>(&key()), Lookup::Miss(_)));
        assert!(cache
            .events()
            .any(|e| *e == CacheEvent::Invalidated(key())));
    }

    #[test]
    fn test_invalidate_during_fetch_discards_late_result() {
        let mut cache = QueryCache::default();
        let ticket = miss(&mut cache);

        cache.invalidate(&key());
        assert!(!cache.complete(ticket, &vec!["stale".to_string()]));
        assert!(cache.peek::<Vec<String>>(&key()).is_none());
        assert_eq!(cache.events().last(), Some(&CacheEvent::Discarded(key())));
    }

    #[test]
    fn test_abandon_releases_key() {
        let mut cache = QueryCache::default();
        let ticket = miss(&mut cache);
        cache.abandon(ticket);
        assert!(!cache.is_in_flight(&key()));
        assert!(matches!(cache.begin::<Vec<String>>(&key()), Lookup::Miss(_)));
    }

    #[test]
    fn test_stale_entries_are_refetched() {
        let mut cache = QueryCache::new(Some(Duration::ZERO), DEFAULT_IN_FLIGHT_TIMEOUT);
        let ticket = miss(&mut cache);
        cache.complete(ticket, &vec!["x".to_string()]);
        assert!(matches!(cache.begin::<Vec<String>>(&key()), Lookup::Miss(_)));
    }

    #[test]
    fn test_abandoned_fetch_is_taken_over_after_timeout() {
        let mut cache = QueryCache::new(None, Duration::ZERO);
        let first = miss(&mut cache);
        let second = miss(&mut cache);
        assert!(!cache.complete(first, &vec!["a".to_string()]));
        assert!(cache.complete(second, &vec!["b".to_string()]));
    }
}
