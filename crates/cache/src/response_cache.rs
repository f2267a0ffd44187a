//! ResponseCache - TTL memoization for backend responses

use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::CacheSettings;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// A single cached response
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Value,
    expires_at: Instant,
    /// Logical access clock, used for LRU eviction
    last_used: u64,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Counters describing cache behaviour since construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    /// Live entry count at snapshot time (expired-but-unread included)
    pub entries: usize,
}

/// Key/value store with per-entry TTL and a least-recently-used bound.
///
/// Entries are visible to readers only until their deadline; stale entries
/// are purged lazily on read. Keys are opaque caller-chosen strings, often
/// sharing a prefix so a whole family can be invalidated at once.
///
/// The cache is an explicitly constructed value, owned by the session
/// composition root and handed out by reference. Mutating operations take
/// `&mut self`; access is single-threaded cooperative.
#[derive(Debug)]
pub struct ResponseCache {
    entries: HashMap<String, CacheEntry>,
    default_ttl: Duration,
    /// 0 disables the bound
    max_entries: usize,
    tick: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
    expirations: u64,
}

impl ResponseCache {
    /// Create a cache with the given default TTL and capacity bound
    pub fn new(default_ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            default_ttl,
            max_entries,
            tick: 0,
            hits: 0,
            misses: 0,
            evictions: 0,
            expirations: 0,
        }
    }

    /// Create a cache from configuration
    pub fn from_settings(settings: &CacheSettings) -> Self {
        Self::new(
            Duration::from_secs(settings.default_ttl_secs),
            settings.max_entries,
        )
    }

    /// The TTL applied by [`set`](Self::set)
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Look up a key, purging it if its TTL has elapsed.
    ///
    /// A miss (absent or expired) returns `None`; misses are not errors.
    pub fn get(&mut self, key: &str) -> Option<&Value> {
        let now = Instant::now();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.misses += 1;
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.expirations += 1;
            self.misses += 1;
            tracing::debug!(key, "expired cache entry purged on read");
            return None;
        }

        self.hits += 1;
        self.tick += 1;
        let tick = self.tick;
        let entry = self.entries.get_mut(key)?;
        entry.last_used = tick;
        Some(&entry.data)
    }

    /// Look up a key and deserialize the stored JSON into `T`.
    ///
    /// A value that does not decode as `T` counts as a miss.
    pub fn get_as<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let value = self.get(key)?.clone();
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                tracing::debug!(key, %err, "cached value did not decode to requested type");
                None
            }
        }
    }

    /// Store a value under `key` with the default TTL, overwriting any
    /// existing entry.
    pub fn set(&mut self, key: impl Into<String>, data: Value) {
        let ttl = self.default_ttl;
        self.set_with_ttl(key, data, ttl);
    }

    /// Store a value under `key` with an explicit TTL.
    ///
    /// Inserting a new key at capacity evicts the least recently used
    /// entry first. Overwriting an existing key never evicts.
    pub fn set_with_ttl(&mut self, key: impl Into<String>, data: Value, ttl: Duration) {
        let key = key.into();

        if self.max_entries > 0
            && !self.entries.contains_key(&key)
            && self.entries.len() >= self.max_entries
        {
            self.evict_lru();
        }

        self.tick += 1;
        let entry = CacheEntry {
            data,
            expires_at: Instant::now() + ttl,
            last_used: self.tick,
        };
        self.entries.insert(key, entry);
    }

    /// Whether `key` holds an unexpired entry. Does not purge and does not
    /// count toward hit/miss statistics.
    pub fn contains(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries
            .get(key)
            .map(|e| !e.is_expired(now))
            .unwrap_or(false)
    }

    /// Remove a single entry, returning whether it was present
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Delete every entry whose key starts with `prefix`.
    ///
    /// Returns the number of entries removed. All other entries are left
    /// untouched.
    pub fn clear_prefix(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|k, _| !k.starts_with(prefix));
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::debug!(prefix, removed, "cleared cache entries by prefix");
        }
        removed
    }

    /// Empty the store entirely
    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    /// Drop every entry whose TTL has elapsed, returning how many were
    /// removed. Reads already purge lazily; this is for housekeeping
    /// sweeps between bursts of activity.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| !e.is_expired(now));
        let removed = before - self.entries.len();
        self.expirations += removed as u64;
        removed
    }

    /// Number of stored entries, expired-but-unread included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of the behaviour counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            expirations: self.expirations,
            entries: self.entries.len(),
        }
    }

    fn evict_lru(&mut self) {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.last_used)
            .map(|(k, _)| k.clone());

        if let Some(key) = victim {
            self.entries.remove(&key);
            self.evictions += 1;
            tracing::debug!(key = %key, "evicted least recently used cache entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread::sleep;

    fn cache() -> ResponseCache {
        ResponseCache::new(Duration::from_secs(60), 0)
    }

    // ============== Basic Operations ==============

    #[test]
    fn test_set_then_get() {
        let mut cache = cache();

        cache.set("patients_1", json!({"name": "Ada"}));

        assert_eq!(cache.get("patients_1"), Some(&json!({"name": "Ada"})));
    }

    #[test]
    fn test_get_absent_key() {
        let mut cache = cache();
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn test_overwrite_same_key() {
        let mut cache = cache();

        cache.set("appt_1", json!(1));
        cache.set("appt_1", json!(2));

        assert_eq!(cache.get("appt_1"), Some(&json!(2)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut cache = cache();

        cache.set("k", json!(true));
        assert!(cache.remove("k"));
        assert!(!cache.remove("k"));
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_contains_does_not_count_stats() {
        let mut cache = cache();
        cache.set("k", json!(1));

        assert!(cache.contains("k"));
        assert!(!cache.contains("other"));

        let stats = cache.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
    }

    // ============== TTL Behaviour ==============

    #[test]
    fn test_entry_expires_and_is_removed() {
        let mut cache = cache();

        cache.set_with_ttl("org_1", json!({"plan": "basic"}), Duration::from_millis(30));
        sleep(Duration::from_millis(60));

        assert_eq!(cache.get("org_1"), None);
        // Purged as a side effect of the read
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_entry_visible_before_deadline() {
        let mut cache = cache();

        cache.set_with_ttl("k", json!("v"), Duration::from_secs(60));
        assert_eq!(cache.get("k"), Some(&json!("v")));
    }

    #[test]
    fn test_zero_ttl_is_immediately_stale() {
        let mut cache = cache();

        cache.set_with_ttl("k", json!("v"), Duration::ZERO);
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_overwrite_refreshes_deadline() {
        let mut cache = cache();

        cache.set_with_ttl("k", json!(1), Duration::from_millis(30));
        cache.set_with_ttl("k", json!(2), Duration::from_secs(60));
        sleep(Duration::from_millis(60));

        assert_eq!(cache.get("k"), Some(&json!(2)));
    }

    #[test]
    fn test_set_uses_default_ttl() {
        let settings = CacheSettings {
            default_ttl_secs: 0,
            max_entries: 0,
        };
        let mut cache = ResponseCache::from_settings(&settings);

        cache.set("k", json!("v"));
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_purge_expired_sweep() {
        let mut cache = cache();

        cache.set_with_ttl("a", json!(1), Duration::from_millis(20));
        cache.set_with_ttl("b", json!(2), Duration::from_millis(20));
        cache.set_with_ttl("c", json!(3), Duration::from_secs(60));
        sleep(Duration::from_millis(50));

        assert_eq!(cache.purge_expired(), 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains("c"));
    }

    // ============== Prefix Invalidation ==============

    #[test]
    fn test_clear_prefix_removes_exactly_prefixed() {
        let mut cache = cache();

        cache.set("patients_1", json!(1));
        cache.set("patients_2", json!(2));
        cache.set("appointments_1", json!(3));

        assert_eq!(cache.clear_prefix("patients_"), 2);
        assert_eq!(cache.get("patients_1"), None);
        assert_eq!(cache.get("patients_2"), None);
        assert_eq!(cache.get("appointments_1"), Some(&json!(3)));
    }

    #[test]
    fn test_clear_prefix_no_match() {
        let mut cache = cache();
        cache.set("k", json!(1));

        assert_eq!(cache.clear_prefix("zzz"), 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_prefix_empty_prefix_matches_all() {
        let mut cache = cache();
        cache.set("a", json!(1));
        cache.set("b", json!(2));

        assert_eq!(cache.clear_prefix(""), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_all() {
        let mut cache = cache();

        cache.set("a", json!(1));
        cache.set("b", json!(2));
        cache.clear_all();

        assert!(cache.is_empty());
        assert_eq!(cache.get("a"), None);
    }

    // ============== LRU Bound ==============

    #[test]
    fn test_eviction_at_capacity() {
        let mut cache = ResponseCache::new(Duration::from_secs(60), 2);

        cache.set("a", json!(1));
        cache.set("b", json!(2));
        // Touch 'a' so 'b' becomes least recently used
        assert!(cache.get("a").is_some());

        cache.set("c", json!(3));

        assert_eq!(cache.len(), 2);
        assert!(cache.contains("a"));
        assert!(cache.contains("c"));
        assert!(!cache.contains("b"));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_overwrite_does_not_evict() {
        let mut cache = ResponseCache::new(Duration::from_secs(60), 2);

        cache.set("a", json!(1));
        cache.set("b", json!(2));
        cache.set("a", json!(10));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_unbounded_when_capacity_zero() {
        let mut cache = ResponseCache::new(Duration::from_secs(60), 0);

        for i in 0..1000 {
            cache.set(format!("k{}", i), json!(i));
        }

        assert_eq!(cache.len(), 1000);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_eviction_order_follows_insertion_when_untouched() {
        let mut cache = ResponseCache::new(Duration::from_secs(60), 3);

        cache.set("a", json!(1));
        cache.set("b", json!(2));
        cache.set("c", json!(3));
        cache.set("d", json!(4));

        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("d"));
    }

    // ============== Statistics ==============

    #[test]
    fn test_hit_and_miss_counters() {
        let mut cache = cache();

        let _ = cache.get("absent");
        cache.set("k", json!(1));
        let _ = cache.get("k");
        let _ = cache.get("k");

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn test_expired_read_counts_as_miss() {
        let mut cache = cache();

        cache.set_with_ttl("k", json!(1), Duration::from_millis(20));
        sleep(Duration::from_millis(50));
        let _ = cache.get("k");

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.expirations, 1);
    }

    // ============== Typed Reads ==============

    #[test]
    fn test_get_as_decodes_stored_value() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Patient {
            name: String,
        }

        let mut cache = cache();
        cache.set("patient_7", json!({"name": "Grace"}));

        let patient: Option<Patient> = cache.get_as("patient_7");
        assert_eq!(
            patient,
            Some(Patient {
                name: "Grace".to_string()
            })
        );
    }

    #[test]
    fn test_get_as_type_mismatch_is_miss() {
        let mut cache = cache();
        cache.set("k", json!("not a number"));

        let decoded: Option<u64> = cache.get_as("k");
        assert_eq!(decoded, None);
    }
}
