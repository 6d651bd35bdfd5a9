//! Sampling policy
//!
//! Two process-wide knobs gate what gets recorded: the retention capacity
//! (0 disables history entirely) and whether cache hits are included. Both
//! are settable at runtime and read by every `record` call, so a change
//! takes effect on the very next event. Reads are relaxed; an in-flight
//! recording racing a policy update may see the old value, which is
//! acceptable for a best-effort diagnostic facility.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Live sampling policy, shared by reference between the embedding
/// application and every recorder it owns
#[derive(Debug)]
pub struct HistoryPolicy {
    /// Maximum retained entries; 0 disables retention
    capacity: AtomicUsize,
    /// Whether reads served from cache are recorded
    include_cache_hits: AtomicBool,
}

impl HistoryPolicy {
    /// Policy with explicit initial values
    #[must_use]
    pub fn new(capacity: usize, include_cache_hits: bool) -> Self {
        Self {
            capacity: AtomicUsize::new(capacity),
            include_cache_hits: AtomicBool::new(include_cache_hits),
        }
    }

    /// Disabled policy: no retention, cache hits excluded
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(0, false)
    }

    /// Seed a policy from a config section
    #[must_use]
    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(config.capacity, config.include_cache_hits)
    }

    /// Current retention capacity
    pub fn capacity(&self) -> usize {
        self.capacity.load(Ordering::Relaxed)
    }

    /// Set the retention capacity; applies on the next recorded event
    pub fn set_capacity(&self, capacity: usize) {
        self.capacity.store(capacity, Ordering::Relaxed);
    }

    /// Whether cache hits are currently recorded
    pub fn include_cache_hits(&self) -> bool {
        self.include_cache_hits.load(Ordering::Relaxed)
    }

    pub fn set_include_cache_hits(&self, include: bool) {
        self.include_cache_hits.store(include, Ordering::Relaxed);
    }
}

impl Default for HistoryPolicy {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Read-history configuration section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum retained entries per pool (0 disables history)
    #[serde(default)]
    pub capacity: usize,
    /// Record reads served from cache
    #[serde(default)]
    pub include_cache_hits: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 0,
            include_cache_hits: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_disabled() {
        let policy = HistoryPolicy::default();
        assert_eq!(policy.capacity(), 0);
        assert!(!policy.include_cache_hits());
    }

    #[test]
    fn test_live_updates_visible() {
        let policy = HistoryPolicy::disabled();
        policy.set_capacity(128);
        policy.set_include_cache_hits(true);
        assert_eq!(policy.capacity(), 128);
        assert!(policy.include_cache_hits());
    }

    #[test]
    fn test_policy_from_config() {
        let config = HistoryConfig {
            capacity: 64,
            include_cache_hits: true,
        };
        let policy = HistoryPolicy::from_config(&config);
        assert_eq!(policy.capacity(), 64);
        assert!(policy.include_cache_hits());
    }

    #[test]
    fn test_config_defaults_from_empty_section() {
        let config: HistoryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.capacity, 0);
        assert!(!config.include_cache_hits);
    }
}
