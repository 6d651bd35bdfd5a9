//! Per-pool statistics lifecycle
//!
//! The owning pool calls [`PoolStats::init`] once at create time and
//! [`PoolStats::destroy`] once at teardown. Destroy removes the exported
//! endpoint before draining, so no new read session can start while
//! records are being freed.

use crate::reads::{ReadHistoryStat, stat_path};
use crate::registry::{Result, StatRegistry};
use readhist_core::{HistoryPolicy, PoolIdent, Recorder};
use std::sync::Arc;
use tracing::{info, warn};

/// A pool's installed statistics: the read-history recorder and its
/// registered stat endpoint
pub struct PoolStats {
    pool: PoolIdent,
    recorder: Arc<Recorder>,
    registry: Arc<StatRegistry>,
    reads_path: String,
}

impl PoolStats {
    /// Create the pool's recorder and register its stat endpoint
    pub fn init(
        pool: PoolIdent,
        policy: Arc<HistoryPolicy>,
        registry: Arc<StatRegistry>,
    ) -> Result<Self> {
        let recorder = Recorder::init(pool.clone(), policy);
        let reads_path = stat_path(&pool);
        let stat = Arc::new(ReadHistoryStat::new(Arc::clone(&recorder)));
        registry.register(reads_path.clone(), stat)?;
        info!(pool = %pool, path = %reads_path, "pool statistics installed");
        Ok(Self {
            pool,
            recorder,
            registry,
            reads_path,
        })
    }

    /// The pool's read recorder, for the read path to record against
    pub fn recorder(&self) -> &Arc<Recorder> {
        &self.recorder
    }

    /// Path of the read-history stat endpoint
    pub fn reads_path(&self) -> &str {
        &self.reads_path
    }

    /// Unregister the endpoint, then drain the history
    pub fn destroy(self) {
        if self.registry.unregister(&self.reads_path).is_err() {
            warn!(pool = %self.pool, path = %self.reads_path, "stat endpoint was already removed");
        }
        self.recorder.destroy();
        info!(pool = %self.pool, "pool statistics removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readhist_core::{ReadEvent, ReadFlags};

    fn read_event(object: u64) -> ReadEvent<'static> {
        ReadEvent {
            objset: 1,
            object,
            level: 0,
            blkid: object,
            origin: "pool_test",
            flags: ReadFlags::NONE,
        }
    }

    #[test]
    fn test_init_registers_endpoint() {
        let registry = Arc::new(StatRegistry::new());
        let policy = Arc::new(HistoryPolicy::new(8, false));
        let stats =
            PoolStats::init(PoolIdent::new("tank"), policy, Arc::clone(&registry)).unwrap();

        assert_eq!(stats.reads_path(), "pool/tank/reads");
        assert!(registry.contains("pool/tank/reads"));
    }

    #[test]
    fn test_rendered_table_reflects_recorded_reads() {
        let registry = Arc::new(StatRegistry::new());
        let policy = Arc::new(HistoryPolicy::new(8, false));
        let stats =
            PoolStats::init(PoolIdent::new("tank"), policy, Arc::clone(&registry)).unwrap();

        stats.recorder().record(&read_event(5));
        stats.recorder().record(&read_event(6));

        let table = registry.read_to_string("pool/tank/reads").unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("UID"));

        // write-to-clear through the registry
        registry.write("pool/tank/reads").unwrap();
        assert_eq!(registry.entry_count("pool/tank/reads").unwrap(), 0);
        assert!(stats.recorder().is_empty());
    }

    #[test]
    fn test_destroy_unregisters_and_drains() {
        let registry = Arc::new(StatRegistry::new());
        let policy = Arc::new(HistoryPolicy::new(8, false));
        let stats =
            PoolStats::init(PoolIdent::new("tank"), policy, Arc::clone(&registry)).unwrap();

        stats.recorder().record(&read_event(5));
        let recorder = Arc::clone(stats.recorder());
        stats.destroy();

        assert!(!registry.contains("pool/tank/reads"));
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_destroy_with_empty_history() {
        let registry = Arc::new(StatRegistry::new());
        let policy = Arc::new(HistoryPolicy::disabled());
        let stats =
            PoolStats::init(PoolIdent::new("tank"), policy, Arc::clone(&registry)).unwrap();
        stats.destroy();
        assert!(!registry.contains("pool/tank/reads"));
    }

    #[test]
    fn test_two_pools_export_independently() {
        let registry = Arc::new(StatRegistry::new());
        let policy = Arc::new(HistoryPolicy::new(8, false));
        let tank = PoolStats::init(
            PoolIdent::new("tank"),
            Arc::clone(&policy),
            Arc::clone(&registry),
        )
        .unwrap();
        let dozer = PoolStats::init(
            PoolIdent::new("dozer"),
            Arc::clone(&policy),
            Arc::clone(&registry),
        )
        .unwrap();

        tank.recorder().record(&read_event(1));

        assert_eq!(registry.entry_count("pool/tank/reads").unwrap(), 1);
        assert_eq!(registry.entry_count("pool/dozer/reads").unwrap(), 0);
        assert_eq!(
            registry.paths(),
            vec!["pool/dozer/reads", "pool/tank/reads"]
        );
        drop(dozer);
    }
}
