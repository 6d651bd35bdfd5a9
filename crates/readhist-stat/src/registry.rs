//! Stat registry
//!
//! Process-wide map from stat path to raw source. Pools install their
//! exported tables here at create time and remove them at teardown; the
//! transport resolves a path and drives the source protocol. Render
//! sessions run against a clone of the source handle, so the registry lock
//! is never held while a source's own lock is.

use crate::raw::RawStatSource;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, StatError>;

/// Registry failure modes
#[derive(Debug, Error)]
pub enum StatError {
    #[error("stat source already registered: {0}")]
    AlreadyRegistered(String),

    #[error("stat source not found: {0}")]
    NotFound(String),
}

/// Named collection of exported stat tables
#[derive(Default)]
pub struct StatRegistry {
    sources: RwLock<HashMap<String, Arc<dyn RawStatSource>>>,
}

impl StatRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a source under `path`
    pub fn register(&self, path: impl Into<String>, source: Arc<dyn RawStatSource>) -> Result<()> {
        let path = path.into();
        let mut sources = self.sources.write();
        if sources.contains_key(&path) {
            return Err(StatError::AlreadyRegistered(path));
        }
        debug!(%path, "stat source registered");
        sources.insert(path, source);
        Ok(())
    }

    /// Remove the source under `path`
    pub fn unregister(&self, path: &str) -> Result<()> {
        let removed = self.sources.write().remove(path);
        match removed {
            Some(_) => {
                debug!(%path, "stat source unregistered");
                Ok(())
            }
            None => Err(StatError::NotFound(path.to_owned())),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.sources.read().contains_key(path)
    }

    /// Registered paths, sorted
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.sources.read().keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Render the full table at `path`: header plus all rows, newest first
    pub fn read_to_string(&self, path: &str) -> Result<String> {
        let source = self.lookup(path)?;
        let mut out = source.headers();
        source.for_each_row(&mut |row| out.push_str(row));
        Ok(out)
    }

    /// Write request against `path`: discard its buffered entries
    pub fn write(&self, path: &str) -> Result<()> {
        let source = self.lookup(path)?;
        source.reset();
        Ok(())
    }

    /// Current entry count reported by the source at `path`
    pub fn entry_count(&self, path: &str) -> Result<usize> {
        Ok(self.lookup(path)?.entry_count())
    }

    /// Current payload byte size reported by the source at `path`
    pub fn byte_size(&self, path: &str) -> Result<usize> {
        Ok(self.lookup(path)?.byte_size())
    }

    fn lookup(&self, path: &str) -> Result<Arc<dyn RawStatSource>> {
        self.sources
            .read()
            .get(path)
            .cloned()
            .ok_or_else(|| StatError::NotFound(path.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource;

    impl RawStatSource for FixedSource {
        fn headers(&self) -> String {
            "col\n".to_owned()
        }

        fn for_each_row(&self, emit: &mut dyn FnMut(&str)) {
            emit("a\n");
            emit("b\n");
        }

        fn reset(&self) {}

        fn entry_count(&self) -> usize {
            2
        }

        fn byte_size(&self) -> usize {
            4
        }
    }

    #[test]
    fn test_register_and_read() {
        let registry = StatRegistry::new();
        registry.register("pool/tank/reads", Arc::new(FixedSource)).unwrap();
        assert!(registry.contains("pool/tank/reads"));
        assert_eq!(
            registry.read_to_string("pool/tank/reads").unwrap(),
            "col\na\nb\n"
        );
        assert_eq!(registry.entry_count("pool/tank/reads").unwrap(), 2);
        assert_eq!(registry.byte_size("pool/tank/reads").unwrap(), 4);
    }

    #[test]
    fn test_duplicate_register_rejected() {
        let registry = StatRegistry::new();
        registry.register("pool/tank/reads", Arc::new(FixedSource)).unwrap();
        let err = registry
            .register("pool/tank/reads", Arc::new(FixedSource))
            .unwrap_err();
        assert!(matches!(err, StatError::AlreadyRegistered(_)));
    }

    #[test]
    fn test_unregister_then_not_found() {
        let registry = StatRegistry::new();
        registry.register("pool/tank/reads", Arc::new(FixedSource)).unwrap();
        registry.unregister("pool/tank/reads").unwrap();
        assert!(!registry.contains("pool/tank/reads"));
        assert!(matches!(
            registry.read_to_string("pool/tank/reads"),
            Err(StatError::NotFound(_))
        ));
        assert!(matches!(
            registry.unregister("pool/tank/reads"),
            Err(StatError::NotFound(_))
        ));
    }

    #[test]
    fn test_paths_sorted() {
        let registry = StatRegistry::new();
        registry.register("pool/b/reads", Arc::new(FixedSource)).unwrap();
        registry.register("pool/a/reads", Arc::new(FixedSource)).unwrap();
        assert_eq!(registry.paths(), vec!["pool/a/reads", "pool/b/reads"]);
    }
}
