//! Pool identity
//!
//! A recorder is owned by exactly one storage pool; the identity here is
//! what shows up in stat paths and log context.

use derive_more::{From, Into};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a storage pool
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, From, Into)]
pub struct PoolId(Uuid);

impl PoolId {
    /// Generate a new random pool ID
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from existing UUID
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PoolId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PoolId({})", self.0)
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pool identity: id plus the human-readable name used in stat paths
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolIdent {
    pub id: PoolId,
    pub name: String,
}

impl PoolIdent {
    /// New identity with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PoolId::new(),
            name: name.into(),
        }
    }

    /// New identity with a known id
    pub fn with_id(id: PoolId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for PoolIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_id_unique() {
        assert_ne!(PoolId::new(), PoolId::new());
    }

    #[test]
    fn test_pool_ident_display_is_name() {
        let pool = PoolIdent::new("tank");
        assert_eq!(pool.to_string(), "tank");
    }

    #[test]
    fn test_pool_id_uuid_roundtrip() {
        let id = PoolId::new();
        assert_eq!(PoolId::from_uuid(id.as_uuid()), id);
    }
}
