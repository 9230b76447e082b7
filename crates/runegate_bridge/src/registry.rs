//! # Resource Type Registry
//!
//! Maps a resource id to its bridging configuration and lifecycle status.
//!
//! Entries are never deleted: historical parcels must stay resolvable
//! against the resource id they were minted against even after removal,
//! so "removed" and "never defined" are distinguishable forever.

use std::collections::HashMap;

use runegate_shared::{RawAmount, ResourceId};

use crate::error::{BridgeError, BridgeResult};

/// Bridging configuration and lifecycle status of one resource id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResourceType {
    /// True once the resource id has ever been defined.
    pub created: bool,
    /// True while the resource id is bridgeable.
    pub active: bool,
    /// Raw ledger amount per one bridge unit. Never zero while `created`.
    pub amount_per_unit: RawAmount,
}

impl ResourceType {
    /// The state of a never-defined resource id.
    pub const ZERO: Self = Self {
        created: false,
        active: false,
        amount_per_unit: RawAmount::ZERO,
    };
}

/// Registry of bridgeable resource types.
#[derive(Debug, Default)]
pub struct ResourceTypeRegistry {
    /// Entries keyed by resource id. Insert-only.
    entries: HashMap<ResourceId, ResourceType>,
}

impl ResourceTypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines (or redefines) a resource type.
    ///
    /// Upserts the entry to (created, active, `amount_per_unit`):
    /// a removed resource comes back active, a live one changes rate.
    pub(crate) fn define(
        &mut self,
        resource_id: ResourceId,
        amount_per_unit: RawAmount,
    ) -> BridgeResult<()> {
        if amount_per_unit.is_zero() {
            return Err(BridgeError::InvalidConfig);
        }
        self.entries.insert(
            resource_id,
            ResourceType {
                created: true,
                active: true,
                amount_per_unit,
            },
        );
        Ok(())
    }

    /// Deactivates a resource type, leaving `created` and the rate
    /// untouched.
    pub(crate) fn remove(&mut self, resource_id: ResourceId) -> BridgeResult<()> {
        match self.entries.get_mut(&resource_id) {
            Some(entry) => {
                entry.active = false;
                Ok(())
            }
            None => Err(BridgeError::NotFound { resource_id }),
        }
    }

    /// Looks up a resource type. Total: never-defined ids read as
    /// [`ResourceType::ZERO`].
    #[must_use]
    pub fn lookup(&self, resource_id: ResourceId) -> ResourceType {
        self.entries
            .get(&resource_id)
            .copied()
            .unwrap_or(ResourceType::ZERO)
    }

    /// Number of resource ids ever defined.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no resource id was ever defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
