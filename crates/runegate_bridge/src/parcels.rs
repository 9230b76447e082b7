//! # Parcel Ledger
//!
//! Records inbound deposits as uniquely keyed parcels awaiting redemption.
//!
//! A parcel key is a depositor-supplied commitment (typically the hash of
//! a redemption secret). A key transitions from absent to created exactly
//! once; it is never overwritten and never deleted.

use std::collections::HashMap;

use runegate_shared::{ParcelKey, RawAmount, ResourceId, Units, NO_PARCEL_KEY};

use crate::error::{BridgeError, BridgeResult};
use crate::registry::ResourceType;

/// One registered inbound deposit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Parcel {
    /// True once the key has been registered.
    pub created: bool,
    /// The resource type the deposit referenced.
    pub resource_id: ResourceId,
    /// Value exchanged, in bridge units (not raw ledger amount).
    pub units: Units,
}

impl Parcel {
    /// The state of a never-registered parcel key.
    pub const ZERO: Self = Self {
        created: false,
        resource_id: ResourceId::ZERO,
        units: Units::ZERO,
    };
}

/// Ledger of registered parcels.
#[derive(Debug, Default)]
pub struct ParcelLedger {
    /// Parcels keyed by commitment. Insert-only.
    parcels: HashMap<ParcelKey, Parcel>,
}

impl ParcelLedger {
    /// Creates an empty parcel ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a deposit under `key`, converting `raw_amount` into
    /// bridge units.
    ///
    /// Called only through the controller's deposit path, which routes
    /// the sentinel key away before this point. Preconditions, in order:
    /// the resource type must be active, the key must be fresh, and the
    /// raw amount must divide exactly by the rate - an inexact deposit is
    /// rejected whole rather than silently truncated.
    pub(crate) fn register(
        &mut self,
        resource_id: ResourceId,
        resource: ResourceType,
        raw_amount: RawAmount,
        key: ParcelKey,
    ) -> BridgeResult<Units> {
        debug_assert_ne!(key, NO_PARCEL_KEY);

        if !resource.active {
            return Err(BridgeError::ResourceNotDefined { resource_id });
        }
        if self.parcels.contains_key(&key) {
            return Err(BridgeError::DuplicateParcel { key });
        }
        // Invariant: active implies created implies a nonzero rate.
        debug_assert!(!resource.amount_per_unit.is_zero());
        if !(raw_amount % resource.amount_per_unit).is_zero() {
            return Err(BridgeError::InvalidAmount {
                raw_amount,
                amount_per_unit: resource.amount_per_unit,
            });
        }

        let units = raw_amount / resource.amount_per_unit;
        self.parcels.insert(
            key,
            Parcel {
                created: true,
                resource_id,
                units,
            },
        );
        Ok(units)
    }

    /// Looks up a parcel. Total: never-registered keys read as
    /// [`Parcel::ZERO`].
    #[must_use]
    pub fn lookup(&self, key: ParcelKey) -> Parcel {
        self.parcels.get(&key).copied().unwrap_or(Parcel::ZERO)
    }

    /// Number of registered parcels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parcels.len()
    }

    /// True if no parcel was ever registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parcels.is_empty()
    }
}
