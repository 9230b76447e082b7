//! # Identifier Types
//!
//! Aliases over `alloy_primitives` so the rest of the workspace speaks the
//! bridge's vocabulary instead of raw integer widths.

use alloy_primitives::{B256, U256};

/// Identifier of a bridgeable resource type on the economy ledger.
pub type ResourceId = U256;

/// Amount expressed in raw ledger denomination.
pub type RawAmount = U256;

/// Amount expressed in bridge units (`raw = units * amount_per_unit`).
pub type Units = U256;

/// Depositor-supplied parcel commitment, typically the hash of a
/// redemption secret.
pub type ParcelKey = B256;
