//! # Bridge Constants
//!
//! Reserved values baked into the deposit protocol.
//!
//! **CRITICAL:** These values are part of the wire contract between the
//! economy ledger and the bridge. Changes break every depositor.

use alloy_primitives::B256;

use crate::ids::ParcelKey;

/// The reserved "no-parcel" key.
///
/// A deposit whose accompanying data carries this key bypasses parcel
/// bookkeeping entirely: the tokens top up the bridge's holdings and no
/// redeemable parcel is recorded. It must never appear in the parcel
/// ledger.
///
/// The zero hash is the one value no honest depositor can produce as the
/// image of a redemption secret by accident.
pub const NO_PARCEL_KEY: ParcelKey = B256::ZERO;

/// Default buffer size for the bridge event channel.
pub const DEFAULT_EVENT_BUFFER: usize = 1024;
