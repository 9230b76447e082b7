//! # RUNEGATE Shared
//!
//! Common types used by both the bridge core and the economy ledger.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on the bridge or the economy crates.
//! It is the bottom of the dependency graph: ids, reserved keys, and the
//! wire-level selector protocol, nothing else.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod constants;
pub mod ids;
pub mod protocol;

pub use constants::{DEFAULT_EVENT_BUFFER, NO_PARCEL_KEY};
pub use ids::{ParcelKey, RawAmount, ResourceId, Units};
pub use protocol::{
    parse_parcel_key, selector, BATCH_RECEIVED_ACK, MULTI_TOKEN_INTERFACE_ID,
    RESOURCE_RECEIVED_ACK,
};
