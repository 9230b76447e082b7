//! # RUNEGATE Bridge Core
//!
//! Two-way resource bridge between the multi-token economy ledger and the
//! game world.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐  deposit callback  ┌──────────────────┐
//! │  MultiToken     │ ─────────────────▶ │ BridgeController │
//! │  Ledger         │ ◀───────────────── │  ┌─────────────┐ │
//! └─────────────────┘  outbound transfer │  │  Registry   │ │
//!         ▲                              │  ├─────────────┤ │
//!         │ send_units / send_tokens     │  │  Parcels    │ │
//!   ┌───────────┐        define/remove   │  ├─────────────┤ │
//!   │   Admin   │ ─────────────────────▶ │  │ terminated  │ │
//!   └───────────┘        terminate       │  └─────────────┘ │
//!                                        └──────────────────┘
//! ```
//!
//! ## Correctness Requirements
//!
//! - A parcel key registers exactly once, ever
//! - Deposits that don't divide exactly by the exchange rate are rejected
//!   whole, never truncated
//! - Termination is one-way and closes definitions and deposits, but
//!   never outbound payouts

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod parcels;
pub mod registry;

pub use config::{BridgeConfig, ConfigError};
pub use controller::{BridgeController, BridgeStats, SharedBridge};
pub use error::{BridgeError, BridgeResult};
pub use events::{BridgeEvent, EventSink};
pub use parcels::{Parcel, ParcelLedger};
pub use registry::{ResourceType, ResourceTypeRegistry};
