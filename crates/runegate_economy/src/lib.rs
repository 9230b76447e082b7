//! # RUNEGATE Economy
//!
//! The economy side of the bridge: a fungible multi-token ledger and the
//! access-control layer, consumed by the bridge core as capability traits.
//!
//! The real economy lives on-chain; this crate carries the capability
//! traits the bridge is written against plus an in-memory ledger that
//! honors the same deposit protocol, so the whole system can be exercised
//! end-to-end without a node.
//!
//! ## Deposit Protocol
//!
//! ```text
//! ┌─────────────┐  safe_transfer_from   ┌─────────────────┐
//! │  Depositor  │ ────────────────────▶ │  MultiToken     │
//! └─────────────┘                       │  Ledger         │
//!                                       └────────┬────────┘
//!                                                │ on_resource_received
//!                                                ▼
//!                                       ┌─────────────────┐
//!                                       │  Bridge         │ ─▶ ack or reject
//!                                       │  (Receiver)     │
//!                                       └─────────────────┘
//! ```
//!
//! The callback is synchronous and inline: the transfer and the receiver's
//! decision are one atomic step. A rejected callback rolls the balances
//! back before the ledger returns.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod access;
pub mod contracts;
pub mod error;
pub mod ledger;

pub use access::{Authorizer, SingleOwner};
pub use error::{AccessError, LedgerError, LedgerResult, TransferError};
pub use ledger::{InMemoryLedger, MultiTokenLedger, ResourceReceiver};
