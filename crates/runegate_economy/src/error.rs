//! # Economy Error Types
//!
//! All errors that can occur on the economy side of the bridge.

use alloy_primitives::{Address, FixedBytes};
use thiserror::Error;

use runegate_shared::{RawAmount, ResourceId};

/// Errors raised by a multi-token ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A transfer asked for more than the owner holds.
    #[error("insufficient balance: {owner} holds {available} of resource {resource_id}, transfer needs {required}")]
    InsufficientBalance {
        /// The account being debited.
        owner: Address,
        /// The resource being moved.
        resource_id: ResourceId,
        /// The amount the transfer asked for.
        required: RawAmount,
        /// The amount actually held.
        available: RawAmount,
    },

    /// A credit would overflow the balance range.
    #[error("balance overflow crediting {owner} with resource {resource_id}")]
    BalanceOverflow {
        /// The account being credited.
        owner: Address,
        /// The resource being credited.
        resource_id: ResourceId,
    },

    /// A batch transfer's id and amount vectors disagree in length.
    #[error("batch length mismatch: {ids} ids, {amounts} amounts")]
    LengthMismatch {
        /// Number of resource ids supplied.
        ids: usize,
        /// Number of amounts supplied.
        amounts: usize,
    },

    /// The receiver returned something other than the required
    /// acknowledgement selector.
    #[error("receiver returned unexpected acknowledgement {ack}")]
    UnexpectedAck {
        /// The value the receiver actually returned.
        ack: FixedBytes<4>,
    },
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors raised by the access-control layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The caller is not the privileged principal.
    #[error("caller {caller} is not the owner")]
    NotOwner {
        /// The rejected caller.
        caller: Address,
    },
}

/// Failure of a receiver-notifying transfer.
///
/// Keeps the receiver's own error kind distinguishable from ledger-side
/// failures, so callers can tell "not enough balance" from "the bridge
/// refused the deposit" without string matching.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError<E: std::error::Error> {
    /// The ledger itself refused the transfer.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The receiver rejected the notification; the transfer was rolled
    /// back.
    #[error("receiver rejected transfer: {0}")]
    Receiver(E),
}
