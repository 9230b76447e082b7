//! # Bridge Error Types
//!
//! Every precondition violation aborts the whole operation with no partial
//! state change and surfaces here with a distinguishable kind. Nothing is
//! retried internally; retry is the caller's business, after correcting
//! the violated precondition.

use alloy_primitives::Address;
use thiserror::Error;

use runegate_economy::{AccessError, LedgerError};
use runegate_shared::{ParcelKey, RawAmount, ResourceId, Units};

/// Errors that can occur in the bridge core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The caller is not the recognized administrator.
    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AccessError),

    /// The bridge has been terminated; registry changes and inbound
    /// deposits are permanently closed.
    #[error("bridge is terminated")]
    AlreadyTerminated,

    /// A resource type cannot be defined with a zero exchange rate.
    #[error("invalid resource config: amount per unit must be nonzero")]
    InvalidConfig,

    /// The resource type was never defined.
    #[error("resource type {resource_id} was never defined")]
    NotFound {
        /// The unknown resource id.
        resource_id: ResourceId,
    },

    /// The resource type is not currently bridgeable (never defined, or
    /// removed).
    #[error("resource type {resource_id} is not defined for bridging")]
    ResourceNotDefined {
        /// The resource id the deposit referenced.
        resource_id: ResourceId,
    },

    /// The parcel key has already been registered.
    #[error("parcel {key} is already registered")]
    DuplicateParcel {
        /// The reused key.
        key: ParcelKey,
    },

    /// The deposit is not an exact multiple of the exchange rate; taking
    /// it would silently truncate the remainder.
    #[error("deposit of {raw_amount} is not a multiple of {amount_per_unit}")]
    InvalidAmount {
        /// The raw amount deposited.
        raw_amount: RawAmount,
        /// The exchange rate it must divide by.
        amount_per_unit: RawAmount,
    },

    /// An outbound transfer of zero units was requested.
    #[error("outbound transfer of zero units")]
    ZeroAmount,

    /// A deposit notification arrived from something other than the
    /// configured economy ledger.
    #[error("deposit notification from unrecognized caller {caller}")]
    InvalidSender {
        /// The rejected caller.
        caller: Address,
    },

    /// A batch deposit was attempted. The protocol only supports
    /// single-item deposits.
    #[error("batch deposits are not supported")]
    BatchNotSupported,

    /// Deposit accompanying data did not parse as a parcel key.
    #[error("accompanying data is not a parcel key: {len} bytes")]
    MalformedParcelKey {
        /// Length of the malformed data.
        len: usize,
    },

    /// `units * amount_per_unit` overflowed the raw amount range.
    #[error("unit amount overflows the raw amount range for {units} units")]
    AmountOverflow {
        /// The requested unit count.
        units: Units,
    },

    /// The configured ledger failed capability discovery at construction.
    #[error("configured economy does not implement the multi-token interface")]
    InvalidEconomy,

    /// The ledger refused an outbound transfer.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
