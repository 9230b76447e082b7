//! # Wire Protocol
//!
//! Selector-based acknowledgement and capability discovery, as spoken by
//! the economy ledger.
//!
//! The deposit protocol is callback-shaped: when tokens move into the
//! bridge, the ledger invokes the bridge's receive hook and only finalizes
//! the transfer if the hook returns the exact acknowledgement selector.
//! Returning anything else - or failing - is a rejection, and the ledger
//! rolls the transfer back.

use alloy_primitives::{fixed_bytes, keccak256, FixedBytes};

use crate::ids::ParcelKey;

/// Signature the single-item acknowledgement selector is derived from.
pub const RESOURCE_RECEIVED_SIGNATURE: &str =
    "onResourceReceived(address,address,uint256,uint256,bytes)";

/// Signature the batch acknowledgement selector is derived from.
pub const BATCH_RECEIVED_SIGNATURE: &str =
    "onBatchReceived(address,address,uint256[],uint256[],bytes)";

/// Signature the multi-token capability id is derived from.
pub const MULTI_TOKEN_SIGNATURE: &str = "multiToken(address,uint256)";

/// Acknowledgement a receiver must return to finalize a single-item
/// deposit.
///
/// Hardcoded; `tests` assert it matches `selector(RESOURCE_RECEIVED_SIGNATURE)`.
pub const RESOURCE_RECEIVED_ACK: FixedBytes<4> = fixed_bytes!("8e9c5cc5");

/// Acknowledgement a receiver would return to finalize a batch deposit.
///
/// Declared for protocol completeness. The bridge never returns it:
/// batch deposits are rejected outright.
pub const BATCH_RECEIVED_ACK: FixedBytes<4> = fixed_bytes!("092cd379");

/// Capability id a conforming multi-token ledger answers `true` for.
///
/// The bridge checks this once at construction time and refuses to be
/// built against a ledger that does not implement the interface.
pub const MULTI_TOKEN_INTERFACE_ID: FixedBytes<4> = fixed_bytes!("f5b828dc");

/// Computes the four-byte selector of a function signature.
#[must_use]
pub fn selector(signature: &str) -> FixedBytes<4> {
    let hash = keccak256(signature.as_bytes());
    FixedBytes::<4>::from_slice(&hash[..4])
}

/// Parses deposit accompanying data as a parcel key.
///
/// The data is a parcel key iff it is exactly 32 bytes. Anything else is
/// malformed and must be treated as a hard failure by the caller, never
/// silently ignored.
#[must_use]
pub fn parse_parcel_key(data: &[u8]) -> Option<ParcelKey> {
    if data.len() == 32 {
        Some(ParcelKey::from_slice(data))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::NO_PARCEL_KEY;

    #[test]
    fn test_ack_selectors_match_signatures() {
        assert_eq!(RESOURCE_RECEIVED_ACK, selector(RESOURCE_RECEIVED_SIGNATURE));
        assert_eq!(BATCH_RECEIVED_ACK, selector(BATCH_RECEIVED_SIGNATURE));
        assert_eq!(MULTI_TOKEN_INTERFACE_ID, selector(MULTI_TOKEN_SIGNATURE));
    }

    #[test]
    fn test_selectors_are_distinct() {
        assert_ne!(RESOURCE_RECEIVED_ACK, BATCH_RECEIVED_ACK);
        assert_ne!(RESOURCE_RECEIVED_ACK, MULTI_TOKEN_INTERFACE_ID);
    }

    #[test]
    fn test_parcel_key_parsing() {
        let key = [7u8; 32];
        let parsed = parse_parcel_key(&key).unwrap();
        assert_eq!(parsed.as_slice(), &key);

        assert!(parse_parcel_key(&[]).is_none());
        assert!(parse_parcel_key(&[7u8; 31]).is_none());
        assert!(parse_parcel_key(&[7u8; 33]).is_none());
    }

    #[test]
    fn test_sentinel_is_parseable() {
        let parsed = parse_parcel_key(NO_PARCEL_KEY.as_slice()).unwrap();
        assert_eq!(parsed, NO_PARCEL_KEY);
    }
}
