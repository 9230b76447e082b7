//! # Bridge Flow Integration Tests
//!
//! Drives the whole deposit protocol end-to-end: real in-memory ledger,
//! real callback path, real balance rollbacks. No state is ever half
//! applied - every rejected deposit leaves both the ledger and the bridge
//! exactly as they were.

use std::sync::Arc;

use alloy_primitives::{Address, B256, U256};
use parking_lot::Mutex;

use runegate_bridge::{BridgeConfig, BridgeController, BridgeError, SharedBridge};
use runegate_economy::{InMemoryLedger, MultiTokenLedger, SingleOwner, TransferError};
use runegate_shared::NO_PARCEL_KEY;

const OWNER: Address = Address::repeat_byte(0xAD);
const BRIDGE: Address = Address::repeat_byte(0xBB);
const ECONOMY: Address = Address::repeat_byte(0xEC);
const PLAYER: Address = Address::repeat_byte(0x01);

const RATE: u64 = 0x10000;

fn setup() -> (InMemoryLedger, BridgeController) {
    let ledger = InMemoryLedger::new(ECONOMY);
    let config = BridgeConfig::default().with_address(BRIDGE);
    let bridge =
        BridgeController::new(config, Box::new(SingleOwner::new(OWNER)), &ledger).unwrap();
    (ledger, bridge)
}

/// Deposits through the real ledger callback path.
fn deposit(
    ledger: &mut InMemoryLedger,
    bridge: &mut BridgeController,
    from: Address,
    resource_id: U256,
    raw_amount: U256,
    key: B256,
) -> Result<(), TransferError<BridgeError>> {
    ledger.safe_transfer_from(
        from,
        from,
        BRIDGE,
        resource_id,
        raw_amount,
        key.as_slice(),
        bridge,
    )
}

/// Scenario A: define, deposit an exact multiple, repeat the same key.
#[test]
fn test_deposit_then_duplicate() {
    let (mut ledger, mut bridge) = setup();
    let id = U256::from(7);
    let k1 = B256::repeat_byte(1);

    bridge.define(OWNER, id, U256::from(RATE)).unwrap();
    ledger.mint(PLAYER, id, U256::from(10 * RATE)).unwrap();

    deposit(&mut ledger, &mut bridge, PLAYER, id, U256::from(3 * RATE), k1).unwrap();

    let parcel = bridge.parcel(k1);
    assert!(parcel.created);
    assert_eq!(parcel.units, U256::from(3));
    assert_eq!(parcel.resource_id, id);
    assert_eq!(ledger.balance_of(BRIDGE, id), U256::from(3 * RATE));

    // Identical second deposit: the key is burned, and the transfer is
    // rolled back whole.
    let err = deposit(&mut ledger, &mut bridge, PLAYER, id, U256::from(3 * RATE), k1)
        .unwrap_err();
    assert!(matches!(
        err,
        TransferError::Receiver(BridgeError::DuplicateParcel { .. })
    ));
    assert_eq!(ledger.balance_of(BRIDGE, id), U256::from(3 * RATE));
    assert_eq!(ledger.balance_of(PLAYER, id), U256::from(7 * RATE));
}

/// Scenario B: a deposit that does not divide by the rate is rejected
/// whole and no parcel appears.
#[test]
fn test_inexact_deposit_rejected() {
    let (mut ledger, mut bridge) = setup();
    let id = U256::from(7);
    let k2 = B256::repeat_byte(2);
    let inexact = U256::from(3 * RATE / 256);

    bridge.define(OWNER, id, U256::from(RATE)).unwrap();
    ledger.mint(PLAYER, id, U256::from(10 * RATE)).unwrap();

    let err = deposit(&mut ledger, &mut bridge, PLAYER, id, inexact, k2).unwrap_err();
    assert!(matches!(
        err,
        TransferError::Receiver(BridgeError::InvalidAmount { .. })
    ));

    assert!(!bridge.parcel(k2).created);
    assert_eq!(ledger.balance_of(PLAYER, id), U256::from(10 * RATE));
    assert_eq!(ledger.balance_of(BRIDGE, id), U256::ZERO);
}

/// Scenario C: a removed resource rejects deposits even though it stays
/// created.
#[test]
fn test_removed_resource_rejects_deposits() {
    let (mut ledger, mut bridge) = setup();
    let id = U256::from(7);

    bridge.define(OWNER, id, U256::from(RATE)).unwrap();
    bridge.remove(OWNER, id).unwrap();
    ledger.mint(PLAYER, id, U256::from(RATE)).unwrap();

    let looked = bridge.resource_type(id);
    assert!(looked.created);
    assert!(!looked.active);

    let err = deposit(
        &mut ledger,
        &mut bridge,
        PLAYER,
        id,
        U256::from(RATE),
        B256::repeat_byte(3),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        TransferError::Receiver(BridgeError::ResourceNotDefined { .. })
    ));
    assert_eq!(ledger.balance_of(PLAYER, id), U256::from(RATE));
}

/// Scenario D: termination closes definitions and deposits but not
/// payouts.
#[test]
fn test_termination_keeps_payouts_open() {
    let (mut ledger, mut bridge) = setup();
    let id = U256::from(7);

    bridge.define(OWNER, id, U256::from(RATE)).unwrap();
    ledger.mint(BRIDGE, id, U256::from(10 * RATE)).unwrap();
    ledger.mint(PLAYER, id, U256::from(RATE)).unwrap();

    bridge.terminate(OWNER).unwrap();

    assert_eq!(
        bridge.define(OWNER, U256::from(8), U256::from(RATE)),
        Err(BridgeError::AlreadyTerminated)
    );
    let err = deposit(
        &mut ledger,
        &mut bridge,
        PLAYER,
        id,
        U256::from(RATE),
        B256::repeat_byte(4),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        TransferError::Receiver(BridgeError::AlreadyTerminated)
    ));
    assert_eq!(ledger.balance_of(PLAYER, id), U256::from(RATE));

    // Redemption payout still works.
    bridge
        .send_units(OWNER, &mut ledger, PLAYER, id, U256::from(2))
        .unwrap();
    assert_eq!(ledger.balance_of(PLAYER, id), U256::from(3 * RATE));
}

/// The sentinel tops up the bridge with no parcel, repeatably, and the
/// same flow funds the bridge via a mint.
#[test]
fn test_sentinel_top_up_flow() {
    let (mut ledger, mut bridge) = setup();
    let id = U256::from(7);

    bridge.define(OWNER, id, U256::from(RATE)).unwrap();
    ledger.mint(PLAYER, id, U256::from(4 * RATE)).unwrap();

    // Twice with the same sentinel key: never DuplicateParcel.
    for _ in 0..2 {
        deposit(
            &mut ledger,
            &mut bridge,
            PLAYER,
            id,
            U256::from(2 * RATE),
            NO_PARCEL_KEY,
        )
        .unwrap();
    }

    assert!(!bridge.parcel(NO_PARCEL_KEY).created);
    assert_eq!(ledger.balance_of(BRIDGE, id), U256::from(4 * RATE));

    // Administrator funding straight from a mint works the same way,
    // even for a resource id the bridge has never seen.
    ledger
        .mint_to_receiver(
            OWNER,
            BRIDGE,
            U256::from(999),
            U256::from(5),
            NO_PARCEL_KEY.as_slice(),
            &mut bridge,
        )
        .unwrap();
    assert_eq!(ledger.balance_of(BRIDGE, U256::from(999)), U256::from(5));
}

/// A key already spent on one resource is dead for every other resource
/// and amount.
#[test]
fn test_parcel_keys_are_global() {
    let (mut ledger, mut bridge) = setup();
    let first = U256::from(7);
    let second = U256::from(8);
    let key = B256::repeat_byte(5);

    bridge.define(OWNER, first, U256::from(100)).unwrap();
    bridge.define(OWNER, second, U256::from(50)).unwrap();
    ledger.mint(PLAYER, first, U256::from(100)).unwrap();
    ledger.mint(PLAYER, second, U256::from(50)).unwrap();

    deposit(&mut ledger, &mut bridge, PLAYER, first, U256::from(100), key).unwrap();
    let err =
        deposit(&mut ledger, &mut bridge, PLAYER, second, U256::from(50), key).unwrap_err();

    assert!(matches!(
        err,
        TransferError::Receiver(BridgeError::DuplicateParcel { .. })
    ));
    // The original parcel is untouched.
    assert_eq!(bridge.parcel(key).resource_id, first);
    assert_eq!(ledger.balance_of(PLAYER, second), U256::from(50));
}

/// Batch deposits are refused at the protocol level and move nothing.
#[test]
fn test_batch_deposits_rejected_end_to_end() {
    let (mut ledger, mut bridge) = setup();
    let id = U256::from(7);

    bridge.define(OWNER, id, U256::from(100)).unwrap();
    ledger.mint(PLAYER, id, U256::from(100)).unwrap();

    let err = ledger
        .safe_batch_transfer_from(
            PLAYER,
            PLAYER,
            BRIDGE,
            &[id],
            &[U256::from(100)],
            B256::repeat_byte(6).as_slice(),
            &mut bridge,
        )
        .unwrap_err();

    assert!(matches!(
        err,
        TransferError::Receiver(BridgeError::BatchNotSupported)
    ));
    assert_eq!(ledger.balance_of(PLAYER, id), U256::from(100));
    assert_eq!(ledger.balance_of(BRIDGE, id), U256::ZERO);
}

/// A concurrent host serializes the whole controller behind one lock.
#[test]
fn test_shared_bridge_serializes_access() {
    let (_, bridge) = setup();
    let shared: SharedBridge = Arc::new(Mutex::new(bridge));

    let handle = {
        let shared = Arc::clone(&shared);
        std::thread::spawn(move || {
            shared
                .lock()
                .define(OWNER, U256::from(1), U256::from(100))
        })
    };
    handle.join().unwrap().unwrap();

    assert!(shared.lock().resource_type(U256::from(1)).active);
}

/// Redefinition while parcels exist: old parcels keep their units, new
/// deposits convert at the new rate.
#[test]
fn test_redefinition_changes_rate_for_new_deposits_only() {
    let (mut ledger, mut bridge) = setup();
    let id = U256::from(7);
    let k_old = B256::repeat_byte(7);
    let k_new = B256::repeat_byte(8);

    bridge.define(OWNER, id, U256::from(100)).unwrap();
    ledger.mint(PLAYER, id, U256::from(1000)).unwrap();
    deposit(&mut ledger, &mut bridge, PLAYER, id, U256::from(400), k_old).unwrap();
    assert_eq!(bridge.parcel(k_old).units, U256::from(4));

    bridge.define(OWNER, id, U256::from(200)).unwrap();
    deposit(&mut ledger, &mut bridge, PLAYER, id, U256::from(400), k_new).unwrap();

    assert_eq!(bridge.parcel(k_old).units, U256::from(4));
    assert_eq!(bridge.parcel(k_new).units, U256::from(2));
}
