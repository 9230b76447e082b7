//! # Multi-Token Ledger
//!
//! The capability traits the bridge consumes, plus an in-memory ledger
//! that speaks the same deposit protocol as the on-chain economy.
//!
//! Execution is globally serialized: every operation runs to completion
//! before the next begins, and every operation either fully commits or
//! fully reverts. The receiver callback is invoked inline, inside the
//! transfer, so the transfer and the receiver's decision are one atomic
//! step.

use std::collections::HashMap;

use alloy_primitives::{Address, FixedBytes};

use runegate_shared::{
    RawAmount, ResourceId, BATCH_RECEIVED_ACK, MULTI_TOKEN_INTERFACE_ID, RESOURCE_RECEIVED_ACK,
};

use crate::error::{LedgerError, LedgerResult, TransferError};

/// The multi-token ledger capability the bridge is written against.
///
/// Object-safe on purpose: the bridge holds `&mut dyn MultiTokenLedger`
/// for outbound transfers and never needs the receiver-notifying entry
/// points.
pub trait MultiTokenLedger {
    /// The ledger's own principal, as seen by receive hooks.
    fn address(&self) -> Address;

    /// Capability discovery. A conforming multi-token ledger answers
    /// `true` for [`MULTI_TOKEN_INTERFACE_ID`].
    fn supports_interface(&self, interface_id: FixedBytes<4>) -> bool;

    /// Gets the balance of `owner` for `resource_id`.
    fn balance_of(&self, owner: Address, resource_id: ResourceId) -> RawAmount;

    /// Moves `raw_amount` of `resource_id` from `from` to `to` without
    /// notifying the recipient. `data` is carried for protocol fidelity;
    /// plain transfers do not interpret it.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InsufficientBalance`] when `from` holds less than
    /// `raw_amount`; [`LedgerError::BalanceOverflow`] when the credit
    /// would overflow.
    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        resource_id: ResourceId,
        raw_amount: RawAmount,
        data: &[u8],
    ) -> LedgerResult<()>;
}

/// Deposit-notification contract, implemented by the bridge.
///
/// The ledger invokes these hooks inline whenever tokens move into the
/// receiver. Returning the exact acknowledgement selector finalizes the
/// transfer; anything else rejects it and the ledger rolls the balances
/// back.
pub trait ResourceReceiver {
    /// The receiver's failure kind, surfaced verbatim to the depositor.
    type Error: std::error::Error;

    /// Notification of a single-item deposit.
    ///
    /// # Errors
    ///
    /// Whatever the receiver's deposit policy rejects; the ledger treats
    /// any error as "transfer refused".
    fn on_resource_received(
        &mut self,
        caller: Address,
        operator: Address,
        from: Address,
        resource_id: ResourceId,
        raw_amount: RawAmount,
        data: &[u8],
    ) -> Result<FixedBytes<4>, Self::Error>;

    /// Notification of a batch deposit.
    ///
    /// # Errors
    ///
    /// Same contract as [`Self::on_resource_received`].
    fn on_batch_received(
        &mut self,
        caller: Address,
        operator: Address,
        from: Address,
        resource_ids: &[ResourceId],
        raw_amounts: &[RawAmount],
        data: &[u8],
    ) -> Result<FixedBytes<4>, Self::Error>;
}

/// In-memory multi-token ledger.
///
/// Balances per (owner, resource id), no approvals, no metadata - just
/// enough economy for the bridge to run against. Mirrors the `IMultiToken`
/// interface declared in [`crate::contracts`].
pub struct InMemoryLedger {
    /// The ledger's own principal.
    address: Address,
    /// Balances keyed by (owner, resource id).
    balances: HashMap<(Address, ResourceId), RawAmount>,
}

impl InMemoryLedger {
    /// Creates an empty ledger with the given principal.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            balances: HashMap::new(),
        }
    }

    /// Issues `raw_amount` of `resource_id` to `to` out of thin air.
    ///
    /// # Errors
    ///
    /// [`LedgerError::BalanceOverflow`] when the credit would overflow.
    pub fn mint(
        &mut self,
        to: Address,
        resource_id: ResourceId,
        raw_amount: RawAmount,
    ) -> LedgerResult<()> {
        let key = (to, resource_id);
        let balance = self.balances.get(&key).copied().unwrap_or_default();
        let new_balance = balance
            .checked_add(raw_amount)
            .ok_or(LedgerError::BalanceOverflow {
                owner: to,
                resource_id,
            })?;
        self.balances.insert(key, new_balance);
        Ok(())
    }

    /// Mint that notifies the recipient's receive hook, the way a deposit
    /// minted straight into the bridge does on-chain. `from` is the zero
    /// address, the mint convention.
    ///
    /// # Errors
    ///
    /// Ledger failures as [`TransferError::Ledger`]; receiver rejections
    /// as [`TransferError::Receiver`]. Either way the issued balance is
    /// taken back before returning.
    pub fn mint_to_receiver<R: ResourceReceiver>(
        &mut self,
        operator: Address,
        to: Address,
        resource_id: ResourceId,
        raw_amount: RawAmount,
        data: &[u8],
        receiver: &mut R,
    ) -> Result<(), TransferError<R::Error>> {
        self.mint(to, resource_id, raw_amount)
            .map_err(TransferError::Ledger)?;
        let caller = self.address;
        match receiver.on_resource_received(
            caller,
            operator,
            Address::ZERO,
            resource_id,
            raw_amount,
            data,
        ) {
            Ok(ack) if ack == RESOURCE_RECEIVED_ACK => Ok(()),
            Ok(ack) => {
                self.burn_exact(to, resource_id, raw_amount);
                Err(TransferError::Ledger(LedgerError::UnexpectedAck { ack }))
            }
            Err(err) => {
                self.burn_exact(to, resource_id, raw_amount);
                Err(TransferError::Receiver(err))
            }
        }
    }

    /// Transfer that notifies the recipient's receive hook.
    ///
    /// This is the inbound path of the bridge protocol: balance move and
    /// receiver decision are one atomic step, and a rejected hook leaves
    /// both balances exactly as they were.
    ///
    /// # Errors
    ///
    /// Ledger failures as [`TransferError::Ledger`]; receiver rejections
    /// as [`TransferError::Receiver`], kinds preserved verbatim.
    #[allow(clippy::too_many_arguments)]
    pub fn safe_transfer_from<R: ResourceReceiver>(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        resource_id: ResourceId,
        raw_amount: RawAmount,
        data: &[u8],
        receiver: &mut R,
    ) -> Result<(), TransferError<R::Error>> {
        self.transfer_from(from, to, resource_id, raw_amount, data)?;
        let caller = self.address;
        match receiver.on_resource_received(caller, operator, from, resource_id, raw_amount, data)
        {
            Ok(ack) if ack == RESOURCE_RECEIVED_ACK => Ok(()),
            Ok(ack) => {
                self.unwind(from, to, resource_id, raw_amount);
                Err(TransferError::Ledger(LedgerError::UnexpectedAck { ack }))
            }
            Err(err) => {
                self.unwind(from, to, resource_id, raw_amount);
                Err(TransferError::Receiver(err))
            }
        }
    }

    /// Batch transfer that notifies the recipient's receive hook.
    ///
    /// All moves apply before the hook runs; a rejection (or a failed
    /// move partway through) restores every balance.
    ///
    /// # Errors
    ///
    /// [`LedgerError::LengthMismatch`] when the vectors disagree, before
    /// anything moves; otherwise same contract as
    /// [`Self::safe_transfer_from`].
    #[allow(clippy::too_many_arguments)]
    pub fn safe_batch_transfer_from<R: ResourceReceiver>(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        resource_ids: &[ResourceId],
        raw_amounts: &[RawAmount],
        data: &[u8],
        receiver: &mut R,
    ) -> Result<(), TransferError<R::Error>> {
        if resource_ids.len() != raw_amounts.len() {
            return Err(TransferError::Ledger(LedgerError::LengthMismatch {
                ids: resource_ids.len(),
                amounts: raw_amounts.len(),
            }));
        }

        let mut applied = 0;
        for (resource_id, raw_amount) in resource_ids.iter().zip(raw_amounts) {
            if let Err(err) = self.transfer_from(from, to, *resource_id, *raw_amount, data) {
                self.unwind_batch(from, to, &resource_ids[..applied], &raw_amounts[..applied]);
                return Err(err.into());
            }
            applied += 1;
        }

        let caller = self.address;
        match receiver.on_batch_received(caller, operator, from, resource_ids, raw_amounts, data)
        {
            Ok(ack) if ack == BATCH_RECEIVED_ACK => Ok(()),
            Ok(ack) => {
                self.unwind_batch(from, to, resource_ids, raw_amounts);
                Err(TransferError::Ledger(LedgerError::UnexpectedAck { ack }))
            }
            Err(err) => {
                self.unwind_batch(from, to, resource_ids, raw_amounts);
                Err(TransferError::Receiver(err))
            }
        }
    }

    /// Reverses a move this ledger just applied. Cannot fail: `to` was
    /// credited exactly `raw_amount` and `from` held it beforehand.
    fn unwind(&mut self, from: Address, to: Address, resource_id: ResourceId, raw_amount: RawAmount) {
        if from == to || raw_amount.is_zero() {
            return;
        }
        self.burn_exact(to, resource_id, raw_amount);
        let from_key = (from, resource_id);
        let from_balance = self.balances.get(&from_key).copied().unwrap_or_default();
        self.balances
            .insert(from_key, from_balance.saturating_add(raw_amount));
    }

    /// Reverses every move of an applied batch prefix.
    fn unwind_batch(
        &mut self,
        from: Address,
        to: Address,
        resource_ids: &[ResourceId],
        raw_amounts: &[RawAmount],
    ) {
        for (resource_id, raw_amount) in resource_ids.iter().zip(raw_amounts) {
            self.unwind(from, to, *resource_id, *raw_amount);
        }
    }

    /// Removes a balance this ledger just credited.
    fn burn_exact(&mut self, owner: Address, resource_id: ResourceId, raw_amount: RawAmount) {
        let key = (owner, resource_id);
        let balance = self.balances.get(&key).copied().unwrap_or_default();
        self.balances.insert(key, balance.saturating_sub(raw_amount));
    }
}

impl MultiTokenLedger for InMemoryLedger {
    fn address(&self) -> Address {
        self.address
    }

    fn supports_interface(&self, interface_id: FixedBytes<4>) -> bool {
        interface_id == MULTI_TOKEN_INTERFACE_ID
    }

    fn balance_of(&self, owner: Address, resource_id: ResourceId) -> RawAmount {
        self.balances
            .get(&(owner, resource_id))
            .copied()
            .unwrap_or_default()
    }

    fn transfer_from(
        &mut self,
        from: Address,
        to: Address,
        resource_id: ResourceId,
        raw_amount: RawAmount,
        _data: &[u8],
    ) -> LedgerResult<()> {
        let available = self.balance_of(from, resource_id);
        if available < raw_amount {
            return Err(LedgerError::InsufficientBalance {
                owner: from,
                resource_id,
                required: raw_amount,
                available,
            });
        }
        // Self-transfers and zero moves are no-ops once the balance check passed.
        if from == to || raw_amount.is_zero() {
            return Ok(());
        }
        let to_balance = self.balance_of(to, resource_id);
        let new_to = to_balance
            .checked_add(raw_amount)
            .ok_or(LedgerError::BalanceOverflow {
                owner: to,
                resource_id,
            })?;
        self.balances.insert((from, resource_id), available - raw_amount);
        self.balances.insert((to, resource_id), new_to);
        Ok(())
    }
}
