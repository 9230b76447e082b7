//! # Bridge Controller
//!
//! Single entry point for everything that mutates the bridge: the
//! administrator's registry changes and outbound transfers, the economy
//! ledger's deposit notifications, and the one-way termination switch.
//!
//! ## State Machine
//!
//! ```text
//!              terminate()
//!  ┌────────┐ ───────────▶ ┌────────────┐
//!  │ Active │              │ Terminated │ (forever)
//!  └────────┘              └────────────┘
//!
//!  Active:     define/remove, deposits, outbound transfers
//!  Terminated: outbound transfers only
//! ```
//!
//! Execution is globally serialized: each operation runs to completion
//! before the next begins, and every precondition is checked before any
//! state is touched, so a failed operation leaves nothing behind.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use alloy_primitives::{Address, FixedBytes};
use crossbeam_channel::Receiver;
use parking_lot::Mutex;

use runegate_economy::{Authorizer, MultiTokenLedger, ResourceReceiver};
use runegate_shared::{
    parse_parcel_key, ParcelKey, RawAmount, ResourceId, Units, MULTI_TOKEN_INTERFACE_ID,
    NO_PARCEL_KEY, RESOURCE_RECEIVED_ACK,
};

use crate::config::BridgeConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::events::{BridgeEvent, EventSink};
use crate::parcels::{Parcel, ParcelLedger};
use crate::registry::{ResourceType, ResourceTypeRegistry};

/// Counters for bridge activity.
#[derive(Debug, Default)]
pub struct BridgeStats {
    /// Inbound deposits acknowledged.
    pub deposits_accepted: AtomicU64,
    /// Inbound deposits rejected (any reason).
    pub deposits_rejected: AtomicU64,
    /// Parcels registered.
    pub parcels_registered: AtomicU64,
    /// Sentinel-tagged top-ups accepted.
    pub top_ups: AtomicU64,
    /// Units paid out through `send_units` (saturating at `u64::MAX`).
    pub units_sent_out: AtomicU64,
}

/// The mutual-exclusion boundary for concurrent hosts.
///
/// The controller itself assumes globally serialized execution. A host
/// that runs genuinely concurrent callers must funnel every operation
/// through one of these per logical ledger instance.
pub type SharedBridge = Arc<Mutex<BridgeController>>;

/// Orchestrates the resource-type registry and the parcel ledger against
/// the global termination flag.
pub struct BridgeController {
    /// Static configuration.
    config: BridgeConfig,
    /// The economy ledger's principal: the only caller whose deposit
    /// notifications are honored.
    economy: Address,
    /// Authorization capability, checked at the top of every mutating
    /// operation.
    authorizer: Box<dyn Authorizer + Send>,
    /// Bridgeable resource types.
    registry: ResourceTypeRegistry,
    /// Registered inbound deposits.
    parcels: ParcelLedger,
    /// One-way termination flag.
    terminated: bool,
    /// Published events.
    events: EventSink,
    /// Activity counters.
    stats: Arc<BridgeStats>,
}

impl BridgeController {
    /// Builds a controller against the given economy ledger.
    ///
    /// Capability discovery happens here, once: a ledger that does not
    /// answer for the multi-token interface fails construction instead of
    /// failing at the first deposit.
    ///
    /// # Errors
    ///
    /// [`BridgeError::InvalidEconomy`] when discovery fails.
    pub fn new<L>(
        config: BridgeConfig,
        authorizer: Box<dyn Authorizer + Send>,
        ledger: &L,
    ) -> BridgeResult<Self>
    where
        L: MultiTokenLedger + ?Sized,
    {
        if !ledger.supports_interface(MULTI_TOKEN_INTERFACE_ID) {
            return Err(BridgeError::InvalidEconomy);
        }
        let events = EventSink::new(config.event_buffer);
        Ok(Self {
            economy: ledger.address(),
            config,
            authorizer,
            registry: ResourceTypeRegistry::new(),
            parcels: ParcelLedger::new(),
            terminated: false,
            events,
            stats: Arc::new(BridgeStats::default()),
        })
    }

    /// Defines (or redefines) a bridgeable resource type.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `AlreadyTerminated`, or `InvalidConfig` for a zero
    /// rate.
    pub fn define(
        &mut self,
        caller: Address,
        resource_id: ResourceId,
        amount_per_unit: RawAmount,
    ) -> BridgeResult<()> {
        self.authorizer.require_caller(caller)?;
        self.ensure_not_terminated()?;
        self.registry.define(resource_id, amount_per_unit)?;
        tracing::info!(
            "resource type {} defined at {} per unit",
            resource_id,
            amount_per_unit
        );
        self.events.emit(BridgeEvent::ResourceTypeDefined {
            resource_id,
            amount_per_unit,
        });
        Ok(())
    }

    /// Removes a resource type from bridging. Its parcels and its entry
    /// survive; only `active` drops.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `AlreadyTerminated`, or `NotFound` when the id was
    /// never defined.
    pub fn remove(&mut self, caller: Address, resource_id: ResourceId) -> BridgeResult<()> {
        self.authorizer.require_caller(caller)?;
        self.ensure_not_terminated()?;
        self.registry.remove(resource_id)?;
        tracing::info!("resource type {} removed", resource_id);
        self.events
            .emit(BridgeEvent::ResourceTypeRemoved { resource_id });
        Ok(())
    }

    /// Flips the bridge to Terminated. One-way; calling it again is a
    /// no-op success.
    ///
    /// # Errors
    ///
    /// `Unauthorized`.
    pub fn terminate(&mut self, caller: Address) -> BridgeResult<()> {
        self.authorizer.require_caller(caller)?;
        if !self.terminated {
            self.terminated = true;
            tracing::info!("bridge terminated by {}", caller);
        }
        Ok(())
    }

    /// Pays `units` of `resource_id` out of the bridge's own holdings.
    ///
    /// Deliberately NOT gated on termination: redemption payouts must
    /// remain possible after the game shuts down. The resource type only
    /// needs to exist (`created`) - payouts against removed types stay
    /// valid because their parcels do.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, `ResourceNotDefined`, `ZeroAmount`,
    /// `AmountOverflow`, or whatever the ledger reports (for example
    /// insufficient bridge holdings).
    pub fn send_units(
        &mut self,
        caller: Address,
        ledger: &mut dyn MultiTokenLedger,
        to: Address,
        resource_id: ResourceId,
        units: Units,
    ) -> BridgeResult<()> {
        self.authorizer.require_caller(caller)?;
        let resource = self.registry.lookup(resource_id);
        if !resource.created {
            return Err(BridgeError::ResourceNotDefined { resource_id });
        }
        if units.is_zero() {
            return Err(BridgeError::ZeroAmount);
        }
        let raw_amount = units
            .checked_mul(resource.amount_per_unit)
            .ok_or(BridgeError::AmountOverflow { units })?;
        ledger.transfer_from(self.config.address, to, resource_id, raw_amount, &[])?;
        self.stats.units_sent_out.fetch_add(
            u64::try_from(units).unwrap_or(u64::MAX),
            Ordering::Relaxed,
        );
        tracing::debug!(
            "sent {} units ({} raw) of resource {} to {}",
            units,
            raw_amount,
            resource_id,
            to
        );
        Ok(())
    }

    /// Raw pass-through transfer from the bridge's holdings, bypassing
    /// unit conversion. Administrative flexibility; also not gated on
    /// termination.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, or whatever the ledger reports.
    pub fn send_tokens(
        &mut self,
        caller: Address,
        ledger: &mut dyn MultiTokenLedger,
        to: Address,
        resource_id: ResourceId,
        raw_amount: RawAmount,
        data: &[u8],
    ) -> BridgeResult<()> {
        self.authorizer.require_caller(caller)?;
        ledger.transfer_from(self.config.address, to, resource_id, raw_amount, data)?;
        tracing::debug!(
            "sent {} raw of resource {} to {}",
            raw_amount,
            resource_id,
            to
        );
        Ok(())
    }

    /// Looks up a resource type.
    #[must_use]
    pub fn resource_type(&self, resource_id: ResourceId) -> ResourceType {
        self.registry.lookup(resource_id)
    }

    /// Looks up a parcel.
    #[must_use]
    pub fn parcel(&self, key: ParcelKey) -> Parcel {
        self.parcels.lookup(key)
    }

    /// Whether the bridge has been terminated.
    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// The economy ledger this bridge was constructed against.
    #[must_use]
    pub const fn economy(&self) -> Address {
        self.economy
    }

    /// The bridge's own principal.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.config.address
    }

    /// Returns a handle to the activity counters.
    #[must_use]
    pub fn stats(&self) -> Arc<BridgeStats> {
        Arc::clone(&self.stats)
    }

    /// Returns a clone of the published-event receiver.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<BridgeEvent> {
        self.events.subscribe()
    }

    fn ensure_not_terminated(&self) -> BridgeResult<()> {
        if self.terminated {
            Err(BridgeError::AlreadyTerminated)
        } else {
            Ok(())
        }
    }

    /// The inbound deposit path. Check order is part of the contract:
    /// termination, then sender, then key shape, then parcel rules.
    fn handle_deposit(
        &mut self,
        caller: Address,
        operator: Address,
        from: Address,
        resource_id: ResourceId,
        raw_amount: RawAmount,
        data: &[u8],
    ) -> BridgeResult<FixedBytes<4>> {
        self.ensure_not_terminated()?;
        if caller != self.economy {
            return Err(BridgeError::InvalidSender { caller });
        }
        let key = parse_parcel_key(data).ok_or_else(|| BridgeError::MalformedParcelKey {
            len: data.len(),
        })?;

        // Sentinel-tagged deposits top up the bridge without parcel
        // bookkeeping. Policy: no resource-type validation on this path -
        // it must work before the first define, so the bridge can be
        // funded up front, and a depositor may forfeit tracking for any
        // resource the ledger was willing to move.
        if key == NO_PARCEL_KEY {
            self.stats.top_ups.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(
                "top-up of {} resource {} from {} (operator {})",
                raw_amount,
                resource_id,
                from,
                operator
            );
            return Ok(RESOURCE_RECEIVED_ACK);
        }

        let resource = self.registry.lookup(resource_id);
        let units = self.parcels.register(resource_id, resource, raw_amount, key)?;
        self.stats.parcels_registered.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            "parcel {} registered: {} units of resource {}",
            key,
            units,
            resource_id
        );
        Ok(RESOURCE_RECEIVED_ACK)
    }
}

impl ResourceReceiver for BridgeController {
    type Error = BridgeError;

    fn on_resource_received(
        &mut self,
        caller: Address,
        operator: Address,
        from: Address,
        resource_id: ResourceId,
        raw_amount: RawAmount,
        data: &[u8],
    ) -> Result<FixedBytes<4>, BridgeError> {
        match self.handle_deposit(caller, operator, from, resource_id, raw_amount, data) {
            Ok(ack) => {
                self.stats.deposits_accepted.fetch_add(1, Ordering::Relaxed);
                Ok(ack)
            }
            Err(err) => {
                self.stats.deposits_rejected.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("deposit rejected: {}", err);
                Err(err)
            }
        }
    }

    fn on_batch_received(
        &mut self,
        _caller: Address,
        _operator: Address,
        _from: Address,
        _resource_ids: &[ResourceId],
        _raw_amounts: &[RawAmount],
        _data: &[u8],
    ) -> Result<FixedBytes<4>, BridgeError> {
        // Single-item deposits only: batches would make parcel/unit
        // accounting ambiguous. Rejected before any other check.
        self.stats.deposits_rejected.fetch_add(1, Ordering::Relaxed);
        Err(BridgeError::BatchNotSupported)
    }
}
