//! # Bridge Events
//!
//! Published side effects of registry changes, delivered through a
//! bounded channel. Delivery is best-effort: events are observability,
//! and a full channel never fails the operation that produced the event.

use crossbeam_channel::{bounded, Receiver, Sender};

use runegate_shared::{RawAmount, ResourceId};

/// Observable side effects of the bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BridgeEvent {
    /// A resource type was defined or redefined.
    ResourceTypeDefined {
        /// The resource id.
        resource_id: ResourceId,
        /// The exchange rate it was defined at.
        amount_per_unit: RawAmount,
    },
    /// A resource type was removed from bridging.
    ResourceTypeRemoved {
        /// The resource id.
        resource_id: ResourceId,
    },
}

/// Bounded, best-effort event publication.
///
/// Consumers clone the receiver; multiple subscribers compete for events
/// the way they do on the game side's listener channels.
#[derive(Debug)]
pub struct EventSink {
    /// Sender side of the event channel.
    sender: Sender<BridgeEvent>,
    /// Receiver side of the event channel (cloneable).
    receiver: Receiver<BridgeEvent>,
}

impl EventSink {
    /// Creates a sink with the given channel capacity.
    #[must_use]
    pub fn new(buffer: usize) -> Self {
        let (sender, receiver) = bounded(buffer);
        Self { sender, receiver }
    }

    /// Returns a clone of the event receiver.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<BridgeEvent> {
        self.receiver.clone()
    }

    /// Publishes an event.
    ///
    /// Returns `false` if the channel was full and the event was dropped;
    /// the producing operation proceeds either way.
    pub(crate) fn emit(&self, event: BridgeEvent) -> bool {
        self.sender.try_send(event).is_ok()
    }
}
