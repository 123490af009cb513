use std::sync::Arc;

use autofill_event_bus::InMemoryBus;
use autofill_policy_center::TrackerPolicy;
use tracing::trace;

use crate::events::Notification;
use crate::observers::NotificationObserver;

/// Republishes every notification on a broadcast bus for async consumers.
pub struct BusObserver {
    bus: Arc<InMemoryBus<Notification>>,
}

impl BusObserver {
    pub fn new(bus: Arc<InMemoryBus<Notification>>) -> Self {
        Self { bus }
    }

    /// Creates a dedicated bus sized by `bus.capacity`.
    pub fn from_policy(policy: &TrackerPolicy) -> Self {
        Self::new(InMemoryBus::new(policy.bus.capacity))
    }

    pub fn bus(&self) -> Arc<InMemoryBus<Notification>> {
        Arc::clone(&self.bus)
    }
}

impl NotificationObserver for BusObserver {
    fn on_notification(&self, notification: &Notification) {
        let receivers = self.bus.publish_now(notification.clone());
        trace!(receivers, kind = notification.name(), "bus publish");
    }
}
