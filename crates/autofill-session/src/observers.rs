use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use autofill_core_types::{FieldId, ScopeId};
use parking_lot::Mutex;

use crate::events::Notification;
use crate::model::{FieldValue, SubmissionSource};

pub trait NotificationObserver: Send + Sync {
    fn on_notification(&self, notification: &Notification);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ObserverHandle(u64);

/// Ordered set of observers.
///
/// Dispatch walks a snapshot taken before the first call, so observers may
/// add or remove entries from inside `on_notification`. Observers removed
/// mid-dispatch are skipped if they have not been reached yet; observers
/// added mid-dispatch see the next notification.
#[derive(Default)]
pub struct ObserverList {
    next_handle: AtomicU64,
    entries: Mutex<Vec<(ObserverHandle, Arc<dyn NotificationObserver>)>>,
}

impl ObserverList {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add(&self, observer: Arc<dyn NotificationObserver>) -> ObserverHandle {
        let handle = ObserverHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        self.entries.lock().push((handle, observer));
        handle
    }

    pub fn remove(&self, handle: ObserverHandle) -> bool {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|(h, _)| *h != handle);
        entries.len() != before
    }

    pub fn contains(&self, handle: ObserverHandle) -> bool {
        self.entries.lock().iter().any(|(h, _)| *h == handle)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn notify(&self, notification: &Notification) {
        let snapshot: Vec<(ObserverHandle, Arc<dyn NotificationObserver>)> =
            self.entries.lock().clone();
        for (handle, observer) in snapshot {
            if self.contains(handle) {
                observer.on_notification(notification);
            }
        }
    }
}

/// Platform autofill service surface. Every call defaults to a no-op so a
/// bridge only overrides what its platform supports.
pub trait AutofillServiceBridge: Send + Sync {
    fn notify_view_entered(&self, _field: &FieldId) {}
    fn notify_view_exited(&self, _field: &FieldId) {}
    fn notify_value_changed(&self, _field: &FieldId, _value: &FieldValue) {}
    fn start_session(&self, _scope: &ScopeId) {}
    fn cancel(&self) {}
    fn commit(&self, _source: SubmissionSource) {}
}

/// Forwards notifications one-to-one onto an [`AutofillServiceBridge`].
pub struct BridgeObserver<B> {
    bridge: B,
}

impl<B: AutofillServiceBridge> BridgeObserver<B> {
    pub fn new(bridge: B) -> Self {
        Self { bridge }
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }
}

impl<B: AutofillServiceBridge> NotificationObserver for BridgeObserver<B> {
    fn on_notification(&self, notification: &Notification) {
        match notification {
            Notification::ViewEntered { field } => self.bridge.notify_view_entered(field),
            Notification::ViewExited { field } => self.bridge.notify_view_exited(field),
            Notification::ValueChanged { field, value } => {
                self.bridge.notify_value_changed(field, value)
            }
            Notification::SessionStarted { scope } => self.bridge.start_session(scope),
            Notification::Cancel => self.bridge.cancel(),
            Notification::Commit { source } => self.bridge.commit(*source),
        }
    }
}
