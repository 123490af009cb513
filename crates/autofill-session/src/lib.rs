pub mod api;
pub mod bus;
pub mod errors;
pub mod events;
pub mod metrics;
pub mod model;
pub mod observers;
pub mod outcome;
pub mod ports;
pub mod session;
pub mod testing;
pub mod tracker;

pub use api::TrackerBuilder;
pub use errors::{AutofillError, MismatchError};
pub use events::Notification;
pub use model::{
    Event, Field, FieldDescriptor, FieldKind, FieldValue, InputOrigin, Navigation, SessionState,
    SubmissionSource,
};
pub use observers::{
    AutofillServiceBridge, BridgeObserver, NotificationObserver, ObserverHandle, ObserverList,
};
pub use outcome::SessionOutcome;
pub use ports::{MetricsPort, SubmissionClassifier};
pub use session::{Session, SessionReport};
pub use tracker::{AutofillSessionTracker, FillReport};

pub use autofill_core_types::{FieldId, ScopeId, SessionId};
