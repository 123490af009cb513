use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc};
use tracing::{trace, warn};

use autofill_core_types::CoreError;

/// Trait implemented by payload types that can be carried on the bus.
pub trait Event: Clone + Send + Sync + std::fmt::Debug + 'static {}

impl<T> Event for T where T: Clone + Send + Sync + std::fmt::Debug + 'static {}

#[async_trait]
pub trait EventBus<E>: Send + Sync
where
    E: Event,
{
    async fn publish(&self, event: E) -> Result<(), CoreError>;
    fn subscribe(&self) -> broadcast::Receiver<E>;
}

/// Ordered in-memory bus. Delivery per subscriber is FIFO.
pub struct InMemoryBus<E>
where
    E: Event,
{
    sender: broadcast::Sender<E>,
}

impl<E> InMemoryBus<E>
where
    E: Event,
{
    pub fn new(capacity: usize) -> Arc<Self> {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Arc::new(Self { sender })
    }

    /// Publishes without awaiting. Returns the number of live subscribers;
    /// zero subscribers is not an error.
    pub fn publish_now(&self, event: E) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                trace!("bus publish with no subscribers");
                0
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[async_trait]
impl<E> EventBus<E> for InMemoryBus<E>
where
    E: Event,
{
    async fn publish(&self, event: E) -> Result<(), CoreError> {
        self.sender
            .send(event)
            .map(|_| ())
            .map_err(|err| CoreError::new(err.to_string()))
    }

    fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }
}

/// Helper to materialise an mpsc receiver from the bus subscription
/// so callers can await events without handling broadcast semantics directly.
pub fn to_mpsc<E>(bus: Arc<InMemoryBus<E>>, capacity: usize) -> mpsc::Receiver<E>
where
    E: Event,
{
    let mut rx = bus.subscribe();
    let (tx, out_rx) = mpsc::channel(capacity.max(1));
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ev) => {
                    if tx.send(ev).await.is_err() {
                        break;
                    }
                }
                // a slow consumer loses the oldest events, not the stream
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "bus consumer lagged; oldest events dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
    out_rx
}
