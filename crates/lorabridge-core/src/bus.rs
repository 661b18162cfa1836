//! Internal bus seam.
//!
//! The adapter publishes translated messages through the [`MessageBus`]
//! trait. [`InProcessBus`] distributes envelopes to in-process subscribers
//! over a broadcast channel; [`InMemoryBus`] records them for tests.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

use crate::error::Result;
use crate::message::ChannelMessage;

/// Client interface of the internal pub/sub bus.
///
/// `token` is the caller's authorization credential. It is opaque to the
/// adapter and forwarded unmodified; authentication is the bus's concern.
/// A published envelope is atomic: subscribers never observe a partial one.
#[async_trait]
pub trait MessageBus: Send + Sync {
    /// Publish one envelope on behalf of the token holder.
    async fn publish(&self, token: &str, message: ChannelMessage) -> Result<()>;
}

/// In-process bus backed by a broadcast channel.
///
/// Every subscriber receives every published envelope. Envelopes published
/// while no subscriber exists are discarded; slow subscribers may drop
/// older envelopes once their buffer fills.
#[derive(Clone)]
pub struct InProcessBus {
    tx: broadcast::Sender<ChannelMessage>,
}

impl InProcessBus {
    /// Create a bus with the configured capacity
    /// (`LORABRIDGE_BUS_CAPACITY`, or the default).
    pub fn new() -> Self {
        Self::with_capacity(crate::config::env_vars::bus_capacity())
    }

    /// Create a bus buffering up to `capacity` envelopes per subscriber.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all envelopes published after this call.
    pub fn subscribe(&self) -> BusReceiver {
        BusReceiver {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for InProcessBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageBus for InProcessBus {
    async fn publish(&self, _token: &str, message: ChannelMessage) -> Result<()> {
        // A send error only means there are no subscribers; the publish
        // itself still succeeded from the adapter's point of view.
        if self.tx.send(message).is_err() {
            tracing::debug!("no subscribers on internal bus, envelope discarded");
        }
        Ok(())
    }
}

/// Receiver side of an [`InProcessBus`] subscription.
pub struct BusReceiver {
    rx: broadcast::Receiver<ChannelMessage>,
}

impl BusReceiver {
    /// Receive the next envelope.
    ///
    /// Returns `None` when the bus is closed. A lagged subscriber skips the
    /// dropped envelopes and continues with the next available one.
    pub async fn recv(&mut self) -> Option<ChannelMessage> {
        loop {
            match self.rx.recv().await {
                Ok(message) => return Some(message),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "bus subscriber lagged, envelopes dropped");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Try to receive an envelope without blocking.
    pub fn try_recv(&mut self) -> Option<ChannelMessage> {
        self.rx.try_recv().ok()
    }
}

/// In-memory bus for testing.
///
/// Records every published envelope together with the token it was
/// published under.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBus {
    published: Arc<Mutex<Vec<(String, ChannelMessage)>>>,
}

impl InMemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// All envelopes published so far, with their tokens.
    pub async fn published(&self) -> Vec<(String, ChannelMessage)> {
        self.published.lock().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.published.lock().await.len()
    }

    pub async fn clear(&self) {
        self.published.lock().await.clear();
    }
}

#[async_trait]
impl MessageBus for InMemoryBus {
    async fn publish(&self, token: &str, message: ChannelMessage) -> Result<()> {
        self.published
            .lock()
            .await
            .push((token.to_string(), message));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(publisher: &str) -> ChannelMessage {
        ChannelMessage::new(publisher.to_string(), "c1".to_string(), b"{}".to_vec())
    }

    #[tokio::test]
    async fn test_in_memory_bus_records() {
        let bus = InMemoryBus::new();

        bus.publish("token-1", envelope("t1")).await.unwrap();
        bus.publish("token-2", envelope("t2")).await.unwrap();

        assert_eq!(bus.count().await, 2);
        let published = bus.published().await;
        assert_eq!(published[0].0, "token-1");
        assert_eq!(published[0].1.publisher, "t1");
        assert_eq!(published[1].1.publisher, "t2");

        bus.clear().await;
        assert_eq!(bus.count().await, 0);
    }

    #[tokio::test]
    async fn test_in_process_bus_delivers_to_subscriber() {
        let bus = InProcessBus::with_capacity(8);
        let mut rx = bus.subscribe();

        bus.publish("token", envelope("t1")).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.publisher, "t1");
        assert_eq!(received.protocol, "lora");
    }

    #[tokio::test]
    async fn test_in_process_bus_no_subscribers_is_ok() {
        let bus = InProcessBus::new();
        assert_eq!(bus.subscriber_count(), 0);
        bus.publish("token", envelope("t1")).await.unwrap();
    }
}
