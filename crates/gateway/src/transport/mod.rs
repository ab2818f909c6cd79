//! Transport abstraction layer
//!
//! Provides unified traits for event delivery using tokio channels.
//! Each event stream gets its own channel: delivery is FIFO per stream and
//! there is no ordering guarantee across streams.

pub mod channel;
pub mod config;
pub mod sink;

pub use config::Subjects;
pub use sink::EventSink;

use crate::error::TransportError;
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

/// Publisher - sends messages to a subject/channel
#[async_trait]
pub trait Publisher<M>: Send + Sync
where
    M: Serialize + Send + Sync,
{
    /// Publish a message
    async fn publish(&self, msg: &M) -> Result<(), TransportError>;

    /// Publish a message to a specific subject
    async fn publish_to(&self, subject: &str, msg: &M) -> Result<(), TransportError> {
        // Default implementation ignores subject and uses configured subject
        let _ = subject;
        self.publish(msg).await
    }
}

/// Subscriber - receives messages from a subject
#[async_trait]
pub trait Subscriber<M>: Send
where
    M: DeserializeOwned + Send,
{
    /// Wait for the next message
    async fn next(&mut self) -> Result<M, TransportError>;

    /// Try to receive without blocking (returns None if no message available)
    fn try_next(&mut self) -> Result<Option<M>, TransportError>;
}
