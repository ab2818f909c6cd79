//! Closable event sink shared by an adapter component and its tasks
//!
//! Once closed, a sink drops every event. Closing waits for publishes that
//! are already in progress, so nothing is delivered after `close` returns.

use crate::transport::Publisher;
use log::debug;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct EventSink<M>
where
    M: Serialize + Send + Sync + 'static,
{
    publisher: Arc<dyn Publisher<M>>,
    /// true while the sink accepts events
    open: Arc<RwLock<bool>>,
}

impl<M> Clone for EventSink<M>
where
    M: Serialize + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            publisher: Arc::clone(&self.publisher),
            open: Arc::clone(&self.open),
        }
    }
}

impl<M> EventSink<M>
where
    M: Serialize + Send + Sync + 'static,
{
    pub fn new(publisher: Arc<dyn Publisher<M>>) -> Self {
        Self {
            publisher,
            open: Arc::new(RwLock::new(true)),
        }
    }

    /// Publish `msg` on `subject`. Returns true if a consumer received it.
    pub async fn emit(&self, subject: &str, msg: &M) -> bool {
        let open = self.open.read().await;
        if !*open {
            debug!("Sink closed, dropping event on {}", subject);
            return false;
        }

        match self.publisher.publish_to(subject, msg).await {
            Ok(()) => true,
            Err(e) => {
                debug!("No consumer for {}: {}", subject, e);
                false
            }
        }
    }

    /// Stop accepting events. Idempotent.
    pub async fn close(&self) {
        *self.open.write().await = false;
    }

    pub async fn is_closed(&self) -> bool {
        !*self.open.read().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::Subscriber;
    use crate::transport::channel::ChannelPublisher;

    #[tokio::test]
    async fn test_emit_then_close() {
        let (publisher, mut subscriber) = ChannelPublisher::<u32>::pair(10);
        let sink = EventSink::<u32>::new(Arc::new(publisher));
        let clone = sink.clone();

        assert!(sink.emit("test", &1).await);
        clone.close().await;
        assert!(sink.is_closed().await);
        assert!(!sink.emit("test", &2).await);

        assert_eq!(subscriber.try_next().unwrap(), Some(1));
        assert_eq!(subscriber.try_next().unwrap(), None);
    }

    #[tokio::test]
    async fn test_emit_without_consumer() {
        let sink = EventSink::<u32>::new(Arc::new(ChannelPublisher::with_capacity(4)));
        assert!(!sink.emit("test", &1).await);
        assert!(!sink.is_closed().await);
    }
}
