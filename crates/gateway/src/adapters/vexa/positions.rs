use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use hermes_core::Balance;
use log::{debug, warn};

use super::VENUE;
use super::client::{BalanceRequest, VenueClient};
use super::symbol::SymbolMapper;
use crate::messages::PositionEvent;
use crate::ports::{Lifecycle, PositionSource};
use crate::schedule::{ScheduledTask, TaskSet};
use crate::transport::{EventSink, Subjects};

/// Polls the balance of both currencies of the pair
///
/// Each currency is queried on its own; one failing has no effect on the
/// other, and the two are never reconciled into a joint snapshot.
pub struct VexaPositionPoller {
    inner: Arc<PositionInner>,
    initial_delay: Duration,
    interval: Duration,
    tasks: TaskSet,
    started: AtomicBool,
}

struct PositionInner {
    client: Arc<dyn VenueClient>,
    symbols: Arc<SymbolMapper>,
    events: EventSink<PositionEvent>,
}

impl PositionInner {
    async fn poll_once(&self) {
        let [base, quote] = self.symbols.pair().currencies();
        tokio::join!(self.refresh(base), self.refresh(quote));
    }

    async fn refresh(&self, currency: &str) {
        let request = BalanceRequest {
            symbol: SymbolMapper::currency_token(currency),
        };

        let outcome = match self.client.get_balance(request).await {
            Ok(response) => response.into_data("get_balance"),
            Err(e) => Err(e.into()),
        };

        let event = match outcome {
            Ok(venue) => {
                debug!(
                    "{} {} balance {} held {}",
                    VENUE, currency, venue.balance, venue.freeze_balance
                );
                PositionEvent::Updated(Balance::new(
                    currency,
                    venue.balance,
                    venue.freeze_balance,
                ))
            }
            Err(e) => {
                warn!("{} balance query for {} failed: {}", VENUE, currency, e);
                PositionEvent::Failed {
                    currency: currency.to_string(),
                    reason: e.to_string(),
                }
            }
        };

        self.events
            .emit(&Subjects::positions(VENUE, currency), &event)
            .await;
    }
}

impl VexaPositionPoller {
    pub fn new(
        client: Arc<dyn VenueClient>,
        symbols: Arc<SymbolMapper>,
        events: EventSink<PositionEvent>,
        initial_delay: Duration,
        interval: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(PositionInner {
                client,
                symbols,
                events,
            }),
            initial_delay,
            interval,
            tasks: TaskSet::new(),
            started: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Lifecycle for VexaPositionPoller {
    fn start(&self) {
        if self.tasks.is_closed() || self.started.swap(true, Ordering::SeqCst) {
            return;
        }

        let inner = self.inner.clone();
        self.tasks.push(ScheduledTask::every(
            "vexa.positions",
            self.initial_delay,
            self.interval,
            move || {
                let inner = inner.clone();
                async move { inner.poll_once().await }
            },
        ));
    }

    async fn dispose(&self) {
        self.tasks.abort_all();
        self.inner.events.close().await;
        debug!("{} position poller disposed", VENUE);
    }
}

#[async_trait]
impl PositionSource for VexaPositionPoller {
    async fn poll_once(&self) {
        self.inner.poll_once().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::vexa::client::VenueResponse;
    use crate::error::TransportError;
    use crate::testkit::{ScriptedVenue, balance};
    use crate::transport::Subscriber;
    use crate::transport::channel::{ChannelPublisher, ChannelSubscriber};
    use hermes_core::CurrencyPair;
    use rust_decimal_macros::dec;

    fn poller(venue: &Arc<ScriptedVenue>) -> (VexaPositionPoller, ChannelSubscriber<PositionEvent>) {
        let (publisher, subscriber) = ChannelPublisher::<PositionEvent>::pair(16);
        let poller = VexaPositionPoller::new(
            venue.clone(),
            Arc::new(SymbolMapper::new(CurrencyPair::new("BTC", "USDT"))),
            EventSink::new(Arc::new(publisher)),
            Duration::from_millis(200),
            Duration::from_millis(1_000),
        );
        (poller, subscriber)
    }

    fn drain(subscriber: &mut ChannelSubscriber<PositionEvent>) -> Vec<PositionEvent> {
        let mut events = Vec::new();
        while let Some(event) = subscriber.try_next().unwrap() {
            events.push(event);
        }
        events.sort_by(|a, b| a.currency().cmp(b.currency()));
        events
    }

    #[tokio::test]
    async fn test_poll_once_updates_both_currencies() {
        let venue = Arc::new(ScriptedVenue::new());
        venue.push_balance_reply("btc", Ok(VenueResponse::ok(balance(dec!(1.5), dec!(0.25)))));
        venue.push_balance_reply("usdt", Ok(VenueResponse::ok(balance(dec!(1000), dec!(0)))));
        let (poller, mut events) = poller(&venue);

        poller.poll_once().await;

        let mut queried = venue.balance_queries();
        queried.sort();
        assert_eq!(queried, vec!["btc", "usdt"]);

        assert_eq!(
            drain(&mut events),
            vec![
                PositionEvent::Updated(Balance::new("BTC", dec!(1.5), dec!(0.25))),
                PositionEvent::Updated(Balance::new("USDT", dec!(1000), dec!(0))),
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_isolated_to_one_currency() {
        let venue = Arc::new(ScriptedVenue::new());
        venue.push_balance_reply("btc", Ok(VenueResponse::failed("rate limited")));
        venue.push_balance_reply("usdt", Ok(VenueResponse::ok(balance(dec!(10), dec!(2)))));
        let (poller, mut events) = poller(&venue);

        poller.poll_once().await;

        let events = drain(&mut events);
        assert_eq!(events.len(), 2);
        match &events[0] {
            PositionEvent::Failed { currency, reason } => {
                assert_eq!(currency, "BTC");
                assert!(reason.contains("rate limited"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
        assert_eq!(
            events[1],
            PositionEvent::Updated(Balance::new("USDT", dec!(10), dec!(2)))
        );
    }

    #[tokio::test]
    async fn test_transport_error_becomes_failed_event() {
        let venue = Arc::new(ScriptedVenue::new());
        venue.push_balance_reply("usdt", Err(TransportError::Timeout));
        let (poller, mut events) = poller(&venue);

        poller.poll_once().await;

        let events = drain(&mut events);
        assert!(matches!(events[0], PositionEvent::Updated(_)));
        assert!(matches!(&events[1], PositionEvent::Failed { currency, .. } if currency == "USDT"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_schedule_and_dispose() {
        let venue = Arc::new(ScriptedVenue::new());
        let (poller, mut events) = poller(&venue);
        poller.start();

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(venue.call_count(), 0);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(venue.call_count(), 2);

        tokio::time::sleep(Duration::from_millis(1_000)).await;
        assert_eq!(venue.call_count(), 4);
        assert_eq!(drain(&mut events).len(), 4);

        poller.dispose().await;
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(venue.call_count(), 4);
        assert!(drain(&mut events).is_empty());

        // no-op once disposed
        poller.start();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(venue.call_count(), 4);
    }
}
