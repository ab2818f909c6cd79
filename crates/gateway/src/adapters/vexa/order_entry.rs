use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use hermes_core::{CancelRequest, ClientOrderId, OrderRequest, ReplaceRequest};
use log::{debug, info, warn};
use uuid::Uuid;

use super::VENUE;
use super::client::{CancelOrderRequest, CreateOrderRequest, VenueClient};
use super::pricing::PriceScaling;
use super::side::SideMapper;
use super::symbol::SymbolMapper;
use crate::error::{GatewayError, Result, TransportError};
use crate::messages::{
    ConnectionChannel, ConnectivityEvent, OrderAction, OrderEvent, OrderRejection, OrderUpdate,
};
use crate::ports::{Lifecycle, OrderEntry};
use crate::schedule::{ScheduledTask, TaskSet};
use crate::transport::{EventSink, Subjects};

/// Order entry over the Vexa REST API
///
/// Venue outcomes are published on the order stream, one event per attempt.
/// Only requests refused before the network come back as `Err`.
pub struct VexaOrderEntry {
    client: Arc<dyn VenueClient>,
    symbols: Arc<SymbolMapper>,
    pricing: PriceScaling,
    events: EventSink<OrderEvent>,
    connectivity: EventSink<ConnectivityEvent>,
    connect_delay: Duration,
    subject: String,
    tasks: TaskSet,
    started: AtomicBool,
}

impl VexaOrderEntry {
    pub fn new(
        client: Arc<dyn VenueClient>,
        symbols: Arc<SymbolMapper>,
        pricing: PriceScaling,
        events: EventSink<OrderEvent>,
        connectivity: EventSink<ConnectivityEvent>,
        connect_delay: Duration,
    ) -> Self {
        Self {
            client,
            symbols,
            pricing,
            events,
            connectivity,
            connect_delay,
            subject: Subjects::order_events(VENUE),
            tasks: TaskSet::new(),
            started: AtomicBool::new(false),
        }
    }

    fn ensure_live(&self) -> Result<()> {
        if self.tasks.is_closed() {
            return Err(TransportError::ChannelClosed.into());
        }
        Ok(())
    }

    async fn publish(&self, event: OrderEvent) {
        self.events.emit(&self.subject, &event).await;
    }

    async fn publish_rejection(
        &self,
        client_order_id: ClientOrderId,
        action: OrderAction,
        error: GatewayError,
        latency: Duration,
    ) {
        warn!(
            "{} {} rejected for {}: {}",
            VENUE,
            action.as_str(),
            client_order_id,
            error
        );
        self.publish(OrderEvent::Rejected(OrderRejection {
            client_order_id,
            action,
            reason: error.to_string(),
            latency,
        }))
        .await;
    }
}

#[async_trait]
impl Lifecycle for VexaOrderEntry {
    fn start(&self) {
        if self.tasks.is_closed() || self.started.swap(true, Ordering::SeqCst) {
            return;
        }

        let sink = self.connectivity.clone();
        let subject = Subjects::connectivity(VENUE);
        self.tasks.push(ScheduledTask::after(
            "vexa.order_entry.connect",
            self.connect_delay,
            async move {
                info!("{} order entry connected", VENUE);
                sink.emit(
                    &subject,
                    &ConnectivityEvent::connected(VENUE, ConnectionChannel::OrderEntry),
                )
                .await;
            },
        ));
    }

    async fn dispose(&self) {
        self.tasks.abort_all();
        self.events.close().await;
        self.connectivity.close().await;
        debug!("{} order entry disposed", VENUE);
    }
}

#[async_trait]
impl OrderEntry for VexaOrderEntry {
    async fn send_order(&self, order: OrderRequest) -> Result<()> {
        self.ensure_live()?;
        if order.time_in_force.is_immediate() {
            return Err(GatewayError::unsupported(
                VENUE,
                format!("{} orders", order.time_in_force.as_str()),
            ));
        }
        if &order.pair != self.symbols.pair() {
            return Err(GatewayError::InvalidArgument(format!(
                "order for {} sent to {} gateway",
                order.pair,
                self.symbols.pair()
            )));
        }

        let request = CreateOrderRequest {
            symbol: self.symbols.symbol().to_string(),
            side: SideMapper::to_venue(order.side).to_string(),
            amount: order.quantity,
            price: self.pricing.write(order.side, order.price)?,
        };
        debug!("{} create_order {:?}", VENUE, request);

        let outcome = match self.client.create_order(request).await {
            Ok(response) => response.into_data("create_order"),
            Err(e) => Err(e.into()),
        };

        match outcome {
            Ok(created) => {
                info!(
                    "{} accepted {} as {}",
                    VENUE, order.client_order_id, created.order_oid
                );
                self.publish(OrderEvent::Accepted(OrderUpdate {
                    client_order_id: order.client_order_id.clone(),
                    external_id: Some(created.order_oid),
                    latency: order.age(),
                }))
                .await;
            }
            Err(e) => {
                let latency = order.age();
                self.publish_rejection(order.client_order_id, OrderAction::Send, e, latency)
                    .await;
            }
        }
        Ok(())
    }

    async fn cancel_order(&self, cancel: CancelRequest) -> Result<()> {
        self.ensure_live()?;
        if cancel.external_id.trim().is_empty() {
            return Err(GatewayError::InvalidArgument(format!(
                "cancel of {} has no venue order id",
                cancel.client_order_id
            )));
        }
        if &cancel.pair != self.symbols.pair() {
            return Err(GatewayError::InvalidArgument(format!(
                "cancel for {} sent to {} gateway",
                cancel.pair,
                self.symbols.pair()
            )));
        }

        let request = CancelOrderRequest {
            order_oid: cancel.external_id.clone(),
            side: SideMapper::to_venue(cancel.side).to_string(),
            symbol: self.symbols.symbol().to_string(),
        };
        debug!("{} cancel {:?}", VENUE, request);

        let outcome = match self.client.cancel(request).await {
            Ok(response) => response.into_ack("cancel"),
            Err(e) => Err(e.into()),
        };

        match outcome {
            Ok(()) => {
                info!("{} cancelled {}", VENUE, cancel.client_order_id);
                self.publish(OrderEvent::Cancelled(OrderUpdate {
                    client_order_id: cancel.client_order_id.clone(),
                    external_id: None,
                    latency: cancel.age(),
                }))
                .await;
            }
            Err(e) => {
                let latency = cancel.age();
                self.publish_rejection(cancel.client_order_id, OrderAction::Cancel, e, latency)
                    .await;
            }
        }
        Ok(())
    }

    async fn replace_order(&self, replace: ReplaceRequest) -> Result<()> {
        // The send follows any cancel that reached the venue, whatever its
        // outcome; a fill in between can leave both orders live
        self.cancel_order(replace.cancel).await?;
        self.send_order(replace.order).await
    }

    fn generate_client_order_id(&self) -> ClientOrderId {
        Uuid::new_v4().to_string()
    }

    fn supports_cancel_all(&self) -> bool {
        false
    }

    async fn cancel_all_open_orders(&self) -> Result<()> {
        debug!("{} has no bulk cancel, nothing sent", VENUE);
        Ok(())
    }
}
