use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use log::debug;
use mafia_core::{
    events::{ClientEvent, InboundMessage, OutboundMessage},
    GameError, GameResult,
};
use serde_json::Value;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Connection to the game server.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Makes the returned handle the only receiver of inbound events.
    fn subscribe(&self) -> Subscription;

    async fn emit(&self, event: ClientEvent) -> GameResult<()>;
}

/// Inbound event stream. Dropping it unsubscribes.
pub struct Subscription {
    receiver: UnboundedReceiver<InboundMessage>,
}

impl Subscription {
    pub fn new(receiver: UnboundedReceiver<InboundMessage>) -> Self {
        Subscription { receiver }
    }

    pub async fn recv(&mut self) -> Option<InboundMessage> {
        self.receiver.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.receiver.close();
        debug!("Subscription released");
    }
}

#[derive(Default)]
struct Inbox {
    subscriber: Option<UnboundedSender<InboundMessage>>,
    backlog: VecDeque<InboundMessage>,
    closed: bool,
}

type SharedInbox = Arc<Mutex<Inbox>>;

fn lock(inbox: &SharedInbox) -> MutexGuard<'_, Inbox> {
    inbox.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory transport. Messages pushed while nobody is subscribed are kept
/// and delivered to the next subscriber.
pub struct ChannelTransport {
    inbox: SharedInbox,
    outbound: UnboundedSender<OutboundMessage>,
}

/// The server side of a [`ChannelTransport`].
pub struct ServerHandle {
    inbox: SharedInbox,
    outbound: UnboundedReceiver<OutboundMessage>,
}

impl ChannelTransport {
    pub fn pair() -> (ChannelTransport, ServerHandle) {
        let inbox = SharedInbox::default();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        (
            ChannelTransport {
                inbox: Arc::clone(&inbox),
                outbound: outbound_tx,
            },
            ServerHandle {
                inbox,
                outbound: outbound_rx,
            },
        )
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inbox = lock(&self.inbox);
        while let Some(message) = inbox.backlog.pop_front() {
            // rx is alive in this scope
            let _ = tx.send(message);
        }
        if inbox.closed {
            inbox.subscriber = None;
        } else if inbox.subscriber.replace(tx).is_some() {
            debug!("Replacing previous subscription");
        }
        Subscription::new(rx)
    }

    async fn emit(&self, event: ClientEvent) -> GameResult<()> {
        self.outbound
            .send(event.to_message())
            .map_err(|_| GameError::TransportClosed)
    }
}

impl ServerHandle {
    pub fn push(&self, message: InboundMessage) -> GameResult<()> {
        let mut inbox = lock(&self.inbox);
        if inbox.closed {
            return Err(GameError::TransportClosed);
        }
        let message = match inbox.subscriber.take() {
            Some(subscriber) => match subscriber.send(message) {
                Ok(()) => {
                    inbox.subscriber = Some(subscriber);
                    return Ok(());
                }
                Err(mpsc::error::SendError(message)) => message,
            },
            None => message,
        };
        inbox.backlog.push_back(message);
        Ok(())
    }

    pub fn push_event(&self, event: &str, payload: Value) -> GameResult<()> {
        self.push(InboundMessage::new(event, payload))
    }

    /// Hangs up: the subscriber sees the end of the stream after the backlog.
    pub fn close(&self) {
        let mut inbox = lock(&self.inbox);
        inbox.closed = true;
        inbox.subscriber = None;
    }

    pub fn is_subscribed(&self) -> bool {
        lock(&self.inbox)
            .subscriber
            .as_ref()
            .map(|s| !s.is_closed())
            .unwrap_or(false)
    }

    pub async fn next_emitted(&mut self) -> Option<OutboundMessage> {
        self.outbound.recv().await
    }

    pub fn try_emitted(&mut self) -> Option<OutboundMessage> {
        self.outbound.try_recv().ok()
    }
}
