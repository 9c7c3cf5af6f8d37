//! The client session handle: owns the outbound sink, the local identity,
//! and the pending-request table, and is the single inbound dispatch
//! point.
//!
//! Outbound operations never block on a reply: they mint an id, record it,
//! write the stanza, and return the id. "Wait for this reply" semantics
//! belong to the caller, who can pair the returned id with a timer and
//! [`ClientSession::cancel`].

use std::sync::Mutex as StdMutex;

use tokio::sync::Mutex;
use tokio::time::Duration;

use crate::error::XepError;
use crate::idgen::{IdSource, RandomIds};
use crate::inbound::{Dispatch, InboundStanza, ReplyPayload};
use crate::pending::{Category, PendingRequests};
use crate::pubsub::{self, PubsubItems, PubsubSubscription, SubscriptionWire};
use crate::sink::StanzaSink;

pub struct ClientSession<S: StanzaSink> {
    // tokio mutex: guards are held across the write await, serializing
    // stanza writes. The pending table uses a std mutex and is never
    // locked across an await.
    sink: Mutex<S>,
    jid: String,
    domain: String,
    ids: Box<dyn IdSource>,
    pending: StdMutex<PendingRequests>,
}

impl<S: StanzaSink> ClientSession<S> {
    /// A session over `sink` for the given local jid and server domain,
    /// with random request ids.
    pub fn new(sink: S, jid: impl Into<String>, domain: impl Into<String>) -> Self {
        Self::with_id_source(sink, jid, domain, Box::new(RandomIds))
    }

    /// Same as [`ClientSession::new`] with an injected id source.
    pub fn with_id_source(
        sink: S,
        jid: impl Into<String>,
        domain: impl Into<String>,
        ids: Box<dyn IdSource>,
    ) -> Self {
        Self {
            sink: Mutex::new(sink),
            jid: jid.into(),
            domain: domain.into(),
            ids,
            pending: StdMutex::new(PendingRequests::new()),
        }
    }

    pub fn jid(&self) -> &str {
        &self.jid
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Consumes the session, returning the sink.
    pub fn into_sink(self) -> S {
        self.sink.into_inner()
    }

    pub(crate) async fn send(&self, stanza: &str) -> Result<(), XepError> {
        self.sink.lock().await.write_stanza(stanza).await
    }

    /// Mints a fresh id, records it under `category`, renders the stanza
    /// with `build(&id)` and writes it. Returns the id. If the write
    /// fails the id stays registered; a caller that gives up on the
    /// request should [`ClientSession::cancel`] it.
    pub(crate) async fn register_and_send<F>(
        &self,
        category: Category,
        build: F,
    ) -> Result<String, XepError>
    where
        F: FnOnce(&str) -> String,
    {
        let id = self.ids.next_id();
        self.pending
            .lock()
            .expect("pending mutex poisoned")
            .register(category, &id);
        let rendered = build(&id);
        self.send(&rendered).await?;
        Ok(id)
    }

    /// Removes `id` from the pending table regardless of category. The
    /// cancellation primitive for callers implementing their own timeout.
    pub fn cancel(&self, id: &str) -> Option<Category> {
        self.pending
            .lock()
            .expect("pending mutex poisoned")
            .cancel(id)
    }

    /// Drops pending entries older than `max_age`, returning their ids.
    pub fn sweep_expired(&self, max_age: Duration) -> Vec<String> {
        self.pending
            .lock()
            .expect("pending mutex poisoned")
            .sweep_expired(max_age)
    }

    pub fn is_pending(&self, category: Category, id: &str) -> bool {
        self.pending
            .lock()
            .expect("pending mutex poisoned")
            .contains(category, id)
    }

    pub fn pending_count(&self, category: Category) -> usize {
        self.pending
            .lock()
            .expect("pending mutex poisoned")
            .category_len(category)
    }

    /// Handles one inbound stanza. Ping requests are answered on the
    /// spot; replies are matched against the pending table; events are
    /// decoded. Stanzas that are not ours come back as
    /// [`Dispatch::Ignored`].
    pub async fn handle_inbound(&self, stanza: InboundStanza) -> Result<Dispatch, XepError> {
        match stanza {
            InboundStanza::PingRequest { id, from } => {
                self.pong(&id, &from).await?;
                Ok(Dispatch::PongSent { to: from })
            }
            InboundStanza::Reply { id, payload } => self.resolve_reply(&id, payload),
            InboundStanza::Event(wire) => Ok(Dispatch::Event(pubsub::decode_event(wire)?)),
            InboundStanza::Unknown => Ok(Dispatch::Ignored),
        }
    }

    fn resolve_reply(
        &self,
        id: &str,
        payload: Option<ReplyPayload>,
    ) -> Result<Dispatch, XepError> {
        match payload {
            // A bare reply carries no category hint; the id lookup is the
            // discriminator.
            None => {
                let category = self
                    .pending
                    .lock()
                    .expect("pending mutex poisoned")
                    .cancel(id);
                match category {
                    Some(Category::Ping) => Ok(Dispatch::PingAcknowledged),
                    Some(Category::Subscribe) => Ok(Dispatch::SubscriptionConfirmed(
                        PubsubSubscription::default(),
                    )),
                    Some(Category::Unsubscribe) => Ok(Dispatch::UnsubscribeConfirmed(
                        PubsubSubscription::default(),
                    )),
                    Some(Category::Items) => Ok(Dispatch::ItemsReceived(PubsubItems::default())),
                    None => {
                        log::debug!("session({}): ignoring unmatched reply '{id}'", self.jid);
                        Ok(Dispatch::Ignored)
                    }
                }
            }
            Some(ReplyPayload::Items(wire)) => {
                let matched = self
                    .pending
                    .lock()
                    .expect("pending mutex poisoned")
                    .resolve(Category::Items, id);
                if matched {
                    Ok(Dispatch::ItemsReceived(pubsub::decode_items(wire)?))
                } else {
                    log::debug!(
                        "session({}): ignoring items reply '{id}' with no pending query",
                        self.jid
                    );
                    Ok(Dispatch::Ignored)
                }
            }
            Some(ReplyPayload::Subscription(wire)) => self.resolve_subscription_reply(id, wire),
        }
    }

    fn resolve_subscription_reply(
        &self,
        id: &str,
        wire: SubscriptionWire,
    ) -> Result<Dispatch, XepError> {
        let category = {
            let mut pending = self.pending.lock().expect("pending mutex poisoned");
            if pending.resolve(Category::Subscribe, id) {
                Some(Category::Subscribe)
            } else if pending.resolve(Category::Unsubscribe, id) {
                Some(Category::Unsubscribe)
            } else {
                None
            }
        };
        match category {
            Some(Category::Subscribe) => {
                let record = pubsub::decode_subscription(wire);
                if record.errors.is_empty() {
                    Ok(Dispatch::SubscriptionConfirmed(record))
                } else {
                    Ok(Dispatch::SubscriptionRejected(record))
                }
            }
            Some(Category::Unsubscribe) => {
                let record = pubsub::decode_subscription(wire);
                if record.errors.is_empty() {
                    Ok(Dispatch::UnsubscribeConfirmed(record))
                } else {
                    Ok(Dispatch::UnsubscribeRejected(record))
                }
            }
            _ => {
                log::debug!(
                    "session({}): ignoring subscription reply '{id}' with no pending request",
                    self.jid
                );
                Ok(Dispatch::Ignored)
            }
        }
    }
}
