//! Typed inbound schema.
//!
//! The stream reader classifies each inbound stanza into one of these
//! shapes before handing it to [`ClientSession::handle_inbound`]. The set
//! is closed and matched exhaustively: anything the reader cannot classify
//! arrives as [`InboundStanza::Unknown`] and is ignored explicitly rather
//! than falling through tag-sniffing heuristics.
//!
//! [`ClientSession::handle_inbound`]: crate::ClientSession::handle_inbound

use serde::{Deserialize, Serialize};

use crate::pubsub::{
    EventWire, ItemsWire, PubsubEvent, PubsubItems, PubsubSubscription, PubsubUnsubscription,
    SubscriptionWire,
};

/// One inbound stanza, structurally parsed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum InboundStanza {
    /// A peer is checking whether we are alive. `id` is the peer's own
    /// request id and is echoed back verbatim.
    PingRequest { id: String, from: String },
    /// A reply (`type='result'` or `type='error'`) that may belong to one
    /// of our in-flight requests.
    Reply {
        id: String,
        payload: Option<ReplyPayload>,
    },
    /// An event notification in the pubsub#event namespace.
    Event(EventWire),
    /// Anything else sharing the connection. Not ours to interpret.
    Unknown,
}

/// Structural payload carried inside a reply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ReplyPayload {
    Items(ItemsWire),
    Subscription(SubscriptionWire),
}

/// What handling one inbound stanza amounted to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Dispatch {
    /// An inbound ping was answered; the result stanza went to `to`.
    PongSent { to: String },
    /// A reply resolved one of our outstanding pings.
    PingAcknowledged,
    /// The service confirmed a subscription.
    SubscriptionConfirmed(PubsubSubscription),
    /// The service rejected a subscribe request; `errors` is populated.
    SubscriptionRejected(PubsubSubscription),
    /// The service confirmed an unsubscribe.
    UnsubscribeConfirmed(PubsubUnsubscription),
    /// The service rejected an unsubscribe request; `errors` is populated.
    UnsubscribeRejected(PubsubUnsubscription),
    /// A reply to one of our items queries, decoded.
    ItemsReceived(PubsubItems),
    /// An event notification, decoded.
    Event(PubsubEvent),
    /// Not addressed to this subsystem: an unknown stanza, or a reply
    /// whose id matches nothing we have pending.
    Ignored,
}
