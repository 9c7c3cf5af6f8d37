//! XMPP extension protocols for an established finch client session.
//!
//! Implements two extensions over an already-authenticated stanza stream:
//!
//! - **XEP-0199 ping** — liveness checks in both directions: outbound
//!   requests with correlated replies, and inbound requests answered with
//!   a result stanza.
//! - **XEP-0060 pubsub** — subscribe/unsubscribe, item queries, and
//!   decoding of event notifications whose item payloads are carried
//!   through verbatim.
//!
//! The connection itself (session establishment, auth, the raw stream
//! reader and writer) lives outside this crate. Two boundaries connect to
//! it:
//!
//! - [`StanzaSink`] — the ordered outbound writer the connection layer
//!   implements;
//! - [`InboundStanza`] — the typed shapes the stream reader classifies
//!   inbound stanzas into before calling
//!   [`ClientSession::handle_inbound`].
//!
//! Requests and replies are correlated through a pending-request table
//! keyed by minted identifiers; see [`pending`]. No operation blocks
//! waiting for a reply.

pub mod inbound;
pub mod pending;
pub mod pubsub;
pub mod stanza;
pub mod text;

mod error;
mod idgen;
mod ping;
mod session;
mod sink;

pub use error::XepError;
pub use idgen::{IdSource, RandomIds, SequentialIds};
pub use inbound::{Dispatch, InboundStanza, ReplyPayload};
pub use pending::Category;
pub use pubsub::{
    PubsubEvent, PubsubItem, PubsubItems, PubsubSubscription, PubsubUnsubscription,
};
pub use session::ClientSession;
pub use sink::{StanzaSink, VecSink};
