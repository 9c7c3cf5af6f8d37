//! Wire-format stanza rendering.
//!
//! Pure functions of their inputs; every caller-supplied field is escaped
//! before embedding, so output is well-formed by construction. Stanzas are
//! newline-terminated so the stream writer can flush them line-wise.

use crate::text::escape;

pub const NS_PING: &str = "urn:xmpp:ping";
pub const NS_PUBSUB: &str = "http://jabber.org/protocol/pubsub";
pub const NS_PUBSUB_EVENT: &str = "http://jabber.org/protocol/pubsub#event";

/// Generic iq wrapper. `body` must already be well-formed markup.
pub fn iq(from: &str, to: &str, id: &str, kind: &str, body: &str) -> String {
    format!(
        "<iq from='{}' to='{}' id='{}' type='{}'>{}</iq>\n",
        escape(from),
        escape(to),
        escape(id),
        escape(kind),
        body
    )
}

/// XEP-0199 ping request.
pub fn ping_request(from: &str, to: &str, id: &str) -> String {
    format!(
        "<iq from='{}' to='{}' id='{}' type='get'><ping xmlns='{}'/></iq>\n",
        escape(from),
        escape(to),
        escape(id),
        NS_PING
    )
}

/// Result for an inbound ping, reusing the requester's id verbatim.
pub fn ping_result(to: &str, id: &str) -> String {
    format!(
        "<iq type='result' to='{}' id='{}'/>\n",
        escape(to),
        escape(id)
    )
}

/// Wraps a pubsub body in the XEP-0060 envelope.
pub fn pubsub(body: &str) -> String {
    format!("<pubsub xmlns='{NS_PUBSUB}'>{body}</pubsub>")
}

pub fn subscribe_body(node: &str, jid: &str) -> String {
    format!(
        "<subscribe node='{}' jid='{}'/>",
        escape(node),
        escape(jid)
    )
}

pub fn unsubscribe_body(node: &str, jid: &str) -> String {
    format!(
        "<unsubscribe node='{}' jid='{}'/>",
        escape(node),
        escape(jid)
    )
}

/// Query for the most recent items of a node.
pub fn items_all_body(node: &str) -> String {
    format!("<items node='{}'/>", escape(node))
}

/// Query for one item of a node by item id.
pub fn items_one_body(node: &str, item_id: &str) -> String {
    format!(
        "<items node='{}'><item id='{}'/></items>",
        escape(node),
        escape(item_id)
    )
}
