//! XEP-0060 publish/subscribe: domain model, event decoding, and the
//! session operations that drive subscriptions and item queries.
//!
//! Two layers, kept deliberately separate:
//!
//! - **wire shapes** ([`EventWire`], [`ItemsWire`], [`SubscriptionWire`]) —
//!   what the stream reader's structural parse hands us, attributes still
//!   optional, payloads still raw;
//! - **domain types** ([`PubsubEvent`], [`PubsubItems`],
//!   [`PubsubSubscription`]) — the API surface, with required fields
//!   resolved and item payloads preserved verbatim.
//!
//! Item payloads are application-defined content; this crate never parses
//! them, it only carries the bytes through.

use serde::{Deserialize, Serialize};

use crate::error::XepError;
use crate::pending::Category;
use crate::session::ClientSession;
use crate::sink::StanzaSink;
use crate::stanza;

/// One published item: identifier plus the raw payload bytes exactly as
/// they appeared inside the `<item>` element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubsubItem {
    pub id: String,
    #[serde(with = "serde_bytes")]
    pub payload: Vec<u8>,
}

/// A decoded event notification: the node it was published to, and its
/// items in publication order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubsubEvent {
    pub node: String,
    pub items: Vec<PubsubItem>,
}

/// The decoded payload of a reply to an items query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubsubItems {
    pub node: String,
    pub items: Vec<PubsubItem>,
}

/// Outcome of a subscribe or unsubscribe exchange. `errors` is non-empty
/// exactly when the service rejected the request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubsubSubscription {
    pub sub_id: String,
    pub jid: String,
    pub node: String,
    pub errors: Vec<String>,
}

pub type PubsubUnsubscription = PubsubSubscription;

/// Structural parse of one `<item>` inside an event or items reply.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemWire {
    pub id: String,
    #[serde(with = "serde_bytes")]
    pub payload: Vec<u8>,
}

/// Structural parse of an `<items>` element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsWire {
    pub node: Option<String>,
    pub items: Vec<ItemWire>,
}

/// Structural parse of an `<event>` notification envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWire {
    pub items: ItemsWire,
}

/// Structural parse of a `<subscription>` confirmation, or of the error
/// reply to a subscribe/unsubscribe request. `error: Some(conditions)`
/// marks an error-shaped reply; the vec holds the condition names in
/// document order and may be empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionWire {
    pub node: Option<String>,
    pub jid: Option<String>,
    pub sub_id: Option<String>,
    pub error: Option<Vec<String>>,
}

fn items_to_domain(items: Vec<ItemWire>) -> Vec<PubsubItem> {
    items
        .into_iter()
        .map(|item| PubsubItem {
            id: item.id,
            payload: item.payload,
        })
        .collect()
}

/// Decodes an event notification. Item order and payload bytes are
/// preserved; zero items is a valid (empty) event. A missing node
/// attribute is a structural defect and fails the decode.
pub fn decode_event(wire: EventWire) -> Result<PubsubEvent, XepError> {
    let node = wire
        .items
        .node
        .ok_or_else(|| XepError::decode("event items element missing node attribute"))?;
    Ok(PubsubEvent {
        node,
        items: items_to_domain(wire.items.items),
    })
}

/// Decodes the items payload of a reply to an items query.
pub fn decode_items(wire: ItemsWire) -> Result<PubsubItems, XepError> {
    let node = wire
        .node
        .ok_or_else(|| XepError::decode("items element missing node attribute"))?;
    Ok(PubsubItems {
        node,
        items: items_to_domain(wire.items),
    })
}

/// Decodes a subscription outcome. Error-shaped replies map one entry per
/// condition name into `errors`; an error reply naming no condition still
/// yields one entry, so failure is never indistinguishable from success.
pub fn decode_subscription(wire: SubscriptionWire) -> PubsubSubscription {
    let errors = match wire.error {
        Some(conditions) if conditions.is_empty() => vec!["unspecified error".to_string()],
        Some(conditions) => conditions,
        None => Vec::new(),
    };
    PubsubSubscription {
        sub_id: wire.sub_id.unwrap_or_default(),
        jid: wire.jid.unwrap_or_default(),
        node: wire.node.unwrap_or_default(),
        errors,
    }
}

impl<S: StanzaSink> ClientSession<S> {
    /// Subscribes this session's jid to `node` at the pubsub `service`.
    /// Returns the minted request id; the confirmation arrives later via
    /// [`ClientSession::handle_inbound`].
    pub async fn subscribe_node(&self, node: &str, service: &str) -> Result<String, XepError> {
        let body = stanza::pubsub(&stanza::subscribe_body(node, self.jid()));
        self.register_and_send(Category::Subscribe, |id| {
            stanza::iq(self.jid(), service, id, "set", &body)
        })
        .await
    }

    /// Removes this session's subscription to `node` at `service`.
    pub async fn unsubscribe_node(&self, node: &str, service: &str) -> Result<String, XepError> {
        let body = stanza::pubsub(&stanza::unsubscribe_body(node, self.jid()));
        self.register_and_send(Category::Unsubscribe, |id| {
            stanza::iq(self.jid(), service, id, "set", &body)
        })
        .await
    }

    /// Requests the most recent items published to `node`.
    pub async fn request_last_items(&self, node: &str, service: &str) -> Result<String, XepError> {
        let body = stanza::pubsub(&stanza::items_all_body(node));
        self.register_and_send(Category::Items, |id| {
            stanza::iq(self.jid(), service, id, "get", &body)
        })
        .await
    }

    /// Requests a single item of `node` by its item id.
    pub async fn request_item(
        &self,
        node: &str,
        service: &str,
        item_id: &str,
    ) -> Result<String, XepError> {
        let body = stanza::pubsub(&stanza::items_one_body(node, item_id));
        self.register_and_send(Category::Items, |id| {
            stanza::iq(self.jid(), service, id, "get", &body)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_item(id: &str, payload: &[u8]) -> ItemWire {
        ItemWire {
            id: id.to_string(),
            payload: payload.to_vec(),
        }
    }

    #[test]
    fn event_decode_preserves_order_and_bytes() {
        let wire = EventWire {
            items: ItemsWire {
                node: Some("news".into()),
                items: vec![
                    wire_item("first", b"<headline>a&b</headline>"),
                    wire_item("second", &[0xff, 0x00, 0x7f]),
                    wire_item("third", b""),
                ],
            },
        };

        let event = decode_event(wire).expect("decode");
        assert_eq!(event.node, "news");
        assert_eq!(
            event.items.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(),
            ["first", "second", "third"]
        );
        assert_eq!(event.items[0].payload, b"<headline>a&b</headline>");
        assert_eq!(event.items[1].payload, vec![0xff, 0x00, 0x7f]);
        assert!(event.items[2].payload.is_empty());
    }

    #[test]
    fn empty_event_is_not_an_error() {
        let wire = EventWire {
            items: ItemsWire {
                node: Some("news".into()),
                items: Vec::new(),
            },
        };
        let event = decode_event(wire).expect("decode");
        assert!(event.items.is_empty());
    }

    #[test]
    fn event_without_node_fails_decode() {
        let wire = EventWire {
            items: ItemsWire {
                node: None,
                items: vec![wire_item("a", b"x")],
            },
        };
        let err = decode_event(wire).expect_err("missing node");
        assert!(matches!(err, XepError::Decode { .. }));
    }

    #[test]
    fn subscription_success_has_no_errors() {
        let record = decode_subscription(SubscriptionWire {
            node: Some("news".into()),
            jid: Some("romeo@verona".into()),
            sub_id: Some("s1".into()),
            error: None,
        });
        assert_eq!(record.sub_id, "s1");
        assert!(record.errors.is_empty());
    }

    #[test]
    fn subscription_error_maps_one_entry_per_condition() {
        let record = decode_subscription(SubscriptionWire {
            node: Some("news".into()),
            error: Some(vec!["forbidden".into(), "not-allowed".into()]),
            ..SubscriptionWire::default()
        });
        assert_eq!(record.errors, ["forbidden", "not-allowed"]);
    }

    #[test]
    fn boundary_types_survive_serialization() {
        let event = PubsubEvent {
            node: "news".into(),
            items: vec![PubsubItem {
                id: "i1".into(),
                payload: vec![0xff, b'<', 0x00],
            }],
        };
        let json = serde_json::to_string(&event).expect("serialize");
        let back: PubsubEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, event);
    }

    #[test]
    fn bare_error_reply_still_reads_as_failure() {
        let record = decode_subscription(SubscriptionWire {
            error: Some(Vec::new()),
            ..SubscriptionWire::default()
        });
        assert_eq!(record.errors, ["unspecified error"]);
    }
}
