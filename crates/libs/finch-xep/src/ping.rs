//! XEP-0199 liveness checks.

use crate::error::XepError;
use crate::pending::Category;
use crate::session::ClientSession;
use crate::sink::StanzaSink;
use crate::stanza;

impl<S: StanzaSink> ClientSession<S> {
    /// Pings from this client toward its own server. `jid` and `server`
    /// default to the session's jid and domain when omitted.
    pub async fn ping_local(
        &self,
        jid: Option<&str>,
        server: Option<&str>,
    ) -> Result<String, XepError> {
        let from = jid.unwrap_or(self.jid());
        let to = server.unwrap_or(self.domain());
        self.register_and_send(Category::Ping, |id| stanza::ping_request(from, to, id))
            .await
    }

    /// Server-to-server liveness check; both addresses are explicit.
    pub async fn ping_remote(
        &self,
        from_server: &str,
        to_server: &str,
    ) -> Result<String, XepError> {
        self.register_and_send(Category::Ping, |id| {
            stanza::ping_request(from_server, to_server, id)
        })
        .await
    }

    /// Answers an inbound ping. The requester's `request_id` is echoed
    /// verbatim; nothing is registered, this is a response, not a request.
    pub async fn pong(&self, request_id: &str, requester: &str) -> Result<(), XepError> {
        self.send(&stanza::ping_result(requester, request_id)).await
    }
}
