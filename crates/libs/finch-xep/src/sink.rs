//! Outbound stanza boundary.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::XepError;

/// Ordered, append-only sink for rendered stanzas. The connection layer
/// implements this over its write half; writes must not interleave.
#[async_trait]
pub trait StanzaSink: Send {
    async fn write_stanza(&mut self, stanza: &str) -> Result<(), XepError>;
}

// One connection writer can back several extension handles.
#[async_trait]
impl<S: StanzaSink> StanzaSink for Arc<Mutex<S>> {
    async fn write_stanza(&mut self, stanza: &str) -> Result<(), XepError> {
        self.lock().await.write_stanza(stanza).await
    }
}

/// In-memory sink recording every stanza written. Test double.
#[derive(Debug, Default)]
pub struct VecSink {
    pub written: Vec<String>,
    /// When set, the next write fails with this message instead.
    pub fail_with: Option<String>,
}

#[async_trait]
impl StanzaSink for VecSink {
    async fn write_stanza(&mut self, stanza: &str) -> Result<(), XepError> {
        if let Some(message) = self.fail_with.take() {
            return Err(XepError::write(message));
        }
        self.written.push(stanza.to_string());
        Ok(())
    }
}
