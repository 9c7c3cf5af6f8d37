use serde::{Deserialize, Serialize};

/// Errors surfaced by extension operations.
///
/// Stanza construction is infallible; only the outbound write and the
/// decoding of inbound envelopes can fail.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum XepError {
    #[error("write failed: {message}")]
    Write { message: String },

    #[error("decode failed: {message}")]
    Decode { message: String },
}

impl XepError {
    /// Convenience constructor for `Write`.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }

    /// Convenience constructor for `Decode`.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
