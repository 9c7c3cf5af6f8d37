//! Request identifier generation.
//!
//! Injected as an explicit collaborator so tests can substitute a
//! deterministic sequence.

use std::sync::atomic::{AtomicU64, Ordering};

use rand_core::{OsRng, RngCore};

/// Source of request identifiers. Tokens must be collision-resistant
/// within the lifetime of a session.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> String;
}

/// Default source: 16 random bytes, hex-encoded.
#[derive(Debug, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&self) -> String {
        let mut bytes = [0u8; 16];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

/// Deterministic source for tests: `{prefix}-0`, `{prefix}-1`, …
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}
