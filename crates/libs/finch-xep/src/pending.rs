//! Pending-request correlation state.
//!
//! One table keyed by request identifier, with the request category stored
//! per entry. The per-category separation matters for dispatch: a reply to
//! a subscribe request can never resolve an items query, even if both ids
//! were somehow equal. Entries for requests that are never answered stay
//! in the table until [`PendingRequests::sweep_expired`] or an explicit
//! cancel removes them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tokio::time::{Duration, Instant};

/// The four kinds of outbound request this crate correlates replies for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Ping,
    Subscribe,
    Unsubscribe,
    Items,
}

#[derive(Clone, Debug)]
struct PendingEntry {
    category: Category,
    issued_at: Instant,
}

/// Identifier → category table for in-flight requests.
#[derive(Debug, Default)]
pub struct PendingRequests {
    entries: BTreeMap<String, PendingEntry>,
}

impl PendingRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a freshly minted identifier. Returns `false` if the id was
    /// already pending (a collision; the existing entry is left untouched).
    pub fn register(&mut self, category: Category, id: &str) -> bool {
        if self.entries.contains_key(id) {
            log::warn!("pending: id collision on '{id}', keeping existing entry");
            return false;
        }
        self.entries.insert(
            id.to_string(),
            PendingEntry {
                category,
                issued_at: Instant::now(),
            },
        );
        true
    }

    /// Removes `id` if it is pending under exactly `category`. Returns
    /// whether it was. An id pending under a different category is left
    /// alone, so a misrouted reply cannot corrupt another operation.
    pub fn resolve(&mut self, category: Category, id: &str) -> bool {
        match self.entries.get(id) {
            Some(entry) if entry.category == category => {
                self.entries.remove(id);
                true
            }
            Some(entry) => {
                log::debug!(
                    "pending: reply for '{id}' matched category {:?}, not {category:?}",
                    entry.category
                );
                false
            }
            None => false,
        }
    }

    /// Removes `id` regardless of category, returning the category it was
    /// pending under. The only cancellation primitive: callers needing a
    /// bounded wait pair their own timer with this.
    pub fn cancel(&mut self, id: &str) -> Option<Category> {
        self.entries.remove(id).map(|entry| entry.category)
    }

    pub fn contains(&self, category: Category, id: &str) -> bool {
        self.entries
            .get(id)
            .is_some_and(|entry| entry.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn category_len(&self, category: Category) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.category == category)
            .count()
    }

    /// Drops entries older than `max_age`, returning the removed ids.
    /// Bounds table growth under permanently unanswered requests.
    pub fn sweep_expired(&mut self, max_age: Duration) -> Vec<String> {
        let now = Instant::now();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| now.duration_since(entry.issued_at) > max_age)
            .map(|(id, _)| id.clone())
            .collect();
        for id in &expired {
            self.entries.remove(id);
        }
        if !expired.is_empty() {
            log::debug!("pending: swept {} expired request(s)", expired.len());
        }
        expired
    }
}
