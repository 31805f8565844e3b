//! Transient user-facing notifications.

use serde::{Deserialize, Serialize};

/// Tone of a notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Action completed.
    Success,
    /// Action failed.
    Error,
    /// Guidance.
    Info,
}

/// One queued notification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Monotonic identifier.
    pub id: u64,
    /// Text shown to the user.
    pub message: String,
    /// Tone.
    pub kind: NoticeKind,
}

/// Queue of notices awaiting dismissal.
#[derive(Debug, Default)]
pub struct Notices {
    next_id: u64,
    items: Vec<Notice>,
}

impl Notices {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a notice and returns its identifier.
    pub fn push(&mut self, message: impl Into<String>, kind: NoticeKind) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notice {
            id,
            message: message.into(),
            kind,
        });
        id
    }

    /// Removes a notice. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|notice| notice.id != id);
        self.items.len() != before
    }

    /// Returns queued notices, oldest first.
    #[must_use]
    pub fn items(&self) -> &[Notice] {
        &self.items
    }

    /// Returns the most recent notice.
    #[must_use]
    pub fn latest(&self) -> Option<&Notice> {
        self.items.last()
    }
}
