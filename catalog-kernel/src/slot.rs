//! The single "current displayed result".

use catalog_adapters::CompletionResult;
use catalog_primitives::InvocationId;
use tracing::debug;

use crate::invocation::{Invocation, InvocationState, Resolution};

/// Result currently on screen.
#[derive(Debug)]
pub struct DisplayedResult {
    /// Invocation that produced it.
    pub id: InvocationId,
    /// Issue order of that invocation.
    pub sequence: u64,
    /// Terminal state of that invocation.
    pub state: InvocationState,
    /// Generated text or the normalised error.
    pub outcome: CompletionResult<String>,
}

/// Holds whichever result resolved last.
///
/// Every resolution overwrites the slot, even one issued before the result
/// already shown. [`ResultSlot::is_stale`] lets a caller detect that case and
/// ignore it if it wants to. Issue order travels with each [`Invocation`], so
/// the slot keeps nothing for invocations that are dropped unresolved.
#[derive(Debug, Default)]
pub struct ResultSlot {
    next_sequence: u64,
    current: Option<DisplayedResult>,
}

impl ResultSlot {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a fresh idle invocation stamped with the next issue order.
    pub fn issue(&mut self) -> Invocation {
        let invocation = Invocation::sequenced(InvocationId::random(), self.next_sequence);
        self.next_sequence += 1;
        invocation
    }

    /// Returns `true` if `sequence` was issued before the result now displayed.
    #[must_use]
    pub fn is_stale(&self, sequence: u64) -> bool {
        self.current
            .as_ref()
            .is_some_and(|shown| sequence < shown.sequence)
    }

    /// Stores a resolution, replacing whatever was shown.
    pub fn resolve(&mut self, resolution: Resolution) -> &DisplayedResult {
        if self.is_stale(resolution.sequence) {
            debug!(invocation = %resolution.id, "older invocation resolved last; overwriting");
        }
        self.current.insert(DisplayedResult {
            id: resolution.id,
            sequence: resolution.sequence,
            state: resolution.state,
            outcome: resolution.outcome,
        })
    }

    /// Returns the displayed result, if any.
    #[must_use]
    pub fn current(&self) -> Option<&DisplayedResult> {
        self.current.as_ref()
    }

    /// Returns the displayed text when the last resolution succeeded.
    #[must_use]
    pub fn current_text(&self) -> Option<&str> {
        self.current()
            .and_then(|displayed| displayed.outcome.as_deref().ok())
    }

    /// Clears the slot, e.g. when the playground closes.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
