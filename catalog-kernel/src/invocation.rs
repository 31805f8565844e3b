//! Per-request state machine: `Idle -> Requesting -> (Succeeded | Failed)`.

use catalog_adapters::{CompletionClient, CompletionOptions, CompletionResult};
use catalog_primitives::InvocationId;
use thiserror::Error;
use tracing::debug;

/// States an invocation passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationState {
    /// Created, nothing sent yet.
    Idle,
    /// Waiting for the single round trip.
    Requesting,
    /// Resolved with text.
    Succeeded,
    /// Resolved with an error.
    Failed,
}

impl InvocationState {
    /// Returns `true` once the invocation has resolved either way.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Events that drive an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationEvent {
    /// The request was sent.
    Dispatch,
    /// The response carried text.
    Resolve,
    /// The request failed.
    Reject,
}

/// Errors emitted by the state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvocationError {
    /// Transition was not permitted from the current state.
    #[error("invalid invocation transition from {from:?} via {event:?} for {id}")]
    InvalidTransition {
        /// Invocation whose transition failed.
        id: InvocationId,
        /// State prior to the attempted transition.
        from: InvocationState,
        /// Event that triggered the failure.
        event: InvocationEvent,
    },
}

/// Result alias for invocation operations.
pub type InvocationResult<T> = Result<T, InvocationError>;

/// One completion attempt. Terminal states are final; there is no retry.
#[derive(Debug, Clone, Copy)]
pub struct Invocation {
    id: InvocationId,
    sequence: u64,
    state: InvocationState,
}

/// Outcome of a finished invocation.
#[derive(Debug)]
pub struct Resolution {
    /// Invocation that produced the outcome.
    pub id: InvocationId,
    /// Issue order of that invocation.
    pub sequence: u64,
    /// Terminal state reached.
    pub state: InvocationState,
    /// Generated text or the normalised error.
    pub outcome: CompletionResult<String>,
}

impl Invocation {
    /// Creates an idle invocation with issue order zero.
    #[must_use]
    pub const fn new(id: InvocationId) -> Self {
        Self::sequenced(id, 0)
    }

    /// Creates an idle invocation with an explicit issue order.
    #[must_use]
    pub const fn sequenced(id: InvocationId, sequence: u64) -> Self {
        Self {
            id,
            sequence,
            state: InvocationState::Idle,
        }
    }

    /// Returns the identifier.
    #[must_use]
    pub const fn id(&self) -> InvocationId {
        self.id
    }

    /// Returns the issue order.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> InvocationState {
        self.state
    }

    /// Applies an event, returning the resulting state.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError::InvalidTransition`] when the event is not
    /// allowed from the current state.
    pub fn transition(&mut self, event: InvocationEvent) -> InvocationResult<InvocationState> {
        let next = match (self.state, event) {
            (InvocationState::Idle, InvocationEvent::Dispatch) => InvocationState::Requesting,
            (InvocationState::Requesting, InvocationEvent::Resolve) => InvocationState::Succeeded,
            (InvocationState::Requesting, InvocationEvent::Reject) => InvocationState::Failed,
            (from, event) => {
                return Err(InvocationError::InvalidTransition {
                    id: self.id,
                    from,
                    event,
                });
            }
        };

        debug!(invocation = %self.id, from = ?self.state, to = ?next, ?event, "invocation transition");
        self.state = next;
        Ok(next)
    }

    /// Dispatches the request, awaits the single response, and resolves.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError::InvalidTransition`] if the invocation was
    /// not idle. Completion failures are reported in [`Resolution::outcome`].
    pub async fn run(
        mut self,
        client: &CompletionClient,
        prompt_text: &str,
        options: &CompletionOptions,
    ) -> InvocationResult<Resolution> {
        self.transition(InvocationEvent::Dispatch)?;
        let outcome = client.complete(prompt_text, options).await;
        let event = if outcome.is_ok() {
            InvocationEvent::Resolve
        } else {
            InvocationEvent::Reject
        };
        let state = self.transition(event)?;

        Ok(Resolution {
            id: self.id,
            sequence: self.sequence,
            state,
            outcome,
        })
    }
}
