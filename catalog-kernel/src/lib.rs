//! Browsing session and completion orchestration for the prompt catalog.
//!
//! The view layer needs three things from this crate: the visible records for
//! the current criteria, a way to run one completion, and whether completions
//! are available at all. [`CatalogSession`] bundles them together with the
//! displayed-result slot and the notice queue.

#![warn(missing_docs, clippy::pedantic)]

pub mod agents;
mod invocation;
mod notice;
mod session;
mod slot;

#[cfg(test)]
mod test_support;

pub use agents::{
    AgentError, AgentResult, EssayEvaluationRequest, EvaluatorAgent, TutorAgent, TutorRequest,
};
pub use invocation::{
    Invocation, InvocationError, InvocationEvent, InvocationResult, InvocationState, Resolution,
};
pub use notice::{Notice, NoticeKind, Notices};
pub use session::{CatalogSession, Playground, ViewMode};
pub use slot::{DisplayedResult, ResultSlot};
