//! Interaction flows driven by the terminal front end.
//!
//! Each flow owns its presentation state as an explicit state machine behind a
//! mutex that is released before the network call. A flow never has more than
//! one request outstanding: while a request is in flight the flow's control is
//! disabled and further submits are ignored.

mod delete;
mod health;
mod query;
mod upload;

#[cfg(test)]
pub(crate) mod fake;

pub use delete::{DeleteFlow, DeleteState, Prompter};
pub use health::HealthProbe;
pub use query::{KeyPress, QueryFlow, QueryState};
pub use upload::{UploadFlow, UploadState};

/// What happened to a submit action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// A request for this flow is already outstanding; nothing was done.
    Busy,
    /// The input was rejected before any request was issued.
    Invalid,
    /// The user declined the confirmation prompt.
    Declined,
    /// A request was issued and has resolved.
    Sent,
}
