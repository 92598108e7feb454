//! Error Types
//!
//! Failures a control can run into between a gesture and its settled state.

use thiserror::Error;

use crate::registry::{ControlId, EventKind};

/// Why an action did not succeed.
///
/// All three variants surface to the user the same way: a transient failure label.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    /// The request never completed (network down, CORS, aborted by the browser)
    #[error("transport failure: {0}")]
    Transport(String),
    /// The server answered with `success: false`
    #[error("rejected by server: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),
    /// The body was not JSON or lacked the `success` flag
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ActionError {
    /// Server-provided message, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            ActionError::Rejected(message) => message.as_deref(),
            _ => None,
        }
    }
}

/// A request could not be read off the control's current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("no `data-{0}` attribute on the control or its ancestors")]
    MissingData(String),
    #[error("no `{0}` field inside the control")]
    MissingField(String),
    #[error("control has no value")]
    MissingValue,
    #[error("quantity `{0}` is not a non-negative integer")]
    BadQuantity(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("control `{control}` already has a {kind} handler")]
    AlreadyBound { control: ControlId, kind: EventKind },
}
