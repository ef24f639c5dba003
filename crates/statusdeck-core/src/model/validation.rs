// ── Validation errors and consistency warnings ──
//
// ValidationError rejects an operation outright. ConsistencyWarning lets
// the operation through and hands the caller something to confirm.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::EntityId;

/// Why a model operation was rejected. Nothing was changed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("unknown service: {id}")]
    UnknownService { id: EntityId },

    #[error("unknown {kind}: {id}")]
    UnknownEntity { kind: &'static str, id: EntityId },

    #[error("uptime must be between 0 and 100, got {value}")]
    UptimeOutOfRange { value: f64 },

    #[error("{kind} cannot move from {from} to {to}")]
    TransitionNotAllowed {
        kind: &'static str,
        from: String,
        to: String,
    },

    #[error("{kind} cannot be created as {status}")]
    InvalidInitialStatus { kind: &'static str, status: String },

    #[error("maintenance needs a scheduled start and end")]
    MissingWindow,

    #[error("{kind} has no scheduled window")]
    UnexpectedWindow { kind: &'static str },

    #[error("maintenance window must end after it starts")]
    InvalidWindow,
}

/// Non-fatal condition surfaced alongside a successful operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsistencyWarning {
    /// An update was appended to an event that had already reached a
    /// terminal status (resolved, completed, cancelled).
    AppendToTerminal { event: EntityId, status: String },
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AppendToTerminal { event, status } => {
                write!(f, "{event} was already {status} before this update")
            }
        }
    }
}
