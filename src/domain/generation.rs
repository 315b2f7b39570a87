//! Generation request contract
//!
//! Types exchanged with the generation service and the state a client
//! moves through while a request is outstanding.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use super::schema::Schema;

/// Record count used when the user has not chosen one.
pub const DEFAULT_RECORD_COUNT: i64 = 10;

/// Shown when a failed response carries no usable `error` field.
pub const FALLBACK_ERROR_MESSAGE: &str = "API error";

/// Shown for transport failures and unreadable success bodies.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate data. Check backend logs.";

/// A generated record. Its shape follows the schema at runtime, so the
/// client keeps it as untyped JSON.
pub type Record = Value;

/// Immutable snapshot of a schema plus the number of records wanted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub schema: Arc<Schema>,
    pub count: i64,
}

impl GenerationRequest {
    pub fn new(schema: Arc<Schema>, count: i64) -> Self {
        Self { schema, count }
    }
}

/// Lifecycle of a generation request.
///
/// `Idle -> Submitting -> (Succeeded | Failed)`; a new submission may start
/// from any state except `Submitting`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed { message: String },
}

impl GenerationState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, GenerationState::Submitting)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GenerationState::Succeeded | GenerationState::Failed { .. })
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            GenerationState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Errors produced while talking to the generation service.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Non-success status. `message` is the service's `error` field, or
    /// [`FALLBACK_ERROR_MESSAGE`] when the body could not be read.
    #[error("Generation service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response body: {0}")]
    MalformedBody(String),
}

impl GenerationError {
    /// Text shown to the user. Service messages are passed through
    /// verbatim; everything else gets the generic message.
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::Service { message, .. } => message.clone(),
            GenerationError::Transport(_) | GenerationError::MalformedBody(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

/// Reasons a submission is refused before any request is issued.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("Cannot generate records for an empty schema")]
    EmptySchema,

    #[error("A generation request is already in flight")]
    InFlight,
}

/// The remote generation service.
#[async_trait]
pub trait GenerationPort: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Record>, GenerationError>;
}
