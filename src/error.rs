use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Failures that abort a generation or scheduling call before any result is produced.
///
/// A game that cannot be placed is not an error: it is reported inside the
/// proposal as an unscheduled entry.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown {kind} id: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The batch write was rejected and nothing was applied.
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),
}

impl SchedulerError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        SchedulerError::InvalidInput(msg.into())
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        SchedulerError::NotFound { kind, id: id.into() }
    }

    /// Unknown ids are reported to callers the same way as malformed input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, SchedulerError::InvalidInput(_) | SchedulerError::NotFound { .. })
    }
}
