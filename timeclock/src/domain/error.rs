use thiserror::Error;

/// User-action ordering errors raised by the session coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session already running")]
    AlreadyRunning,
    #[error("no session running")]
    NotRunning,
    #[error("session still running")]
    StillRunning,
    #[error("no stopped session to submit")]
    NothingToSubmit,
    #[error("user profile not available")]
    MissingProfile,
}

impl SessionError {
    /// Corrective instruction suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::AlreadyRunning => "Already timed in. Please time out before timing in again.",
            Self::NotRunning => "Please click Time In before Time Out.",
            Self::StillRunning => "Please time out before submitting the timesheet.",
            Self::NothingToSubmit => {
                "Nothing to submit. Please Time In and Time Out before saving a timesheet."
            }
            Self::MissingProfile => {
                "User ID not available. Please create a profile or log in again."
            }
        }
    }
}

/// Errors from a key/value persistence backend.
#[derive(Debug, Error)]
pub enum KeyValueError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("{0}")]
    Backend(String),
}

/// Errors returned by the remote timesheet storage port.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Access denied. Insufficient permissions.")]
    AccessDenied,
    #[error("{status} - {body}")]
    Rejected { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors that can occur while submitting a completed session.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Ordering(#[from] SessionError),
    #[error("{0}")]
    Validation(String),
    #[error("Access denied. Insufficient permissions.")]
    AccessDenied,
    #[error("Failed to save timesheet: {status} - {body}")]
    Rejected { status: u16, body: String },
    #[error("Failed to save timesheet: {0}")]
    Transport(String),
    #[error("submission task failed: {0}")]
    Aborted(String),
}

impl SubmissionError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<StorageError> for SubmissionError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::AccessDenied => Self::AccessDenied,
            StorageError::Rejected { status, body } => Self::Rejected { status, body },
            StorageError::Transport(msg) => Self::Transport(msg),
            StorageError::InvalidResponse(msg) => Self::Transport(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_storage_error_is_surfaced_verbatim() {
        let err: SubmissionError = StorageError::Rejected {
            status: 400,
            body: "{\"error\":\"bad shift\"}".to_string(),
        }
        .into();

        assert_eq!(
            err.to_string(),
            "Failed to save timesheet: 400 - {\"error\":\"bad shift\"}"
        );
    }

    #[test]
    fn access_denied_keeps_its_own_message() {
        let err: SubmissionError = StorageError::AccessDenied.into();
        assert_eq!(err.to_string(), "Access denied. Insufficient permissions.");
    }

    #[test]
    fn ordering_errors_have_corrective_messages() {
        assert!(SessionError::NotRunning.user_message().contains("Time In"));
        assert!(SessionError::AlreadyRunning
            .user_message()
            .contains("time out"));
        assert!(SessionError::NothingToSubmit
            .user_message()
            .contains("Time Out"));
    }
}
