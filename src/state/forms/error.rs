//! Error taxonomy for form interactions
//!
//! Every variant is recovered inside the form interaction that produced it:
//! the message is shown to the user and the form or wizard state is left as
//! it was before the failed operation.

use thiserror::Error;

/// A single field failed a synchronous rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Identifier of the offending field (e.g. `tags`, `url-2`)
    pub field: String,
    /// Human-readable violation message
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The server reports the value is already taken
    #[error("{0}")]
    RemoteConflict(String),

    /// The uniqueness request failed or timed out; handled like a conflict
    #[error("Could not verify availability, please try again later.")]
    Transport(String),

    #[error("You can have at most {max} {noun}.")]
    BoundExceeded { max: usize, noun: &'static str },

    #[error("At least one entry must remain.")]
    LastEntry,

    #[error("Entry {0} does not exist.")]
    NoSuchEntry(u32),

    #[error("A check is already in progress.")]
    CheckPending,

    /// The checked value was edited before its result came back
    #[error("Your details changed while they were being checked. Please try again.")]
    ChangedDuringCheck,

    #[error("This action is not available on the current step.")]
    NotOnStep,
}

impl FormError {
    /// Advisory errors are shown but never block a submission
    pub fn is_advisory(&self) -> bool {
        matches!(self, FormError::BoundExceeded { .. } | FormError::LastEntry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validation_error_displays_message_only() {
        let err = FormError::from(ValidationError::new("tags", "Separate tags with ','"));
        assert_eq!(err.to_string(), "Separate tags with ','");
    }

    #[test]
    fn test_transport_message_is_generic() {
        let err = FormError::Transport("connection refused".to_string());
        assert!(!err.to_string().contains("refused"));
    }

    #[test]
    fn test_bound_exceeded_is_advisory() {
        let err = FormError::BoundExceeded {
            max: 5,
            noun: "images",
        };
        assert!(err.is_advisory());
        assert_eq!(err.to_string(), "You can have at most 5 images.");
        assert!(!FormError::CheckPending.is_advisory());
        assert!(!FormError::ChangedDuringCheck.is_advisory());
    }
}
