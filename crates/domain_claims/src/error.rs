//! Claims domain errors

use thiserror::Error;

use core_kernel::PortError;

use crate::step::WizardStep;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Attachment(#[from] AttachmentError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("Submission is only possible from the confirmation step (current step: {current})")]
    NotOnConfirmationStep { current: u8 },

    #[error("Submission attempt {attempt} is no longer current")]
    StaleSubmission { attempt: u64 },

    #[error("Unknown claim type: {0}")]
    UnknownClaimType(String),

    #[error("Invalid wizard step: {0}")]
    InvalidStep(u8),
}

/// A step gate refused to let the wizard advance
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Step {} ({field}): {reason}", .step.number())]
pub struct ValidationError {
    pub step: WizardStep,
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(step: WizardStep, field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            step,
            field,
            reason: reason.into(),
        }
    }
}

/// A photo batch was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    #[error("{file_name} is {size_bytes} bytes, the limit is {limit_bytes} bytes")]
    TooLarge {
        file_name: String,
        size_bytes: u64,
        limit_bytes: u64,
    },

    #[error("{file_name} has unsupported content type {content_type}")]
    UnsupportedType {
        file_name: String,
        content_type: String,
    },

    #[error("{file_name} is empty")]
    Empty { file_name: String },

    #[error("No photo at position {index} (attached: {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// The submission gateway could not file the claim
///
/// Every variant leaves the draft untouched so the customer can retry.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Claims service unavailable: {0}")]
    Unavailable(String),

    #[error("Claim rejected ({field}): {message}")]
    Rejected { field: String, message: String },

    #[error("Payload of {size_bytes} bytes exceeds the {limit_bytes} byte limit")]
    PayloadTooLarge { size_bytes: u64, limit_bytes: u64 },

    #[error("Only {uploaded} of {total} photos were uploaded")]
    PartialUpload { uploaded: usize, total: usize },

    #[error("No answer from the claims service after {after_ms}ms")]
    Timeout { after_ms: u64 },

    #[error(transparent)]
    Port(#[from] PortError),
}

impl SubmissionError {
    pub fn rejected(field: impl Into<String>, message: impl Into<String>) -> Self {
        SubmissionError::Rejected {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if sending the same draft again may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            SubmissionError::Unavailable(_)
            | SubmissionError::PartialUpload { .. }
            | SubmissionError::Timeout { .. } => true,
            SubmissionError::Rejected { .. } | SubmissionError::PayloadTooLarge { .. } => false,
            SubmissionError::Port(err) => err.is_transient(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(SubmissionError::Unavailable("down".into()).is_retryable());
        assert!(SubmissionError::Timeout { after_ms: 100 }.is_retryable());
        assert!(SubmissionError::PartialUpload { uploaded: 1, total: 3 }.is_retryable());
        assert!(!SubmissionError::rejected("date", "malformed").is_retryable());
        assert!(!SubmissionError::PayloadTooLarge { size_bytes: 2, limit_bytes: 1 }.is_retryable());
        assert!(SubmissionError::from(PortError::connection("reset")).is_retryable());
        assert!(!SubmissionError::from(PortError::rejected("bad")).is_retryable());
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(WizardStep::Description, "description", "too short");
        assert_eq!(err.to_string(), "Step 3 (description): too short");
    }
}
