//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::PortError;
use domain_claims::error::{AttachmentError, ClaimError, SubmissionError};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Option<Vec<String>>,
    },

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            details: None,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            ApiError::Validation { message, details } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", message, details)
            }
            ApiError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large", msg, None)
            }
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg, None)
            }
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg, None)
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        let message = err.to_string();
        match err {
            ClaimError::Validation(v) => ApiError::Validation {
                message,
                details: Some(vec![v.field.to_string()]),
            },
            ClaimError::Attachment(AttachmentError::TooLarge { .. }) => {
                ApiError::PayloadTooLarge(message)
            }
            ClaimError::Attachment(AttachmentError::IndexOutOfRange { .. }) => {
                ApiError::NotFound(message)
            }
            ClaimError::Attachment(_) => ApiError::validation(message),
            ClaimError::Submission(SubmissionError::Rejected { field, .. }) => ApiError::Validation {
                message,
                details: Some(vec![field]),
            },
            ClaimError::Submission(SubmissionError::Port(e @ PortError::Rejected { .. })) => {
                ApiError::Validation {
                    message,
                    details: e.rejected_field_name().map(|field| vec![field.to_string()]),
                }
            }
            ClaimError::Submission(SubmissionError::PayloadTooLarge { .. }) => {
                ApiError::PayloadTooLarge(message)
            }
            ClaimError::Submission(e) if e.is_retryable() => ApiError::ServiceUnavailable(message),
            ClaimError::Submission(_) => ApiError::Internal(message),
            ClaimError::SubmissionInProgress
            | ClaimError::NotOnConfirmationStep { .. }
            | ClaimError::StaleSubmission { .. } => ApiError::Conflict(message),
            ClaimError::UnknownClaimType(_) | ClaimError::InvalidStep(_) => {
                ApiError::validation(message)
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        ApiError::Validation {
            message: errors.to_string(),
            details: Some(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_claims::error::ValidationError;
    use domain_claims::step::WizardStep;

    fn status_of(err: ClaimError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_claim_error_status_mapping() {
        assert_eq!(
            status_of(ValidationError::new(WizardStep::ClaimType, "claim_type", "missing").into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(status_of(ClaimError::SubmissionInProgress), StatusCode::CONFLICT);
        assert_eq!(
            status_of(SubmissionError::Unavailable("down".into()).into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(SubmissionError::rejected("date", "malformed").into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(
                AttachmentError::TooLarge {
                    file_name: "a.jpg".into(),
                    size_bytes: 2,
                    limit_bytes: 1,
                }
                .into()
            ),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            status_of(AttachmentError::IndexOutOfRange { index: 4, len: 1 }.into()),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_backend_refusal_is_unprocessable() {
        let err = ApiError::from(ClaimError::from(SubmissionError::from(
            PortError::rejected_field("time", "Unreadable time"),
        )));
        match &err {
            ApiError::Validation { details, .. } => {
                assert_eq!(details.as_deref(), Some(&["time".to_string()][..]));
            }
            other => panic!("Expected Validation, got {other:?}"),
        }
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        assert_eq!(
            status_of(SubmissionError::from(PortError::connection("reset")).into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
