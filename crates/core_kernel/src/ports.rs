//! Ports and Adapters Infrastructure
//!
//! Foundational types for the hexagonal layout used by the domain crates.
//! A domain defines a port trait (for claims, the submission gateway) that
//! extends the marker traits here; adapters implement it either in-process
//! (the simulated gateway) or against a remote system of record.
//!
//! ```text
//!   WizardController ──▶ SubmissionGateway (port) ◀── SimulatedSubmissionGateway
//!                                                 ◀── remote claims backend
//! ```
//!
//! ```rust,ignore
//! #[async_trait]
//! pub trait SubmissionGateway: DomainPort + HealthCheckable {
//!     async fn submit(&self, submission: ClaimSubmission, metadata: Option<OperationMetadata>)
//!         -> Result<SubmissionReceipt, SubmissionError>;
//! }
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by an adapter talking to a remote system
///
/// Domain errors wrap this so callers can tell transport trouble (worth a
/// retry) from a definitive refusal.
#[derive(Debug, Error)]
pub enum PortError {
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{operation} timed out after {after_ms}ms")]
    Timeout { operation: String, after_ms: u64 },

    /// The remote system understood the request and refused it
    #[error("Rejected: {message}")]
    Rejected {
        message: String,
        field: Option<String>,
    },
}

impl PortError {
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        PortError::Rejected {
            message: message.into(),
            field: None,
        }
    }

    /// Refusal pinned to one field of the request
    pub fn rejected_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        PortError::Rejected {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Returns true if the same call may succeed later
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. } | PortError::Timeout { .. })
    }

    /// Field the remote system pinned a refusal to, if any
    pub fn rejected_field_name(&self) -> Option<&str> {
        match self {
            PortError::Rejected { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

/// Marker trait for all domain ports
///
/// Ports are shared behind `Arc<dyn ...>` across request handlers.
pub trait DomainPort: Send + Sync + 'static {}

/// Identity and switch of one adapter instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterConfig {
    pub adapter_id: String,
    pub adapter_type: AdapterType,
    /// A disabled adapter reports unhealthy and refuses work
    pub enabled: bool,
}

impl AdapterConfig {
    pub fn named(adapter_id: impl Into<String>, adapter_type: AdapterType) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            adapter_type,
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Where an adapter does its work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterType {
    /// In-process
    Internal,
    Mock,
}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    Unhealthy,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    pub latency_ms: u64,
    pub message: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl HealthCheckResult {
    pub fn new(adapter_id: impl Into<String>, status: AdapterHealth) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status,
            latency_ms: 0,
            message: None,
            checked_at: Utc::now(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_usable(&self) -> bool {
        self.status == AdapterHealth::Healthy
    }
}

/// Trait for adapters that support health checks
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}

/// Correlation data passed along with a port call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationMetadata {
    /// Identifies one attempt end to end, in logs on both sides
    pub correlation_id: String,
    pub issued_at: DateTime<Utc>,
    pub context: BTreeMap<String, String>,
}

impl OperationMetadata {
    pub fn new(correlation_id: impl Into<String>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            issued_at: Utc::now(),
            context: BTreeMap::new(),
        }
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn context(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_errors() {
        assert!(PortError::connection("reset by peer").is_transient());
        assert!(PortError::Timeout {
            operation: "submit_claim".to_string(),
            after_ms: 5000,
        }
        .is_transient());
        assert!(!PortError::rejected_field("date", "malformed").is_transient());
    }

    #[test]
    fn test_rejected_field_name() {
        assert_eq!(
            PortError::rejected_field("date", "malformed").rejected_field_name(),
            Some("date")
        );
        assert_eq!(PortError::rejected("duplicate").rejected_field_name(), None);
        assert_eq!(PortError::connection("reset").rejected_field_name(), None);
    }

    #[test]
    fn test_adapter_config() {
        let config = AdapterConfig::named("scripted-gateway", AdapterType::Mock);
        assert!(config.enabled);
        assert!(!config.disabled().enabled);
    }

    #[test]
    fn test_health_result() {
        let result = HealthCheckResult::new("gw", AdapterHealth::Healthy).with_message("idle");
        assert!(result.is_usable());
        assert_eq!(result.message.as_deref(), Some("idle"));
        assert!(!HealthCheckResult::new("gw", AdapterHealth::Unhealthy).is_usable());
    }

    #[test]
    fn test_operation_metadata() {
        let metadata = OperationMetadata::new("DCL-1#2").with_context("attempt", "2");
        assert_eq!(metadata.correlation_id, "DCL-1#2");
        assert_eq!(metadata.context("attempt"), Some("2"));
        assert_eq!(metadata.context("missing"), None);
    }
}
