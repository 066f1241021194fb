//! Tests for kernel and port errors

use core_kernel::error::CoreError;
use core_kernel::ports::PortError;

#[test]
fn test_configuration_error_display() {
    let error = CoreError::configuration("wizard.max_photos", "must be at least 1");
    assert_eq!(
        error.to_string(),
        "Configuration error: wizard.max_photos must be at least 1"
    );
}

#[test]
fn test_invalid_identifier_display() {
    let error = CoreError::invalid_identifier("ClaimId", "CLM-42");
    assert!(error.to_string().contains("ClaimId"));
    assert!(error.to_string().contains("CLM-42"));
}

#[test]
fn test_port_error_connection_is_transient() {
    let error = PortError::connection("claims backend refused the connection");
    assert!(error.is_transient());
    assert!(error.to_string().contains("Connection error"));
}

#[test]
fn test_port_error_rejection_keeps_field() {
    let error = PortError::rejected_field("date", "Malformed date");

    match error {
        PortError::Rejected { field, .. } => assert_eq!(field.as_deref(), Some("date")),
        _ => panic!("Expected Rejected error"),
    }
}

#[test]
fn test_port_error_rejection_is_not_transient() {
    let error = PortError::rejected("Duplicate declaration");
    assert!(!error.is_transient());
    assert_eq!(error.to_string(), "Rejected: Duplicate declaration");
}
