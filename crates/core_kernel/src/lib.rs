//! Core Kernel - Foundational types shared by the claim declaration portal
//!
//! This crate provides the building blocks used by the domain and API crates:
//! - Strongly-typed identifiers for declarations, attachments and filed claims
//! - The kernel error type
//! - Port and adapter abstractions for external systems

pub mod identifiers;
pub mod error;
pub mod ports;

pub use identifiers::{ClaimId, DeclarationId, AttachmentId};
pub use error::CoreError;
pub use ports::{
    PortError, DomainPort, AdapterConfig, AdapterType, AdapterHealth,
    HealthCheckable, HealthCheckResult, OperationMetadata,
};
