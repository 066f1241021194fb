//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claim declaration test suite.
//!
//! # Modules
//!
//! - `fixtures`: Ready-made photos, dates and texts
//! - `builders`: Builders for drafts and for wizards parked on a given step
//! - `assertions`: Custom assertion helpers for wizard state
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
