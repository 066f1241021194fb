//! Claim Declaration Domain
//!
//! This crate implements the customer-facing claim declaration wizard: a
//! five-step form whose forward moves are gated per step, a bounded list of
//! photo attachments, and submission of the completed draft through a
//! [`SubmissionGateway`](gateway::SubmissionGateway).
//!
//! # Wizard Lifecycle
//!
//! ```text
//! Type -> Date & Location -> Description -> Photos -> Confirmation -> Submitting
//!   ^                                                                      |
//!   +---------------------------- filed -----------------------------------+
//! ```

pub mod catalog;
pub mod step;
pub mod draft;
pub mod attachments;
pub mod validation;
pub mod gateway;
pub mod claim;
pub mod wizard;
pub mod error;

pub use catalog::{ClaimCategory, ClaimType};
pub use step::{WizardPhase, WizardStep};
pub use draft::{ClaimDraft, DraftSummary, PhotoSummary};
pub use attachments::{AttachOutcome, AttachmentLimits, PhotoAttachment, PhotoAttachments, PhotoUpload};
pub use validation::{can_advance, validate_step, WizardRules};
pub use gateway::{ClaimSubmission, SimulatedSubmissionGateway, SubmissionGateway, SubmissionReceipt};
pub use claim::{ClaimStatus, FiledClaim};
pub use wizard::{SubmissionTicket, WizardController, WizardNotification, WizardState, WizardView};
pub use error::{AttachmentError, ClaimError, SubmissionError, ValidationError};
