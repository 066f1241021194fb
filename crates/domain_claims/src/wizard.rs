//! Claim declaration wizard
//!
//! [`WizardController`] owns one declaration session: the draft, the current
//! step and the submission flag. Every change goes through its operations, so
//! the invariants hold whatever the caller does:
//!
//! - forward moves pass the gate of the step being left
//! - backward moves are free except on the first step
//! - submission only starts from the confirmation step, one at a time
//! - nothing is mutated while a submission is outstanding, so a failed
//!   submission can be retried with the exact same draft
//! - a successful submission clears the draft and returns to step 1
//!
//! Submission is split in two halves so that a caller holding the controller
//! behind a lock can release it while the gateway works:
//!
//! ```rust,ignore
//! let ticket = controller.begin_submission()?;
//! let outcome = gateway.submit(ticket.submission, None).await;
//! controller.complete_submission(ticket.attempt, outcome)?;
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use core_kernel::{ClaimId, DeclarationId, OperationMetadata};

use crate::attachments::{AttachOutcome, PhotoAttachment, PhotoUpload};
use crate::catalog::ClaimType;
use crate::draft::{ClaimDraft, DraftSummary};
use crate::error::{ClaimError, SubmissionError};
use crate::gateway::{ClaimSubmission, SubmissionGateway, SubmissionReceipt};
use crate::step::{WizardPhase, WizardStep};
use crate::validation::{validate_step, WizardRules};

/// Navigation state of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WizardState {
    pub current_step: WizardStep,
    pub is_submitting: bool,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: WizardStep::FIRST,
            is_submitting: false,
        }
    }
}

/// One-shot message for the customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WizardNotification {
    Submitted {
        claim_id: ClaimId,
        claim_number: String,
        title: String,
        message: String,
    },
    SubmissionFailed {
        message: String,
        retryable: bool,
    },
}

impl WizardNotification {
    fn submitted(receipt: &SubmissionReceipt) -> Self {
        WizardNotification::Submitted {
            claim_id: receipt.claim_id,
            claim_number: receipt.claim_number.clone(),
            title: "Déclaration envoyée !".to_string(),
            message: "Votre sinistre a été enregistré. Vous recevrez un email de confirmation."
                .to_string(),
        }
    }
}

/// Permission to run one submission attempt
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub attempt: u64,
    pub submission: ClaimSubmission,
}

/// Serializable snapshot of a session
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub declaration_id: DeclarationId,
    pub phase: WizardPhase,
    pub step: u8,
    pub step_title: &'static str,
    pub total_steps: usize,
    pub can_advance: bool,
    /// Why the current step gate is closed, if it is
    pub blocked_by: Option<String>,
    pub is_submitting: bool,
    pub photos_remaining: usize,
    pub draft: DraftSummary,
    pub updated_at: DateTime<Utc>,
}

/// Controller for one declaration session
#[derive(Debug)]
pub struct WizardController {
    id: DeclarationId,
    draft: ClaimDraft,
    state: WizardState,
    rules: WizardRules,
    attempt: u64,
    notifications: Vec<WizardNotification>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new(WizardRules::default())
    }
}

impl WizardController {
    pub fn new(rules: WizardRules) -> Self {
        let now = Utc::now();
        Self {
            id: DeclarationId::new(),
            draft: ClaimDraft::new(),
            state: WizardState::default(),
            rules,
            attempt: 0,
            notifications: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> DeclarationId {
        self.id
    }

    pub fn draft(&self) -> &ClaimDraft {
        &self.draft
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn rules(&self) -> &WizardRules {
        &self.rules
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current_step
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn phase(&self) -> WizardPhase {
        if self.state.is_submitting {
            WizardPhase::Submitting
        } else {
            WizardPhase::Editing(self.state.current_step)
        }
    }

    /// Whether the gate of the current step is open
    pub fn can_advance(&self) -> bool {
        validate_step(self.state.current_step, &self.draft, &self.rules).is_ok()
    }

    // ------------------------------------------------------------------
    // Field setters
    // ------------------------------------------------------------------

    /// Selects the claim type; does not move to the next step
    pub fn select_claim_type(&mut self, claim_type: ClaimType) -> Result<(), ClaimError> {
        self.edit(|draft| draft.claim_type = Some(claim_type))
    }

    pub fn set_date(&mut self, value: impl Into<String>) -> Result<(), ClaimError> {
        let value = value.into();
        self.edit(|draft| draft.date = value)
    }

    pub fn set_time(&mut self, value: impl Into<String>) -> Result<(), ClaimError> {
        let value = value.into();
        self.edit(|draft| draft.time = value)
    }

    pub fn set_location(&mut self, value: impl Into<String>) -> Result<(), ClaimError> {
        let value = value.into();
        self.edit(|draft| draft.location = value)
    }

    pub fn set_description(&mut self, value: impl Into<String>) -> Result<(), ClaimError> {
        let value = value.into();
        self.edit(|draft| draft.description = value)
    }

    // ------------------------------------------------------------------
    // Photos
    // ------------------------------------------------------------------

    pub fn add_photos(&mut self, uploads: Vec<PhotoUpload>) -> Result<AttachOutcome, ClaimError> {
        self.ensure_idle()?;
        let outcome = self.draft.photos.add_photos(uploads, &self.rules.attachments)?;
        self.touch();
        Ok(outcome)
    }

    pub fn remove_photo(&mut self, index: usize) -> Result<PhotoAttachment, ClaimError> {
        self.ensure_idle()?;
        let removed = self.draft.photos.remove_photo(index)?;
        self.touch();
        debug!(declaration_id = %self.id, index, "Photo removed");
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Moves one step forward if the current step is complete
    ///
    /// On the last step this is a no-op returning the last step.
    pub fn go_next(&mut self) -> Result<WizardStep, ClaimError> {
        self.ensure_idle()?;
        let current = self.state.current_step;
        if current.is_last() {
            return Ok(current);
        }
        if let Err(err) = validate_step(current, &self.draft, &self.rules) {
            debug!(declaration_id = %self.id, step = current.number(), field = err.field, "Step gate closed");
            return Err(err.into());
        }
        self.state.current_step = current.next();
        self.touch();
        debug!(declaration_id = %self.id, step = self.state.current_step.number(), "Advanced");
        Ok(self.state.current_step)
    }

    /// Moves one step back; a no-op on the first step
    pub fn go_previous(&mut self) -> Result<WizardStep, ClaimError> {
        self.ensure_idle()?;
        let current = self.state.current_step;
        if !current.is_first() {
            self.state.current_step = current.previous();
            self.touch();
        }
        Ok(self.state.current_step)
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Starts a submission attempt, snapshotting the draft
    pub fn begin_submission(&mut self) -> Result<SubmissionTicket, ClaimError> {
        self.ensure_idle()?;
        let current = self.state.current_step;
        if !current.is_last() {
            return Err(ClaimError::NotOnConfirmationStep {
                current: current.number(),
            });
        }

        self.attempt += 1;
        self.state.is_submitting = true;
        self.touch();
        info!(declaration_id = %self.id, attempt = self.attempt, "Submission started");

        Ok(SubmissionTicket {
            attempt: self.attempt,
            submission: ClaimSubmission::from_draft(self.id, &self.draft),
        })
    }

    /// Applies the gateway's answer to the attempt identified by `attempt`
    ///
    /// Success clears the draft and returns to step 1; failure leaves the
    /// draft and step untouched. Answers for an attempt that is no longer
    /// current (the session was abandoned or restarted) are discarded.
    pub fn complete_submission(
        &mut self,
        attempt: u64,
        outcome: Result<SubmissionReceipt, SubmissionError>,
    ) -> Result<SubmissionReceipt, ClaimError> {
        if !self.state.is_submitting || attempt != self.attempt {
            debug!(declaration_id = %self.id, attempt, current = self.attempt, "Discarding stale submission result");
            return Err(ClaimError::StaleSubmission { attempt });
        }
        self.state.is_submitting = false;

        match outcome {
            Ok(receipt) => {
                info!(
                    declaration_id = %self.id,
                    claim_number = %receipt.claim_number,
                    "Claim declaration submitted"
                );
                self.notifications.push(WizardNotification::submitted(&receipt));
                self.draft = ClaimDraft::new();
                self.state.current_step = WizardStep::FIRST;
                self.touch();
                Ok(receipt)
            }
            Err(err) => {
                let retryable = err.is_retryable();
                warn!(declaration_id = %self.id, retryable, error = %err, "Claim submission failed");
                self.notifications.push(WizardNotification::SubmissionFailed {
                    message: err.to_string(),
                    retryable,
                });
                self.touch();
                Err(err.into())
            }
        }
    }

    /// Runs a whole submission against `gateway`, bounded by the rules' timeout
    pub async fn submit(
        &mut self,
        gateway: &dyn SubmissionGateway,
    ) -> Result<SubmissionReceipt, ClaimError> {
        let ticket = self.begin_submission()?;
        let metadata = self.operation_metadata(ticket.attempt);
        let outcome = submit_with_timeout(gateway, ticket.submission, metadata, &self.rules).await;
        self.complete_submission(ticket.attempt, outcome)
    }

    /// Correlation metadata for one submission attempt
    pub fn operation_metadata(&self, attempt: u64) -> OperationMetadata {
        OperationMetadata::new(format!("{}#{}", self.id, attempt))
            .with_context("declaration_id", self.id.to_string())
    }

    /// Drops the session's progress, including any outstanding submission
    pub fn abandon(&mut self) {
        if self.state.is_submitting {
            info!(declaration_id = %self.id, attempt = self.attempt, "Abandoning in-flight submission");
        }
        self.attempt += 1;
        self.draft = ClaimDraft::new();
        self.state = WizardState::default();
        self.notifications.clear();
        self.touch();
    }

    /// Drains pending notifications
    pub fn take_notifications(&mut self) -> Vec<WizardNotification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn view(&self) -> WizardView {
        let gate = validate_step(self.state.current_step, &self.draft, &self.rules);
        WizardView {
            declaration_id: self.id,
            phase: self.phase(),
            step: self.state.current_step.number(),
            step_title: self.state.current_step.title(),
            total_steps: WizardStep::ALL.len(),
            can_advance: gate.is_ok(),
            blocked_by: gate.err().map(|e| e.to_string()),
            is_submitting: self.state.is_submitting,
            photos_remaining: self.draft.photos.remaining(&self.rules.attachments),
            draft: self.draft.summary(),
            updated_at: self.updated_at,
        }
    }

    fn edit(&mut self, apply: impl FnOnce(&mut ClaimDraft)) -> Result<(), ClaimError> {
        self.ensure_idle()?;
        apply(&mut self.draft);
        self.touch();
        Ok(())
    }

    fn ensure_idle(&self) -> Result<(), ClaimError> {
        if self.state.is_submitting {
            return Err(ClaimError::SubmissionInProgress);
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Calls the gateway, turning an expired deadline into a retryable error
pub async fn submit_with_timeout(
    gateway: &dyn SubmissionGateway,
    submission: ClaimSubmission,
    metadata: OperationMetadata,
    rules: &WizardRules,
) -> Result<SubmissionReceipt, SubmissionError> {
    match tokio::time::timeout(rules.submission_timeout, gateway.submit(submission, Some(metadata))).await {
        Ok(outcome) => outcome,
        Err(_) => Err(SubmissionError::Timeout {
            after_ms: rules.submission_timeout.as_millis() as u64,
        }),
    }
}
