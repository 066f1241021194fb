//! Step gates
//!
//! | Step | Requirement |
//! |---|---|
//! | 1 | a claim type is selected |
//! | 2 | date and location are filled in (time is optional) |
//! | 3 | description has at least `min_description_chars` characters |
//! | 4 | none, photos are optional |
//! | 5 | none, submission is the gate |

use std::time::Duration;

use crate::attachments::AttachmentLimits;
use crate::draft::ClaimDraft;
use crate::error::ValidationError;
use crate::step::WizardStep;

/// Default minimum description length
pub const DEFAULT_MIN_DESCRIPTION_CHARS: usize = 20;

/// Default time allowed for the submission gateway to answer
pub const DEFAULT_SUBMISSION_TIMEOUT: Duration = Duration::from_secs(30);

/// Tunable rules of one wizard instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardRules {
    pub min_description_chars: usize,
    pub attachments: AttachmentLimits,
    pub submission_timeout: Duration,
}

impl Default for WizardRules {
    fn default() -> Self {
        Self {
            min_description_chars: DEFAULT_MIN_DESCRIPTION_CHARS,
            attachments: AttachmentLimits::default(),
            submission_timeout: DEFAULT_SUBMISSION_TIMEOUT,
        }
    }
}

/// Checks whether `step` is complete, reporting the first missing field
pub fn validate_step(
    step: WizardStep,
    draft: &ClaimDraft,
    rules: &WizardRules,
) -> Result<(), ValidationError> {
    match step {
        WizardStep::ClaimType => {
            if draft.claim_type.is_none() {
                return Err(ValidationError::new(step, "claim_type", "select a claim type"));
            }
        }
        WizardStep::DateAndLocation => {
            if draft.date.is_empty() {
                return Err(ValidationError::new(step, "date", "the date of the loss is required"));
            }
            if draft.location.is_empty() {
                return Err(ValidationError::new(step, "location", "the location of the loss is required"));
            }
        }
        WizardStep::Description => {
            let chars = draft.description_chars();
            if chars < rules.min_description_chars {
                return Err(ValidationError::new(
                    step,
                    "description",
                    format!(
                        "at least {} characters required, got {}",
                        rules.min_description_chars, chars
                    ),
                ));
            }
        }
        WizardStep::Photos | WizardStep::Confirmation => {}
    }
    Ok(())
}

/// Pure gate: may the wizard leave `step` forwards
pub fn can_advance(step: WizardStep, draft: &ClaimDraft, rules: &WizardRules) -> bool {
    validate_step(step, draft, rules).is_ok()
}
