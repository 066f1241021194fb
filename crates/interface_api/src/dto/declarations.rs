//! Declaration DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_claims::attachments::AttachOutcome;
use domain_claims::gateway::SubmissionReceipt;
use domain_claims::wizard::WizardView;

#[derive(Debug, Deserialize)]
pub struct SelectClaimTypeRequest {
    pub claim_type: String,
}

/// Partial update of the draft's text fields; absent fields are left alone
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateDraftRequest {
    #[validate(length(max = 32))]
    pub date: Option<String>,
    #[validate(length(max = 16))]
    pub time: Option<String>,
    #[validate(length(max = 256))]
    pub location: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AddPhotosResponse {
    #[serde(flatten)]
    pub outcome: AttachOutcome,
    pub declaration: WizardView,
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub receipt: SubmissionReceipt,
    pub declaration: WizardView,
}
