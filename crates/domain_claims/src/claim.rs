//! Filed claim record

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, DeclarationId};

use crate::catalog::ClaimType;
use crate::error::SubmissionError;
use crate::gateway::ClaimSubmission;

/// Status of a filed claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Declaration received, not yet handled by an adjuster
    Received,
}

/// A claim created from a submitted declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiledClaim {
    pub id: ClaimId,
    pub claim_number: String,
    pub declaration_id: DeclarationId,
    pub claim_type: ClaimType,
    pub loss_date: NaiveDate,
    pub loss_time: Option<NaiveTime>,
    pub location: String,
    pub description: String,
    pub photo_count: usize,
    pub status: ClaimStatus,
    pub filed_at: DateTime<Utc>,
}

impl FiledClaim {
    /// Checks a submission the way the claims backend does and builds the record
    pub fn from_submission(submission: &ClaimSubmission) -> Result<Self, SubmissionError> {
        let claim_type = submission
            .claim_type
            .ok_or_else(|| SubmissionError::rejected("claim_type", "claim type is missing"))?;

        let loss_date = NaiveDate::parse_from_str(submission.date.trim(), "%Y-%m-%d")
            .map_err(|e| SubmissionError::rejected("date", format!("expected YYYY-MM-DD: {e}")))?;

        let time = submission.time.trim();
        let loss_time = if time.is_empty() {
            None
        } else {
            Some(
                NaiveTime::parse_from_str(time, "%H:%M")
                    .map_err(|e| SubmissionError::rejected("time", format!("expected HH:MM: {e}")))?,
            )
        };

        if submission.location.trim().is_empty() {
            return Err(SubmissionError::rejected("location", "location is missing"));
        }

        Ok(Self {
            id: ClaimId::new(),
            claim_number: generate_claim_number(),
            declaration_id: submission.declaration_id,
            claim_type,
            loss_date,
            loss_time,
            location: submission.location.clone(),
            description: submission.description.clone(),
            photo_count: submission.photos.len(),
            status: ClaimStatus::Received,
            filed_at: Utc::now(),
        })
    }
}

static CLAIM_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// `CLM-` followed by the filing date and a six digit sequence
fn generate_claim_number() -> String {
    let seq = CLAIM_SEQUENCE.fetch_add(1, Ordering::Relaxed) % 1_000_000;
    format!("CLM-{}{:06}", Utc::now().format("%Y%m%d"), seq)
}
