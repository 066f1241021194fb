//! Submission gateway port and adapters
//!
//! The wizard hands a completed draft to a [`SubmissionGateway`] and waits for
//! a receipt. [`SimulatedSubmissionGateway`] answers after a fixed latency and
//! keeps filed claims in memory; a deployment against a real claims backend
//! provides its own adapter behind the same trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

use core_kernel::{
    AdapterConfig, AdapterHealth, AdapterType, ClaimId, DeclarationId, DomainPort,
    HealthCheckResult, HealthCheckable, OperationMetadata,
};

use crate::attachments::PhotoAttachment;
use crate::catalog::ClaimType;
use crate::claim::FiledClaim;
use crate::draft::ClaimDraft;
use crate::error::SubmissionError;

/// Latency of the simulated backend
pub const DEFAULT_SIMULATED_LATENCY: Duration = Duration::from_millis(2000);

/// Largest request body the simulated backend accepts (50 MiB)
pub const DEFAULT_MAX_PAYLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// A completed declaration on its way to the claims backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSubmission {
    pub declaration_id: DeclarationId,
    pub claim_type: Option<ClaimType>,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub photos: Vec<PhotoAttachment>,
}

impl ClaimSubmission {
    pub fn from_draft(declaration_id: DeclarationId, draft: &ClaimDraft) -> Self {
        Self {
            declaration_id,
            claim_type: draft.claim_type,
            date: draft.date.clone(),
            time: draft.time.clone(),
            location: draft.location.clone(),
            description: draft.description.clone(),
            photos: draft.photos.as_slice().to_vec(),
        }
    }

    /// Approximate request size: text fields plus photo bytes
    pub fn payload_bytes(&self) -> u64 {
        let text = self.date.len() + self.time.len() + self.location.len() + self.description.len();
        text as u64 + self.photos.iter().map(PhotoAttachment::size_bytes).sum::<u64>()
    }
}

/// Acknowledgement that a claim was filed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub claim_id: ClaimId,
    pub claim_number: String,
    pub received_at: DateTime<Utc>,
}

impl From<&FiledClaim> for SubmissionReceipt {
    fn from(claim: &FiledClaim) -> Self {
        Self {
            claim_id: claim.id,
            claim_number: claim.claim_number.clone(),
            received_at: claim.filed_at,
        }
    }
}

/// Port to the system that persists claims
#[async_trait]
pub trait SubmissionGateway: DomainPort + HealthCheckable {
    /// Files the claim, returning its identifier and number
    async fn submit(
        &self,
        submission: ClaimSubmission,
        metadata: Option<OperationMetadata>,
    ) -> Result<SubmissionReceipt, SubmissionError>;
}

/// In-process stand-in for the claims backend
#[derive(Debug)]
pub struct SimulatedSubmissionGateway {
    config: AdapterConfig,
    latency: Duration,
    max_payload_bytes: u64,
    filed: RwLock<Vec<FiledClaim>>,
}

impl Default for SimulatedSubmissionGateway {
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATED_LATENCY)
    }
}

impl SimulatedSubmissionGateway {
    pub fn new(latency: Duration) -> Self {
        Self {
            config: AdapterConfig::named("simulated-claims-gateway", AdapterType::Internal),
            latency,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            filed: RwLock::new(Vec::new()),
        }
    }

    pub fn with_max_payload_bytes(mut self, max_payload_bytes: u64) -> Self {
        self.max_payload_bytes = max_payload_bytes;
        self
    }

    pub fn with_config(mut self, config: AdapterConfig) -> Self {
        self.config = config;
        self
    }

    /// Claims filed so far, oldest first
    pub async fn filed_claims(&self) -> Vec<FiledClaim> {
        self.filed.read().await.clone()
    }
}

impl DomainPort for SimulatedSubmissionGateway {}

#[async_trait]
impl HealthCheckable for SimulatedSubmissionGateway {
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();
        let filed = self.filed.read().await.len();
        let (status, message) = if self.config.enabled {
            (AdapterHealth::Healthy, format!("{filed} claims filed"))
        } else {
            (AdapterHealth::Unhealthy, "adapter disabled".to_string())
        };
        let mut result =
            HealthCheckResult::new(self.config.adapter_id.clone(), status).with_message(message);
        result.latency_ms = start.elapsed().as_millis() as u64;
        result
    }
}

#[async_trait]
impl SubmissionGateway for SimulatedSubmissionGateway {
    #[instrument(
        skip(self, submission, metadata),
        fields(declaration_id = %submission.declaration_id, photos = submission.photos.len())
    )]
    async fn submit(
        &self,
        submission: ClaimSubmission,
        metadata: Option<OperationMetadata>,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        if !self.config.enabled {
            return Err(SubmissionError::Unavailable(self.config.adapter_id.clone()));
        }

        tokio::time::sleep(self.latency).await;

        let size_bytes = submission.payload_bytes();
        if size_bytes > self.max_payload_bytes {
            warn!(size_bytes, limit_bytes = self.max_payload_bytes, "Submission payload too large");
            return Err(SubmissionError::PayloadTooLarge {
                size_bytes,
                limit_bytes: self.max_payload_bytes,
            });
        }

        let claim = FiledClaim::from_submission(&submission)?;
        let receipt = SubmissionReceipt::from(&claim);

        info!(
            claim_number = %claim.claim_number,
            claim_type = %claim.claim_type,
            correlation_id = metadata.as_ref().map(|m| m.correlation_id.as_str()).unwrap_or("-"),
            "Claim filed"
        );

        self.filed.write().await.push(claim);
        Ok(receipt)
    }
}

/// Scripted gateway for tests
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Replays queued outcomes in order; succeeds once the queue is empty
    #[derive(Debug)]
    pub struct ScriptedSubmissionGateway {
        config: AdapterConfig,
        outcomes: Mutex<VecDeque<Result<SubmissionReceipt, SubmissionError>>>,
        received: Mutex<Vec<ClaimSubmission>>,
        calls: AtomicUsize,
        delay: Duration,
    }

    impl Default for ScriptedSubmissionGateway {
        fn default() -> Self {
            Self {
                config: AdapterConfig::named("scripted-claims-gateway", AdapterType::Mock),
                outcomes: Mutex::default(),
                received: Mutex::default(),
                calls: AtomicUsize::new(0),
                delay: Duration::ZERO,
            }
        }
    }

    impl ScriptedSubmissionGateway {
        pub fn new() -> Self {
            Self::default()
        }

        /// Waits `delay` before answering each call
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub fn push_failure(&self, error: SubmissionError) {
            self.lock_outcomes().push_back(Err(error));
        }

        pub fn push_success(&self, receipt: SubmissionReceipt) {
            self.lock_outcomes().push_back(Ok(receipt));
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Submissions seen so far
        pub fn received(&self) -> Vec<ClaimSubmission> {
            self.received
                .lock()
                .map(|r| r.clone())
                .unwrap_or_default()
        }

        fn lock_outcomes(
            &self,
        ) -> std::sync::MutexGuard<'_, VecDeque<Result<SubmissionReceipt, SubmissionError>>> {
            self.outcomes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }
    }

    impl DomainPort for ScriptedSubmissionGateway {}

    #[async_trait]
    impl HealthCheckable for ScriptedSubmissionGateway {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::new(self.config.adapter_id.clone(), AdapterHealth::Healthy)
                .with_message("Mock adapter always healthy")
        }
    }

    #[async_trait]
    impl SubmissionGateway for ScriptedSubmissionGateway {
        async fn submit(
            &self,
            submission: ClaimSubmission,
            _metadata: Option<OperationMetadata>,
        ) -> Result<SubmissionReceipt, SubmissionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut received) = self.received.lock() {
                received.push(submission);
            }
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let next = self.lock_outcomes().pop_front();
            next.unwrap_or_else(|| {
                Ok(SubmissionReceipt {
                    claim_id: ClaimId::new(),
                    claim_number: "CLM-0000000001".to_string(),
                    received_at: Utc::now(),
                })
            })
        }
    }
}
