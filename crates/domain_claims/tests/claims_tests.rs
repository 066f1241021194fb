//! Tests for domain_claims
//!
//! Covers the step gates, the photo cap, navigation invariants and complete
//! declarations submitted through the simulated gateway.

use std::time::Duration;

use async_trait::async_trait;
use proptest::prelude::*;

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata};

use domain_claims::attachments::{AttachmentLimits, PhotoAttachments, PhotoUpload};
use domain_claims::catalog::ClaimType;
use domain_claims::draft::ClaimDraft;
use domain_claims::error::{ClaimError, SubmissionError};
use domain_claims::gateway::{ClaimSubmission, SimulatedSubmissionGateway, SubmissionGateway, SubmissionReceipt};
use domain_claims::step::WizardStep;
use domain_claims::validation::{can_advance, WizardRules};
use domain_claims::wizard::{WizardController, WizardNotification};

fn photo(name: &str) -> PhotoUpload {
    PhotoUpload::new(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0])
}

fn instant_gateway() -> SimulatedSubmissionGateway {
    SimulatedSubmissionGateway::new(Duration::ZERO)
}

/// Gateway whose backend is always down
struct OfflineGateway;

impl DomainPort for OfflineGateway {}

#[async_trait]
impl HealthCheckable for OfflineGateway {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::new("offline", AdapterHealth::Unhealthy)
    }
}

#[async_trait]
impl SubmissionGateway for OfflineGateway {
    async fn submit(
        &self,
        _submission: ClaimSubmission,
        _metadata: Option<OperationMetadata>,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        Err(SubmissionError::Unavailable("claims backend offline".to_string()))
    }
}

// ============================================================================
// Step Validator Tests
// ============================================================================

mod validator_tests {
    use super::*;

    #[test]
    fn test_description_19_chars_blocked() {
        let draft = ClaimDraft {
            description: "x".repeat(19),
            ..Default::default()
        };
        assert!(!can_advance(WizardStep::Description, &draft, &WizardRules::default()));
    }

    #[test]
    fn test_description_20_chars_allowed() {
        let draft = ClaimDraft {
            description: "x".repeat(20),
            ..Default::default()
        };
        assert!(can_advance(WizardStep::Description, &draft, &WizardRules::default()));
    }

    #[test]
    fn test_empty_draft_blocks_first_three_steps_only() {
        let draft = ClaimDraft::new();
        let rules = WizardRules::default();
        let open: Vec<_> = WizardStep::ALL
            .iter()
            .map(|step| can_advance(*step, &draft, &rules))
            .collect();
        assert_eq!(open, vec![false, false, false, true, true]);
    }
}

// ============================================================================
// Navigation Tests
// ============================================================================

mod navigation_tests {
    use super::*;

    #[test]
    fn test_go_next_from_step_one_without_type_stays() {
        let mut wizard = WizardController::default();
        assert!(wizard.go_next().is_err());
        assert_eq!(wizard.current_step().number(), 1);
    }

    #[test]
    fn test_gate_checked_on_every_step() {
        let mut wizard = WizardController::default();
        wizard.select_claim_type(ClaimType::AutoAccident).unwrap();
        wizard.go_next().unwrap();

        wizard.set_date("2026-01-12").unwrap();
        assert!(wizard.go_next().is_err(), "location still missing");
        assert_eq!(wizard.current_step(), WizardStep::DateAndLocation);

        wizard.set_location("Paris").unwrap();
        wizard.go_next().unwrap();
        wizard.set_description("trop court").unwrap();
        assert!(wizard.go_next().is_err());
        assert_eq!(wizard.current_step(), WizardStep::Description);
    }

    #[test]
    fn test_previous_keeps_draft() {
        let mut wizard = WizardController::default();
        wizard.select_claim_type(ClaimType::HomeWater).unwrap();
        wizard.go_next().unwrap();
        wizard.set_location("Bordeaux").unwrap();

        assert_eq!(wizard.go_previous().unwrap(), WizardStep::ClaimType);
        assert_eq!(wizard.draft().location, "Bordeaux");
        assert_eq!(wizard.draft().claim_type, Some(ClaimType::HomeWater));
    }

    #[test]
    fn test_clearing_a_field_closes_the_gate_again() {
        let mut wizard = WizardController::default();
        wizard.select_claim_type(ClaimType::HomeFire).unwrap();
        wizard.go_next().unwrap();
        wizard.set_date("2026-01-12").unwrap();
        wizard.set_location("Lille").unwrap();
        assert!(wizard.can_advance());

        wizard.set_date("").unwrap();
        assert!(!wizard.can_advance());
        assert!(wizard.go_next().is_err());
    }
}

// ============================================================================
// Photo Attachment Tests
// ============================================================================

mod attachment_tests {
    use super::*;

    #[test]
    fn test_six_files_on_empty_list_keeps_five() {
        let mut wizard = WizardController::default();
        let batch = (0..6).map(|i| photo(&format!("photo-{i}.jpg"))).collect();

        let outcome = wizard.add_photos(batch).unwrap();

        assert_eq!(wizard.draft().photos.len(), 5);
        assert_eq!(outcome.accepted, 5);
        assert_eq!(outcome.dropped, 1);
    }

    #[test]
    fn test_rejected_batch_through_controller() {
        let mut wizard = WizardController::default();
        let batch = vec![photo("a.jpg"), PhotoUpload::new("scan.tiff", "image/tiff", vec![1])];

        let err = wizard.add_photos(batch).unwrap_err();

        assert!(matches!(err, ClaimError::Attachment(_)));
        assert!(wizard.draft().photos.is_empty());
    }

    #[test]
    fn test_remove_out_of_range_through_controller() {
        let mut wizard = WizardController::default();
        wizard.add_photos(vec![photo("a.jpg")]).unwrap();
        assert!(wizard.remove_photo(3).is_err());
        assert_eq!(wizard.draft().photos.len(), 1);
    }
}

// ============================================================================
// Submission Tests
// ============================================================================

mod submission_tests {
    use super::*;

    #[tokio::test]
    async fn test_end_to_end_declaration() {
        let gateway = instant_gateway();
        let mut wizard = WizardController::default();

        wizard.select_claim_type(ClaimType::AutoAccident).unwrap();
        assert_eq!(wizard.go_next().unwrap().number(), 2);
        wizard.set_date("2026-01-12").unwrap();
        wizard.set_location("Paris").unwrap();
        assert_eq!(wizard.go_next().unwrap().number(), 3);
        wizard
            .set_description("Collision avec un autre véhicule au carrefour")
            .unwrap();
        assert_eq!(wizard.go_next().unwrap().number(), 4);
        wizard.add_photos(vec![photo("blob-a.jpg"), photo("blob-b.jpg")]).unwrap();
        assert_eq!(wizard.draft().photos.len(), 2);
        assert_eq!(wizard.go_next().unwrap().number(), 5);

        let receipt = wizard.submit(&gateway).await.unwrap();

        assert_eq!(wizard.current_step().number(), 1);
        assert_eq!(wizard.draft().claim_type, None);
        assert_eq!(*wizard.draft(), ClaimDraft::new());

        let filed = gateway.filed_claims().await;
        assert_eq!(filed.len(), 1);
        assert_eq!(filed[0].claim_number, receipt.claim_number);
        assert_eq!(filed[0].claim_type, ClaimType::AutoAccident);
        assert_eq!(filed[0].location, "Paris");
        assert_eq!(filed[0].photo_count, 2);
        assert_eq!(filed[0].declaration_id, wizard.id());
    }

    fn confirmation_ready(wizard: &mut WizardController, date: &str) {
        wizard.select_claim_type(ClaimType::HomeWater).unwrap();
        wizard.go_next().unwrap();
        wizard.set_date(date).unwrap();
        wizard.set_location("Marseille").unwrap();
        wizard.go_next().unwrap();
        wizard.set_description("Infiltration par la toiture après l'orage").unwrap();
        wizard.go_next().unwrap();
        wizard.go_next().unwrap();
    }

    #[tokio::test]
    async fn test_submit_from_other_step_is_refused() {
        let gateway = instant_gateway();
        let mut wizard = WizardController::default();
        wizard.select_claim_type(ClaimType::AutoTheft).unwrap();

        let err = wizard.submit(&gateway).await.unwrap_err();

        assert!(matches!(err, ClaimError::NotOnConfirmationStep { current: 1 }));
        assert!(gateway.filed_claims().await.is_empty());
    }

    #[tokio::test]
    async fn test_offline_backend_keeps_user_on_confirmation() {
        let mut wizard = WizardController::default();
        confirmation_ready(&mut wizard, "2026-01-12");
        let draft_before = wizard.draft().clone();

        let err = wizard.submit(&OfflineGateway).await.unwrap_err();

        assert!(matches!(err, ClaimError::Submission(ref e) if e.is_retryable()));
        assert_eq!(wizard.current_step(), WizardStep::Confirmation);
        assert!(!wizard.is_submitting());
        assert_eq!(*wizard.draft(), draft_before);

        // Same draft goes through once the backend is back
        let gateway = instant_gateway();
        wizard.submit(&gateway).await.unwrap();
        assert_eq!(gateway.filed_claims().await[0].location, "Marseille");
    }

    #[tokio::test]
    async fn test_server_rejection_is_not_retryable() {
        let gateway = instant_gateway();
        let mut wizard = WizardController::default();
        confirmation_ready(&mut wizard, "le 12 janvier");

        let err = wizard.submit(&gateway).await.unwrap_err();

        assert!(matches!(err, ClaimError::Submission(ref e) if !e.is_retryable()));
        assert!(matches!(
            wizard.take_notifications().as_slice(),
            [WizardNotification::SubmissionFailed { retryable: false, .. }]
        ));
        assert_eq!(wizard.current_step(), WizardStep::Confirmation);
    }

    #[tokio::test]
    async fn test_split_submission_rejects_second_begin() {
        let gateway = instant_gateway();
        let mut wizard = WizardController::default();
        confirmation_ready(&mut wizard, "2026-01-12");

        let ticket = wizard.begin_submission().unwrap();
        assert!(matches!(wizard.begin_submission(), Err(ClaimError::SubmissionInProgress)));

        let metadata = wizard.operation_metadata(ticket.attempt);
        let outcome = gateway.submit(ticket.submission, Some(metadata)).await;
        wizard.complete_submission(ticket.attempt, outcome).unwrap();
        assert_eq!(wizard.current_step(), WizardStep::ClaimType);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #[test]
    fn prop_photo_cap_never_exceeded(batches in prop::collection::vec(0usize..9, 0..6)) {
        let limits = AttachmentLimits::default();
        let mut photos = PhotoAttachments::new();
        for (b, size) in batches.into_iter().enumerate() {
            let batch = (0..size).map(|i| photo(&format!("{b}-{i}.jpg"))).collect();
            photos.add_photos(batch, &limits).unwrap();
            prop_assert!(photos.len() <= limits.max_photos);
        }
    }

    #[test]
    fn prop_remove_preserves_relative_order(count in 1usize..=5, pick in 0usize..5) {
        let index = pick % count;
        let mut photos = PhotoAttachments::new();
        let batch = (0..count).map(|i| photo(&format!("{i}.jpg"))).collect();
        photos.add_photos(batch, &AttachmentLimits::default()).unwrap();
        let mut expected: Vec<String> = photos.iter().map(|p| p.file_name.clone()).collect();

        photos.remove_photo(index).unwrap();
        expected.remove(index);

        let actual: Vec<String> = photos.iter().map(|p| p.file_name.clone()).collect();
        prop_assert_eq!(actual.len(), count - 1);
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn prop_previous_decrements_by_one(target in 2u8..=5) {
        let mut wizard = WizardController::default();
        wizard.select_claim_type(ClaimType::AutoGlass).unwrap();
        wizard.set_date("2026-01-12").unwrap();
        wizard.set_location("Rennes").unwrap();
        wizard.set_description("Vitre latérale brisée sur le parking").unwrap();
        while wizard.current_step().number() < target {
            wizard.go_next().unwrap();
        }

        let after = wizard.go_previous().unwrap();
        prop_assert_eq!(after.number(), target - 1);
    }

    #[test]
    fn prop_go_next_never_skips_a_closed_gate(description in ".{0,19}") {
        let mut wizard = WizardController::default();
        wizard.select_claim_type(ClaimType::HomeTheft).unwrap();
        wizard.go_next().unwrap();
        wizard.set_date("2026-01-12").unwrap();
        wizard.set_location("Toulouse").unwrap();
        wizard.go_next().unwrap();
        wizard.set_description(description).unwrap();

        prop_assert!(wizard.go_next().is_err());
        prop_assert_eq!(wizard.current_step(), WizardStep::Description);
    }
}
