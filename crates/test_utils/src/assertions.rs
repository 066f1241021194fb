//! Custom Test Assertions
//!
//! Assertion helpers for wizard state that give more meaningful error
//! messages than standard assertions.

use domain_claims::draft::ClaimDraft;
use domain_claims::step::WizardStep;
use domain_claims::wizard::WizardController;

/// Asserts that the wizard is back to its initial state after a submission
///
/// # Panics
///
/// Panics if the step is not 1, a submission is outstanding, or the draft
/// holds any data
pub fn assert_wizard_reset(wizard: &WizardController) {
    assert_eq!(
        wizard.current_step(),
        WizardStep::ClaimType,
        "Expected step 1 after reset, got {}",
        wizard.current_step()
    );
    assert!(!wizard.is_submitting(), "Expected no submission in progress");
    assert_eq!(
        *wizard.draft(),
        ClaimDraft::new(),
        "Expected an empty draft, got {:?}",
        wizard.draft().summary()
    );
}

/// Asserts the wizard sits on `step`
pub fn assert_on_step(wizard: &WizardController, step: WizardStep) {
    assert_eq!(
        wizard.current_step(),
        step,
        "Expected wizard on step {}, got {}",
        step,
        wizard.current_step()
    );
}

/// Asserts the attached photos carry exactly these file names, in order
pub fn assert_photo_names(wizard: &WizardController, expected: &[&str]) {
    let actual: Vec<&str> = wizard
        .draft()
        .photos
        .iter()
        .map(|p| p.file_name.as_str())
        .collect();
    assert_eq!(actual, expected, "Photo order mismatch");
}
