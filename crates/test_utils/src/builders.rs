//! Test Data Builders
//!
//! Builders for drafts and for wizards already parked on a given step, so
//! tests only spell out what they care about.

use domain_claims::attachments::{AttachmentLimits, PhotoUpload};
use domain_claims::catalog::ClaimType;
use domain_claims::draft::ClaimDraft;
use domain_claims::step::WizardStep;
use domain_claims::validation::WizardRules;
use domain_claims::wizard::WizardController;

use crate::fixtures::{DraftFixtures, PhotoFixtures};

/// Builder for a claim draft, complete by default
pub struct TestDraftBuilder {
    claim_type: Option<ClaimType>,
    date: String,
    time: String,
    location: String,
    description: String,
    photos: Vec<PhotoUpload>,
}

impl Default for TestDraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDraftBuilder {
    /// Creates a new builder with every required field filled in
    pub fn new() -> Self {
        Self {
            claim_type: Some(ClaimType::AutoAccident),
            date: DraftFixtures::loss_date_input(),
            time: String::new(),
            location: DraftFixtures::location().to_string(),
            description: DraftFixtures::description().to_string(),
            photos: Vec::new(),
        }
    }

    /// Starts from an empty draft
    pub fn empty() -> Self {
        Self {
            claim_type: None,
            date: String::new(),
            time: String::new(),
            location: String::new(),
            description: String::new(),
            photos: Vec::new(),
        }
    }

    pub fn with_claim_type(mut self, claim_type: ClaimType) -> Self {
        self.claim_type = Some(claim_type);
        self
    }

    pub fn without_claim_type(mut self) -> Self {
        self.claim_type = None;
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_photos(mut self, count: usize) -> Self {
        self.photos = PhotoFixtures::batch(count);
        self
    }

    /// Builds the draft
    pub fn build(self) -> ClaimDraft {
        let mut draft = ClaimDraft {
            claim_type: self.claim_type,
            date: self.date,
            time: self.time,
            location: self.location,
            description: self.description,
            ..Default::default()
        };
        if !self.photos.is_empty() {
            draft
                .photos
                .add_photos(self.photos, &AttachmentLimits::default())
                .expect("fixture photos are valid");
        }
        draft
    }
}

/// Drives a fresh wizard forward through the real operations
pub struct WizardScenario {
    rules: WizardRules,
    claim_type: ClaimType,
    photos: usize,
}

impl Default for WizardScenario {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardScenario {
    pub fn new() -> Self {
        Self {
            rules: WizardRules::default(),
            claim_type: ClaimType::AutoAccident,
            photos: 0,
        }
    }

    pub fn with_rules(mut self, rules: WizardRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_claim_type(mut self, claim_type: ClaimType) -> Self {
        self.claim_type = claim_type;
        self
    }

    pub fn with_photos(mut self, count: usize) -> Self {
        self.photos = count;
        self
    }

    /// Returns a wizard sitting on `target`, every earlier step filled in
    pub fn drive_to(self, target: WizardStep) -> WizardController {
        let mut wizard = WizardController::new(self.rules);
        while wizard.current_step() < target {
            match wizard.current_step() {
                WizardStep::ClaimType => {
                    wizard.select_claim_type(self.claim_type).expect("wizard is idle");
                }
                WizardStep::DateAndLocation => {
                    wizard.set_date(DraftFixtures::loss_date_input()).expect("wizard is idle");
                    wizard.set_location(DraftFixtures::location()).expect("wizard is idle");
                }
                WizardStep::Description => {
                    wizard.set_description(DraftFixtures::description()).expect("wizard is idle");
                }
                WizardStep::Photos => {
                    if self.photos > 0 {
                        wizard
                            .add_photos(PhotoFixtures::batch(self.photos))
                            .expect("fixture photos are valid");
                    }
                }
                WizardStep::Confirmation => break,
            }
            wizard.go_next().expect("step was filled in");
        }
        wizard
    }

    /// Returns a wizard ready to submit
    pub fn ready_to_submit(self) -> WizardController {
        self.drive_to(WizardStep::Confirmation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_are_complete() {
        let draft = TestDraftBuilder::new().build();
        let rules = WizardRules::default();
        assert!(WizardStep::ALL
            .iter()
            .all(|step| domain_claims::validation::can_advance(*step, &draft, &rules)));
    }

    #[test]
    fn test_scenario_reaches_target() {
        let wizard = WizardScenario::new().with_photos(2).drive_to(WizardStep::Confirmation);
        assert_eq!(wizard.current_step(), WizardStep::Confirmation);
        assert_eq!(wizard.draft().photos.len(), 2);
    }
}
