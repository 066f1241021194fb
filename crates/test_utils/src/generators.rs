//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating wizard inputs.

use proptest::prelude::*;

use domain_claims::attachments::PhotoUpload;
use domain_claims::catalog::ClaimType;
use domain_claims::step::WizardStep;

/// Strategy for generating any claim type
pub fn claim_type_strategy() -> impl Strategy<Value = ClaimType> {
    prop::sample::select(ClaimType::all().to_vec())
}

/// Strategy for generating any wizard step
pub fn wizard_step_strategy() -> impl Strategy<Value = WizardStep> {
    prop::sample::select(WizardStep::ALL.to_vec())
}

/// Strategy for generating accepted image content types
pub fn image_content_type_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("image/jpeg"),
        Just("image/png"),
        Just("image/webp"),
        Just("image/heic"),
    ]
}

/// Strategy for generating a valid photo upload of 1 to 512 bytes
pub fn photo_upload_strategy() -> impl Strategy<Value = PhotoUpload> {
    (
        "[a-z]{1,12}",
        image_content_type_strategy(),
        prop::collection::vec(any::<u8>(), 1..512),
    )
        .prop_map(|(stem, content_type, data)| {
            PhotoUpload::new(format!("{stem}.img"), content_type, data)
        })
}

/// Strategy for generating batches of up to `max` valid uploads
pub fn photo_batch_strategy(max: usize) -> impl Strategy<Value = Vec<PhotoUpload>> {
    prop::collection::vec(photo_upload_strategy(), 0..=max)
}

/// Strategy for generating descriptions of `min..=max` characters
pub fn description_strategy(min: usize, max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), min..=max).prop_map(|chars| chars.into_iter().collect())
}
