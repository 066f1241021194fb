//! Pre-built Test Fixtures
//!
//! Predictable data for unit tests, plus a few realistic generated texts.

use chrono::NaiveDate;
use fake::faker::address::en::CityName;
use fake::faker::lorem::en::Sentence;
use fake::Fake;

use domain_claims::attachments::PhotoUpload;

/// JPEG file signature, enough for a photo that passes type checks
const JPEG_MAGIC: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

/// PNG file signature
const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Fixture for photo uploads
pub struct PhotoFixtures;

impl PhotoFixtures {
    /// A small valid JPEG upload
    pub fn jpeg(name: &str) -> PhotoUpload {
        PhotoUpload::new(name, "image/jpeg", JPEG_MAGIC.to_vec())
    }

    /// A small valid PNG upload
    pub fn png(name: &str) -> PhotoUpload {
        PhotoUpload::new(name, "image/png", PNG_MAGIC.to_vec())
    }

    /// `count` JPEGs named `photo-0.jpg`, `photo-1.jpg`, ...
    pub fn batch(count: usize) -> Vec<PhotoUpload> {
        (0..count).map(|i| Self::jpeg(&format!("photo-{i}.jpg"))).collect()
    }

    /// A JPEG one byte over `limit_bytes`
    pub fn oversized(limit_bytes: u64) -> PhotoUpload {
        PhotoUpload::new("huge.jpg", "image/jpeg", vec![0u8; limit_bytes as usize + 1])
    }

    /// A file of a type the wizard refuses
    pub fn unsupported() -> PhotoUpload {
        PhotoUpload::new("constat.pdf", "application/pdf", b"%PDF-1.7".to_vec())
    }
}

/// Fixture for draft text fields
pub struct DraftFixtures;

impl DraftFixtures {
    pub fn loss_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()
    }

    /// Loss date as typed in the form
    pub fn loss_date_input() -> String {
        Self::loss_date().format("%Y-%m-%d").to_string()
    }

    pub fn loss_time_input() -> &'static str {
        "17:45"
    }

    pub fn location() -> &'static str {
        "Paris"
    }

    /// Description long enough to pass the description gate
    pub fn description() -> &'static str {
        "Collision avec un autre véhicule au carrefour"
    }

    /// Description one character short of the default gate
    pub fn short_description() -> String {
        "x".repeat(19)
    }

    /// Random city name
    pub fn random_location() -> String {
        CityName().fake()
    }

    /// Random description that always clears the default gate
    pub fn random_description() -> String {
        let mut text: String = Sentence(6..12).fake();
        while text.chars().count() < 20 {
            text.push_str(" et dégâts annexes");
        }
        text
    }
}
