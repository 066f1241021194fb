//! The in-progress claim declaration

use serde::Serialize;

use core_kernel::AttachmentId;

use crate::attachments::{PhotoAttachment, PhotoAttachments};
use crate::catalog::ClaimType;

/// Claim draft being composed in the wizard
///
/// A plain data bag: setters accept any input and the step gates decide
/// whether it is complete. Empty strings mean "not filled in yet".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimDraft {
    pub claim_type: Option<ClaimType>,
    /// Loss date as typed, expected `YYYY-MM-DD`
    pub date: String,
    /// Optional loss time, expected `HH:MM`
    pub time: String,
    pub location: String,
    pub description: String,
    pub photos: PhotoAttachments,
}

impl ClaimDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Description length in Unicode scalar values
    ///
    /// Not UTF-16 code units: an emoji outside the BMP counts once here but
    /// twice in a browser's `String.length`, so a description can clear the
    /// minimum in the browser and still fall one or two short here.
    pub fn description_chars(&self) -> usize {
        self.description.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn summary(&self) -> DraftSummary {
        DraftSummary {
            claim_type: self.claim_type,
            claim_type_label: self.claim_type.map(|t| t.label()),
            date: self.date.clone(),
            time: self.time.clone(),
            location: self.location.clone(),
            description: self.description.clone(),
            description_chars: self.description_chars(),
            photos: self.photos.iter().map(PhotoSummary::from).collect(),
        }
    }
}

/// Draft contents without photo bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftSummary {
    pub claim_type: Option<ClaimType>,
    pub claim_type_label: Option<&'static str>,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub description_chars: usize,
    pub photos: Vec<PhotoSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoSummary {
    pub id: AttachmentId,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

impl From<&PhotoAttachment> for PhotoSummary {
    fn from(photo: &PhotoAttachment) -> Self {
        Self {
            id: photo.id,
            file_name: photo.file_name.clone(),
            content_type: photo.content_type.clone(),
            size_bytes: photo.size_bytes(),
        }
    }
}
