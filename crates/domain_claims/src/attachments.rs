//! Photo attachments for a claim draft
//!
//! The draft carries at most [`AttachmentLimits::max_photos`] photos. A batch
//! is checked file by file before anything is attached: one bad file rejects
//! the whole batch. A valid batch that overflows the cap is truncated and the
//! overflow is reported back in [`AttachOutcome::dropped`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use core_kernel::AttachmentId;

use crate::error::AttachmentError;

/// Default maximum number of photos on one declaration
pub const DEFAULT_MAX_PHOTOS: usize = 5;

/// Default per-file size limit (10 MiB)
pub const DEFAULT_MAX_PHOTO_BYTES: u64 = 10 * 1024 * 1024;

/// Limits applied when photos are attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentLimits {
    pub max_photos: usize,
    pub max_photo_bytes: u64,
    pub accepted_content_types: Vec<String>,
}

impl Default for AttachmentLimits {
    fn default() -> Self {
        Self {
            max_photos: DEFAULT_MAX_PHOTOS,
            max_photo_bytes: DEFAULT_MAX_PHOTO_BYTES,
            accepted_content_types: ["image/jpeg", "image/png", "image/webp", "image/heic"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl AttachmentLimits {
    fn accepts(&self, content_type: &str) -> bool {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        self.accepted_content_types
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(&essence))
    }

    fn check(&self, upload: &PhotoUpload) -> Result<(), AttachmentError> {
        if upload.data.is_empty() {
            return Err(AttachmentError::Empty {
                file_name: upload.file_name.clone(),
            });
        }
        if !self.accepts(&upload.content_type) {
            return Err(AttachmentError::UnsupportedType {
                file_name: upload.file_name.clone(),
                content_type: upload.content_type.clone(),
            });
        }
        let size_bytes = upload.data.len() as u64;
        if size_bytes > self.max_photo_bytes {
            return Err(AttachmentError::TooLarge {
                file_name: upload.file_name.clone(),
                size_bytes,
                limit_bytes: self.max_photo_bytes,
            });
        }
        Ok(())
    }
}

/// A file handed in by the customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl PhotoUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }
}

/// A photo attached to the draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoAttachment {
    pub id: AttachmentId,
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub attached_at: DateTime<Utc>,
}

impl PhotoAttachment {
    fn from_upload(upload: PhotoUpload) -> Self {
        Self {
            id: AttachmentId::new(),
            file_name: upload.file_name,
            content_type: upload.content_type,
            data: upload.data,
            attached_at: Utc::now(),
        }
    }

    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Result of attaching a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachOutcome {
    /// Files appended to the draft
    pub accepted: usize,
    /// Files discarded because the cap was reached
    pub dropped: usize,
}

/// Ordered, bounded list of photos; insertion order is display order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoAttachments {
    photos: Vec<PhotoAttachment>,
}

impl PhotoAttachments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a batch, keeping only as many files as fit under the cap
    pub fn add_photos(
        &mut self,
        uploads: Vec<PhotoUpload>,
        limits: &AttachmentLimits,
    ) -> Result<AttachOutcome, AttachmentError> {
        let offered = uploads.len();
        let room = limits.max_photos.saturating_sub(self.photos.len());
        if room == 0 {
            warn!(dropped = offered, max_photos = limits.max_photos, "Photo list full, batch ignored");
            return Ok(AttachOutcome { accepted: 0, dropped: offered });
        }

        for upload in &uploads {
            limits.check(upload)?;
        }

        self.photos
            .extend(uploads.into_iter().take(room).map(PhotoAttachment::from_upload));

        let accepted = offered.min(room);
        let outcome = AttachOutcome {
            accepted,
            dropped: offered - accepted,
        };

        if outcome.dropped > 0 {
            warn!(
                accepted = outcome.accepted,
                dropped = outcome.dropped,
                max_photos = limits.max_photos,
                "Photo cap reached, extra files dropped"
            );
        } else {
            debug!(accepted = outcome.accepted, total = self.photos.len(), "Photos attached");
        }

        Ok(outcome)
    }

    /// Removes the photo at `index`; later photos shift down by one
    pub fn remove_photo(&mut self, index: usize) -> Result<PhotoAttachment, AttachmentError> {
        if index >= self.photos.len() {
            return Err(AttachmentError::IndexOutOfRange {
                index,
                len: self.photos.len(),
            });
        }
        Ok(self.photos.remove(index))
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn is_full(&self, limits: &AttachmentLimits) -> bool {
        self.photos.len() >= limits.max_photos
    }

    pub fn remaining(&self, limits: &AttachmentLimits) -> usize {
        limits.max_photos.saturating_sub(self.photos.len())
    }

    pub fn total_bytes(&self) -> u64 {
        self.photos.iter().map(PhotoAttachment::size_bytes).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhotoAttachment> {
        self.photos.iter()
    }

    pub fn as_slice(&self) -> &[PhotoAttachment] {
        &self.photos
    }
}
