//! Ordered, deduplicated collection of images awaiting compression.

use std::collections::HashSet;
use lazy_static::lazy_static;
use tracing::{debug, warn};
use crate::core::{FileCandidate, InputImage};
use crate::utils::{CompressorError, CompressorResult, ImageFormat, RejectionReason};

/// 10 MiB
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 10 * 1024 * 1024;

lazy_static! {
    static ref DEFAULT_ACCEPTED_TYPES: HashSet<String> = ImageFormat::ALL
        .iter()
        .map(|format| format.mime_type().to_string())
        .collect();
}

/// Filter applied to every candidate before it may enter a store.
#[derive(Debug, Clone)]
pub struct AcceptPolicy {
    /// Lower-cased MIME types
    pub accepted_types: HashSet<String>,
    pub max_size_bytes: u64,
}

impl AcceptPolicy {
    pub fn new<I, S>(accepted_types: I, max_size_bytes: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            accepted_types: accepted_types
                .into_iter()
                .map(|t| t.as_ref().trim().to_ascii_lowercase())
                .collect(),
            max_size_bytes,
        }
    }

    fn accepts_type(&self, mime_type: &str) -> bool {
        let mime = mime_type.trim().to_ascii_lowercase();
        if self.accepted_types.contains(&mime) {
            return true;
        }
        // image/jpg is what some platforms advertise for JPEG files
        ImageFormat::from_mime(&mime)
            .is_some_and(|format| self.accepted_types.contains(format.mime_type()))
    }

    /// Checks type first, then size.
    pub fn check(&self, candidate: &FileCandidate) -> Result<(), RejectionReason> {
        if !self.accepts_type(&candidate.mime_type) {
            return Err(RejectionReason::UnsupportedType {
                mime_type: candidate.mime_type.clone(),
            });
        }
        if candidate.size_bytes > self.max_size_bytes {
            return Err(RejectionReason::TooLarge {
                size_bytes: candidate.size_bytes,
                max_size_bytes: self.max_size_bytes,
            });
        }
        Ok(())
    }
}

impl Default for AcceptPolicy {
    fn default() -> Self {
        Self {
            accepted_types: DEFAULT_ACCEPTED_TYPES.clone(),
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
        }
    }
}

/// A candidate that did not make it into the store, and why.
#[derive(Debug, Clone)]
pub struct Rejection {
    pub candidate: FileCandidate,
    pub reason: RejectionReason,
}

/// What one `add_files` call did.
#[derive(Debug, Clone, Default)]
pub struct AddFilesOutcome {
    /// Newly appended, in input order
    pub accepted: Vec<InputImage>,
    pub rejected: Vec<Rejection>,
    /// Silently skipped because an identical (name, size) was already present
    pub duplicates: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    items: Vec<InputImage>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters and appends `candidates`, preserving their relative order.
    ///
    /// A candidate whose (name, size) matches an existing member, including
    /// one accepted earlier in the same call, is skipped without being
    /// reported as a rejection.
    pub fn add_files(
        &mut self,
        candidates: impl IntoIterator<Item = FileCandidate>,
        policy: &AcceptPolicy,
    ) -> AddFilesOutcome {
        let mut outcome = AddFilesOutcome::default();

        for candidate in candidates {
            if let Err(reason) = policy.check(&candidate) {
                warn!("Rejected {}: {}", candidate.name, reason);
                outcome.rejected.push(Rejection { candidate, reason });
                continue;
            }

            if self.contains(&candidate.name, candidate.size_bytes) {
                debug!("Skipping duplicate {} ({} bytes)", candidate.name, candidate.size_bytes);
                outcome.duplicates += 1;
                continue;
            }

            let image = InputImage::from(candidate);
            self.items.push(image.clone());
            outcome.accepted.push(image);
        }

        debug!(
            "Selection now holds {} images ({} added, {} rejected, {} duplicates)",
            self.items.len(),
            outcome.accepted.len(),
            outcome.rejected.len(),
            outcome.duplicates
        );
        outcome
    }

    /// Removes the item at `index`, shifting later items left.
    pub fn remove_at(&mut self, index: usize) -> CompressorResult<InputImage> {
        if index >= self.items.len() {
            return Err(CompressorError::IndexOutOfRange { index, len: self.items.len() });
        }
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_at(&self, index: usize) -> Option<&InputImage> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputImage> {
        self.items.iter()
    }

    /// Copy of the current contents, in order, for a batch run.
    pub fn snapshot(&self) -> Vec<InputImage> {
        self.items.clone()
    }

    fn contains(&self, name: &str, size_bytes: u64) -> bool {
        self.items.iter().any(|item| item.identity() == (name, size_bytes))
    }
}
