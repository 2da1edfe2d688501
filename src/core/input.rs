//! Raw file handles and the images accepted into a selection.

use std::sync::Arc;
use serde::Serialize;

/// A user-supplied file before it has been filtered.
///
/// Mirrors what a picker or drop target hands over: a name, the advertised
/// MIME type, the byte length and the encoded bytes themselves.
#[derive(Debug, Clone)]
pub struct FileCandidate {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub bytes: Arc<[u8]>,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes: bytes.len() as u64,
            bytes,
        }
    }
}

/// One image waiting in a [`SelectionStore`](crate::core::SelectionStore).
///
/// The encoded bytes are immutable; transcoding reads them and leaves the
/// original untouched.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputImage {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    #[serde(skip)]
    bytes: Arc<[u8]>,
}

impl InputImage {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        FileCandidate::new(name, mime_type, bytes).into()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the encoded bytes, for moving into blocking tasks.
    pub(crate) fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    /// Duplicate key within a selection: name plus byte size.
    pub fn identity(&self) -> (&str, u64) {
        (&self.name, self.size_bytes)
    }
}

impl From<FileCandidate> for InputImage {
    fn from(candidate: FileCandidate) -> Self {
        Self {
            name: candidate.name,
            size_bytes: candidate.size_bytes,
            mime_type: candidate.mime_type,
            bytes: candidate.bytes,
        }
    }
}
