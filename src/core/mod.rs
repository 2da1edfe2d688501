//! Core types and session state.
//!
//! - [`Session`]: single owner of the selection and settings
//! - [`SelectionStore`]: ordered, deduplicated pending inputs
//! - [`InputImage`] / [`FileCandidate`]: accepted images and raw handles
//! - [`CompressionConfig`]: settings for one run
//! - [`OutputImage`]: result of transcoding one image
//! - [`Progress`]: progress tracking for batch runs

mod input;
mod progress;
mod selection;
mod state;
mod types;

pub use input::{FileCandidate, InputImage};
pub use progress::{Progress, ProgressType};
pub use selection::{AcceptPolicy, AddFilesOutcome, DEFAULT_MAX_SIZE_BYTES, Rejection, SelectionStore};
pub use state::Session;
pub use types::{CompressionConfig, DEFAULT_MAX_DIMENSION, DEFAULT_QUALITY, OutputImage, TargetFormat, reduction_percent};
