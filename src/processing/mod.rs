pub mod batch;
pub mod transcoder;

pub use batch::{BatchConfig, BatchItem, BatchRunner, BatchSummary, CancellationFlag};
pub use transcoder::Transcoder;
