mod config;
mod metrics;
mod processor;

pub use config::{BatchConfig, CancellationFlag};
pub use metrics::BatchSummary;
pub use processor::{BatchItem, BatchRunner};
