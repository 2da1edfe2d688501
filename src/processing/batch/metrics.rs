use serde::Serialize;
use crate::core::reduction_percent;
use super::processor::BatchItem;

/// Totals over one finished batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Original bytes of the successful items only
    pub original_bytes: u64,
    pub compressed_bytes: u64,
    pub reduction_percent: f64,
}

impl BatchSummary {
    pub fn from_items(items: &[BatchItem]) -> Self {
        let mut summary = Self { total: items.len(), ..Self::default() };

        for output in items.iter().filter_map(|item| item.result.as_ref().ok()) {
            summary.succeeded += 1;
            summary.original_bytes += output.original_size_bytes;
            summary.compressed_bytes += output.compressed_size_bytes;
        }
        summary.failed = summary.total - summary.succeeded;
        summary.reduction_percent = reduction_percent(summary.original_bytes, summary.compressed_bytes);
        summary
    }
}
