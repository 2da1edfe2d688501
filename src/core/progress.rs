use serde::{Deserialize, Serialize};

/// Progress message type
#[derive(Debug, Deserialize, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ProgressType {
    Start,
    Progress,
    Complete,
    Error,
}

/// Progress of a batch run, reported as "completed of total"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Progress type (start, progress, complete, error)
    pub progress_type: ProgressType,
    /// Number of attempted items
    pub completed_tasks: usize,
    /// Total number of items
    pub total_tasks: usize,
    /// Progress percentage (0-100), rounded to nearest
    pub progress_percentage: usize,
    /// Current status message
    pub status: String,
    /// File the update refers to
    #[serde(default)]
    pub file_name: Option<String>,
    /// Optional error message
    #[serde(default)]
    pub error: Option<String>,
}

impl Progress {
    /// Create a new Progress instance with basic information
    pub fn new(
        progress_type: ProgressType,
        completed_tasks: usize,
        total_tasks: usize,
        status: &str,
    ) -> Self {
        Self {
            progress_type,
            completed_tasks,
            total_tasks,
            progress_percentage: percentage(completed_tasks, total_tasks),
            status: status.to_string(),
            file_name: None,
            error: None,
        }
    }

    /// Update for one attempted item
    pub fn item(completed_tasks: usize, total_tasks: usize, file_name: &str, error: Option<String>) -> Self {
        let progress_type = if error.is_some() { ProgressType::Error } else { ProgressType::Progress };
        let percent = percentage(completed_tasks, total_tasks);
        Self {
            file_name: Some(file_name.to_string()),
            error,
            ..Self::new(progress_type, completed_tasks, total_tasks, &format!("Processing... {percent}%"))
        }
    }
}

fn percentage(completed: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (completed * 100 + total / 2) / total
}
