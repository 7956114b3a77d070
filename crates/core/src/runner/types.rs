//! Types for the runner module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::convert::JobState;

/// Snapshot of the runner and its current job, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerStatus {
    /// Whether a job currently occupies the runner.
    pub busy: bool,
    /// Id of the active job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    /// State of the current or most recent job.
    pub state: JobState,
    /// When the active job was accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}
