use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maximum length, in characters, of a stored stdout/stderr excerpt.
pub const SUMMARY_MAX_CHARS: usize = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl JobState {
    /// True for states a job cannot leave.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobState::Completed | JobState::Failed | JobState::Cancelled
        )
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobState::Pending => write!(f, "pending"),
            JobState::Running => write!(f, "running"),
            JobState::Completed => write!(f, "completed"),
            JobState::Failed => write!(f, "failed"),
            JobState::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Status of one job as last reported by the remote scheduler.
///
/// Produced by the polling subsystem once per cycle and treated as an
/// immutable snapshot from then on. All detail fields are best-effort:
/// a failed job may carry none of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub state: JobState,
    pub message: Option<String>,
    pub exit_code: Option<i32>,
    pub stdout_summary: Option<String>,
    pub stderr_summary: Option<String>,
}

impl JobStatus {
    pub fn new(state: JobState) -> Self {
        Self {
            state,
            message: None,
            exit_code: None,
            stdout_summary: None,
            stderr_summary: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_exit_code(mut self, exit_code: i32) -> Self {
        self.exit_code = Some(exit_code);
        self
    }

    /// Attach a stdout excerpt, truncated to [`SUMMARY_MAX_CHARS`].
    pub fn with_stdout_summary(mut self, summary: impl Into<String>) -> Self {
        self.stdout_summary = Some(truncate_summary(summary.into()));
        self
    }

    /// Attach a stderr excerpt, truncated to [`SUMMARY_MAX_CHARS`].
    pub fn with_stderr_summary(mut self, summary: impl Into<String>) -> Self {
        self.stderr_summary = Some(truncate_summary(summary.into()));
        self
    }
}

/// Job identifier to status mapping for one executor, one polling cycle.
///
/// Keyed by the remote scheduler's job identifier. A BTreeMap so that
/// iteration (and therefore diagnostic rendering) has a stable order.
pub type JobStatusMap = BTreeMap<String, JobStatus>;

fn truncate_summary(mut summary: String) -> String {
    if summary.chars().count() > SUMMARY_MAX_CHARS {
        let cut = summary
            .char_indices()
            .nth(SUMMARY_MAX_CHARS)
            .map(|(i, _)| i)
            .unwrap_or(summary.len());
        summary.truncate(cut);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_state_display() {
        assert_eq!(JobState::Pending.to_string(), "pending");
        assert_eq!(JobState::Failed.to_string(), "failed");
        assert_eq!(JobState::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn job_state_terminal() {
        assert!(!JobState::Pending.is_terminal());
        assert!(!JobState::Running.is_terminal());
        assert!(JobState::Completed.is_terminal());
        assert!(JobState::Failed.is_terminal());
        assert!(JobState::Cancelled.is_terminal());
    }

    #[test]
    fn job_status_builders() {
        let status = JobStatus::new(JobState::Failed)
            .with_message("segfault")
            .with_exit_code(139)
            .with_stderr_summary("Segmentation fault (core dumped)");

        assert_eq!(status.state, JobState::Failed);
        assert_eq!(status.message.as_deref(), Some("segfault"));
        assert_eq!(status.exit_code, Some(139));
        assert!(status.stdout_summary.is_none());
        assert_eq!(
            status.stderr_summary.as_deref(),
            Some("Segmentation fault (core dumped)")
        );
    }

    #[test]
    fn summaries_are_bounded() {
        let long = "x".repeat(SUMMARY_MAX_CHARS + 500);
        let status = JobStatus::new(JobState::Failed)
            .with_stdout_summary(long.clone())
            .with_stderr_summary(long);

        assert_eq!(
            status.stdout_summary.unwrap().chars().count(),
            SUMMARY_MAX_CHARS
        );
        assert_eq!(
            status.stderr_summary.unwrap().chars().count(),
            SUMMARY_MAX_CHARS
        );
    }

    #[test]
    fn summary_truncation_respects_char_boundaries() {
        // Multi-byte characters must not be split mid-codepoint.
        let long = "é".repeat(SUMMARY_MAX_CHARS + 10);
        let status = JobStatus::new(JobState::Failed).with_stderr_summary(long);
        let summary = status.stderr_summary.unwrap();
        assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS);
        assert!(summary.chars().all(|c| c == 'é'));
    }

    #[test]
    fn job_status_serde_roundtrip() {
        let status = JobStatus::new(JobState::Failed)
            .with_message("disk full")
            .with_exit_code(1);

        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"Failed\""));
        assert!(json.contains("disk full"));

        let back: JobStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, status);
    }
}
