use crate::status::{JobState, JobStatusMap};

/// Placeholder diagnostic used when a snapshot carries no failed-job detail.
const NO_ERROR_MESSAGE: &str = "No error message received";

/// Job totals for one executor's snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobCounts {
    pub total: usize,
    pub failed: usize,
}

/// Outcome of the threshold check for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscalationDecision {
    /// Condition not met; the cycle completes with no side effect.
    Healthy,
    /// Every submitted job failed and enough were submitted to rule out
    /// small-sample noise. Carries the consolidated diagnostic.
    Escalate { diagnostic: String },
}

/// Count total and failed jobs in a snapshot. `(0, 0)` for the empty snapshot.
pub fn count_jobs(status: &JobStatusMap) -> JobCounts {
    let total = status.len();
    let failed = status
        .values()
        .filter(|js| js.state == JobState::Failed)
        .count();
    tracing::debug!(failed, total, "Counted job statuses");
    JobCounts { total, failed }
}

/// Render one consolidated report covering every failed job in the snapshot.
///
/// Entries are numbered in job-identifier order, with labeled lines for the
/// message, exit code, and stdout/stderr excerpts when present. A failed job
/// with no detail still gets a numbered entry with an empty body. With no
/// failed entries at all, the report is an explicit "no error message"
/// placeholder rather than empty text.
///
/// This text is the sole payload attached to the terminal action, so it has
/// to stand on its own: which jobs failed, and why.
pub fn render_diagnostic(status: &JobStatusMap) -> String {
    let failed: Vec<_> = status
        .iter()
        .filter(|(_, js)| js.state == JobState::Failed)
        .collect();

    if failed.is_empty() {
        return NO_ERROR_MESSAGE.to_string();
    }

    let mut lines = Vec::with_capacity(failed.len() * 5 + 1);
    lines.push("Job errors:".to_string());
    for (index, (job_id, js)) in failed.iter().enumerate() {
        lines.push(format!("Error {} (job {}):", index + 1, job_id));
        if let Some(ref message) = js.message {
            lines.push(message.clone());
        }
        if let Some(exit_code) = js.exit_code {
            lines.push(format!("\tEXIT CODE: {}", exit_code));
        }
        if let Some(ref stdout) = js.stdout_summary {
            lines.push(format!("\tSTDOUT: {}", stdout));
        }
        if let Some(ref stderr) = js.stderr_summary {
            lines.push(format!("\tSTDERR: {}", stderr));
        }
    }
    lines.join("\n")
}

/// Default threshold-based escalation check.
///
/// Escalates iff `total >= threshold && failed == total`: every submitted
/// job failed, and enough jobs were submitted for that to be systemic
/// rather than noise. The diagnostic is rendered only on escalation.
///
/// Usable standalone, or as the body a custom
/// [`ManagedExecutor::handle_status_cycle`](crate::ManagedExecutor::handle_status_cycle)
/// delegates to.
pub fn evaluate_status(status: &JobStatusMap, threshold: usize) -> EscalationDecision {
    let counts = count_jobs(status);
    if counts.total >= threshold && counts.failed == counts.total {
        EscalationDecision::Escalate {
            diagnostic: render_diagnostic(status),
        }
    } else {
        EscalationDecision::Healthy
    }
}
