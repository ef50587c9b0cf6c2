use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::EscalationConfig;
use crate::error::{EscaladeError, Result};
use crate::escalation::aggregator::{evaluate_status, EscalationDecision};
use crate::status::JobStatusMap;

/// Outcome of one executor's status cycle, distinct from `Err`: an
/// escalated executor is the designed result of the policy, not a policy
/// failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Escalation condition did not hold; nothing was done.
    Healthy,
    /// The terminal action was invoked with the consolidated diagnostic.
    Escalated,
}

/// An executor as seen by the escalation policy.
///
/// Implemented by the engine's executor handles. `mark_failed` is a one-way
/// transition: after it returns, the executor must reject all pending and
/// subsequently submitted jobs, citing the supplied diagnostic. Re-invocation
/// being a no-op is the executor's contract to uphold; the policy only
/// guarantees at most one call per executor per cycle.
pub trait ManagedExecutor: Send + Sync {
    /// Stable name for logs and error context.
    fn name(&self) -> &str;

    /// Whether this executor has opted in to error management. When false,
    /// its snapshots are never aggregated and `mark_failed` is never called.
    fn error_management_enabled(&self) -> bool;

    /// Per-cycle escalation hook. The default delegates to
    /// [`evaluate_status`] and invokes [`mark_failed`](Self::mark_failed)
    /// once, synchronously, when the condition holds. Executors may override
    /// this with their own escalation logic.
    fn handle_status_cycle(&self, status: &JobStatusMap, threshold: usize) -> Result<CycleOutcome> {
        match evaluate_status(status, threshold) {
            EscalationDecision::Escalate { diagnostic } => {
                self.mark_failed(&diagnostic)?;
                Ok(CycleOutcome::Escalated)
            }
            EscalationDecision::Healthy => Ok(CycleOutcome::Healthy),
        }
    }

    /// Terminal action: mark the executor permanently failed and fail all
    /// pending and future jobs with the given diagnostic. May block on I/O
    /// (remote cancellation); the policy imposes no timeout on it.
    fn mark_failed(&self, diagnostic: &str) -> Result<()>;
}

/// One executor's job statuses for the current polling cycle.
///
/// Produced fresh by the poller each cycle, consumed exactly once by
/// [`EscalationPolicy::evaluate_cycle`], then discarded. A best-effort
/// snapshot: jobs not yet reported may be missing.
pub struct ExecutorStatusSnapshot {
    pub executor: Arc<dyn ManagedExecutor>,
    pub status: JobStatusMap,
    pub captured_at: DateTime<Utc>,
}

impl ExecutorStatusSnapshot {
    pub fn new(executor: Arc<dyn ManagedExecutor>, status: JobStatusMap) -> Self {
        Self {
            executor,
            status,
            captured_at: Utc::now(),
        }
    }
}

/// Summary of one policy pass over a cycle's snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Executors whose hook was invoked.
    pub evaluated: usize,
    /// Executors skipped because error management is disabled.
    pub skipped: usize,
    /// Names of executors escalated this cycle.
    pub escalated: Vec<String>,
}

/// Per-cycle escalation driver.
///
/// Holds the configured threshold and walks all snapshots of one polling
/// cycle, sequentially. The caller must not run two evaluations over the
/// same executor concurrently; cycles are expected to be serialized by the
/// polling loop driving this.
#[derive(Debug)]
pub struct EscalationPolicy {
    config: EscalationConfig,
}

impl EscalationPolicy {
    /// Build a policy from validated configuration. Fails loudly on a zero
    /// threshold so a misconfigured engine cannot silently escalate empty
    /// executors.
    pub fn new(config: EscalationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn threshold(&self) -> usize {
        self.config.threshold
    }

    /// Evaluate one polling cycle's snapshots.
    ///
    /// Every snapshot in the sequence is visited even if an earlier
    /// executor's hook fails: a broken terminal action on one executor must
    /// not starve the rest of the cycle. The first hook error, if any, is
    /// returned after the full pass so the polling loop can decide whether
    /// to retry the cycle.
    pub fn evaluate_cycle(&self, snapshots: &[ExecutorStatusSnapshot]) -> Result<CycleReport> {
        let mut report = CycleReport::default();
        let mut first_error: Option<EscaladeError> = None;

        for snapshot in snapshots {
            let executor = &snapshot.executor;
            if !executor.error_management_enabled() {
                tracing::debug!(
                    executor = %executor.name(),
                    "Error management disabled, skipping snapshot"
                );
                report.skipped += 1;
                continue;
            }

            report.evaluated += 1;
            match executor.handle_status_cycle(&snapshot.status, self.config.threshold) {
                Ok(CycleOutcome::Escalated) => {
                    tracing::info!(
                        executor = %executor.name(),
                        jobs = snapshot.status.len(),
                        captured_at = %snapshot.captured_at,
                        "Executor escalated to permanently failed"
                    );
                    report.escalated.push(executor.name().to_string());
                }
                Ok(CycleOutcome::Healthy) => {}
                Err(e) => {
                    tracing::error!(
                        executor = %executor.name(),
                        error = %e,
                        "Escalation hook failed"
                    );
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(report),
        }
    }
}
