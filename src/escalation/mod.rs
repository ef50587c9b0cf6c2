//! Job-failure escalation for executors.
//!
//! Once per polling cycle the engine hands this module one status snapshot
//! per executor. An executor whose snapshot shows enough submitted jobs,
//! all of them failed, is considered irrecoverable and is shut down with a
//! consolidated diagnostic.
//!
//! # Components
//!
//! - [`aggregator`]: pure functions over one snapshot (count failed jobs,
//!   render the consolidated diagnostic, apply the threshold check)
//! - [`policy`]: per-cycle driver that walks all snapshots and invokes each
//!   eligible executor's escalation hook
//!
//! # Cycle Flow
//!
//! 1. Poller builds an [`ExecutorStatusSnapshot`] per executor
//! 2. [`EscalationPolicy::evaluate_cycle`] skips executors that have not
//!    opted in to error management
//! 3. The executor's [`ManagedExecutor::handle_status_cycle`] hook runs;
//!    the default delegates to [`evaluate_status`]
//! 4. On escalation, [`ManagedExecutor::mark_failed`] is invoked once with
//!    the rendered diagnostic

pub mod aggregator;
pub mod policy;

pub use aggregator::{count_jobs, evaluate_status, render_diagnostic, EscalationDecision, JobCounts};
pub use policy::{
    CycleOutcome, CycleReport, EscalationPolicy, ExecutorStatusSnapshot, ManagedExecutor,
};
