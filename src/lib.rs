pub mod config;
pub mod error;
pub mod escalation;
pub mod status;

pub use config::EscalationConfig;
pub use error::{EscaladeError, Result};
pub use escalation::{
    CycleOutcome, CycleReport, EscalationDecision, EscalationPolicy, ExecutorStatusSnapshot,
    ManagedExecutor,
};
pub use status::{JobState, JobStatus, JobStatusMap};
