use thiserror::Error;

#[derive(Error, Debug)]
pub enum EscaladeError {
    #[error("Invalid escalation threshold {0}: must be at least 1")]
    InvalidThreshold(usize),

    #[error("Terminal action failed for executor {executor}: {reason}")]
    TerminalAction { executor: String, reason: String },

    #[error("Executor error: {0}")]
    Executor(String),
}

pub type Result<T> = std::result::Result<T, EscaladeError>;
