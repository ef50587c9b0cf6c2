use crate::error::{EscaladeError, Result};

/// Default minimum number of submitted jobs before escalation is considered.
pub const DEFAULT_ESCALATION_THRESHOLD: usize = 3;

/// Configuration for the job-failure escalation policy.
///
/// The threshold is the minimum number of jobs an executor must have
/// submitted before an all-failed snapshot is treated as systemic. Below
/// it, a handful of early failures is not interpreted as an irrecoverable
/// executor.
#[derive(Debug, Clone)]
pub struct EscalationConfig {
    /// Minimum submitted-job count before escalation is considered. Must be >= 1.
    pub threshold: usize,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_ESCALATION_THRESHOLD,
        }
    }
}

impl EscalationConfig {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    /// Check the threshold is usable. A threshold of zero would escalate an
    /// executor on an empty snapshot, so it is rejected outright.
    pub fn validate(&self) -> Result<()> {
        if self.threshold == 0 {
            return Err(EscaladeError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escalation_config_default() {
        let cfg = EscalationConfig::default();
        assert_eq!(cfg.threshold, DEFAULT_ESCALATION_THRESHOLD);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn escalation_config_new() {
        let cfg = EscalationConfig::new(10);
        assert_eq!(cfg.threshold, 10);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn escalation_config_minimum_threshold() {
        let cfg = EscalationConfig::new(1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn escalation_config_rejects_zero_threshold() {
        let cfg = EscalationConfig::new(0);
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, EscaladeError::InvalidThreshold(0)));
    }
}
