//! Per-step metrics for the simulation engine.
//!
//! [`StepMetrics`] captures timing and volume data for a single step;
//! the engine records them after each Accumulate→Commit cycle and
//! consumers read them via `last_metrics()`.

/// Timing and volume metrics collected during a single step.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step, in microseconds.
    pub total_us: u64,
    /// Per-rule execution times in run order (transfer rules first,
    /// then generative): `(name, microseconds)`.
    pub rule_us: Vec<(String, u64)>,
    /// Number of contributions routed through the engine this step.
    pub contributions: u64,
    /// Number of cohorts lazily materialized this step.
    pub cohorts_created: u64,
    /// Total live cohorts after commit.
    pub cohort_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.total_us, 0);
        assert!(m.rule_us.is_empty());
        assert_eq!(m.contributions, 0);
        assert_eq!(m.cohorts_created, 0);
        assert_eq!(m.cohort_count, 0);
    }
}
