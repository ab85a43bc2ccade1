//! The stepping engine: single-threaded Accumulate→Commit cycles.
//!
//! [`Engine`] owns the cohort index and the rule lists and advances
//! simulated time one step at a time. Within a step every rule reads
//! the committed `current` snapshot and writes only pending buffers, so
//! the result of a step is independent of the iteration order over
//! rules and cohorts.

use std::time::Instant;

use strata_core::{Cohort, CohortKey, Condition, StepId, TagDomain};
use strata_rule::{GenerativeRule, TransferRule};

use crate::config::{ConfigError, SimConfig};
use crate::index::CohortIndex;
use crate::metrics::StepMetrics;

/// Single-threaded cohort simulation engine.
///
/// Owns all simulation state. Each step runs every transfer rule over
/// its matching cohorts and every generative rule over the domain,
/// accumulates the resulting contributions into pending buffers, then
/// commits atomically: `current = max(0, next)`, `next = 0`, for every
/// cohort including ones materialized during the step.
///
/// Stepping is infallible: all fatal conditions (schema mismatches,
/// misdeclared rules) are rejected at construction, and an unmet rule
/// precondition at step time is a normal no-op.
pub struct Engine {
    domain: TagDomain,
    index: CohortIndex,
    transfer_rules: Vec<Box<dyn TransferRule>>,
    generative_rules: Vec<Box<dyn GenerativeRule>>,
    current_step: StepId,
    last_metrics: StepMetrics,
}

impl Engine {
    /// Construct an engine from a validated configuration.
    ///
    /// Validates the configuration, builds the cohort index, and seeds
    /// the initial population. Consumes the `SimConfig`.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let SimConfig {
            domain,
            seeds,
            transfer_rules,
            generative_rules,
        } = config;

        let mut index = CohortIndex::new(&domain);
        for (tags, population) in seeds {
            // validate() already rejected duplicates; insert cannot fail
            // here, but route the error anyway rather than unwrapping.
            index
                .insert(Cohort::new(tags, population))
                .map_err(|e| match e {
                    crate::index::IndexError::DuplicateKey { key } => {
                        ConfigError::DuplicateSeed { key }
                    }
                })?;
        }

        Ok(Self {
            domain,
            index,
            transfer_rules,
            generative_rules,
            current_step: StepId(0),
            last_metrics: StepMetrics::default(),
        })
    }

    /// Run `steps` sequential Accumulate→Commit cycles.
    ///
    /// `step(0)` leaves every cohort untouched.
    pub fn step(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step_once();
        }
    }

    fn step_once(&mut self) {
        let step_start = Instant::now();
        let mut metrics = StepMetrics::default();

        // 1. Transfer rules, in declared order. The matching key set is
        //    snapshotted per rule, so cohorts materialized by this
        //    rule's own contributions are not revisited in this pass.
        for rule in &self.transfer_rules {
            let rule_start = Instant::now();
            let matched: Vec<CohortKey> = self.index.filter_keys(&rule.apply_to());
            for key in matched {
                let produced = self.index.get(&key).and_then(|cohort| rule.apply(cohort));
                if let Some(contribution) = produced {
                    Self::contribute(
                        &self.domain,
                        &mut self.index,
                        &contribution.condition,
                        contribution.amount,
                        &mut metrics,
                    );
                }
            }
            metrics
                .rule_us
                .push((rule.name().to_string(), rule_start.elapsed().as_micros() as u64));
        }

        // 2. Generative rules, after all transfer rules.
        for rule in &self.generative_rules {
            let rule_start = Instant::now();
            for contribution in rule.apply(&self.domain) {
                Self::contribute(
                    &self.domain,
                    &mut self.index,
                    &contribution.condition,
                    contribution.amount,
                    &mut metrics,
                );
            }
            metrics
                .rule_us
                .push((rule.name().to_string(), rule_start.elapsed().as_micros() as u64));
        }

        // 3. Commit: swap pending into current for every cohort.
        self.index.commit_all();
        self.current_step = StepId(self.current_step.0 + 1);

        metrics.cohort_count = self.index.len();
        metrics.total_us = step_start.elapsed().as_micros() as u64;
        self.last_metrics = metrics;
    }

    /// Distribute `amount` across every destination matched by
    /// `condition`.
    ///
    /// Expands the condition over the domain, lazily materializes
    /// missing cohorts with zero population, and adds the floor-divided
    /// share to each destination's pending buffer. The division
    /// remainder is dropped, never redistributed.
    fn contribute(
        domain: &TagDomain,
        index: &mut CohortIndex,
        condition: &Condition,
        amount: i64,
        metrics: &mut StepMetrics,
    ) {
        let destinations = domain.expand(condition);
        if destinations.is_empty() {
            return;
        }
        metrics.contributions += 1;
        let share = amount.div_euclid(destinations.len() as i64);
        for tags in destinations {
            let (cohort, created) = index.get_or_insert(tags);
            cohort.accumulate(share);
            if created {
                metrics.cohorts_created += 1;
            }
        }
    }

    /// The declared tag schema.
    pub fn domain(&self) -> &TagDomain {
        &self.domain
    }

    /// The step counter: number of completed steps.
    pub fn current_step(&self) -> StepId {
        self.current_step
    }

    /// Metrics from the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Number of live cohorts.
    pub fn cohort_count(&self) -> usize {
        self.index.len()
    }

    /// Read-only iteration over every `(key, cohort)`, committed state
    /// only.
    pub fn cohorts(&self) -> impl Iterator<Item = (&CohortKey, &Cohort)> {
        self.index.iter()
    }

    /// Committed population of the cohort with `key`, if it exists.
    pub fn population(&self, key: &CohortKey) -> Option<u64> {
        self.index.get(key).map(Cohort::current)
    }

    /// Total committed population across all cohorts.
    pub fn total_population(&self) -> u64 {
        self.index.iter().map(|(_, c)| c.current()).sum()
    }

    /// Total committed population across the cohorts matching
    /// `condition`.
    pub fn population_where(&self, condition: &Condition) -> u64 {
        self.index
            .filter(condition)
            .iter()
            .map(|c| c.current())
            .sum()
    }

    /// All cohorts whose assignment is a superset of `condition`.
    pub fn filter(&self, condition: &Condition) -> Vec<&Cohort> {
        self.index.filter(condition)
    }
}
