//! Mortality: survivors advance one age band per step.

use crate::age;
use indexmap::IndexMap;
use strata_core::Cohort;
use strata_rule::{Contribution, TransferRule};

/// Moves the surviving share of each cohort into the next age band.
///
/// The contribution is `current × (1 − rate)`, truncated, destined for
/// the source tags with the age dimension advanced. The terminal band
/// (and any single-year age at or past its low end) produces no
/// contribution, so that population ages out of the simulation. An age
/// with no rate table entry is likewise a no-op.
pub struct MortalityRule {
    mortality_by_band: IndexMap<String, f64>,
    terminal_band: String,
    terminal_years: u32,
}

impl MortalityRule {
    /// Create a mortality rule from a death-rate table keyed by
    /// ten-year band.
    ///
    /// `terminal_band` is the band that never advances; single-year
    /// ages at or beyond `terminal_years` are treated the same way.
    pub fn new(
        mortality_by_band: IndexMap<String, f64>,
        terminal_band: impl Into<String>,
        terminal_years: u32,
    ) -> Self {
        Self {
            mortality_by_band,
            terminal_band: terminal_band.into(),
            terminal_years,
        }
    }

    /// Death rates for England & Wales by ten-year age band.
    ///
    /// Source: <https://ourworldindata.org/grapher/death-rate-by-age-group-in-england-and-wales>
    pub fn with_default_rates() -> Self {
        Self::new(
            IndexMap::from([
                ("0-10".to_string(), 0.0042),
                ("10-20".to_string(), 0.0003),
                ("20-30".to_string(), 0.0008),
                ("30-40".to_string(), 0.0015),
                ("40-50".to_string(), 0.0034),
                ("50-60".to_string(), 0.0079),
                ("60-70".to_string(), 0.0196),
                ("70-80".to_string(), 0.0534),
                ("80-90".to_string(), 0.1075),
            ]),
            "90-100",
            90,
        )
    }

    fn is_terminal(&self, age: &str) -> bool {
        if age == self.terminal_band {
            return true;
        }
        matches!(age.parse::<u32>(), Ok(years) if years >= self.terminal_years)
    }
}

impl TransferRule for MortalityRule {
    fn name(&self) -> &str {
        "mortality"
    }

    fn required_tags(&self) -> Vec<String> {
        vec!["age".to_string()]
    }

    fn apply(&self, cohort: &Cohort) -> Option<Contribution> {
        if !self.tags_satisfied(cohort.tags()) {
            return None;
        }
        let age = cohort.tags().get("age")?;
        if self.is_terminal(age) {
            return None;
        }
        let rate = self.mortality_by_band.get(&age::band_of(age))?;
        let survivors = (cohort.current() as f64 * (1.0 - rate)) as i64;
        let destination = cohort.tags().clone().with("age", age::advance(age)?);
        Some(Contribution::new(destination, survivors))
    }
}
