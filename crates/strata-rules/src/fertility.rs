//! Fertility: newborns contributed to the infant band.

use crate::age;
use indexmap::IndexMap;
use strata_core::{Cohort, Condition};
use strata_rule::{Contribution, TransferRule};

/// Live-birth rates for England & Wales by mother's ten-year age band.
///
/// Source: <https://www.statista.com/statistics/445305/live-births-by-age-of-mother-england-wales/>
fn default_birth_rates() -> IndexMap<String, f64> {
    IndexMap::from([
        ("10-20".to_string(), 0.0112),
        ("20-30".to_string(), 0.1367),
        ("30-40".to_string(), 0.1666),
        ("40-50".to_string(), 0.0165),
    ])
}

/// Contributes newborns to the infant band.
///
/// Scoped to `gender=F` through the `apply_to` pre-filter. The
/// destination fixes only the age dimension — single-year domains get
/// `"0"`, banded domains `"0-10"` — so newborns split evenly across
/// every other dimension (gender, race, …). Mothers outside the fertile
/// bands are no-ops.
pub struct FertilityRule {
    birth_rate_by_band: IndexMap<String, f64>,
}

impl FertilityRule {
    /// Create a fertility rule from a birth-rate table keyed by
    /// ten-year band.
    pub fn new(birth_rate_by_band: IndexMap<String, f64>) -> Self {
        Self { birth_rate_by_band }
    }

    /// England & Wales birth rates by age of mother.
    pub fn with_default_rates() -> Self {
        Self::new(default_birth_rates())
    }
}

impl TransferRule for FertilityRule {
    fn name(&self) -> &str {
        "fertility"
    }

    fn required_tags(&self) -> Vec<String> {
        vec!["age".to_string(), "gender".to_string()]
    }

    fn apply_to(&self) -> Condition {
        [("gender", "F")].into_iter().collect()
    }

    fn apply(&self, cohort: &Cohort) -> Option<Contribution> {
        if !self.tags_satisfied(cohort.tags()) {
            return None;
        }
        let mother_age = cohort.tags().get("age")?;
        let rate = self.birth_rate_by_band.get(&age::band_of(mother_age))?;
        let newborns = (cohort.current() as f64 * rate) as i64;
        let infant = infant_age(mother_age);
        Some(Contribution::new(
            [("age", infant)].into_iter().collect(),
            newborns,
        ))
    }
}

/// Fertility with per-race weighting; newborns keep the mother's race.
///
/// Unlike [`FertilityRule`] the destination fixes the race dimension as
/// well as age, so only the remaining dimensions (gender, …) share the
/// newborn contribution. Male cohorts and races without a declared
/// factor are no-ops.
pub struct RaceAdjustedFertilityRule {
    base_rate_by_band: IndexMap<String, f64>,
    race_factor: IndexMap<String, f64>,
}

impl RaceAdjustedFertilityRule {
    /// Create a race-adjusted fertility rule from a base birth-rate
    /// table and per-race factors.
    pub fn new(base_rate_by_band: IndexMap<String, f64>, race_factor: IndexMap<String, f64>) -> Self {
        Self {
            base_rate_by_band,
            race_factor,
        }
    }

    /// England & Wales base rates with placeholder race factors.
    pub fn with_default_rates() -> Self {
        Self::new(
            default_birth_rates(),
            IndexMap::from([
                ("race1".to_string(), 1.2),
                ("race2".to_string(), 0.8),
                ("race3".to_string(), 1.0),
            ]),
        )
    }
}

impl TransferRule for RaceAdjustedFertilityRule {
    fn name(&self) -> &str {
        "fertility_by_race"
    }

    fn required_tags(&self) -> Vec<String> {
        vec!["age".to_string(), "gender".to_string(), "race".to_string()]
    }

    fn apply(&self, cohort: &Cohort) -> Option<Contribution> {
        if !self.tags_satisfied(cohort.tags()) {
            return None;
        }
        let age = cohort.tags().get("age")?;
        let race = cohort.tags().get("race")?;
        if cohort.tags().get("gender") == Some("M") {
            return None;
        }
        let rate = self.base_rate_by_band.get(&age::band_of(age))?;
        let factor = self.race_factor.get(race)?;
        let newborns = (cohort.current() as f64 * rate * factor) as i64;
        let destination: Condition = [("race", race), ("age", infant_age(age))]
            .into_iter()
            .collect();
        Some(Contribution::new(destination, newborns))
    }
}

fn infant_age(mother_age: &str) -> &'static str {
    if mother_age.parse::<u32>().is_ok() {
        "0"
    } else {
        "0-10"
    }
}
