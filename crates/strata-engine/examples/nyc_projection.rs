//! New York City population projection, 2000–2030.
//!
//! Five-year age bands seeded with the 2000 census counts, stepped in
//! five-year increments. The three rules are defined inline to show the
//! trait API end to end: fertility and net migration re-contribute into
//! the population while survival advances it one band per step.
//!
//! Run with: `cargo run --example nyc_projection`

use indexmap::IndexMap;
use strata_core::{Cohort, Condition, TagDomain, Tags};
use strata_engine::{Engine, SimConfig};
use strata_rule::{Contribution, TransferRule};

const BANDS: [&str; 19] = [
    "0-4", "5-9", "10-14", "15-19", "20-24", "25-29", "30-34", "35-39", "40-44", "45-49", "50-54",
    "55-59", "60-64", "65-69", "70-74", "75-79", "80-84", "85-89", "90+",
];

// 2000 census population by age band.
const MALE_2000: [u64; 19] = [
    276635, 286155, 270582, 265285, 285353, 326702, 335119, 322637, 289976, 250093, 220318,
    165458, 139938, 112153, 95920, 73139, 44146, 17297, 17297,
];
const FEMALE_2000: [u64; 19] = [
    264243, 274960, 260234, 255356, 304478, 353957, 352243, 338264, 312403, 281025, 260949,
    203647, 174411, 147014, 139707, 120082, 83993, 43554, 43554,
];

fn next_band(age: &str) -> String {
    let low: u32 = age.split('-').next().unwrap().parse().unwrap();
    if low == 85 {
        "90+".to_string()
    } else {
        format!("{}-{}", low + 5, low + 9)
    }
}

/// Births per 1000 women over five years, by mother's age band.
struct CityFertility {
    rate_per_1000: IndexMap<String, f64>,
}

impl CityFertility {
    fn new() -> Self {
        Self {
            rate_per_1000: IndexMap::from([
                ("15-19".to_string(), 213.636),
                ("20-24".to_string(), 465.702),
                ("25-29".to_string(), 442.975),
                ("30-34".to_string(), 430.578),
                ("35-39".to_string(), 242.561),
                ("40-44".to_string(), 69.008),
                ("45-49".to_string(), 4.958),
            ]),
        }
    }
}

impl TransferRule for CityFertility {
    fn name(&self) -> &str {
        "city_fertility"
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
        let rate = self.rate_per_1000.get(cohort.tags().get("age")?)?;
        let newborns = (cohort.current() as f64 / 1000.0 * rate) as i64;
        Some(Contribution::new(
            [("age", "0-4")].into_iter().collect(),
            newborns,
        ))
    }
}

/// Five-year survival by age band; survivors advance one band.
struct CitySurvival {
    survival_rate: IndexMap<String, f64>,
}

impl CitySurvival {
    fn new() -> Self {
        Self {
            survival_rate: IndexMap::from([
                ("0-4".to_string(), 0.997),
                ("5-9".to_string(), 1.000),
                ("10-14".to_string(), 1.000),
                ("15-19".to_string(), 1.000),
                ("20-24".to_string(), 0.998),
                ("25-29".to_string(), 0.997),
                ("30-34".to_string(), 0.996),
                ("35-39".to_string(), 0.993),
                ("40-44".to_string(), 0.989),
                ("45-49".to_string(), 0.986),
                ("50-54".to_string(), 0.979),
                ("55-59".to_string(), 0.971),
                ("60-64".to_string(), 0.952),
                ("65-69".to_string(), 0.928),
                ("70-74".to_string(), 0.891),
                ("75-79".to_string(), 0.836),
                ("80-84".to_string(), 0.765),
                ("85-89".to_string(), 0.666),
            ]),
        }
    }
}

impl TransferRule for CitySurvival {
    fn name(&self) -> &str {
        "city_survival"
    }
    fn required_tags(&self) -> Vec<String> {
        vec!["age".to_string()]
    }
    fn apply(&self, cohort: &Cohort) -> Option<Contribution> {
        if !self.tags_satisfied(cohort.tags()) {
            return None;
        }
        let age = cohort.tags().get("age")?;
        if age == "90+" {
            return None;
        }
        let rate = self.survival_rate.get(age)?;
        let survivors = (cohort.current() as f64 * rate) as i64;
        Some(Contribution::new(
            cohort.tags().clone().with("age", next_band(age)),
            survivors,
        ))
    }
}

/// Net migration per 1000 residents over twenty years, applied at a
/// quarter per five-year step; contributes back into the source band.
struct CityNetMigration {
    rate_per_1000: IndexMap<String, f64>,
}

impl CityNetMigration {
    fn new() -> Self {
        Self {
            rate_per_1000: IndexMap::from([
                ("0-4".to_string(), -129.805),
                ("5-9".to_string(), -24.512),
                ("10-14".to_string(), 24.233),
                ("15-19".to_string(), 20.334),
                ("20-24".to_string(), 137.325),
                ("25-29".to_string(), 193.871),
                ("30-34".to_string(), -3.064),
                ("35-39".to_string(), -57.660),
                ("40-44".to_string(), -5.013),
                ("45-49".to_string(), -36.211),
                ("50-54".to_string(), 33.983),
                ("55-59".to_string(), -79.108),
                ("60-64".to_string(), -32.311),
                ("65-69".to_string(), -67.409),
                ("70-74".to_string(), -102.506),
                ("75-79".to_string(), -47.910),
                ("80-84".to_string(), -123.955),
                ("85-89".to_string(), -157.103),
                ("90+".to_string(), -38.161),
            ]),
        }
    }
}

impl TransferRule for CityNetMigration {
    fn name(&self) -> &str {
        "city_net_migration"
    }
    fn required_tags(&self) -> Vec<String> {
        vec!["age".to_string()]
    }
    fn apply(&self, cohort: &Cohort) -> Option<Contribution> {
        if !self.tags_satisfied(cohort.tags()) {
            return None;
        }
        let rate = self.rate_per_1000.get(cohort.tags().get("age")?)?;
        let movers = (cohort.current() as f64 / 1000.0 * rate / 4.0) as i64;
        Some(Contribution::new(cohort.tags().clone(), movers))
    }
}

fn main() {
    let domain = TagDomain::new(IndexMap::from([
        (
            "age".to_string(),
            BANDS.iter().map(|b| b.to_string()).collect::<Vec<_>>(),
        ),
        ("gender".to_string(), vec!["M".to_string(), "F".to_string()]),
    ]))
    .unwrap();

    let mut seeds: Vec<(Tags, u64)> = Vec::with_capacity(BANDS.len() * 2);
    for (i, band) in BANDS.iter().enumerate() {
        seeds.push(([("gender", "M"), ("age", *band)].into_iter().collect(), MALE_2000[i]));
        seeds.push(([("gender", "F"), ("age", *band)].into_iter().collect(), FEMALE_2000[i]));
    }

    let mut engine = Engine::new(SimConfig {
        domain,
        seeds,
        transfer_rules: vec![
            Box::new(CityFertility::new()),
            Box::new(CitySurvival::new()),
            Box::new(CityNetMigration::new()),
        ],
        generative_rules: Vec::new(),
    })
    .unwrap();

    // 2000 → 2030 in five-year steps.
    for year in (2005..=2030).step_by(5) {
        engine.step(1);
        let male = engine.population_where(&[("gender", "M")].into_iter().collect());
        let female = engine.population_where(&[("gender", "F")].into_iter().collect());
        println!("{year}: male {male}, female {female}, total {}", male + female);
    }

    println!("\n2030 by age band:");
    for band in BANDS {
        let population = engine.population_where(&[("age", band)].into_iter().collect());
        println!("  {band}: {population}");
    }
}
