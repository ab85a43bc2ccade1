//! Multi-decade England & Wales population projection.
//!
//! Two dimensions (ten-year age bands × gender), seeded uniformly, with
//! the reference mortality and fertility rules. Each step advances
//! simulated time by ten years.
//!
//! Run with: `cargo run --example uk_projection`

use indexmap::IndexMap;
use strata_core::{Condition, TagDomain};
use strata_engine::{Engine, SimConfig};
use strata_rules::{FertilityRule, MortalityRule};

const BANDS: [&str; 10] = [
    "0-10", "10-20", "20-30", "30-40", "40-50", "50-60", "60-70", "70-80", "80-90", "90-100",
];

const DEFAULT_POPULATION: u64 = 10000;

fn main() {
    let domain = TagDomain::new(IndexMap::from([
        (
            "age".to_string(),
            BANDS.iter().map(|b| b.to_string()).collect::<Vec<_>>(),
        ),
        ("gender".to_string(), vec!["M".to_string(), "F".to_string()]),
    ]))
    .unwrap();

    // Seed every band except the infants, which the fertility rule
    // repopulates.
    let seeds = domain
        .expand(&Condition::new())
        .into_iter()
        .filter(|t| t.get("age") != Some("0-10"))
        .map(|t| (t, DEFAULT_POPULATION))
        .collect();

    let mut engine = Engine::new(SimConfig {
        domain,
        seeds,
        transfer_rules: vec![
            Box::new(MortalityRule::with_default_rates()),
            Box::new(FertilityRule::with_default_rates()),
        ],
        generative_rules: Vec::new(),
    })
    .unwrap();

    print_state(&engine, "initial state");

    engine.step(1);
    print_state(&engine, "after 1 step (10 years)");

    engine.step(10);
    print_state(&engine, "after 11 steps (110 years)");
}

fn print_state(engine: &Engine, label: &str) {
    println!("{label}:");
    for (key, cohort) in engine.cohorts() {
        println!("  {key}: {}", cohort.current());
    }
    println!("  total: {}", engine.total_population());
}
