//! Criterion micro-benchmarks for the stepping cycle.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use indexmap::IndexMap;
use strata_core::{Cohort, Condition, TagDomain};
use strata_engine::{Engine, SimConfig};
use strata_rule::{Contribution, TransferRule};
use strata_rules::{FertilityRule, MortalityRule};

const BANDS: [&str; 10] = [
    "0-10", "10-20", "20-30", "30-40", "40-50", "50-60", "60-70", "70-80", "80-90", "90-100",
];

/// Retains every cohort in place, keeping population volumes stable
/// across benchmark iterations.
struct Retain;

impl TransferRule for Retain {
    fn name(&self) -> &str {
        "retain"
    }
    fn required_tags(&self) -> Vec<String> {
        Vec::new()
    }
    fn apply(&self, cohort: &Cohort) -> Option<Contribution> {
        Some(Contribution::new(
            cohort.tags().clone(),
            cohort.current() as i64,
        ))
    }
}

fn demographic_config() -> SimConfig {
    let domain = TagDomain::new(IndexMap::from([
        (
            "age".to_string(),
            BANDS.iter().map(|b| b.to_string()).collect::<Vec<_>>(),
        ),
        ("gender".to_string(), vec!["M".to_string(), "F".to_string()]),
        (
            "race".to_string(),
            (1..=5).map(|i| format!("race{i}")).collect::<Vec<_>>(),
        ),
    ]))
    .unwrap();
    let seeds = domain
        .expand(&Condition::new())
        .into_iter()
        .map(|t| (t, 10000))
        .collect();
    SimConfig {
        domain,
        seeds,
        transfer_rules: vec![
            Box::new(MortalityRule::with_default_rates()),
            Box::new(FertilityRule::with_default_rates()),
        ],
        generative_rules: Vec::new(),
    }
}

/// Benchmark: one full Accumulate→Commit cycle over 100 cohorts.
fn bench_step_demographic_100(c: &mut Criterion) {
    let mut engine = Engine::new(demographic_config()).unwrap();
    c.bench_function("step_demographic_100", |b| {
        b.iter(|| {
            engine.step(1);
            black_box(engine.total_population());
        });
    });
}

/// Benchmark: slice filtering through the inverted index.
fn bench_filter_slice(c: &mut Criterion) {
    let mut engine = Engine::new(demographic_config()).unwrap();
    // Populate before measuring; retention keeps the index stable.
    engine.step(1);
    let condition: Condition = [("gender", "F"), ("race", "race3")].into_iter().collect();
    c.bench_function("filter_slice", |b| {
        b.iter(|| {
            let hit = engine.filter(black_box(&condition));
            black_box(hit.len());
        });
    });
}

/// Benchmark: repeated stepping with a retention rule, the steady-state
/// workload where no new cohorts are materialized.
fn bench_step_retention_steady(c: &mut Criterion) {
    let config = demographic_config();
    let domain = config.domain.clone();
    let seeds = config.seeds;
    let mut engine = Engine::new(SimConfig {
        domain,
        seeds,
        transfer_rules: vec![Box::new(Retain)],
        generative_rules: Vec::new(),
    })
    .unwrap();
    c.bench_function("step_retention_steady", |b| {
        b.iter(|| {
            engine.step(1);
            black_box(engine.cohort_count());
        });
    });
}

criterion_group!(
    benches,
    bench_step_demographic_100,
    bench_filter_slice,
    bench_step_retention_steady
);
criterion_main!(benches);
