//! Net migration: generative inflow per age × race slice.

use crate::age;
use indexmap::IndexMap;
use strata_core::{Condition, TagDomain};
use strata_rule::{Contribution, GenerativeRule};

/// Emits a net migration contribution for every `(age, race)` pair in
/// the domain's declared age values, regardless of whether the
/// destination cohort currently exists.
///
/// Each contribution fixes age and race; with a gender dimension in the
/// domain the amount therefore splits across genders. Domains without
/// the required dimensions produce nothing; an age band missing from
/// the table is skipped.
pub struct NetMigrationRule {
    base_by_band: IndexMap<String, f64>,
    race_factor: IndexMap<String, f64>,
}

impl NetMigrationRule {
    /// Create a migration rule from a base table keyed by ten-year band
    /// and per-race factors.
    pub fn new(base_by_band: IndexMap<String, f64>, race_factor: IndexMap<String, f64>) -> Self {
        Self {
            base_by_band,
            race_factor,
        }
    }

    /// Placeholder migration volumes and race factors.
    pub fn with_default_rates() -> Self {
        Self::new(
            IndexMap::from([
                ("0-10".to_string(), 100.0),
                ("10-20".to_string(), 200.0),
                ("20-30".to_string(), 300.0),
                ("30-40".to_string(), 400.0),
                ("40-50".to_string(), 300.0),
                ("50-60".to_string(), 300.0),
                ("60-70".to_string(), 100.0),
                ("70-80".to_string(), 10.0),
                ("80-90".to_string(), 0.0),
                ("90-100".to_string(), 0.0),
            ]),
            IndexMap::from([
                ("race1".to_string(), 2.0),
                ("race2".to_string(), 0.5),
                ("race3".to_string(), 1.0),
            ]),
        )
    }
}

impl GenerativeRule for NetMigrationRule {
    fn name(&self) -> &str {
        "net_migration"
    }

    fn required_tags(&self) -> Vec<String> {
        vec!["race".to_string(), "age".to_string()]
    }

    fn apply(&self, domain: &TagDomain) -> Vec<Contribution> {
        if !self.domain_satisfied(domain) {
            return Vec::new();
        }
        let Some(ages) = domain.values("age") else {
            return Vec::new();
        };
        let mut contributions = Vec::with_capacity(ages.len() * self.race_factor.len());
        for age_value in ages {
            let Some(base) = self.base_by_band.get(&age::band_of(age_value)) else {
                continue;
            };
            for (race, factor) in &self.race_factor {
                let condition: Condition = [("age", age_value.as_str()), ("race", race.as_str())]
                    .into_iter()
                    .collect();
                contributions.push(Contribution::new(condition, (base * factor) as i64));
            }
        }
        contributions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap as Map;

    fn domain(dims: &[(&str, &[&str])]) -> TagDomain {
        TagDomain::new(
            dims.iter()
                .map(|(d, vs)| {
                    (
                        d.to_string(),
                        vs.iter().map(|v| v.to_string()).collect::<Vec<_>>(),
                    )
                })
                .collect::<Map<_, _>>(),
        )
        .unwrap()
    }

    #[test]
    fn emits_per_age_race_pair() {
        let rule = NetMigrationRule::with_default_rates();
        let d = domain(&[
            ("age", &["0-10", "20-30"]),
            ("gender", &["M", "F"]),
            ("race", &["race1", "race2", "race3"]),
        ]);
        let out = rule.apply(&d);
        assert_eq!(out.len(), 6);
        assert_eq!(out[0].condition.get("age"), Some("0-10"));
        assert_eq!(out[0].condition.get("race"), Some("race1"));
        assert_eq!(out[0].amount, 200); // 100 * 2.0
        assert_eq!(out[4].amount, 150); // 300 * 0.5
        assert!(out.iter().all(|c| !c.condition.contains("gender")));
    }

    #[test]
    fn missing_domain_dimension_produces_nothing() {
        let rule = NetMigrationRule::with_default_rates();
        let d = domain(&[("age", &["0-10"]), ("gender", &["M", "F"])]);
        assert!(rule.apply(&d).is_empty());
    }

    #[test]
    fn ages_outside_the_table_are_skipped() {
        let rule = NetMigrationRule::with_default_rates();
        let d = domain(&[("age", &["0-10", "100-110"]), ("race", &["race3"])]);
        let out = rule.apply(&d);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].condition.get("age"), Some("0-10"));
    }

    #[test]
    fn single_year_ages_use_their_band() {
        let rule = NetMigrationRule::with_default_rates();
        let d = domain(&[("age", &["27"]), ("race", &["race1"])]);
        let out = rule.apply(&d);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].amount, 600); // 300 * 2.0
    }
}
