//! Grouped aggregates over the generated tables.

use crate::types::{BorrowerRecord, Gender, LoanRecord, LoanType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the per-age export. `default_rate` is a fraction in
/// [0, 1], not a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeDefaultRate {
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "DefaultRate")]
    pub default_rate: f64,
}

/// The statistics printed to the console.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Percentage of borrowers who defaulted.
    pub overall_default_rate: f64,
    pub average_amount_by_type: BTreeMap<LoanType, f64>,
    /// Percentage per gender.
    pub default_rate_by_gender: BTreeMap<Gender, f64>,
}

impl Summary {
    pub fn compute(loans: &[LoanRecord], borrowers: &[BorrowerRecord]) -> Self {
        Self {
            overall_default_rate: overall_default_rate(borrowers),
            average_amount_by_type: average_amount_by_type(loans),
            default_rate_by_gender: default_rate_by_gender(borrowers),
        }
    }
}

/// Mean of `value` per key. Keys with no rows are absent.
pub fn group_mean<K, I>(rows: I) -> BTreeMap<K, f64>
where
    K: Ord,
    I: IntoIterator<Item = (K, f64)>,
{
    let mut acc: BTreeMap<K, (f64, usize)> = BTreeMap::new();
    for (key, value) in rows {
        let slot = acc.entry(key).or_insert((0.0, 0));
        slot.0 += value;
        slot.1 += 1;
    }
    acc.into_iter()
        .map(|(k, (sum, count))| (k, sum / count as f64))
        .collect()
}

/// Percentage of borrowers with `defaulted == 1`. 0.0 for an empty table.
pub fn overall_default_rate(borrowers: &[BorrowerRecord]) -> f64 {
    if borrowers.is_empty() {
        return 0.0;
    }
    let defaults: u64 = borrowers.iter().map(|b| u64::from(b.defaulted)).sum();
    defaults as f64 / borrowers.len() as f64 * 100.0
}

pub fn average_amount_by_type(loans: &[LoanRecord]) -> BTreeMap<LoanType, f64> {
    group_mean(loans.iter().map(|l| (l.loan_type, l.loan_amount as f64)))
}

pub fn default_rate_by_gender(borrowers: &[BorrowerRecord]) -> BTreeMap<Gender, f64> {
    group_mean(borrowers.iter().map(|b| (b.gender, f64::from(b.defaulted))))
        .into_iter()
        .map(|(g, rate)| (g, rate * 100.0))
        .collect()
}

/// Default fraction per distinct age, ascending by age.
pub fn default_rate_by_age(borrowers: &[BorrowerRecord]) -> Vec<AgeDefaultRate> {
    group_mean(borrowers.iter().map(|b| (b.age, f64::from(b.defaulted))))
        .into_iter()
        .map(|(age, default_rate)| AgeDefaultRate { age, default_rate })
        .collect()
}
