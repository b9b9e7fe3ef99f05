//! Loan and borrower generation tests.

use loan_dashboard_core::{
    config::{DashboardConfig, IntRange},
    dashboard::Dashboard,
    types::{Gender, LoanStatus, LoanType},
};
use std::collections::HashSet;

fn full_dashboard(seed: u64) -> Dashboard {
    let config = DashboardConfig {
        seed,
        ..DashboardConfig::default()
    };
    Dashboard::new(config).unwrap()
}

#[test]
fn tables_have_configured_length() {
    let dashboard = full_dashboard(42);
    let dataset = dashboard.generate();
    assert_eq!(dataset.loans.len(), 500, "Expected 500 loans");
    assert_eq!(dataset.borrowers.len(), dataset.loans.len());
}

#[test]
fn ids_run_from_one() {
    let dataset = full_dashboard(1).generate();
    for (i, (loan, borrower)) in dataset.loans.iter().zip(&dataset.borrowers).enumerate() {
        assert_eq!(loan.loan_id as usize, i + 1);
        assert_eq!(borrower.borrower_id as usize, i + 1);
    }
}

#[test]
fn values_stay_in_configured_ranges() {
    let dashboard = full_dashboard(123);
    let config = &dashboard.config;
    let dataset = dashboard.generate();

    for loan in &dataset.loans {
        assert!(
            config.loan_amount.contains(loan.loan_amount),
            "loan amount out of range: {}",
            loan.loan_amount
        );
    }
    for b in &dataset.borrowers {
        assert!(config.age.contains(i64::from(b.age)), "age out of range: {}", b.age);
        assert!(config.income.contains(b.income), "income out of range: {}", b.income);
    }
}

#[test]
fn defaulted_flag_mirrors_loan_status() {
    let dataset = full_dashboard(9).generate();
    for (loan, borrower) in dataset.loans.iter().zip(&dataset.borrowers) {
        let expected = u8::from(loan.loan_status == LoanStatus::Defaulted);
        assert_eq!(borrower.defaulted, expected, "row {}", loan.loan_id);
    }
}

#[test]
fn default_share_is_near_twenty_percent() {
    let config = DashboardConfig {
        n_loans: 20_000,
        ..DashboardConfig::default_test()
    };
    let dataset = Dashboard::new(config).unwrap().generate();
    let defaults = dataset.borrowers.iter().filter(|b| b.defaulted == 1).count();
    let share = defaults as f64 / dataset.len() as f64;
    assert!((share - 0.2).abs() < 0.02, "default share {share:.3} far from 0.2");
}

#[test]
fn every_category_appears() {
    let dataset = full_dashboard(5).generate();
    let types: HashSet<LoanType> = dataset.loans.iter().map(|l| l.loan_type).collect();
    let genders: HashSet<Gender> = dataset.borrowers.iter().map(|b| b.gender).collect();
    assert_eq!(types.len(), LoanType::ALL.len());
    assert_eq!(genders.len(), Gender::ALL.len());
}

#[test]
fn restricted_config_is_honoured() {
    let config = DashboardConfig {
        loan_types: vec![LoanType::Home],
        status_weights: [1.0, 0.0],
        age: IntRange::new(30, 31),
        ..DashboardConfig::default_test()
    };
    let dataset = Dashboard::new(config).unwrap().generate();
    assert!(dataset.loans.iter().all(|l| l.loan_type == LoanType::Home));
    assert!(dataset.loans.iter().all(|l| l.loan_status == LoanStatus::Repaid));
    assert!(dataset.borrowers.iter().all(|b| b.age == 30 && b.defaulted == 0));
}

#[test]
fn invalid_config_is_rejected() {
    let config = DashboardConfig {
        n_loans: 10,
        loan_types: Vec::new(),
        ..DashboardConfig::default_test()
    };
    assert!(Dashboard::new(config).is_err());
}

#[test]
fn ages_too_large_for_u32_are_rejected() {
    let config = DashboardConfig {
        age: IntRange::new(4_294_967_290, 4_294_967_300),
        ..DashboardConfig::default_test()
    };
    assert!(Dashboard::new(config).is_err());
}

#[test]
fn ages_at_the_u32_ceiling_stay_in_range() {
    let config = DashboardConfig {
        age: IntRange::new(4_294_967_290, i64::from(u32::MAX) + 1),
        ..DashboardConfig::default_test()
    };
    let dashboard = Dashboard::new(config).unwrap();
    let dataset = dashboard.generate();
    let bad: Vec<u32> = dataset
        .borrowers
        .iter()
        .map(|b| b.age)
        .filter(|age| !dashboard.config.age.contains(i64::from(*age)))
        .collect();
    assert!(bad.is_empty(), "out-of-range ages: {bad:?}");
}
