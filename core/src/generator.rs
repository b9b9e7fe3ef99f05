//! Synthetic loan and borrower generation.
//!
//! Draws are made column by column: every loan amount, then every
//! loan type, then every status. Reordering the loops changes every
//! generated table for a given seed.

use crate::{
    config::DashboardConfig,
    rng::{RngBank, StreamRng, StreamSlot},
    types::{BorrowerRecord, Dataset, Gender, LoanRecord, LoanStatus, RecordId},
};

pub fn generate_loans(config: &DashboardConfig, rng: &mut StreamRng) -> Vec<LoanRecord> {
    let n = config.n_loans;
    let amounts: Vec<i64> = (0..n)
        .map(|_| rng.range_i64(config.loan_amount.min, config.loan_amount.max))
        .collect();
    let types: Vec<_> = (0..n).map(|_| *rng.pick(&config.loan_types)).collect();
    let statuses: Vec<_> = (0..n)
        .map(|_| LoanStatus::ALL[rng.weighted(&config.status_weights)])
        .collect();

    amounts
        .into_iter()
        .zip(types)
        .zip(statuses)
        .enumerate()
        .map(|(i, ((loan_amount, loan_type), loan_status))| LoanRecord {
            loan_id: i as RecordId + 1,
            loan_amount,
            loan_type,
            loan_status,
        })
        .collect()
}

/// One borrower per loan; `defaulted` mirrors the loan at the same row.
pub fn generate_borrowers(
    config: &DashboardConfig,
    loans: &[LoanRecord],
    rng: &mut StreamRng,
) -> Vec<BorrowerRecord> {
    let n = loans.len();
    let ages: Vec<u32> = (0..n)
        // Validated config keeps ages within 0..=u32::MAX.
        .map(|_| rng.range_i64(config.age.min, config.age.max) as u32)
        .collect();
    let genders: Vec<Gender> = (0..n).map(|_| *rng.pick(&Gender::ALL)).collect();
    let incomes: Vec<i64> = (0..n)
        .map(|_| rng.range_i64(config.income.min, config.income.max))
        .collect();

    loans
        .iter()
        .zip(ages)
        .zip(genders)
        .zip(incomes)
        .enumerate()
        .map(|(i, (((loan, age), gender), income))| BorrowerRecord {
            borrower_id: i as RecordId + 1,
            age,
            gender,
            income,
            defaulted: u8::from(loan.loan_status == LoanStatus::Defaulted),
        })
        .collect()
}

pub fn generate_dataset(config: &DashboardConfig, bank: &RngBank) -> Dataset {
    let mut loan_rng = bank.for_stream(StreamSlot::Loans);
    let mut borrower_rng = bank.for_stream(StreamSlot::Borrowers);

    let loans = generate_loans(config, &mut loan_rng);
    let borrowers = generate_borrowers(config, &loans, &mut borrower_rng);
    log::debug!(
        "generated {} loans / {} borrowers (streams: {}, {})",
        loans.len(),
        borrowers.len(),
        loan_rng.name,
        borrower_rng.name
    );
    Dataset { loans, borrowers }
}
