//! Shared record types for the loan and borrower tables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Loan and borrower identifiers run 1..=n.
pub type RecordId = u32;

/// Loan product category.
///
/// Variants are declared alphabetically so grouped output sorts by
/// label; sampling uses the order in `LoanType::ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LoanType {
    Auto,
    Education,
    Home,
    Personal,
}

impl LoanType {
    pub const ALL: [LoanType; 4] = [Self::Home, Self::Auto, Self::Personal, Self::Education];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Education => "Education",
            Self::Home => "Home",
            Self::Personal => "Personal",
        }
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanStatus {
    Repaid,
    Defaulted,
}

impl LoanStatus {
    /// Sampling order; paired index-wise with the configured status weights.
    pub const ALL: [LoanStatus; 2] = [Self::Repaid, Self::Defaulted];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Repaid => "Repaid",
            Self::Defaulted => "Defaulted",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Declared alphabetically for grouped output, like `LoanType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Self::Male, Self::Female];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub loan_id: RecordId,
    pub loan_amount: i64,
    pub loan_type: LoanType,
    pub loan_status: LoanStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerRecord {
    pub borrower_id: RecordId,
    pub age: u32,
    pub gender: Gender,
    pub income: i64,
    /// 1 when the loan at the same position defaulted, else 0.
    pub defaulted: u8,
}

/// Both tables for one run. Row `i` of each describes the same loan.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    pub loans: Vec<LoanRecord>,
    pub borrowers: Vec<BorrowerRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }
}
