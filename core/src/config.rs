use crate::{
    error::{DashboardError, DashboardResult},
    types::LoanType,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bounds on chart work. Larger values only slow rendering down.
pub const MAX_HISTOGRAM_BINS: usize = 1_000;
pub const MAX_KDE_POINTS: usize = 10_000;
pub const MAX_BOOTSTRAP_RESAMPLES: usize = 100_000;

/// Half-open integer range `[min, max)` used for uniform draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value < self.max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub enabled: bool,
    pub histogram_bins: usize,
    /// Points on the KDE evaluation grid.
    pub kde_points: usize,
    pub bootstrap_resamples: usize,
    pub confidence_level: f64,
    pub distribution_size: (u32, u32),
    pub gender_size: (u32, u32),
    pub income_size: (u32, u32),
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            histogram_bins: 30,
            kde_points: 200,
            bootstrap_resamples: 1000,
            confidence_level: 0.95,
            distribution_size: (800, 500),
            gender_size: (600, 400),
            income_size: (700, 500),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub seed: u64,
    pub n_loans: usize,
    pub loan_amount: IntRange,
    pub loan_types: Vec<LoanType>,
    /// Weights for `[Repaid, Defaulted]`.
    pub status_weights: [f64; 2],
    pub age: IntRange,
    pub income: IntRange,
    pub output_dir: PathBuf,
    pub export_file: String,
    pub plots: PlotConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            n_loans: 500,
            loan_amount: IntRange::new(5_000, 500_000),
            loan_types: LoanType::ALL.to_vec(),
            status_weights: [0.8, 0.2],
            age: IntRange::new(20, 65),
            income: IntRange::new(20_000, 200_000),
            output_dir: PathBuf::from("."),
            export_file: "processed_for_powerbi.csv".into(),
            plots: PlotConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load from a JSON file. Fields missing from the file keep
    /// their defaults.
    pub fn load(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Config with a small population and plots disabled, for tests.
    pub fn default_test() -> Self {
        Self {
            n_loans: 50,
            plots: PlotConfig {
                enabled: false,
                bootstrap_resamples: 200,
                ..PlotConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn export_path(&self) -> PathBuf {
        self.output_dir.join(&self.export_file)
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.n_loans == 0 {
            return Err(invalid("n_loans", "must be > 0"));
        }
        check_range("loan_amount", self.loan_amount)?;
        check_range("age", self.age)?;
        check_range("income", self.income)?;
        if self.age.min < 0 || self.age.max > i64::from(u32::MAX) + 1 {
            return Err(invalid(
                "age",
                format!("{}..{} does not fit in 0..=u32::MAX", self.age.min, self.age.max),
            ));
        }
        if self.loan_types.is_empty() {
            return Err(invalid("loan_types", "at least one loan type is required"));
        }
        if self.status_weights.iter().any(|w| !w.is_finite() || *w < 0.0)
            || self.status_weights.iter().sum::<f64>() <= 0.0
        {
            return Err(invalid(
                "status_weights",
                format!("{:?} is not a distribution", self.status_weights),
            ));
        }
        if self.export_file.is_empty() {
            return Err(invalid("export_file", "file name is empty"));
        }
        check_count("plots.histogram_bins", self.plots.histogram_bins, 1, MAX_HISTOGRAM_BINS)?;
        check_count("plots.kde_points", self.plots.kde_points, 2, MAX_KDE_POINTS)?;
        check_count(
            "plots.bootstrap_resamples",
            self.plots.bootstrap_resamples,
            1,
            MAX_BOOTSTRAP_RESAMPLES,
        )?;
        if !(self.plots.confidence_level > 0.0 && self.plots.confidence_level < 1.0) {
            return Err(invalid("plots.confidence_level", "must lie in (0, 1)"));
        }
        Ok(())
    }
}

fn check_range(field: &'static str, range: IntRange) -> DashboardResult<()> {
    if range.min >= range.max {
        return Err(invalid(
            field,
            format!("empty range {}..{}", range.min, range.max),
        ));
    }
    Ok(())
}

fn check_count(field: &'static str, value: usize, min: usize, max: usize) -> DashboardResult<()> {
    if !(min..=max).contains(&value) {
        return Err(invalid(field, format!("{value} outside {min}..={max}")));
    }
    Ok(())
}

fn invalid(field: &'static str, reason: impl Into<String>) -> DashboardError {
    DashboardError::InvalidConfig {
        field,
        reason: reason.into(),
    }
}
