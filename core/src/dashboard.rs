//! The dashboard pipeline.
//!
//! STAGE ORDER (fixed, never reordered):
//!   1. Generate  — loan table, then borrower table
//!   2. Analyze   — overall, per-type and per-gender statistics
//!   3. Plot      — three SVG charts (skipped when plots are disabled)
//!   4. Export    — per-age default rate CSV
//!
//! RULES:
//!   - All randomness flows through the RngBank.
//!   - Stages only read what earlier stages produced.

use crate::{
    analysis::{self, AgeDefaultRate, Summary},
    config::DashboardConfig,
    error::DashboardResult,
    export, generator, plot,
    rng::{RngBank, StreamSlot},
    types::Dataset,
};
use std::path::PathBuf;

/// Everything a single run produced.
#[derive(Debug, Clone)]
pub struct DashboardRun {
    pub dataset: Dataset,
    pub summary: Summary,
    pub by_age: Vec<AgeDefaultRate>,
    pub export_path: PathBuf,
    pub plot_paths: Vec<PathBuf>,
}

pub struct Dashboard {
    pub config: DashboardConfig,
    pub rng_bank: RngBank,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> DashboardResult<Self> {
        config.validate()?;
        Ok(Self {
            rng_bank: RngBank::new(config.seed),
            config,
        })
    }

    pub fn generate(&self) -> Dataset {
        generator::generate_dataset(&self.config, &self.rng_bank)
    }

    pub fn analyze(&self, dataset: &Dataset) -> (Summary, Vec<AgeDefaultRate>) {
        (
            Summary::compute(&dataset.loans, &dataset.borrowers),
            analysis::default_rate_by_age(&dataset.borrowers),
        )
    }

    pub fn plot(&self, dataset: &Dataset) -> DashboardResult<Vec<PathBuf>> {
        if !self.config.plots.enabled {
            log::info!("plot: disabled");
            return Ok(Vec::new());
        }
        let mut rng = self.rng_bank.for_stream(StreamSlot::Bootstrap);
        plot::render_all(
            &dataset.loans,
            &dataset.borrowers,
            &self.config.plots,
            &self.config.output_dir,
            &mut rng,
        )
    }

    pub fn export(&self, by_age: &[AgeDefaultRate]) -> DashboardResult<PathBuf> {
        let path = self.config.export_path();
        export::export_default_rate_by_age(by_age, &path)?;
        Ok(path)
    }

    /// Run every stage in order.
    pub fn run(&self) -> DashboardResult<DashboardRun> {
        log::info!(
            "dashboard: seed={} loans={}",
            self.rng_bank.master_seed(),
            self.config.n_loans
        );

        let dataset = self.generate();
        log::info!("generate: {} rows per table", dataset.len());

        let (summary, by_age) = self.analyze(&dataset);
        log::info!(
            "analyze: default rate {:.2}%, {} age groups",
            summary.overall_default_rate,
            by_age.len()
        );

        let plot_paths = self.plot(&dataset)?;
        if !plot_paths.is_empty() {
            log::info!("plot: rendered {} charts", plot_paths.len());
        }

        let export_path = self.export(&by_age)?;

        Ok(DashboardRun {
            dataset,
            summary,
            by_age,
            export_path,
            plot_paths,
        })
    }
}
