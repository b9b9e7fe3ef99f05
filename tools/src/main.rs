//! dashboard-runner: headless loan dashboard.
//!
//! Usage:
//!   dashboard-runner
//!   dashboard-runner --seed 7 --loans 2000 --out-dir ./out
//!   dashboard-runner --config dashboard.json --no-plots
//!   dashboard-runner --summary-json summary.json

use anyhow::Result;
use loan_dashboard_core::{config::DashboardConfig, dashboard::Dashboard, report};
use std::env;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match find_value(&args, "--config") {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    config.seed = parse_arg(&args, "--seed", config.seed);
    config.n_loans = parse_arg(&args, "--loans", config.n_loans);
    if let Some(dir) = find_value(&args, "--out-dir") {
        config.output_dir = PathBuf::from(dir);
    }
    if args.iter().any(|a| a == "--no-plots") {
        config.plots.enabled = false;
    }
    log::info!(
        "dashboard-runner started at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let dashboard = Dashboard::new(config)?;
    let run = dashboard.run()?;

    println!("{}", report::render(&run.summary));
    for path in &run.plot_paths {
        println!("Chart written to '{}'.", path.display());
    }
    println!();
    println!("{}", report::export_notice(&run.export_path));

    if let Some(path) = find_value(&args, "--summary-json") {
        std::fs::write(path, serde_json::to_string_pretty(&run.summary)?)?;
        log::info!("summary written to {path}");
    }
    Ok(())
}

fn find_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    match find_value(args, flag) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("ignoring unparsable {flag} value {raw:?}");
            default
        }),
        None => default,
    }
}
