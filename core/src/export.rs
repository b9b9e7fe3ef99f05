//! Flat CSV export for BI tooling.

use crate::{analysis::AgeDefaultRate, error::DashboardResult};
use std::io::Write;
use std::path::Path;

/// Write `Age,DefaultRate` rows to any writer.
pub fn write_default_rate_by_age<W: Write>(rows: &[AgeDefaultRate], out: W) -> DashboardResult<()> {
    let mut writer = csv::Writer::from_writer(out);
    if rows.is_empty() {
        writer.write_record(["Age", "DefaultRate"])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the per-age export to `path`, replacing any existing file.
pub fn export_default_rate_by_age(rows: &[AgeDefaultRate], path: &Path) -> DashboardResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_default_rate_by_age(rows, file)?;
    log::info!("export: wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
