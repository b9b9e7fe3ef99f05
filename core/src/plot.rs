//! SVG rendering of the three exploratory charts.
//!
//! Each chart is drawn to its own file in the output directory and the
//! backend is dropped as soon as the file is presented.

use crate::{
    config::PlotConfig,
    error::DashboardResult,
    rng::StreamRng,
    stats,
    types::{BorrowerRecord, Gender, LoanRecord},
};
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DISTRIBUTION_FILE: &str = "loan_amount_distribution.svg";
pub const GENDER_FILE: &str = "default_rate_by_gender.svg";
pub const INCOME_FILE: &str = "income_vs_default.svg";

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const KDE_LINE: RGBColor = RGBColor(31, 119, 180);
const PASTEL: [RGBColor; 2] = [RGBColor(161, 201, 244), RGBColor(255, 180, 130)];
const MUTED: [RGBColor; 2] = [RGBColor(72, 120, 208), RGBColor(238, 133, 74)];
const CAPTION_FONT: (&str, u32) = ("sans-serif", 22);

/// Render all three charts into `dir`. Returns the written paths.
pub fn render_all(
    loans: &[LoanRecord],
    borrowers: &[BorrowerRecord],
    config: &PlotConfig,
    dir: &Path,
    rng: &mut StreamRng,
) -> DashboardResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let distribution = dir.join(DISTRIBUTION_FILE);
    let gender = dir.join(GENDER_FILE);
    let income = dir.join(INCOME_FILE);

    loan_amount_distribution(loans, config, &distribution)?;
    default_rate_by_gender(borrowers, config, &gender, rng)?;
    income_vs_default(borrowers, config, &income)?;

    Ok(vec![distribution, gender, income])
}

/// Histogram of loan amounts with a KDE curve scaled to bin counts.
pub fn loan_amount_distribution(
    loans: &[LoanRecord],
    config: &PlotConfig,
    path: &Path,
) -> DashboardResult<()> {
    let amounts: Vec<f64> = loans.iter().map(|l| l.loan_amount as f64).collect();
    let bins = stats::histogram(&amounts, config.histogram_bins);
    let bin_width = bins.first().map(stats::Bin::width).unwrap_or(1.0);
    let kde: Vec<(f64, f64)> = stats::gaussian_kde(&amounts, config.kde_points)
        .into_iter()
        .map(|(x, d)| (x, d * amounts.len() as f64 * bin_width))
        .collect();

    let x_range = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => first.lower..last.upper,
        _ => 0.0..1.0,
    };
    let peak = bins
        .iter()
        .map(|b| b.count as f64)
        .chain(kde.iter().map(|(_, y)| *y))
        .fold(1.0, f64::max);

    let root = SVGBackend::new(path, config.distribution_size).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Loan Amount Distribution", CAPTION_FONT)
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, 0.0..peak * 1.1)?;
    chart
        .configure_mesh()
        .x_desc("Loan Amount")
        .y_desc("Count")
        .x_label_formatter(&|x| format!("{x:.0}"))
        .draw()?;

    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new([(b.lower, 0.0), (b.upper, b.count as f64)], SKY_BLUE.mix(0.8).filled())
    }))?;
    chart.draw_series(LineSeries::new(kde, KDE_LINE.stroke_width(2)))?;

    root.present()?;
    log::debug!("plot: {} ({} bins)", path.display(), bins.len());
    Ok(())
}

/// Bar per gender of the default percentage with a bootstrap interval.
pub fn default_rate_by_gender(
    borrowers: &[BorrowerRecord],
    config: &PlotConfig,
    path: &Path,
    rng: &mut StreamRng,
) -> DashboardResult<()> {
    let mut groups: BTreeMap<Gender, Vec<f64>> = BTreeMap::new();
    for b in borrowers {
        groups
            .entry(b.gender)
            .or_default()
            .push(f64::from(b.defaulted) * 100.0);
    }

    let labels: Vec<&str> = groups.keys().map(Gender::label).collect();
    let bars: Vec<(f64, f64, Option<(f64, f64)>)> = groups
        .values()
        .enumerate()
        .map(|(i, values)| {
            let ci = stats::bootstrap_ci(
                values,
                config.bootstrap_resamples,
                config.confidence_level,
                rng,
            );
            (i as f64, stats::mean(values), ci)
        })
        .collect();
    let top = bars
        .iter()
        .map(|(_, rate, ci)| ci.map_or(*rate, |(_, hi)| hi.max(*rate)))
        .fold(1.0, f64::max);

    let root = SVGBackend::new(path, config.gender_size).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Default Rate by Gender (%)", CAPTION_FONT)
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(category_axis(labels.len()), 0.0..top * 1.2)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len() * 2 + 1)
        .x_label_formatter(&|x| category_label(&labels, *x))
        .x_desc("Gender")
        .y_desc("Default Probability (%)")
        .draw()?;

    chart.draw_series(bars.iter().map(|(x, rate, _)| {
        let color = PASTEL[*x as usize % PASTEL.len()];
        Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *rate)], color.filled())
    }))?;
    chart.draw_series(bars.iter().filter_map(|(x, _, ci)| ci.map(|ci| (*x, ci))).flat_map(
        |(x, (lo, hi))| {
            [
                vec![(x, lo), (x, hi)],
                vec![(x - 0.08, lo), (x + 0.08, lo)],
                vec![(x - 0.08, hi), (x + 0.08, hi)],
            ]
            .into_iter()
            .map(|points| PathElement::new(points, BLACK.stroke_width(2)))
        },
    ))?;

    root.present()?;
    log::debug!("plot: {} ({} groups)", path.display(), labels.len());
    Ok(())
}

/// Box plot of income split by default outcome.
pub fn income_vs_default(
    borrowers: &[BorrowerRecord],
    config: &PlotConfig,
    path: &Path,
) -> DashboardResult<()> {
    let labels = ["Repaid", "Defaulted"];
    let boxes: Vec<(f64, stats::BoxStats)> = (0..=1u8)
        .filter_map(|flag| {
            let incomes: Vec<f64> = borrowers
                .iter()
                .filter(|b| b.defaulted == flag)
                .map(|b| b.income as f64)
                .collect();
            stats::box_stats(&incomes).map(|s| (f64::from(flag), s))
        })
        .collect();

    let (mut lo, mut hi) = borrowers
        .iter()
        .map(|b| b.income as f64)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !lo.is_finite() || hi <= lo {
        lo = 0.0;
        hi = hi.max(1.0);
    }
    let pad = (hi - lo) * 0.05;

    let root = SVGBackend::new(path, config.income_size).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Income Distribution vs Loan Default", CAPTION_FONT)
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(category_axis(labels.len()), (lo - pad)..(hi + pad))?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len() * 2 + 1)
        .x_label_formatter(&|x| category_label(&labels, *x))
        .y_label_formatter(&|y| format!("{y:.0}"))
        .x_desc("Defaulted")
        .y_desc("Income")
        .draw()?;

    chart.draw_series(boxes.iter().map(|(x, s)| {
        let color = MUTED[*x as usize % MUTED.len()];
        Rectangle::new([(x - 0.3, s.q1), (x + 0.3, s.q3)], color.mix(0.85).filled())
    }))?;
    chart.draw_series(boxes.iter().flat_map(|(x, s)| {
        let x = *x;
        [
            vec![(x - 0.3, s.q1), (x + 0.3, s.q1), (x + 0.3, s.q3), (x - 0.3, s.q3), (x - 0.3, s.q1)],
            vec![(x - 0.3, s.median), (x + 0.3, s.median)],
            vec![(x, s.q1), (x, s.whisker_low)],
            vec![(x, s.q3), (x, s.whisker_high)],
            vec![(x - 0.15, s.whisker_low), (x + 0.15, s.whisker_low)],
            vec![(x - 0.15, s.whisker_high), (x + 0.15, s.whisker_high)],
        ]
        .into_iter()
        .map(|points| PathElement::new(points, BLACK.stroke_width(1)))
    }))?;
    chart.draw_series(boxes.iter().flat_map(|(x, s)| {
        s.outliers
            .iter()
            .map(move |y| Circle::new((*x, *y), 3, BLACK.stroke_width(1)))
    }))?;

    root.present()?;
    log::debug!("plot: {} ({} boxes)", path.display(), boxes.len());
    Ok(())
}

/// Categories sit at integer positions 0..n, each half a unit wide.
fn category_axis(n: usize) -> std::ops::Range<f64> {
    -0.5..(n.max(1) as f64 - 0.5)
}

fn category_label(labels: &[&str], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels
        .get(idx as usize)
        .map(|l| (*l).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_integer_ticks() {
        let labels = ["Female", "Male"];
        assert_eq!(category_label(&labels, 0.0), "Female");
        assert_eq!(category_label(&labels, 1.0), "Male");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -0.5), "");
        assert_eq!(category_label(&labels, 2.0), "");
    }
}
