//! Descriptive statistics behind the plots.
//!
//! All functions take raw samples and never mutate them. Empty input
//! returns an empty or zeroed result rather than NaN.

use crate::rng::StreamRng;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator). 0.0 below two samples.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Quantile of already-sorted data, linearly interpolated between the
/// two closest ranks.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => 0.0,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
        }
    }
}

pub fn quantile(values: &[f64], q: f64) -> f64 {
    quantile_sorted(&sorted(values), q)
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(|a, b| a.total_cmp(b));
    v
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl Bin {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Equal-width bins spanning [min, max]. The last bin is closed so the
/// maximum lands in it. A constant sample gets a unit-wide span.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if max > min { (min, max) } else { (min - 0.5, max + 0.5) };
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();
    for v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

/// Scott's rule bandwidth: `std * n^(-1/5)`.
pub fn scott_bandwidth(values: &[f64]) -> f64 {
    sample_std(values) * (values.len() as f64).powf(-0.2)
}

/// Gaussian kernel density evaluated at `points` evenly spaced grid
/// positions across the data range. Returns `(x, density)` pairs.
pub fn gaussian_kde(values: &[f64], points: usize) -> Vec<(f64, f64)> {
    let bw = scott_bandwidth(values);
    if values.is_empty() || points < 2 || bw <= 0.0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = (max - min) / (points - 1) as f64;
    let norm = 1.0 / (values.len() as f64 * bw * (2.0 * std::f64::consts::PI).sqrt());

    (0..points)
        .map(|i| {
            let x = min + step * i as f64;
            let density: f64 = values
                .iter()
                .map(|v| (-0.5 * ((x - v) / bw).powi(2)).exp())
                .sum::<f64>()
                * norm;
            (x, density)
        })
        .collect()
}

/// Five-number summary with Tukey whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest observation within `q1 - 1.5 * IQR`.
    pub whisker_low: f64,
    /// Largest observation within `q3 + 1.5 * IQR`.
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }
    let data = sorted(values);
    let q1 = quantile_sorted(&data, 0.25);
    let median = quantile_sorted(&data, 0.5);
    let q3 = quantile_sorted(&data, 0.75);
    let fence = 1.5 * (q3 - q1);
    let (low_fence, high_fence) = (q1 - fence, q3 + fence);

    let inside = data.iter().copied().filter(|v| *v >= low_fence && *v <= high_fence);
    let whisker_low = inside.clone().next().unwrap_or(q1);
    let whisker_high = inside.last().unwrap_or(q3);
    let outliers = data
        .iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();

    Some(BoxStats {
        q1,
        median,
        q3,
        whisker_low,
        whisker_high,
        outliers,
    })
}

/// Percentile bootstrap interval for the mean.
pub fn bootstrap_ci(
    values: &[f64],
    resamples: usize,
    level: f64,
    rng: &mut StreamRng,
) -> Option<(f64, f64)> {
    if values.is_empty() || resamples == 0 {
        return None;
    }
    let n = values.len();
    let means: Vec<f64> = (0..resamples)
        .map(|_| {
            let sum: f64 = (0..n).map(|_| values[rng.next_u64_below(n as u64) as usize]).sum();
            sum / n as f64
        })
        .collect();
    let means = sorted(&means);
    let tail = (1.0 - level) / 2.0;
    Some((quantile_sorted(&means, tail), quantile_sorted(&means, 1.0 - tail)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StreamSlot};

    #[test]
    fn quantile_interpolates_between_ranks() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&data, 0.0), 1.0);
        assert_eq!(quantile(&data, 1.0), 4.0);
        assert!((quantile(&data, 0.5) - 2.5).abs() < 1e-12);
        assert!((quantile(&data, 0.25) - 1.75).abs() < 1e-12);
    }

    #[test]
    fn histogram_counts_every_value_once() {
        let data: Vec<f64> = (0..100).map(f64::from).collect();
        let bins = histogram(&data, 30);
        assert_eq!(bins.len(), 30);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 100);
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[29].upper, 99.0);
        assert!(bins[29].count > 0, "max value must land in the last bin");
    }

    #[test]
    fn histogram_of_constant_sample() {
        let bins = histogram(&[5.0, 5.0, 5.0], 4);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn kde_integrates_to_roughly_one() {
        let data: Vec<f64> = (0..200).map(|i| f64::from(i % 20)).collect();
        let curve = gaussian_kde(&data, 400);
        let step = curve[1].0 - curve[0].0;
        let area: f64 = curve.iter().map(|(_, d)| d * step).sum();
        // Grid is clipped to the data range so some tail mass is lost.
        assert!(area > 0.8 && area < 1.05, "area = {area}");
    }

    #[test]
    fn box_stats_flags_outliers() {
        let mut data: Vec<f64> = (1..=20).map(f64::from).collect();
        data.push(100.0);
        let stats = box_stats(&data).unwrap();
        assert_eq!(stats.outliers, vec![100.0]);
        assert_eq!(stats.whisker_high, 20.0);
        assert_eq!(stats.whisker_low, 1.0);
        assert!((stats.median - 11.0).abs() < 1e-12);
    }

    #[test]
    fn bootstrap_interval_brackets_the_mean() {
        let data: Vec<f64> = (0..100).map(|i| f64::from(u8::from(i % 5 == 0))).collect();
        let mut rng = RngBank::new(42).for_stream(StreamSlot::Bootstrap);
        let (lo, hi) = bootstrap_ci(&data, 1000, 0.95, &mut rng).unwrap();
        let m = mean(&data);
        assert!(lo < m && m < hi, "{lo} < {m} < {hi}");
        assert!(lo >= 0.0 && hi <= 1.0);
    }

    #[test]
    fn empty_inputs_are_quiet() {
        assert_eq!(mean(&[]), 0.0);
        assert!(histogram(&[], 10).is_empty());
        assert!(gaussian_kde(&[], 10).is_empty());
        assert!(box_stats(&[]).is_none());
    }
}
