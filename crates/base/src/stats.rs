//! Small robust-statistics helpers shared by the measurement engines.

use std::cmp::Ordering;

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut values = values.to_vec();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    values
}

/// Lower median: for an even-sized sample the smaller of the two middle
/// elements is returned, never their average. `None` for an empty sample.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sorted = sorted(values);
    Some(sorted[(sorted.len() - 1) / 2])
}

/// Median absolute deviation around the lower median.
pub fn mad(values: &[f64]) -> Option<f64> {
    let center = median(values)?;
    let deviations: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
    median(&deviations)
}

/// Arithmetic mean, `None` for an empty sample.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Round to a fixed number of decimal places.
///
/// Rounds the exact binary value, with exact ties going to the even digit,
/// so 2.05 (stored as 2.0499...) gives 2.0 and 0.25 gives 0.2.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}
