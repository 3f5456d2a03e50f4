//! Spatial outlier rejection for vertebra candidates.
//!
//! The spine runs roughly vertically, so candidates far from the median
//! horizontal position (ribs, pelvis, labels) are rejected using the median
//! absolute deviation. Candidates at either end of the column that sit
//! unusually far from their neighbour are rejected as well.

use std::cmp::Ordering;

use base::{log_debug, mad, median};

use crate::{config::PostprocessConfig, types::Detection};

/// Per-candidate mask (true when within the allowed horizontal spread) and
/// each candidate's absolute distance from the median x-center.
pub(crate) fn x_inlier_mask(
    detections: &[Detection],
    config: &PostprocessConfig,
) -> (Vec<bool>, Vec<f64>) {
    let center_x: Vec<f64> = detections.iter().map(|d| d.center().x).collect();
    let widths: Vec<f64> = detections.iter().map(Detection::width).collect();

    let (Some(median_x), Some(mad_x), Some(median_width)) =
        (median(&center_x), mad(&center_x), median(&widths))
    else {
        return (Vec::new(), Vec::new());
    };

    let mad_x = mad_x.max(median_width * config.min_mad_width_ratio);
    let deviations: Vec<f64> = center_x.iter().map(|x| (x - median_x).abs()).collect();
    let mask = deviations
        .iter()
        .map(|deviation| *deviation <= config.x_deviation_threshold * mad_x)
        .collect();
    (mask, deviations)
}

/// Per-candidate mask: false only for the topmost or bottommost candidate
/// (by center y) when its gap to the neighbour exceeds the threshold.
pub(crate) fn y_gap_mask(detections: &[Detection], config: &PostprocessConfig) -> Vec<bool> {
    let mut mask = vec![true; detections.len()];
    if detections.len() < 3 {
        return mask;
    }

    let center_y: Vec<f64> = detections.iter().map(|d| d.center().y).collect();
    let mut order: Vec<usize> = (0..detections.len()).collect();
    order.sort_by(|&a, &b| center_y[a].partial_cmp(&center_y[b]).unwrap_or(Ordering::Equal));

    let gaps: Vec<f64> = order
        .windows(2)
        .map(|pair| center_y[pair[1]] - center_y[pair[0]])
        .collect();
    let Some(median_gap) = median(&gaps) else {
        return mask;
    };
    let limit = config.y_gap_threshold * median_gap;

    let last = order.len() - 1;
    if gaps[0] > limit {
        mask[order[0]] = false;
    }
    if gaps[last - 1] > limit {
        mask[order[last]] = false;
    }
    mask
}

/// Indices of the `count` candidates closest to the median x, ascending.
fn closest_to_median(deviations: &[f64], count: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..deviations.len()).collect();
    order.sort_by(|&a, &b| {
        deviations[a]
            .partial_cmp(&deviations[b])
            .unwrap_or(Ordering::Equal)
    });
    order.truncate(count);
    order.sort_unstable();
    order
}

/// Drop spatially inconsistent candidates, preserving input order.
///
/// Never returns fewer than `config.min_kept` candidates (when that many
/// were given): first falls back to the horizontal test alone, then to the
/// candidates closest to the median x.
pub(crate) fn reject_spatial_outliers(
    detections: Vec<Detection>,
    config: &PostprocessConfig,
) -> Vec<Detection> {
    if detections.len() < config.min_kept {
        return detections;
    }

    let (x_mask, deviations) = x_inlier_mask(&detections, config);
    let y_mask = y_gap_mask(&detections, config);
    let count = |mask: &[bool]| mask.iter().filter(|keep| **keep).count();

    let mut keep: Vec<bool> = x_mask.iter().zip(&y_mask).map(|(x, y)| *x && *y).collect();
    if count(&keep) < config.min_kept {
        log_debug!("outlier filter too strict, falling back to horizontal test only");
        keep = x_mask;
        if count(&keep) < config.min_kept {
            log_debug!("keeping the {} candidates closest to the spine midline", config.min_kept);
            keep = vec![false; detections.len()];
            for index in closest_to_median(&deviations, config.min_kept) {
                keep[index] = true;
            }
        }
    }

    let before = detections.len();
    let kept: Vec<Detection> = detections
        .into_iter()
        .zip(keep)
        .filter_map(|(detection, keep)| keep.then_some(detection))
        .collect();
    if kept.len() < before {
        log_debug!("rejected {} spatial outliers", before - kept.len());
    }
    kept
}
