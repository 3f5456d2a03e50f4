//! Percentage-normalized asymmetry measurements and composite indices.
//!
//! Height differences are expressed as a percentage of torso height and the
//! trunk shift as a percentage of shoulder width, so results do not depend
//! on camera distance.

use base::{Vec2, log_debug, round_to};
use serde::{Deserialize, Serialize};

use crate::{
    PostureError, derived,
    landmark::{LandmarkPositions, LandmarkSet, PoseLandmark, Side},
};

/// Percentage differences below this are not attributed to a side.
pub const SIDEDNESS_THRESHOLD_PCT: f64 = 0.5;

/// Percentage at which a height term earns its full weight.
const HEIGHT_FULL_PCT: f64 = 2.5;
const HEIGHT_WEIGHT: f64 = 20.0;
const TRUNK_SHIFT_FULL_PCT: f64 = 5.0;
const TRUNK_SHIFT_WEIGHT: f64 = 25.0;
/// Depth difference at which a rotation term earns its full weight.
const DEPTH_FULL: f64 = 0.05;
const ROTATION_WEIGHT: f64 = 8.0;
const SCAPULA_WEIGHT: f64 = 7.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AsymmetryMetrics {
    /// Right minus left, in pixels. Positive when the right side sits lower
    /// in the image.
    pub shoulder_height_diff_px: f64,
    pub hip_height_diff_px: f64,
    pub waist_height_diff_px: f64,
    pub axilla_height_diff_px: f64,
    /// Shoulder midpoint minus hip midpoint, in pixels.
    pub trunk_shift_px: f64,
    /// Waist midpoint minus hip midpoint, in pixels.
    pub waist_trunk_shift_px: f64,

    pub shoulder_height_diff_pct: f64,
    pub hip_height_diff_pct: f64,
    pub waist_height_diff_pct: f64,
    pub axilla_height_diff_pct: f64,
    /// Percent of shoulder width.
    pub trunk_shift_pct: f64,

    pub shoulder_rotation_score: f64,
    pub hip_rotation_score: f64,
    /// Right minus left scapula prominence.
    pub scapula_prominence_diff: f64,

    /// Height Asymmetry Index in [0, 100].
    pub hai_score: f64,
    /// Weighted composite in [0, 100].
    pub overall_asymmetry_score: f64,

    pub higher_shoulder: Option<Side>,
    pub higher_hip: Option<Side>,
}

/// 2-D torso points the metrics are measured from.
#[derive(Debug, Clone, Copy)]
struct TorsoPoints {
    left_shoulder: Vec2<f64>,
    right_shoulder: Vec2<f64>,
    left_hip: Vec2<f64>,
    right_hip: Vec2<f64>,
    left_axilla: Vec2<f64>,
    right_axilla: Vec2<f64>,
    left_waist: Vec2<f64>,
    right_waist: Vec2<f64>,
}

/// Depth-derived scores, only available from a live pose detection.
#[derive(Debug, Clone, Copy)]
struct DepthScores {
    shoulder_rotation: f64,
    hip_rotation: f64,
    scapula_prominence_diff: f64,
}

pub(crate) fn percent_of(value: f64, reference: f64) -> f64 {
    if reference > 0.0 {
        value.abs() / reference * 100.0
    } else {
        0.0
    }
}

pub(crate) fn weighted(value: f64, full: f64, weight: f64) -> f64 {
    (value / full * weight).min(weight)
}

/// Side label for a right-minus-left difference. The photo shows the
/// subject's back, so the label is the viewer's side.
pub(crate) fn sidedness(diff_px: f64, diff_pct: f64) -> Option<Side> {
    if diff_pct < SIDEDNESS_THRESHOLD_PCT {
        return None;
    }
    if diff_px > 0.0 {
        Some(Side::Right)
    } else if diff_px < 0.0 {
        Some(Side::Left)
    } else {
        None
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(f64, f64), PostureError> {
    if width == 0 || height == 0 {
        return Err(PostureError::InvalidDimensions { width, height });
    }
    Ok((width as f64, height as f64))
}

fn compute(
    points: &TorsoPoints,
    depth: Option<DepthScores>,
    width: f64,
    height: f64,
) -> AsymmetryMetrics {
    let shoulder_px = (points.right_shoulder.y - points.left_shoulder.y) * height;
    let hip_px = (points.right_hip.y - points.left_hip.y) * height;
    let waist_px = (points.right_waist.y - points.left_waist.y) * height;
    let axilla_px = (points.right_axilla.y - points.left_axilla.y) * height;

    let shoulder_mid = (points.left_shoulder + points.right_shoulder) / 2.0;
    let hip_mid = (points.left_hip + points.right_hip) / 2.0;
    let waist_mid_x = (points.left_waist.x + points.right_waist.x) / 2.0;

    let trunk_shift_px = (shoulder_mid.x - hip_mid.x) * width;
    let waist_trunk_shift_px = (waist_mid_x - hip_mid.x) * width;

    let torso_height_px = (hip_mid.y - shoulder_mid.y).abs() * height;
    let shoulder_width_px = (points.right_shoulder.x - points.left_shoulder.x).abs() * width;

    let shoulder_pct = percent_of(shoulder_px, torso_height_px);
    let hip_pct = percent_of(hip_px, torso_height_px);
    let waist_pct = percent_of(waist_px, torso_height_px);
    let axilla_pct = percent_of(axilla_px, torso_height_px);
    let trunk_shift_pct = percent_of(trunk_shift_px, shoulder_width_px);

    let hai_score = if torso_height_px > 0.0 {
        let total = shoulder_px.abs() + axilla_px.abs() + waist_px.abs();
        (total / torso_height_px * 100.0).min(100.0)
    } else {
        0.0
    };

    let mut score = weighted(shoulder_pct, HEIGHT_FULL_PCT, HEIGHT_WEIGHT)
        + weighted(axilla_pct, HEIGHT_FULL_PCT, HEIGHT_WEIGHT)
        + weighted(waist_pct, HEIGHT_FULL_PCT, HEIGHT_WEIGHT)
        + weighted(trunk_shift_pct, TRUNK_SHIFT_FULL_PCT, TRUNK_SHIFT_WEIGHT);
    if let Some(depth) = depth {
        score += weighted(depth.shoulder_rotation, DEPTH_FULL, ROTATION_WEIGHT);
        score += weighted(
            depth.scapula_prominence_diff.abs(),
            DEPTH_FULL,
            SCAPULA_WEIGHT,
        );
    }
    let depth = depth.unwrap_or(DepthScores {
        shoulder_rotation: 0.0,
        hip_rotation: 0.0,
        scapula_prominence_diff: 0.0,
    });

    log_debug!(
        "torso {:.1}px, shoulder width {:.1}px, raw score {:.2}",
        torso_height_px,
        shoulder_width_px,
        score
    );

    let shoulder_height_diff_pct = round_to(shoulder_pct, 1);
    let hip_height_diff_pct = round_to(hip_pct, 1);
    AsymmetryMetrics {
        shoulder_height_diff_px: round_to(shoulder_px, 1),
        hip_height_diff_px: round_to(hip_px, 1),
        waist_height_diff_px: round_to(waist_px, 1),
        axilla_height_diff_px: round_to(axilla_px, 1),
        trunk_shift_px: round_to(trunk_shift_px, 1),
        waist_trunk_shift_px: round_to(waist_trunk_shift_px, 1),
        shoulder_height_diff_pct,
        hip_height_diff_pct,
        waist_height_diff_pct: round_to(waist_pct, 1),
        axilla_height_diff_pct: round_to(axilla_pct, 1),
        trunk_shift_pct: round_to(trunk_shift_pct, 1),
        shoulder_rotation_score: round_to(depth.shoulder_rotation, 4),
        hip_rotation_score: round_to(depth.hip_rotation, 4),
        scapula_prominence_diff: round_to(depth.scapula_prominence_diff, 4),
        hai_score: round_to(hai_score, 1),
        overall_asymmetry_score: round_to(score.min(100.0), 1),
        higher_shoulder: sidedness(shoulder_px, shoulder_height_diff_pct),
        higher_hip: sidedness(hip_px, hip_height_diff_pct),
    }
}

/// Metrics from a live pose detection, including depth-based rotation and
/// scapula terms.
pub fn calculate(
    landmarks: &LandmarkSet,
    width: u32,
    height: u32,
) -> Result<AsymmetryMetrics, PostureError> {
    let (width, height) = check_dimensions(width, height)?;

    let left_shoulder = landmarks.get(PoseLandmark::LeftShoulder)?;
    let right_shoulder = landmarks.get(PoseLandmark::RightShoulder)?;
    let left_hip = landmarks.get(PoseLandmark::LeftHip)?;
    let right_hip = landmarks.get(PoseLandmark::RightHip)?;
    let derived = derived::estimate(landmarks)?;

    let points = TorsoPoints {
        left_shoulder: left_shoulder.position(),
        right_shoulder: right_shoulder.position(),
        left_hip: left_hip.position(),
        right_hip: right_hip.position(),
        left_axilla: Vec2::new(derived.left_axilla.x, derived.left_axilla.y),
        right_axilla: Vec2::new(derived.right_axilla.x, derived.right_axilla.y),
        left_waist: Vec2::new(derived.left_waist.x, derived.left_waist.y),
        right_waist: Vec2::new(derived.right_waist.x, derived.right_waist.y),
    };
    let depth = DepthScores {
        shoulder_rotation: (left_shoulder.z - right_shoulder.z).abs(),
        hip_rotation: (left_hip.z - right_hip.z).abs(),
        scapula_prominence_diff: derived.right_scapula_prominence
            - derived.left_scapula_prominence,
    };

    Ok(compute(&points, Some(depth), width, height))
}

/// Metrics from manually adjusted 2-D positions.
///
/// No depth is available, so rotation and scapula scores are zero and the
/// overall score omits their terms, topping out at 85.
pub fn recalculate(
    positions: &LandmarkPositions,
    width: u32,
    height: u32,
) -> Result<AsymmetryMetrics, PostureError> {
    let (width, height) = check_dimensions(width, height)?;
    let points = TorsoPoints {
        left_shoulder: positions.left_shoulder.point(),
        right_shoulder: positions.right_shoulder.point(),
        left_hip: positions.left_hip.point(),
        right_hip: positions.right_hip.point(),
        left_axilla: positions.left_axilla.point(),
        right_axilla: positions.right_axilla.point(),
        left_waist: positions.left_waist.point(),
        right_waist: positions.right_waist.point(),
    };
    Ok(compute(&points, None, width, height))
}
