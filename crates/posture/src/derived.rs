//! Clinically relevant points that the pose detector does not report,
//! extrapolated from shoulder, hip and elbow landmarks with fixed
//! anatomical ratios.

use base::Vec3;
use serde::{Deserialize, Serialize};

use crate::{
    PostureError,
    landmark::{Landmark, LandmarkSet, PoseLandmark},
};

/// Fraction of the shoulder-to-hip distance at which the waist sits.
pub const WAIST_RATIO: f64 = 0.62;
/// Fraction of the shoulder-to-hip height at which the axillary fold sits.
pub const AXILLA_VERTICAL_RATIO: f64 = 0.18;
/// Fraction of the way from the shoulder toward the shoulder midline.
pub const AXILLA_HORIZONTAL_INSET: f64 = 0.02;
/// Weight of the elbow depth offset in the scapula prominence estimate.
pub const SCAPULA_ELBOW_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedLandmarks {
    pub left_waist: Vec3<f64>,
    pub right_waist: Vec3<f64>,
    pub left_axilla: Vec3<f64>,
    pub right_axilla: Vec3<f64>,
    pub left_scapula_prominence: f64,
    pub right_scapula_prominence: f64,
}

/// Narrowest torso point, componentwise between shoulder and hip.
pub fn waist(shoulder: &Landmark, hip: &Landmark) -> Vec3<f64> {
    shoulder.position3().lerp(hip.position3(), WAIST_RATIO)
}

/// Armpit crease: slightly below and inside the shoulder, at shoulder depth.
pub fn axilla(shoulder: &Landmark, hip: &Landmark, shoulder_mid_x: f64) -> Vec3<f64> {
    Vec3::new(
        shoulder.x + AXILLA_HORIZONTAL_INSET * (shoulder_mid_x - shoulder.x),
        shoulder.y + AXILLA_VERTICAL_RATIO * (hip.y - shoulder.y),
        shoulder.z,
    )
}

/// How far the shoulder blade is pushed back, from shoulder and elbow depth.
pub fn scapula_prominence(shoulder: &Landmark, elbow: &Landmark) -> f64 {
    shoulder.z.abs() + SCAPULA_ELBOW_WEIGHT * (elbow.z - shoulder.z).abs()
}

pub fn estimate(landmarks: &LandmarkSet) -> Result<DerivedLandmarks, PostureError> {
    let left_shoulder = landmarks.get(PoseLandmark::LeftShoulder)?;
    let right_shoulder = landmarks.get(PoseLandmark::RightShoulder)?;
    let left_hip = landmarks.get(PoseLandmark::LeftHip)?;
    let right_hip = landmarks.get(PoseLandmark::RightHip)?;
    let left_elbow = landmarks.get(PoseLandmark::LeftElbow)?;
    let right_elbow = landmarks.get(PoseLandmark::RightElbow)?;

    let shoulder_mid_x = (left_shoulder.x + right_shoulder.x) / 2.0;

    Ok(DerivedLandmarks {
        left_waist: waist(left_shoulder, left_hip),
        right_waist: waist(right_shoulder, right_hip),
        left_axilla: axilla(left_shoulder, left_hip, shoulder_mid_x),
        right_axilla: axilla(right_shoulder, right_hip, shoulder_mid_x),
        left_scapula_prominence: scapula_prominence(left_shoulder, left_elbow),
        right_scapula_prominence: scapula_prominence(right_shoulder, right_elbow),
    })
}
