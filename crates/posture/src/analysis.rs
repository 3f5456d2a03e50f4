use base::log_info;
use serde::{Deserialize, Serialize};

use crate::{
    PostureError, derived,
    landmark::{LandmarkPositions, LandmarkSet, PoseLandmark},
    metrics::{self, AsymmetryMetrics},
    risk::{self, RiskLevel},
    validation::{self, PhotoValidationConfig},
};

/// Result of analysing one back photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoAnalysis {
    pub metrics: AsymmetryMetrics,
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    /// The positions the metrics were measured from, in the shape accepted
    /// by [`recalculate`].
    pub landmarks: LandmarkPositions,
    /// Mean pose visibility; absent for manually adjusted positions.
    pub landmark_confidence: Option<f64>,
    pub image_width: u32,
    pub image_height: u32,
}

/// Editable positions for a live detection: shoulders and hips as
/// detected, axillae and waist as estimated.
pub fn positions(landmarks: &LandmarkSet) -> Result<LandmarkPositions, PostureError> {
    let derived = derived::estimate(landmarks)?;
    Ok(LandmarkPositions {
        left_shoulder: landmarks.get(PoseLandmark::LeftShoulder)?.position().into(),
        right_shoulder: landmarks.get(PoseLandmark::RightShoulder)?.position().into(),
        left_hip: landmarks.get(PoseLandmark::LeftHip)?.position().into(),
        right_hip: landmarks.get(PoseLandmark::RightHip)?.position().into(),
        left_axilla: derived.left_axilla.into(),
        right_axilla: derived.right_axilla.into(),
        left_waist: derived.left_waist.into(),
        right_waist: derived.right_waist.into(),
    })
}

fn report(
    metrics: AsymmetryMetrics,
    landmarks: LandmarkPositions,
    landmark_confidence: Option<f64>,
    width: u32,
    height: u32,
) -> PhotoAnalysis {
    let assessment = risk::assess(&metrics);
    PhotoAnalysis {
        metrics,
        risk_level: assessment.risk_level,
        risk_score: assessment.risk_score,
        risk_factors: assessment.risk_factors,
        recommendations: assessment.recommendations,
        landmarks,
        landmark_confidence,
        image_width: width,
        image_height: height,
    }
}

/// Measure and assess a live pose detection.
pub fn analyze(
    landmarks: &LandmarkSet,
    width: u32,
    height: u32,
) -> Result<PhotoAnalysis, PostureError> {
    let metrics = metrics::calculate(landmarks, width, height)?;
    let confidence = landmarks.confidence();
    log_info!(
        "photo {}x{}: HAI {:.1}, overall {:.1}, pose confidence {:.2}",
        width,
        height,
        metrics.hai_score,
        metrics.overall_asymmetry_score,
        confidence
    );
    Ok(report(
        metrics,
        positions(landmarks)?,
        Some(confidence),
        width,
        height,
    ))
}

/// Reject unsuitable photos before measuring them.
pub fn analyze_validated(
    landmarks: &LandmarkSet,
    width: u32,
    height: u32,
    config: &PhotoValidationConfig,
) -> Result<PhotoAnalysis, PostureError> {
    validation::validate_photo(landmarks, width, height, config)?;
    analyze(landmarks, width, height)
}

/// Measure and assess manually adjusted positions.
pub fn recalculate(
    positions: &LandmarkPositions,
    width: u32,
    height: u32,
) -> Result<PhotoAnalysis, PostureError> {
    let metrics = metrics::recalculate(positions, width, height)?;
    log_info!(
        "recalculated {}x{}: HAI {:.1}, overall {:.1}",
        width,
        height,
        metrics.hai_score,
        metrics.overall_asymmetry_score
    );
    Ok(report(metrics, *positions, None, width, height))
}
