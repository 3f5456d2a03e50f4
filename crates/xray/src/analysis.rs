use base::log_info;
use serde::{Deserialize, Serialize};

use crate::{
    XrayError, classify, cobb,
    config::XrayConfig,
    postprocess,
    types::{
        CobbAngleMeasurement, CurveDirection, CurveLocation, Detection, ImageOrientation,
        SchrothType, Severity, Vertebra,
    },
    validation,
};

/// Result of analysing one X-ray.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpineAnalysis {
    pub vertebrae: Vec<Vertebra>,
    /// Largest first.
    pub cobb_angles: Vec<CobbAngleMeasurement>,
    pub primary_cobb_angle: f64,
    pub curve_location: CurveLocation,
    pub curve_direction: CurveDirection,
    pub schroth_type: SchrothType,
    pub severity: Severity,
    /// Mean detection score of the kept vertebrae.
    pub confidence_score: f64,
    pub orientation: ImageOrientation,
}

/// Run raw detector candidates through cleaning, validation, measurement
/// and classification.
pub fn analyze(
    detections: Vec<Detection>,
    orientation: ImageOrientation,
    config: &XrayConfig,
) -> Result<SpineAnalysis, XrayError> {
    let detections = postprocess::filter_detections(detections, &config.postprocess)?;
    validation::validate_detections(&detections, &config.validation)?;

    let vertebrae = postprocess::extract_vertebrae(&detections)?;
    let cobb_angles = cobb::calculate_all(&vertebrae, orientation);
    let primary_cobb_angle = cobb::primary_angle(&cobb_angles);
    let (curve_location, curve_direction) = classify::primary_curve_info(&cobb_angles);
    let schroth_type = classify::determine_schroth_type(&cobb_angles, &vertebrae);
    let severity = classify::severity(primary_cobb_angle);
    let confidence_score = postprocess::average_confidence(&vertebrae);

    log_info!(
        "{} vertebrae, {} curves, primary {:.1} deg {} {}, schroth {}, {}",
        vertebrae.len(),
        cobb_angles.len(),
        primary_cobb_angle,
        curve_location,
        curve_direction,
        schroth_type,
        severity
    );

    Ok(SpineAnalysis {
        vertebrae,
        cobb_angles,
        primary_cobb_angle,
        curve_location,
        curve_direction,
        schroth_type,
        severity,
        confidence_score,
        orientation,
    })
}

/// Like [`analyze`], rejecting images outside the configured size limits first.
pub fn analyze_image(
    detections: Vec<Detection>,
    width: u32,
    height: u32,
    orientation: ImageOrientation,
    config: &XrayConfig,
) -> Result<SpineAnalysis, XrayError> {
    validation::validate_image_dimensions(width, height, &config.validation)?;
    analyze(detections, orientation, config)
}
