use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{config::ValidationConfig, types::Detection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidImageFormat,
    ImageTooSmall,
    ImageTooLarge,
    NoSpineDetected,
    InsufficientVertebrae,
    LowConfidence,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::InvalidImageFormat => "INVALID_IMAGE_FORMAT",
            ErrorCode::ImageTooSmall => "IMAGE_TOO_SMALL",
            ErrorCode::ImageTooLarge => "IMAGE_TOO_LARGE",
            ErrorCode::NoSpineDetected => "NO_SPINE_DETECTED",
            ErrorCode::InsufficientVertebrae => "INSUFFICIENT_VERTEBRAE",
            ErrorCode::LowConfidence => "LOW_CONFIDENCE",
        };
        write!(f, "{name}")
    }
}

/// A rejected image or detection set, with a user-facing message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionError {
    pub code: ErrorCode,
    pub message: String,
}

impl DetectionError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for DetectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for DetectionError {}

pub fn validate_image_dimensions(
    width: u32,
    height: u32,
    config: &ValidationConfig,
) -> Result<(), DetectionError> {
    if width == 0 || height == 0 {
        return Err(DetectionError::new(
            ErrorCode::InvalidImageFormat,
            format!("Invalid image dimensions ({width}x{height})."),
        ));
    }
    if width < config.min_dimension || height < config.min_dimension {
        return Err(DetectionError::new(
            ErrorCode::ImageTooSmall,
            format!(
                "Image too small ({width}x{height}). Minimum size is {min}x{min} pixels.",
                min = config.min_dimension
            ),
        ));
    }
    if width > config.max_dimension || height > config.max_dimension {
        return Err(DetectionError::new(
            ErrorCode::ImageTooLarge,
            format!(
                "Image too large ({width}x{height}). Maximum size is {max}x{max} pixels.",
                max = config.max_dimension
            ),
        ));
    }
    Ok(())
}

/// Check that cleaned detections are enough to measure from.
pub fn validate_detections(
    detections: &[Detection],
    config: &ValidationConfig,
) -> Result<(), DetectionError> {
    if detections.is_empty() {
        return Err(DetectionError::new(
            ErrorCode::NoSpineDetected,
            "No spine detected in the image. Please ensure the X-ray clearly shows the spine.",
        ));
    }
    if detections.len() < config.min_vertebrae {
        return Err(DetectionError::new(
            ErrorCode::InsufficientVertebrae,
            format!(
                "Only {} vertebrae detected. At least {} are needed for analysis.",
                detections.len(),
                config.min_vertebrae
            ),
        ));
    }
    let mean_score = detections.iter().map(|d| d.score).sum::<f64>() / detections.len() as f64;
    if mean_score < config.min_confidence {
        return Err(DetectionError::new(
            ErrorCode::LowConfidence,
            format!(
                "Detection confidence is low ({:.1}%). Image quality may be insufficient.",
                mean_score * 100.0
            ),
        ));
    }
    Ok(())
}
