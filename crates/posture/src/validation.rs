//! Suitability checks for a back photo before it is measured.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::landmark::{LandmarkSet, PoseLandmark};

/// Landmarks that must be clearly visible for a measurement.
pub const REQUIRED_LANDMARKS: [PoseLandmark; 4] = [
    PoseLandmark::LeftShoulder,
    PoseLandmark::RightShoulder,
    PoseLandmark::LeftHip,
    PoseLandmark::RightHip,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoValidationConfig {
    pub min_dimension: u32,
    pub max_dimension: u32,
    pub min_landmark_visibility: f64,
    /// Allowed band for the body centre x (normalized).
    pub min_center_x: f64,
    pub max_center_x: f64,
    /// Allowed band for the vertical shoulder-to-hip extent (normalized).
    pub min_torso_extent: f64,
    pub max_torso_extent: f64,
}

impl Default for PhotoValidationConfig {
    fn default() -> Self {
        Self {
            min_dimension: 256,
            max_dimension: 4096,
            min_landmark_visibility: 0.5,
            min_center_x: 0.2,
            max_center_x: 0.8,
            min_torso_extent: 0.15,
            max_torso_extent: 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhotoErrorCode {
    ImageTooSmall,
    ImageTooLarge,
    NoPersonDetected,
    LandmarksNotVisible,
    UpsideDown,
    NotCentered,
    TooFar,
    TooClose,
}

/// Why a photo cannot be analysed, and what the user should do about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoValidationError {
    pub code: PhotoErrorCode,
    pub message: String,
    pub guidance: String,
}

impl PhotoValidationError {
    fn new(code: PhotoErrorCode, message: impl Into<String>, guidance: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            guidance: guidance.into(),
        }
    }
}

impl fmt::Display for PhotoValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.message, self.guidance)
    }
}

impl std::error::Error for PhotoValidationError {}

pub fn validate_dimensions(
    width: u32,
    height: u32,
    config: &PhotoValidationConfig,
) -> Result<(), PhotoValidationError> {
    if width < config.min_dimension || height < config.min_dimension {
        return Err(PhotoValidationError::new(
            PhotoErrorCode::ImageTooSmall,
            format!(
                "Image too small. Minimum size is {min}x{min} pixels.",
                min = config.min_dimension
            ),
            "Please use a higher resolution image.",
        ));
    }
    if width > config.max_dimension || height > config.max_dimension {
        return Err(PhotoValidationError::new(
            PhotoErrorCode::ImageTooLarge,
            format!(
                "Image too large. Maximum size is {max}x{max} pixels.",
                max = config.max_dimension
            ),
            "Please resize the image to a smaller size.",
        ));
    }
    Ok(())
}

/// Check that the detected pose shows an upright, centred back at a usable
/// distance. A missing required landmark counts as not visible.
pub fn validate_pose(
    landmarks: &LandmarkSet,
    config: &PhotoValidationConfig,
) -> Result<(), PhotoValidationError> {
    if landmarks.is_empty() {
        return Err(PhotoValidationError::new(
            PhotoErrorCode::NoPersonDetected,
            "No person detected in the image.",
            "Please ensure your full back is visible in the frame. Stand 4-6 feet from the camera.",
        ));
    }

    let required = REQUIRED_LANDMARKS.map(|landmark| {
        landmarks
            .get(landmark)
            .ok()
            .filter(|l| l.visibility >= config.min_landmark_visibility)
    });
    let [
        Some(left_shoulder),
        Some(right_shoulder),
        Some(left_hip),
        Some(right_hip),
    ] = required
    else {
        let hidden: Vec<&str> = REQUIRED_LANDMARKS
            .iter()
            .zip(&required)
            .filter(|(_, found)| found.is_none())
            .map(|(landmark, _)| landmark.name())
            .collect();
        return Err(PhotoValidationError::new(
            PhotoErrorCode::LandmarksNotVisible,
            format!("Cannot clearly detect: {}.", hidden.join(", ")),
            "Please ensure your full back from shoulders to hips is visible. Remove any obstructions and try again.",
        ));
    };

    let shoulder_y = (left_shoulder.y + right_shoulder.y) / 2.0;
    let hip_y = (left_hip.y + right_hip.y) / 2.0;
    if hip_y < shoulder_y {
        return Err(PhotoValidationError::new(
            PhotoErrorCode::UpsideDown,
            "Image appears to be upside down.",
            "Please rotate the image so the person is right-side up.",
        ));
    }

    let shoulder_x = (left_shoulder.x + right_shoulder.x) / 2.0;
    let hip_x = (left_hip.x + right_hip.x) / 2.0;
    let center_x = (shoulder_x + hip_x) / 2.0;
    if center_x < config.min_center_x || center_x > config.max_center_x {
        return Err(PhotoValidationError::new(
            PhotoErrorCode::NotCentered,
            "Person is not centered in the frame.",
            "Please position yourself in the center of the frame.",
        ));
    }

    let torso_extent = (hip_y - shoulder_y).abs();
    if torso_extent < config.min_torso_extent {
        return Err(PhotoValidationError::new(
            PhotoErrorCode::TooFar,
            "Person appears too far from the camera.",
            "Please move closer to the camera (4-6 feet away).",
        ));
    }
    if torso_extent > config.max_torso_extent {
        return Err(PhotoValidationError::new(
            PhotoErrorCode::TooClose,
            "Person appears too close to the camera.",
            "Please move further from the camera (4-6 feet away).",
        ));
    }

    Ok(())
}

pub fn validate_photo(
    landmarks: &LandmarkSet,
    width: u32,
    height: u32,
    config: &PhotoValidationConfig,
) -> Result<(), PhotoValidationError> {
    validate_dimensions(width, height, config)?;
    validate_pose(landmarks, config)
}
