use std::fmt;

use crate::validation::DetectionError;

#[derive(Debug, Clone, PartialEq)]
pub enum XrayError {
    /// Parallel detector arrays disagree in length.
    LengthMismatch {
        boxes: usize,
        scores: usize,
        keypoints: usize,
    },
    /// A detection does not carry exactly four corner keypoints.
    KeypointCount { index: usize, got: usize },
    Validation(DetectionError),
}

impl fmt::Display for XrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XrayError::LengthMismatch {
                boxes,
                scores,
                keypoints,
            } => write!(
                f,
                "detector output length mismatch: {boxes} boxes, {scores} scores, {keypoints} keypoint sets"
            ),
            XrayError::KeypointCount { index, got } => {
                write!(f, "detection {index} has {got} keypoints, expected 4")
            }
            XrayError::Validation(err) => write!(f, "validation failed: {err}"),
        }
    }
}

impl std::error::Error for XrayError {}

impl From<DetectionError> for XrayError {
    fn from(err: DetectionError) -> Self {
        XrayError::Validation(err)
    }
}
