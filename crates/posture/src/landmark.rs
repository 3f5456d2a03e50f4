use std::fmt;

use base::{Vec2, Vec3, mean};
use serde::{Deserialize, Serialize};

use crate::PostureError;

/// Number of landmarks in a full body-pose detection.
pub const POSE_LANDMARK_COUNT: usize = 33;

/// Body-pose landmark indices consumed by the posture engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseLandmark {
    Nose = 0,
    LeftEar = 7,
    RightEar = 8,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
}

impl PoseLandmark {
    pub fn name(self) -> &'static str {
        match self {
            PoseLandmark::Nose => "nose",
            PoseLandmark::LeftEar => "left ear",
            PoseLandmark::RightEar => "right ear",
            PoseLandmark::LeftShoulder => "left shoulder",
            PoseLandmark::RightShoulder => "right shoulder",
            PoseLandmark::LeftElbow => "left elbow",
            PoseLandmark::RightElbow => "right elbow",
            PoseLandmark::LeftWrist => "left wrist",
            PoseLandmark::RightWrist => "right wrist",
            PoseLandmark::LeftHip => "left hip",
            PoseLandmark::RightHip => "right hip",
            PoseLandmark::LeftKnee => "left knee",
            PoseLandmark::RightKnee => "right knee",
        }
    }
}

impl From<PoseLandmark> for usize {
    fn from(landmark: PoseLandmark) -> usize {
        landmark as usize
    }
}

impl TryFrom<usize> for PoseLandmark {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PoseLandmark::Nose),
            7 => Ok(PoseLandmark::LeftEar),
            8 => Ok(PoseLandmark::RightEar),
            11 => Ok(PoseLandmark::LeftShoulder),
            12 => Ok(PoseLandmark::RightShoulder),
            13 => Ok(PoseLandmark::LeftElbow),
            14 => Ok(PoseLandmark::RightElbow),
            15 => Ok(PoseLandmark::LeftWrist),
            16 => Ok(PoseLandmark::RightWrist),
            23 => Ok(PoseLandmark::LeftHip),
            24 => Ok(PoseLandmark::RightHip),
            25 => Ok(PoseLandmark::LeftKnee),
            26 => Ok(PoseLandmark::RightKnee),
            _ => Err(format!("Pose landmark index {} is not used for posture analysis.", value)),
        }
    }
}

impl fmt::Display for PoseLandmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One detected pose landmark.
///
/// `x` and `y` are normalized to [0, 1] (left to right, top to bottom), `z`
/// is depth relative to the hips (negative is closer to the camera).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub visibility: f64,
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self {
            x,
            y,
            z,
            visibility,
        }
    }

    pub fn position(&self) -> Vec2<f64> {
        Vec2::new(self.x, self.y)
    }

    pub fn position3(&self) -> Vec3<f64> {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// A full pose detection, indexed by landmark number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    landmarks: Vec<Landmark>,
}

impl LandmarkSet {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    pub fn get(&self, landmark: PoseLandmark) -> Result<&Landmark, PostureError> {
        let index = usize::from(landmark);
        self.landmarks
            .get(index)
            .ok_or(PostureError::MissingLandmark(index))
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn as_slice(&self) -> &[Landmark] {
        &self.landmarks
    }

    /// Mean visibility over every landmark, 0.0 when there are none.
    pub fn confidence(&self) -> f64 {
        let visibility: Vec<f64> = self.landmarks.iter().map(|l| l.visibility).collect();
        mean(&visibility).unwrap_or(0.0)
    }
}

/// A normalized 2-D point that a user can drag in the photo editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPosition {
    pub x: f64,
    pub y: f64,
}

impl LandmarkPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn point(&self) -> Vec2<f64> {
        Vec2::new(self.x, self.y)
    }
}

impl From<Vec2<f64>> for LandmarkPosition {
    fn from(point: Vec2<f64>) -> Self {
        Self::new(point.x, point.y)
    }
}

impl From<Vec3<f64>> for LandmarkPosition {
    fn from(point: Vec3<f64>) -> Self {
        Self::new(point.x, point.y)
    }
}

/// The eight editable positions the asymmetry metrics are measured from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPositions {
    pub left_shoulder: LandmarkPosition,
    pub right_shoulder: LandmarkPosition,
    pub left_hip: LandmarkPosition,
    pub right_hip: LandmarkPosition,
    pub left_axilla: LandmarkPosition,
    pub right_axilla: LandmarkPosition,
    pub left_waist: LandmarkPosition,
    pub right_waist: LandmarkPosition,
}

/// Body side, as seen by the viewer of the photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}
