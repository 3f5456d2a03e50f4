use std::fmt;

use base::{Rect, Vec2, round_to};
use serde::{Deserialize, Serialize};

/// Number of corner keypoints per vertebra.
pub const KEYPOINTS_PER_VERTEBRA: usize = 4;

/// Anatomical labels assigned by position, top to bottom.
pub const VERTEBRA_LABELS: [&str; 17] = [
    "T1", "T2", "T3", "T4", "T5", "T6", "T7", "T8", "T9", "T10", "T11", "T12", "L1", "L2", "L3",
    "L4", "L5",
];

/// Label for the vertebra at `index` in a top-to-bottom sequence.
///
/// Positions past L5 get a synthetic `V<n>` label (1-based).
pub fn vertebra_label(index: usize) -> String {
    VERTEBRA_LABELS
        .get(index)
        .map(|label| label.to_string())
        .unwrap_or_else(|| format!("V{}", index + 1))
}

fn full_confidence() -> f64 {
    1.0
}

/// A single corner keypoint in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f64,
    pub y: f64,
    /// Visibility/confidence in [0.0, 1.0]. Missing in input means fully visible.
    #[serde(default = "full_confidence")]
    pub confidence: f64,
}

impl Keypoint {
    pub fn new(x: f64, y: f64, confidence: f64) -> Self {
        Self { x, y, confidence }
    }

    pub fn position(&self) -> Vec2<f64> {
        Vec2::new(self.x, self.y)
    }
}

/// Keypoint order as emitted by the vertebra detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endplate {
    Upper,
    Lower,
}

/// One raw candidate from the vertebra detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// `[x1, y1, x2, y2]` in pixels.
    pub bbox: [f64; 4],
    pub score: f64,
    pub keypoints: Vec<Keypoint>,
}

impl Detection {
    pub fn new(bbox: [f64; 4], score: f64, keypoints: Vec<Keypoint>) -> Self {
        Self {
            bbox,
            score,
            keypoints,
        }
    }

    pub fn rect(&self) -> Rect<f64> {
        Rect::from_min_max(
            Vec2::new(self.bbox[0], self.bbox[1]),
            Vec2::new(self.bbox[2], self.bbox[3]),
        )
    }

    pub fn top(&self) -> f64 {
        self.bbox[1]
    }

    pub fn center(&self) -> Vec2<f64> {
        Vec2::new(
            (self.bbox[0] + self.bbox[2]) / 2.0,
            (self.bbox[1] + self.bbox[3]) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.bbox[2] - self.bbox[0]
    }
}

/// A detected vertebra in top-to-bottom order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertebra {
    pub index: usize,
    pub label: String,
    pub bounding_box: [f64; 4],
    pub keypoints: [Keypoint; KEYPOINTS_PER_VERTEBRA],
    pub confidence: f64,
    /// Upper endplate angle from horizontal in degrees, 2 decimals.
    /// Positive when the top-right corner sits lower than the top-left.
    pub tilt_angle: f64,
}

impl Vertebra {
    pub fn new(
        index: usize,
        label: impl Into<String>,
        bounding_box: [f64; 4],
        keypoints: [Keypoint; KEYPOINTS_PER_VERTEBRA],
        confidence: f64,
    ) -> Self {
        let tilt_angle = tilt_angle(&keypoints);
        Self {
            index,
            label: label.into(),
            bounding_box,
            keypoints,
            confidence,
            tilt_angle,
        }
    }

    pub fn corner(&self, corner: Corner) -> Vec2<f64> {
        self.keypoints[corner as usize].position()
    }

    /// Mean of the four corner keypoints.
    pub fn center(&self) -> Vec2<f64> {
        let sum = self
            .keypoints
            .iter()
            .fold(Vec2::zero(), |acc, kp| acc + kp.position());
        sum / KEYPOINTS_PER_VERTEBRA as f64
    }
}

/// Angle of the top-left → top-right edge from horizontal, rounded to 2 decimals.
pub fn tilt_angle(keypoints: &[Keypoint; KEYPOINTS_PER_VERTEBRA]) -> f64 {
    let edge = keypoints[Corner::TopRight as usize].position()
        - keypoints[Corner::TopLeft as usize].position();
    round_to(edge.angle_deg(), 2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveLocation {
    Thoracic,
    Lumbar,
    Thoracolumbar,
}

impl fmt::Display for CurveLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveLocation::Thoracic => write!(f, "thoracic"),
            CurveLocation::Lumbar => write!(f, "lumbar"),
            CurveLocation::Thoracolumbar => write!(f, "thoracolumbar"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveDirection {
    Left,
    Right,
    None,
}

impl CurveDirection {
    /// Mirror left and right; `None` stays `None`.
    pub fn mirrored(self) -> Self {
        match self {
            CurveDirection::Left => CurveDirection::Right,
            CurveDirection::Right => CurveDirection::Left,
            CurveDirection::None => CurveDirection::None,
        }
    }
}

impl fmt::Display for CurveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveDirection::Left => write!(f, "left"),
            CurveDirection::Right => write!(f, "right"),
            CurveDirection::None => write!(f, "none"),
        }
    }
}

/// Which way the patient faces relative to the image axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageOrientation {
    /// Patient's left on image right (typical PA view).
    #[default]
    Standard,
    /// Mirrored: patient's left on image left.
    Flipped,
    /// No orientation marker found.
    Unknown,
}

impl fmt::Display for ImageOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageOrientation::Standard => write!(f, "standard"),
            ImageOrientation::Flipped => write!(f, "flipped"),
            ImageOrientation::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchrothType {
    #[serde(rename = "3C")]
    ThreeC,
    #[serde(rename = "3CP")]
    ThreeCP,
    #[serde(rename = "4C")]
    FourC,
    #[serde(rename = "4CP")]
    FourCP,
    #[serde(rename = "unknown")]
    Unknown,
}

impl fmt::Display for SchrothType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchrothType::ThreeC => write!(f, "3C"),
            SchrothType::ThreeCP => write!(f, "3CP"),
            SchrothType::FourC => write!(f, "4C"),
            SchrothType::FourCP => write!(f, "4CP"),
            SchrothType::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    VerySevere,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Mild => write!(f, "mild"),
            Severity::Moderate => write!(f, "moderate"),
            Severity::Severe => write!(f, "severe"),
            Severity::VerySevere => write!(f, "very_severe"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CobbAngleMeasurement {
    /// Degrees in [0, 180], 1 decimal.
    pub angle: f64,
    pub upper_vertebra: String,
    pub lower_vertebra: String,
    pub apex_vertebra: String,
    pub curve_location: CurveLocation,
    pub curve_direction: CurveDirection,
}
