//! Image orientation from lateral (L/R) radiographic markers.
//!
//! Reading the marker off the image is done elsewhere; this module only
//! interprets already-read marker text. In a standard PA view the "R"
//! marker sits on the viewer's left and "L" on the viewer's right.

use std::cmp::Ordering;

use base::log_debug;
use serde::{Deserialize, Serialize};

use crate::types::ImageOrientation;

/// Text candidates read with less confidence than this are ignored.
pub const MIN_MARKER_CONFIDENCE: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    L,
    R,
}

impl Marker {
    /// Parse marker text, case-insensitive, surrounding whitespace ignored.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_uppercase().as_str() {
            "L" => Some(Marker::L),
            "R" => Some(Marker::R),
            _ => None,
        }
    }
}

/// Which half of the image the marker was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSide {
    Left,
    Right,
}

/// A piece of text read from one of the image corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerCandidate {
    pub text: String,
    pub position: ImageSide,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectedMarker {
    pub marker: Marker,
    pub position: ImageSide,
    pub confidence: f64,
}

/// Highest-confidence candidate that reads as L or R above the minimum confidence.
pub fn best_marker(candidates: &[MarkerCandidate]) -> Option<DetectedMarker> {
    candidates
        .iter()
        .filter(|c| c.confidence > MIN_MARKER_CONFIDENCE)
        .filter_map(|c| {
            Marker::parse(&c.text).map(|marker| DetectedMarker {
                marker,
                position: c.position,
                confidence: c.confidence,
            })
        })
        .fold(None, |best: Option<DetectedMarker>, candidate| match best {
            Some(b) if b.confidence.partial_cmp(&candidate.confidence) != Some(Ordering::Less) => {
                Some(b)
            }
            _ => Some(candidate),
        })
}

pub fn orientation_from_marker(marker: &DetectedMarker) -> ImageOrientation {
    match (marker.marker, marker.position) {
        (Marker::R, ImageSide::Left) | (Marker::L, ImageSide::Right) => ImageOrientation::Standard,
        (Marker::R, ImageSide::Right) | (Marker::L, ImageSide::Left) => ImageOrientation::Flipped,
    }
}

/// Orientation to measure with: a user-confirmed value wins, then a detected
/// marker, otherwise unknown.
pub fn resolve_orientation(
    confirmed: Option<ImageOrientation>,
    candidates: &[MarkerCandidate],
) -> ImageOrientation {
    if let Some(orientation) = confirmed {
        return orientation;
    }
    match best_marker(candidates) {
        Some(marker) => {
            let orientation = orientation_from_marker(&marker);
            log_debug!(
                "marker {:?} on {:?} ({:.2}) -> {}",
                marker.marker,
                marker.position,
                marker.confidence,
                orientation
            );
            orientation
        }
        None => ImageOrientation::Unknown,
    }
}
