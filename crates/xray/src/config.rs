use serde::{Deserialize, Serialize};

/// Tunable parameters for cleaning raw detector output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostprocessConfig {
    /// Candidates scoring below this are dropped before NMS.
    pub confidence_threshold: f64,
    /// IoU above which a lower-scoring box is suppressed.
    pub nms_threshold: f64,
    /// Upper bound on the returned vertebra count.
    pub max_detections: usize,
    /// Run the MAD / vertical-gap spatial outlier filter.
    pub reject_outliers: bool,
    /// Number of MADs from the median x-center tolerated.
    pub x_deviation_threshold: f64,
    /// End detections separated by more than this multiple of the median
    /// vertical gap are dropped.
    pub y_gap_threshold: f64,
    /// MAD floor as a fraction of the median box width.
    pub min_mad_width_ratio: f64,
    /// Outlier rejection never leaves fewer candidates than this.
    pub min_kept: usize,
}

impl PostprocessConfig {
    /// MAD outlier rejection, capped at the 17 labelled vertebrae (default).
    pub fn mad_filtered() -> Self {
        Self {
            confidence_threshold: 0.5,
            nms_threshold: 0.3,
            max_detections: 17,
            reject_outliers: true,
            x_deviation_threshold: 2.5,
            y_gap_threshold: 2.0,
            min_mad_width_ratio: 0.3,
            min_kept: 3,
        }
    }

    /// No spatial filtering, capped at 18.
    pub fn unfiltered() -> Self {
        Self {
            max_detections: 18,
            reject_outliers: false,
            ..Self::mad_filtered()
        }
    }
}

impl Default for PostprocessConfig {
    fn default() -> Self {
        Self::mad_filtered()
    }
}

/// Acceptance limits for an X-ray and its detections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub min_vertebrae: usize,
    /// Minimum mean detection score.
    pub min_confidence: f64,
    pub min_dimension: u32,
    pub max_dimension: u32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_vertebrae: 5,
            min_confidence: 0.3,
            min_dimension: 256,
            max_dimension: 4096,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct XrayConfig {
    pub postprocess: PostprocessConfig,
    pub validation: ValidationConfig,
}
