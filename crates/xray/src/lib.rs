pub mod analysis;
pub mod classify;
pub mod cobb;
pub mod config;
pub mod error;
pub mod orientation;
pub(crate) mod outliers;
pub mod postprocess;
pub mod types;
pub mod validation;


pub use analysis::{SpineAnalysis, analyze, analyze_image};
pub use config::{PostprocessConfig, ValidationConfig, XrayConfig};
pub use error::XrayError;
pub use types::{
    CobbAngleMeasurement, Corner, CurveDirection, CurveLocation, Detection, Endplate,
    ImageOrientation, KEYPOINTS_PER_VERTEBRA, Keypoint, SchrothType, Severity, Vertebra,
};
pub use validation::{DetectionError, ErrorCode};
