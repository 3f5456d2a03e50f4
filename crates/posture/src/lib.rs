pub mod analysis;
pub mod derived;
pub mod error;
pub mod landmark;
pub mod metrics;
pub mod risk;
pub mod validation;


pub use analysis::{PhotoAnalysis, analyze, analyze_validated, recalculate};
pub use derived::DerivedLandmarks;
pub use error::PostureError;
pub use landmark::{
    Landmark, LandmarkPosition, LandmarkPositions, LandmarkSet, POSE_LANDMARK_COUNT,
    PoseLandmark, Side,
};
pub use metrics::AsymmetryMetrics;
pub use risk::{ClinicalFinding, FindingSeverity, RiskAssessment, RiskLevel, assess};
pub use validation::{PhotoErrorCode, PhotoValidationConfig, PhotoValidationError};
