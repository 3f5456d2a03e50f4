use std::fmt;

use crate::validation::PhotoValidationError;

#[derive(Debug, Clone, PartialEq)]
pub enum PostureError {
    /// The landmark set has no entry at this index.
    MissingLandmark(usize),
    InvalidDimensions { width: u32, height: u32 },
    Validation(PhotoValidationError),
}

impl fmt::Display for PostureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostureError::MissingLandmark(index) => {
                write!(f, "pose landmark {index} is missing")
            }
            PostureError::InvalidDimensions { width, height } => {
                write!(f, "invalid image dimensions {width}x{height}")
            }
            PostureError::Validation(err) => write!(f, "photo rejected: {err}"),
        }
    }
}

impl std::error::Error for PostureError {}

impl From<PhotoValidationError> for PostureError {
    fn from(err: PhotoValidationError) -> Self {
        PostureError::Validation(err)
    }
}
