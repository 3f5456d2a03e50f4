use posture::{
    Landmark, LandmarkSet, POSE_LANDMARK_COUNT, PhotoErrorCode, PhotoValidationConfig,
    PoseLandmark,
    validation::{validate_dimensions, validate_photo, validate_pose},
};

fn pose(shoulder_y: f64, hip_y: f64, shift_x: f64) -> Vec<Landmark> {
    let mut landmarks = vec![Landmark::new(0.5, 0.5, 0.0, 0.9); POSE_LANDMARK_COUNT];
    landmarks[usize::from(PoseLandmark::LeftShoulder)] =
        Landmark::new(0.4 + shift_x, shoulder_y, 0.0, 0.9);
    landmarks[usize::from(PoseLandmark::RightShoulder)] =
        Landmark::new(0.6 + shift_x, shoulder_y, 0.0, 0.9);
    landmarks[usize::from(PoseLandmark::LeftHip)] = Landmark::new(0.42 + shift_x, hip_y, 0.0, 0.9);
    landmarks[usize::from(PoseLandmark::RightHip)] = Landmark::new(0.58 + shift_x, hip_y, 0.0, 0.9);
    landmarks
}

fn code(landmarks: Vec<Landmark>) -> Option<PhotoErrorCode> {
    validate_pose(&LandmarkSet::new(landmarks), &PhotoValidationConfig::default())
        .err()
        .map(|err| err.code)
}

#[test]
fn test_good_photo() {
    let landmarks = LandmarkSet::new(pose(0.3, 0.7, 0.0));
    assert!(validate_photo(&landmarks, 1080, 1920, &PhotoValidationConfig::default()).is_ok());
}

#[test]
fn test_dimensions() {
    let config = PhotoValidationConfig::default();
    let err = validate_dimensions(200, 1000, &config).unwrap_err();
    assert_eq!(err.code, PhotoErrorCode::ImageTooSmall);
    assert_eq!(err.message, "Image too small. Minimum size is 256x256 pixels.");
    assert_eq!(err.guidance, "Please use a higher resolution image.");

    let err = validate_dimensions(1000, 5000, &config).unwrap_err();
    assert_eq!(err.code, PhotoErrorCode::ImageTooLarge);
}

#[test]
fn test_no_person() {
    assert_eq!(code(Vec::new()), Some(PhotoErrorCode::NoPersonDetected));
}

#[test]
fn test_hidden_landmarks_are_named() {
    let mut landmarks = pose(0.3, 0.7, 0.0);
    landmarks[usize::from(PoseLandmark::LeftHip)].visibility = 0.3;
    landmarks[usize::from(PoseLandmark::RightShoulder)].visibility = 0.1;
    let err = validate_pose(&LandmarkSet::new(landmarks), &PhotoValidationConfig::default())
        .unwrap_err();
    assert_eq!(err.code, PhotoErrorCode::LandmarksNotVisible);
    assert_eq!(err.message, "Cannot clearly detect: right shoulder, left hip.");
}

#[test]
fn test_truncated_pose_counts_as_hidden() {
    let landmarks = pose(0.3, 0.7, 0.0)[..20].to_vec();
    let err = validate_pose(&LandmarkSet::new(landmarks), &PhotoValidationConfig::default())
        .unwrap_err();
    assert_eq!(err.message, "Cannot clearly detect: left hip, right hip.");
}

#[test]
fn test_upside_down() {
    assert_eq!(code(pose(0.7, 0.3, 0.0)), Some(PhotoErrorCode::UpsideDown));
}

#[test]
fn test_not_centered() {
    assert_eq!(code(pose(0.3, 0.7, 0.35)), Some(PhotoErrorCode::NotCentered));
    assert_eq!(code(pose(0.3, 0.7, -0.35)), Some(PhotoErrorCode::NotCentered));
}

#[test]
fn test_distance() {
    assert_eq!(code(pose(0.45, 0.55, 0.0)), Some(PhotoErrorCode::TooFar));
    assert_eq!(code(pose(0.1, 0.9, 0.0)), Some(PhotoErrorCode::TooClose));
}
