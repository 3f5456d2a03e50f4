use xray::{
    Detection, DetectionError, ErrorCode, Keypoint, ValidationConfig,
    validation::{validate_detections, validate_image_dimensions},
};

fn detections(count: usize, score: f64) -> Vec<Detection> {
    (0..count)
        .map(|i| {
            let y = i as f64 * 30.0;
            Detection::new(
                [0.0, y, 40.0, y + 20.0],
                score,
                vec![Keypoint::new(0.0, y, 1.0); 4],
            )
        })
        .collect()
}

fn code(result: Result<(), DetectionError>) -> Option<ErrorCode> {
    result.err().map(|err| err.code)
}

#[test]
fn test_image_dimensions() {
    let config = ValidationConfig::default();
    assert!(validate_image_dimensions(256, 4096, &config).is_ok());
    assert_eq!(
        code(validate_image_dimensions(255, 1000, &config)),
        Some(ErrorCode::ImageTooSmall)
    );
    assert_eq!(
        code(validate_image_dimensions(1000, 4097, &config)),
        Some(ErrorCode::ImageTooLarge)
    );
    assert_eq!(
        code(validate_image_dimensions(0, 1000, &config)),
        Some(ErrorCode::InvalidImageFormat)
    );
}

#[test]
fn test_too_small_message() {
    let err = validate_image_dimensions(100, 300, &ValidationConfig::default()).unwrap_err();
    assert_eq!(
        err.message,
        "Image too small (100x300). Minimum size is 256x256 pixels."
    );
}

#[test]
fn test_detection_counts() {
    let config = ValidationConfig::default();
    assert_eq!(
        code(validate_detections(&[], &config)),
        Some(ErrorCode::NoSpineDetected)
    );

    let err = validate_detections(&detections(4, 0.9), &config).unwrap_err();
    assert_eq!(err.code, ErrorCode::InsufficientVertebrae);
    assert_eq!(
        err.message,
        "Only 4 vertebrae detected. At least 5 are needed for analysis."
    );

    assert!(validate_detections(&detections(5, 0.9), &config).is_ok());
}

#[test]
fn test_low_confidence() {
    let err = validate_detections(&detections(6, 0.25), &ValidationConfig::default()).unwrap_err();
    assert_eq!(err.code, ErrorCode::LowConfidence);
    assert_eq!(
        err.message,
        "Detection confidence is low (25.0%). Image quality may be insufficient."
    );
}

#[test]
fn test_error_code_wire_names() {
    assert_eq!(
        serde_json::to_string(&ErrorCode::InsufficientVertebrae).unwrap(),
        "\"INSUFFICIENT_VERTEBRAE\""
    );
    assert_eq!(ErrorCode::NoSpineDetected.to_string(), "NO_SPINE_DETECTED");

    let err = DetectionError::new(ErrorCode::LowConfidence, "low");
    assert_eq!(err.to_string(), "LOW_CONFIDENCE: low");
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["code"], "LOW_CONFIDENCE");
}
