use posture::{
    Landmark, LandmarkSet, POSE_LANDMARK_COUNT, PhotoErrorCode, PhotoValidationConfig,
    PoseLandmark, PostureError, RiskLevel, analyze, analyze_validated, recalculate,
};

fn pose(points: &[(PoseLandmark, f64, f64)], visibility: f64) -> LandmarkSet {
    let mut landmarks = vec![Landmark::new(0.5, 0.5, 0.0, visibility); POSE_LANDMARK_COUNT];
    for (landmark, x, y) in points {
        landmarks[usize::from(*landmark)] = Landmark::new(*x, *y, 0.0, visibility);
    }
    LandmarkSet::new(landmarks)
}

fn upright() -> LandmarkSet {
    pose(
        &[
            (PoseLandmark::LeftShoulder, 0.4, 0.3),
            (PoseLandmark::RightShoulder, 0.6, 0.3),
            (PoseLandmark::LeftHip, 0.42, 0.7),
            (PoseLandmark::RightHip, 0.58, 0.7),
        ],
        0.75,
    )
}

/// Right shoulder and hip both dropped, upper body shifted right.
fn leaning() -> LandmarkSet {
    pose(
        &[
            (PoseLandmark::LeftShoulder, 0.42, 0.30),
            (PoseLandmark::RightShoulder, 0.64, 0.33),
            (PoseLandmark::LeftHip, 0.42, 0.70),
            (PoseLandmark::RightHip, 0.58, 0.72),
        ],
        0.9,
    )
}

#[test]
fn test_upright_is_low_risk() {
    let analysis = analyze(&upright(), 1000, 1000).unwrap();
    assert_eq!(analysis.risk_level, RiskLevel::Low);
    assert_eq!(analysis.risk_score, 0);
    assert_eq!(analysis.landmark_confidence, Some(0.75));
    assert_eq!(analysis.landmarks.left_shoulder.x, 0.4);
    assert_eq!(analysis.image_width, 1000);
    assert_eq!(analysis.risk_factors.len(), 2);
}

#[test]
fn test_leaning_is_high_risk() {
    let analysis = analyze(&leaning(), 1000, 1000).unwrap();
    assert_eq!(analysis.risk_level, RiskLevel::High);
    assert!(analysis.risk_score >= 50);
    assert_eq!(analysis.metrics.higher_shoulder, Some(posture::Side::Right));
    assert!(analysis.recommendations[0].starts_with("CLINICAL EVALUATION RECOMMENDED"));
}

#[test]
fn test_recalculate_round_trip() {
    let live = analyze(&leaning(), 1000, 1000).unwrap();
    let manual = recalculate(&live.landmarks, 1000, 1000).unwrap();
    assert_eq!(manual.metrics, live.metrics);
    assert_eq!(manual.risk_level, live.risk_level);
    assert_eq!(manual.landmark_confidence, None);
    assert_eq!(manual.landmarks, live.landmarks);
}

#[test]
fn test_manual_adjustment_changes_result() {
    let live = analyze(&leaning(), 1000, 1000).unwrap();
    let mut positions = live.landmarks;
    positions.right_shoulder = positions.left_shoulder;
    positions.right_shoulder.x = 0.58;
    positions.right_hip.y = positions.left_hip.y;
    positions.right_waist.y = positions.left_waist.y;
    positions.right_axilla.y = positions.left_axilla.y;
    let manual = recalculate(&positions, 1000, 1000).unwrap();
    assert_eq!(manual.metrics.shoulder_height_diff_pct, 0.0);
    assert_eq!(manual.metrics.higher_shoulder, None);
    assert!(manual.risk_score < live.risk_score);
}

#[test]
fn test_analyze_validated_rejects_far_subject() {
    let far = pose(
        &[
            (PoseLandmark::LeftShoulder, 0.48, 0.45),
            (PoseLandmark::RightShoulder, 0.52, 0.45),
            (PoseLandmark::LeftHip, 0.485, 0.5),
            (PoseLandmark::RightHip, 0.515, 0.5),
        ],
        0.9,
    );
    match analyze_validated(&far, 1000, 1000, &PhotoValidationConfig::default()) {
        Err(PostureError::Validation(err)) => assert_eq!(err.code, PhotoErrorCode::TooFar),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(analyze_validated(&upright(), 1000, 1000, &PhotoValidationConfig::default()).is_ok());
}

#[test]
fn test_analysis_serializes() {
    let analysis = analyze(&leaning(), 1000, 1000).unwrap();
    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["risk_level"], "HIGH");
    assert_eq!(json["metrics"]["higher_shoulder"], "right");
    assert!(json["landmarks"]["left_waist"]["x"].is_number());

    let manual = recalculate(&analysis.landmarks, 1000, 1000).unwrap();
    let json = serde_json::to_value(&manual).unwrap();
    assert!(json["landmark_confidence"].is_null());
}
