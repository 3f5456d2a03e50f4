use posture::{
    Landmark, LandmarkSet, POSE_LANDMARK_COUNT, PoseLandmark, PostureError,
    derived::{axilla, estimate, scapula_prominence, waist},
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_waist_ratio() {
    let shoulder = Landmark::new(0.4, 0.3, 0.1, 1.0);
    let hip = Landmark::new(0.44, 0.8, -0.1, 1.0);
    let point = waist(&shoulder, &hip);
    assert!(close(point.x, 0.4 + 0.62 * 0.04));
    assert!(close(point.y, 0.61));
    assert!(close(point.z, -0.024));
}

#[test]
fn test_axilla_inset() {
    let shoulder = Landmark::new(0.4, 0.3, 0.05, 1.0);
    let hip = Landmark::new(0.42, 0.8, 0.0, 1.0);
    let point = axilla(&shoulder, &hip, 0.5);
    assert!(close(point.x, 0.402));
    assert!(close(point.y, 0.39));
    assert_eq!(point.z, 0.05);
}

#[test]
fn test_scapula_prominence() {
    let shoulder = Landmark::new(0.4, 0.3, -0.2, 1.0);
    let elbow = Landmark::new(0.35, 0.5, 0.1, 1.0);
    assert!(close(scapula_prominence(&shoulder, &elbow), 0.35));
}

#[test]
fn test_estimate_both_sides() {
    let mut landmarks = vec![Landmark::new(0.5, 0.5, 0.0, 1.0); POSE_LANDMARK_COUNT];
    landmarks[11] = Landmark::new(0.4, 0.3, 0.0, 1.0);
    landmarks[12] = Landmark::new(0.6, 0.3, 0.1, 1.0);
    landmarks[13] = Landmark::new(0.35, 0.45, 0.0, 1.0);
    landmarks[14] = Landmark::new(0.65, 0.45, 0.1, 1.0);
    landmarks[23] = Landmark::new(0.42, 0.7, 0.0, 1.0);
    landmarks[24] = Landmark::new(0.58, 0.7, 0.0, 1.0);

    let derived = estimate(&LandmarkSet::new(landmarks)).unwrap();
    assert!(close(derived.left_waist.y, derived.right_waist.y));
    assert!(close(derived.left_axilla.x, 0.402));
    assert!(close(derived.right_axilla.x, 0.598));
    assert!(close(derived.left_scapula_prominence, 0.0));
    assert!(close(derived.right_scapula_prominence, 0.1));
}

#[test]
fn test_estimate_missing_hip() {
    let landmarks = vec![Landmark::new(0.5, 0.5, 0.0, 1.0); 13];
    assert_eq!(
        estimate(&LandmarkSet::new(landmarks)),
        Err(PostureError::MissingLandmark(usize::from(PoseLandmark::LeftHip)))
    );
}
