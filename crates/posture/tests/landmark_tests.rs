use posture::{Landmark, LandmarkSet, PoseLandmark, PostureError, Side};

#[test]
fn test_pose_landmark_indices() {
    assert_eq!(usize::from(PoseLandmark::LeftShoulder), 11);
    assert_eq!(usize::from(PoseLandmark::RightHip), 24);
    assert_eq!(PoseLandmark::try_from(14), Ok(PoseLandmark::RightElbow));
    assert!(PoseLandmark::try_from(1).is_err());
    assert!(PoseLandmark::try_from(33).is_err());
    assert_eq!(PoseLandmark::LeftHip.to_string(), "left hip");
}

#[test]
fn test_landmark_set_get() {
    let set = LandmarkSet::new(vec![Landmark::new(0.1, 0.2, 0.3, 1.0); 12]);
    assert_eq!(set.get(PoseLandmark::LeftShoulder).unwrap().y, 0.2);
    assert_eq!(
        set.get(PoseLandmark::RightShoulder),
        Err(PostureError::MissingLandmark(12))
    );
}

#[test]
fn test_confidence_is_mean_visibility() {
    let set = LandmarkSet::new(vec![
        Landmark::new(0.0, 0.0, 0.0, 1.0),
        Landmark::new(0.0, 0.0, 0.0, 0.5),
        Landmark::new(0.0, 0.0, 0.0, 0.0),
        Landmark::new(0.0, 0.0, 0.0, 0.5),
    ]);
    assert_eq!(set.confidence(), 0.5);
    assert_eq!(LandmarkSet::default().confidence(), 0.0);
}

#[test]
fn test_landmark_set_is_a_json_array() {
    let set: LandmarkSet =
        serde_json::from_str(r#"[{"x": 0.5, "y": 0.25, "z": -0.1, "visibility": 0.9}]"#).unwrap();
    assert_eq!(set.len(), 1);
    assert_eq!(set.as_slice()[0].y, 0.25);
    assert_eq!(serde_json::to_string(&Side::Left).unwrap(), "\"left\"");
}
