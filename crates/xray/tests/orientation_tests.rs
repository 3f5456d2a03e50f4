use xray::{
    ImageOrientation,
    orientation::{
        DetectedMarker, ImageSide, Marker, MarkerCandidate, best_marker, orientation_from_marker,
        resolve_orientation,
    },
};

fn candidate(text: &str, position: ImageSide, confidence: f64) -> MarkerCandidate {
    MarkerCandidate {
        text: text.to_string(),
        position,
        confidence,
    }
}

fn marker(marker: Marker, position: ImageSide) -> DetectedMarker {
    DetectedMarker {
        marker,
        position,
        confidence: 0.9,
    }
}

#[test]
fn test_marker_mapping() {
    assert_eq!(
        orientation_from_marker(&marker(Marker::R, ImageSide::Left)),
        ImageOrientation::Standard
    );
    assert_eq!(
        orientation_from_marker(&marker(Marker::R, ImageSide::Right)),
        ImageOrientation::Flipped
    );
    assert_eq!(
        orientation_from_marker(&marker(Marker::L, ImageSide::Right)),
        ImageOrientation::Standard
    );
    assert_eq!(
        orientation_from_marker(&marker(Marker::L, ImageSide::Left)),
        ImageOrientation::Flipped
    );
}

#[test]
fn test_marker_parse() {
    assert_eq!(Marker::parse(" r "), Some(Marker::R));
    assert_eq!(Marker::parse("L"), Some(Marker::L));
    assert_eq!(Marker::parse("LR"), None);
    assert_eq!(Marker::parse(""), None);
}

#[test]
fn test_best_marker_picks_most_confident() {
    let candidates = [
        candidate("L", ImageSide::Right, 0.6),
        candidate("PA", ImageSide::Left, 0.99),
        candidate("r", ImageSide::Left, 0.8),
        candidate("L", ImageSide::Left, 0.3),
    ];
    let best = best_marker(&candidates).unwrap();
    assert_eq!(best.marker, Marker::R);
    assert_eq!(best.position, ImageSide::Left);
}

#[test]
fn test_best_marker_ignores_low_confidence() {
    let candidates = [candidate("R", ImageSide::Left, 0.4)];
    assert!(best_marker(&candidates).is_none());
}

#[test]
fn test_resolve_orientation() {
    let candidates = [candidate("R", ImageSide::Right, 0.9)];
    assert_eq!(
        resolve_orientation(None, &candidates),
        ImageOrientation::Flipped
    );
    assert_eq!(
        resolve_orientation(Some(ImageOrientation::Standard), &candidates),
        ImageOrientation::Standard
    );
    assert_eq!(resolve_orientation(None, &[]), ImageOrientation::Unknown);
}
