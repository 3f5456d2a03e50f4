use xray::{
    CurveDirection, CurveLocation, ImageOrientation, Keypoint, Vertebra,
    cobb::{
        angle_between, calculate_all, cobb_angle_for_segment, curve_direction, curve_location,
        find_apex, find_inflection_points, primary_angle,
    },
    types::vertebra_label,
};

use base::{Vec2, round_to};

/// A 40x20 vertebra centered at (cx, cy), rotated by `tilt` degrees.
fn vertebra(index: usize, cx: f64, cy: f64, tilt: f64) -> Vertebra {
    let (sin, cos) = tilt.to_radians().sin_cos();
    let corner = |dx: f64, dy: f64| {
        Keypoint::new(cx + dx * cos - dy * sin, cy + dx * sin + dy * cos, 0.9)
    };
    Vertebra::new(
        index,
        vertebra_label(index),
        [cx - 20.0, cy - 10.0, cx + 20.0, cy + 10.0],
        [
            corner(-20.0, -10.0),
            corner(20.0, -10.0),
            corner(-20.0, 10.0),
            corner(20.0, 10.0),
        ],
        0.9,
    )
}

fn spine(xs: &[f64], tilts: &[f64]) -> Vec<Vertebra> {
    xs.iter()
        .zip(tilts)
        .enumerate()
        .map(|(i, (x, tilt))| vertebra(i, *x, 100.0 + i as f64 * 30.0, *tilt))
        .collect()
}

/// Ten vertebrae bowing to the right with tilt rising from -15 to 30.
fn single_curve() -> Vec<Vertebra> {
    spine(
        &[100.0, 104.0, 108.0, 112.0, 116.0, 118.0, 114.0, 110.0, 105.0, 100.0],
        &[-15.0, -10.0, -5.0, 0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0],
    )
}

#[test]
fn test_angle_between_same_and_opposite() {
    let v = Vec2::new(2.0, 1.0);
    // acos near +-1 amplifies the last-bit error of the normalized dot product
    assert!(angle_between(v, v).abs() < 1e-5);
    assert!((angle_between(v, -v) - 180.0).abs() < 1e-5);
    assert_eq!(round_to(angle_between(v, v), 1), 0.0);
    assert_eq!(angle_between(v, Vec2::zero()), 0.0);
}

#[test]
fn test_right_angle_segment() {
    // upper endplate along (1, 0), lower endplate along (0, 1)
    let upper = Vertebra::new(
        0,
        "T1",
        [0.0, 0.0, 1.0, 1.0],
        [
            Keypoint::new(0.0, 0.0, 1.0),
            Keypoint::new(1.0, 0.0, 1.0),
            Keypoint::new(0.0, 1.0, 1.0),
            Keypoint::new(1.0, 1.0, 1.0),
        ],
        1.0,
    );
    let lower = Vertebra::new(
        1,
        "T2",
        [0.0, 0.0, 1.0, 1.0],
        [
            Keypoint::new(0.0, 0.0, 1.0),
            Keypoint::new(1.0, 0.0, 1.0),
            Keypoint::new(0.0, 0.0, 1.0),
            Keypoint::new(0.0, 1.0, 1.0),
        ],
        1.0,
    );
    assert_eq!(cobb_angle_for_segment(&upper, &lower), 90.0);
}

#[test]
fn test_inflection_points_always_include_ends() {
    for count in 1..=8 {
        let tilts: Vec<f64> = (0..count).map(|i| if i % 2 == 0 { 5.0 } else { -5.0 }).collect();
        let xs = vec![100.0; count];
        let points = find_inflection_points(&spine(&xs, &tilts));
        assert_eq!(points.first(), Some(&0), "count {count}");
        assert_eq!(points.last(), Some(&(count - 1)), "count {count}");
    }
    assert!(find_inflection_points(&[]).is_empty());
}

#[test]
fn test_inflection_at_tilt_reversal() {
    let vertebrae = spine(&[100.0; 7], &[0.0, 5.0, 10.0, 15.0, 10.0, 5.0, 0.0]);
    assert_eq!(find_inflection_points(&vertebrae), vec![0, 3, 6]);
}

#[test]
fn test_flat_tilts_have_no_interior_inflection() {
    let vertebrae = spine(&[100.0; 6], &[0.0; 6]);
    assert_eq!(find_inflection_points(&vertebrae), vec![0, 5]);
}

#[test]
fn test_find_apex() {
    let vertebrae = single_curve();
    assert_eq!(find_apex(&vertebrae, 0, 9), 5);
    assert_eq!(find_apex(&vertebrae, 3, 4), 3);
}

#[test]
fn test_curve_location_bands() {
    assert_eq!(curve_location(0, 8, 17), CurveLocation::Thoracic);
    assert_eq!(curve_location(8, 14, 17), CurveLocation::Thoracolumbar);
    assert_eq!(curve_location(12, 16, 17), CurveLocation::Lumbar);
    // 12 vertebrae: thoracic up to 7, lumbar from 9
    assert_eq!(curve_location(4, 10, 12), CurveLocation::Thoracic);
    assert_eq!(curve_location(6, 10, 12), CurveLocation::Thoracolumbar);
    assert_eq!(curve_location(8, 11, 12), CurveLocation::Lumbar);
    // 8 vertebrae: thoracic up to 4, lumbar from 5
    assert_eq!(curve_location(3, 7, 8), CurveLocation::Lumbar);
}

#[test]
fn test_curve_direction_and_flip() {
    let vertebrae = single_curve();
    let standard = curve_direction(&vertebrae, 0, 9, ImageOrientation::Standard);
    let flipped = curve_direction(&vertebrae, 0, 9, ImageOrientation::Flipped);
    let unknown = curve_direction(&vertebrae, 0, 9, ImageOrientation::Unknown);
    assert_eq!(standard, CurveDirection::Right);
    assert_eq!(flipped, CurveDirection::Left);
    assert_eq!(unknown, standard);
    assert_eq!(flipped, standard.mirrored());
}

#[test]
fn test_curve_direction_straight_is_none() {
    let vertebrae = spine(&[100.0; 5], &[0.0; 5]);
    for orientation in [ImageOrientation::Standard, ImageOrientation::Flipped] {
        assert_eq!(
            curve_direction(&vertebrae, 0, 4, orientation),
            CurveDirection::None
        );
    }
    let vertebrae = single_curve();
    assert_eq!(
        curve_direction(&vertebrae, 4, 5, ImageOrientation::Standard),
        CurveDirection::None
    );
}

#[test]
fn test_too_few_vertebrae() {
    for count in 0..5 {
        let vertebrae = spine(&vec![100.0; count], &vec![20.0 * count as f64; count]);
        assert!(calculate_all(&vertebrae, ImageOrientation::Standard).is_empty());
    }
}

#[test]
fn test_straight_spine_has_no_curves() {
    let vertebrae = spine(&[100.0; 17], &[0.0; 17]);
    let measurements = calculate_all(&vertebrae, ImageOrientation::Standard);
    assert!(measurements.is_empty());
    assert_eq!(primary_angle(&measurements), 0.0);
}

#[test]
fn test_single_curve() {
    let measurements = calculate_all(&single_curve(), ImageOrientation::Standard);
    assert_eq!(measurements.len(), 1);
    let curve = &measurements[0];
    assert_eq!(curve.angle, 45.0);
    assert_eq!(curve.upper_vertebra, "T1");
    assert_eq!(curve.lower_vertebra, "T10");
    assert_eq!(curve.apex_vertebra, "T6");
    assert_eq!(curve.curve_location, CurveLocation::Thoracic);
    assert_eq!(curve.curve_direction, CurveDirection::Right);
}

#[test]
fn test_double_curve_sorted_descending() {
    let vertebrae = spine(
        &[100.0; 12],
        &[0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 20.0, 10.0, 0.0, -10.0, -20.0, -25.0],
    );
    let measurements = calculate_all(&vertebrae, ImageOrientation::Standard);
    let angles: Vec<f64> = measurements.iter().map(|m| m.angle).collect();
    assert_eq!(angles, vec![50.0, 25.0]);
    assert_eq!(measurements[0].upper_vertebra, "T6");
    assert_eq!(measurements[0].lower_vertebra, "T12");
    assert_eq!(primary_angle(&measurements), 50.0);
}

#[test]
fn test_small_segments_are_skipped() {
    // reversal every two vertebrae: every segment spans fewer than 3
    let vertebrae = spine(&[100.0; 7], &[0.0, 20.0, 0.0, 20.0, 0.0, 20.0, 0.0]);
    assert!(calculate_all(&vertebrae, ImageOrientation::Standard).is_empty());
}
