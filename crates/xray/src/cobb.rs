//! Cobb angle measurement from ordered vertebra corner keypoints.

use std::cmp::Ordering;

use base::{Vec2, log_debug, round_to};

use crate::types::{
    CobbAngleMeasurement, Corner, CurveDirection, CurveLocation, Endplate, ImageOrientation,
    Vertebra,
};

/// Below this a curve is not considered scoliotic.
pub const SCOLIOSIS_THRESHOLD_DEG: f64 = 10.0;

/// Fewer vertebrae than this yields no measurements.
pub const MIN_VERTEBRAE: usize = 5;

/// Segments whose end indices differ by less than this are skipped.
pub const MIN_SEGMENT_SPAN: usize = 3;

/// Left-to-right vector along the chosen endplate.
pub fn endplate_vector(vertebra: &Vertebra, endplate: Endplate) -> Vec2<f64> {
    match endplate {
        Endplate::Upper => vertebra.corner(Corner::TopRight) - vertebra.corner(Corner::TopLeft),
        Endplate::Lower => {
            vertebra.corner(Corner::BottomRight) - vertebra.corner(Corner::BottomLeft)
        }
    }
}

/// Unsigned angle between two vectors in degrees, 0.0 if either is zero-length.
pub fn angle_between(v1: Vec2<f64>, v2: Vec2<f64>) -> f64 {
    v1.angle_between_deg(v2)
}

/// Indices where the tilt sequence changes direction, always including the
/// first and last index.
pub fn find_inflection_points(vertebrae: &[Vertebra]) -> Vec<usize> {
    if vertebrae.is_empty() {
        return Vec::new();
    }
    let last = vertebrae.len() - 1;
    if vertebrae.len() < 3 {
        let mut points = vec![0, last];
        points.dedup();
        return points;
    }

    let mut points = vec![0];
    for i in 1..last {
        let prev_diff = vertebrae[i].tilt_angle - vertebrae[i - 1].tilt_angle;
        let next_diff = vertebrae[i + 1].tilt_angle - vertebrae[i].tilt_angle;
        if prev_diff * next_diff < 0.0 {
            points.push(i);
        }
    }
    points.push(last);
    points
}

/// Most laterally deviated vertebra between `start` and `end` (inclusive).
///
/// Deviation is the horizontal distance from the midpoint of the two end
/// centers, not a true point-to-line distance. Ties keep the earliest index.
pub fn find_apex(vertebrae: &[Vertebra], start: usize, end: usize) -> usize {
    if end < start + 2 {
        return start;
    }
    let segment = &vertebrae[start..=end];
    let midpoint = (segment[0].center() + segment[segment.len() - 1].center()) / 2.0;

    let mut apex = start;
    let mut max_deviation = 0.0;
    for (i, vertebra) in segment.iter().enumerate() {
        let deviation = (vertebra.center().x - midpoint.x).abs();
        if deviation > max_deviation {
            max_deviation = deviation;
            apex = start + i;
        }
    }
    apex
}

/// Region of a curve from the position of its midpoint in the sequence.
pub fn curve_location(upper: usize, lower: usize, total: usize) -> CurveLocation {
    let mid_point = (upper + lower) as f64 / 2.0;

    let (thoracic_end, lumbar_start) = if total >= 15 {
        (9, 13)
    } else if total >= 10 {
        ((total as f64 * 0.6) as usize, (total as f64 * 0.8) as usize)
    } else {
        ((total as f64 * 0.5) as usize, (total as f64 * 0.7) as usize)
    };

    if mid_point <= thoracic_end as f64 {
        CurveLocation::Thoracic
    } else if mid_point >= lumbar_start as f64 {
        CurveLocation::Lumbar
    } else {
        CurveLocation::Thoracolumbar
    }
}

/// Convexity of the curve between `start` and `end` (inclusive).
///
/// Computed in pixel space from the apex position relative to the end
/// midline, then mirrored when the image is flipped.
pub fn curve_direction(
    vertebrae: &[Vertebra],
    start: usize,
    end: usize,
    orientation: ImageOrientation,
) -> CurveDirection {
    if end < start + 2 {
        return CurveDirection::None;
    }
    let xs: Vec<f64> = vertebrae[start..=end].iter().map(|v| v.center().x).collect();
    let midline = (xs[0] + xs[xs.len() - 1]) / 2.0;

    let mut apex_x = xs[0];
    let mut max_deviation = 0.0;
    for x in &xs {
        let deviation = (x - midline).abs();
        if deviation > max_deviation {
            max_deviation = deviation;
            apex_x = *x;
        }
    }

    let pixel_direction = match apex_x.partial_cmp(&midline) {
        Some(Ordering::Greater) => CurveDirection::Right,
        Some(Ordering::Less) => CurveDirection::Left,
        _ => CurveDirection::None,
    };

    match orientation {
        ImageOrientation::Flipped => pixel_direction.mirrored(),
        ImageOrientation::Standard | ImageOrientation::Unknown => pixel_direction,
    }
}

/// Angle between the upper endplate of `upper` and the lower endplate of
/// `lower`, rounded to 1 decimal.
pub fn cobb_angle_for_segment(upper: &Vertebra, lower: &Vertebra) -> f64 {
    let angle = angle_between(
        endplate_vector(upper, Endplate::Upper),
        endplate_vector(lower, Endplate::Lower),
    );
    round_to(angle, 1)
}

/// Every curve of at least 10° between consecutive inflection points,
/// largest first.
pub fn calculate_all(
    vertebrae: &[Vertebra],
    orientation: ImageOrientation,
) -> Vec<CobbAngleMeasurement> {
    if vertebrae.len() < MIN_VERTEBRAE {
        log_debug!("{} vertebrae is too few for cobb measurement", vertebrae.len());
        return Vec::new();
    }

    let inflections = find_inflection_points(vertebrae);
    log_debug!("inflection points: {:?}", inflections);

    let mut measurements = Vec::new();
    for pair in inflections.windows(2) {
        let (upper, lower) = (pair[0], pair[1]);
        if lower - upper < MIN_SEGMENT_SPAN {
            continue;
        }

        let angle = cobb_angle_for_segment(&vertebrae[upper], &vertebrae[lower]);
        if angle < SCOLIOSIS_THRESHOLD_DEG {
            log_debug!(
                "segment {}-{} below threshold ({:.1} deg)",
                vertebrae[upper].label,
                vertebrae[lower].label,
                angle
            );
            continue;
        }

        let apex = find_apex(vertebrae, upper, lower);
        measurements.push(CobbAngleMeasurement {
            angle,
            upper_vertebra: vertebrae[upper].label.clone(),
            lower_vertebra: vertebrae[lower].label.clone(),
            apex_vertebra: vertebrae[apex].label.clone(),
            curve_location: curve_location(upper, lower, vertebrae.len()),
            curve_direction: curve_direction(vertebrae, upper, lower, orientation),
        });
    }

    measurements.sort_by(|a, b| b.angle.partial_cmp(&a.angle).unwrap_or(Ordering::Equal));
    measurements
}

/// Angle of the largest measurement, 0.0 when there is none.
pub fn primary_angle(measurements: &[CobbAngleMeasurement]) -> f64 {
    measurements.first().map_or(0.0, |m| m.angle)
}
