//! Schroth curve-pattern classification and severity grading.

use base::{log_debug, mean};

use crate::types::{
    CobbAngleMeasurement, Corner, CurveDirection, CurveLocation, SchrothType, Severity, Vertebra,
};

/// Maximum lower-endplate slope (height / width) still considered level.
pub const PELVIS_BALANCE_THRESHOLD: f64 = 0.1;

/// Both regions at least this large count toward a double curve.
const DOUBLE_CURVE_MIN_DEG: f64 = 10.0;
/// Regions closer than this in magnitude form a double curve.
const DOUBLE_CURVE_MAX_DIFF_DEG: f64 = 15.0;
/// Thoracic must exceed lumbar by this factor to be thoracic-dominant.
const THORACIC_DOMINANCE_RATIO: f64 = 1.2;

/// Whether the lowest vertebra's lower endplate is roughly horizontal.
///
/// Fewer than five vertebrae, or a zero-width endplate, counts as balanced.
pub fn pelvis_balanced(vertebrae: &[Vertebra], threshold: f64) -> bool {
    if vertebrae.len() < 5 {
        return true;
    }
    let Some(lowest) = vertebrae.last() else {
        return true;
    };
    let left = lowest.corner(Corner::BottomLeft);
    let right = lowest.corner(Corner::BottomRight);
    let width = (right.x - left.x).abs();
    if width == 0.0 {
        return true;
    }
    (right.y - left.y).abs() / width < threshold
}

fn mean_center_x(vertebrae: &[Vertebra]) -> Option<f64> {
    let xs: Vec<f64> = vertebrae.iter().map(|v| v.center().x).collect();
    mean(&xs)
}

/// Whether the pelvis shifts to the same side of the upper-spine midline as
/// the lumbar region.
pub fn pelvis_lumbar_coupled(vertebrae: &[Vertebra]) -> bool {
    if vertebrae.len() < 5 {
        return true;
    }
    let len = vertebrae.len();
    let lumbar = &vertebrae[len.saturating_sub(5)..len - 1];

    let (Some(midline), Some(lumbar_x)) = (mean_center_x(&vertebrae[..3]), mean_center_x(lumbar))
    else {
        return true;
    };
    let pelvis_x = vertebrae[len - 1].center().x;

    (lumbar_x - midline) * (pelvis_x - midline) > 0.0
}

/// Largest thoracic angle and largest lumbar/thoracolumbar angle (0.0 if none).
fn region_maxima(measurements: &[CobbAngleMeasurement]) -> (f64, f64) {
    let mut thoracic: f64 = 0.0;
    let mut lumbar: f64 = 0.0;
    for m in measurements {
        match m.curve_location {
            CurveLocation::Thoracic => thoracic = thoracic.max(m.angle),
            CurveLocation::Lumbar | CurveLocation::Thoracolumbar => lumbar = lumbar.max(m.angle),
        }
    }
    (thoracic, lumbar)
}

/// The region holding the larger curve, with its angle. Ties favour thoracic.
pub fn dominant_curve_region(measurements: &[CobbAngleMeasurement]) -> (CurveLocation, f64) {
    let (thoracic, lumbar) = region_maxima(measurements);
    if thoracic >= lumbar {
        (CurveLocation::Thoracic, thoracic)
    } else {
        (CurveLocation::Lumbar, lumbar)
    }
}

pub fn determine_schroth_type(
    measurements: &[CobbAngleMeasurement],
    vertebrae: &[Vertebra],
) -> SchrothType {
    if measurements.is_empty() {
        return SchrothType::Unknown;
    }

    let balanced = pelvis_balanced(vertebrae, PELVIS_BALANCE_THRESHOLD);
    let (max_thoracic, max_lumbar) = region_maxima(measurements);
    let is_double_curve = max_thoracic >= DOUBLE_CURVE_MIN_DEG
        && max_lumbar >= DOUBLE_CURVE_MIN_DEG
        && (max_thoracic - max_lumbar).abs() < DOUBLE_CURVE_MAX_DIFF_DEG;

    let schroth_type = if balanced {
        if is_double_curve {
            SchrothType::FourC
        } else if max_thoracic > max_lumbar * THORACIC_DOMINANCE_RATIO {
            SchrothType::ThreeC
        } else {
            SchrothType::FourC
        }
    } else if pelvis_lumbar_coupled(vertebrae) {
        SchrothType::ThreeCP
    } else {
        SchrothType::FourCP
    };

    log_debug!(
        "schroth {}: balanced={} thoracic={:.1} lumbar={:.1} double={}",
        schroth_type,
        balanced,
        max_thoracic,
        max_lumbar,
        is_double_curve
    );
    schroth_type
}

/// Grade from the primary Cobb angle. Sub-threshold angles still grade mild.
pub fn severity(primary_angle: f64) -> Severity {
    if primary_angle < 25.0 {
        Severity::Mild
    } else if primary_angle < 40.0 {
        Severity::Moderate
    } else if primary_angle < 50.0 {
        Severity::Severe
    } else {
        Severity::VerySevere
    }
}

/// Location and direction of the largest curve; thoracic/none when empty.
pub fn primary_curve_info(
    measurements: &[CobbAngleMeasurement],
) -> (CurveLocation, CurveDirection) {
    measurements.first().map_or(
        (CurveLocation::Thoracic, CurveDirection::None),
        |primary| (primary.curve_location, primary.curve_direction),
    )
}
