use std::cmp::Ordering;

use base::{log_debug, round_to};

use crate::{
    XrayError,
    config::PostprocessConfig,
    outliers,
    types::{Detection, KEYPOINTS_PER_VERTEBRA, Keypoint, Vertebra, vertebra_label},
};

fn by_score_desc(a: &Detection, b: &Detection) -> Ordering {
    b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
}

fn by_top(a: &Detection, b: &Detection) -> Ordering {
    a.top().partial_cmp(&b.top()).unwrap_or(Ordering::Equal)
}

/// Greedy non-maximum suppression.
///
/// Returns indices into `detections` of the kept boxes, highest score first.
/// A box is suppressed when its IoU with an already kept box exceeds
/// `iou_threshold`.
pub fn nms(detections: &[Detection], iou_threshold: f64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..detections.len()).collect();
    order.sort_by(|&a, &b| by_score_desc(&detections[a], &detections[b]));

    let mut keep = Vec::new();
    let mut suppressed = vec![false; order.len()];

    for i in 0..order.len() {
        if suppressed[i] {
            continue;
        }
        let kept = &detections[order[i]];
        keep.push(order[i]);

        for j in (i + 1)..order.len() {
            if suppressed[j] {
                continue;
            }
            if kept.rect().iou(detections[order[j]].rect()) > iou_threshold {
                suppressed[j] = true;
            }
        }
    }

    keep
}

/// Zip parallel detector arrays into candidates and clean them.
pub fn filter(
    boxes: &[[f64; 4]],
    scores: &[f64],
    keypoints: &[Vec<Keypoint>],
    config: &PostprocessConfig,
) -> Result<Vec<Detection>, XrayError> {
    if boxes.len() != scores.len() || boxes.len() != keypoints.len() {
        return Err(XrayError::LengthMismatch {
            boxes: boxes.len(),
            scores: scores.len(),
            keypoints: keypoints.len(),
        });
    }
    let detections = boxes
        .iter()
        .zip(scores)
        .zip(keypoints)
        .map(|((bbox, score), kps)| Detection::new(*bbox, *score, kps.clone()))
        .collect();
    filter_detections(detections, config)
}

/// Clean raw detector candidates into a top-to-bottom vertebra sequence.
///
/// Confidence filter, NMS, sort by box top, spatial outlier rejection, and
/// finally a cap at `max_detections` keeping the highest scores.
pub fn filter_detections(
    detections: Vec<Detection>,
    config: &PostprocessConfig,
) -> Result<Vec<Detection>, XrayError> {
    for (index, detection) in detections.iter().enumerate() {
        if detection.keypoints.len() != KEYPOINTS_PER_VERTEBRA {
            return Err(XrayError::KeypointCount {
                index,
                got: detection.keypoints.len(),
            });
        }
    }

    let total = detections.len();
    let confident: Vec<Detection> = detections
        .into_iter()
        .filter(|d| d.score >= config.confidence_threshold)
        .collect();
    if confident.is_empty() {
        log_debug!("no detections above confidence {}", config.confidence_threshold);
        return Ok(Vec::new());
    }

    let mut kept: Vec<Detection> = nms(&confident, config.nms_threshold)
        .into_iter()
        .map(|i| confident[i].clone())
        .collect();
    log_debug!(
        "{} candidates, {} above confidence, {} after nms",
        total,
        confident.len(),
        kept.len()
    );

    kept.sort_by(by_top);

    if config.reject_outliers && kept.len() >= config.min_kept {
        kept = outliers::reject_spatial_outliers(kept, config);
    }

    if kept.len() > config.max_detections {
        kept.sort_by(by_score_desc);
        kept.truncate(config.max_detections);
        kept.sort_by(by_top);
    }

    Ok(kept)
}

/// Turn cleaned detections into labelled vertebrae, in the given order.
pub fn extract_vertebrae(detections: &[Detection]) -> Result<Vec<Vertebra>, XrayError> {
    detections
        .iter()
        .enumerate()
        .map(|(index, detection)| {
            let keypoints: [Keypoint; KEYPOINTS_PER_VERTEBRA] = detection
                .keypoints
                .as_slice()
                .try_into()
                .map_err(|_| XrayError::KeypointCount {
                    index,
                    got: detection.keypoints.len(),
                })?;
            Ok(Vertebra::new(
                index,
                vertebra_label(index),
                detection.bbox,
                keypoints,
                detection.score,
            ))
        })
        .collect()
}

/// Mean detection confidence, 3 decimals; 0.0 for an empty sequence.
pub fn average_confidence(vertebrae: &[Vertebra]) -> f64 {
    if vertebrae.is_empty() {
        return 0.0;
    }
    let total: f64 = vertebrae.iter().map(|v| v.confidence).sum();
    round_to(total / vertebrae.len() as f64, 3)
}
