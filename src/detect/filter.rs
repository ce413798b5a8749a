use crate::detect::result::{Detection, InferenceResult};

/// Keep detections at or above the confidence threshold.
///
/// Order-preserving (accelerator emission order), no side effects. An
/// empty result yields an empty vector. The threshold range is validated
/// at configuration load, not here.
pub fn confident_detections(result: &InferenceResult, min_confidence: f32) -> Vec<Detection> {
    result
        .detections
        .iter()
        .filter(|d| d.confidence >= min_confidence)
        .cloned()
        .collect()
}
