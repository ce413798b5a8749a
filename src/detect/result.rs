use std::fmt;

use crate::geometry::BoundingBox;

/// One detected object, in inference-space coordinates.
///
/// Immutable once produced for a frame; detections are owned by the
/// per-frame processing step and discarded when the frame completes.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    /// Model class label (e.g. "person", "cat").
    pub label: String,
    /// Confidence in [0, 1].
    pub confidence: f32,
    /// Location within the inference frame.
    pub bounding_box: BoundingBox,
}

impl Detection {
    pub fn new(label: impl Into<String>, confidence: f32, bounding_box: BoundingBox) -> Self {
        Self {
            label: label.into(),
            confidence,
            bounding_box,
        }
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2})", self.label, self.confidence)
    }
}

/// Per-frame payload from the accelerator.
#[derive(Clone, Debug, Default)]
pub struct InferenceResult {
    /// Accelerator-reported on-device inference latency.
    pub duration_ms: f64,
    /// Detections in accelerator emission order, unfiltered.
    pub detections: Vec<Detection>,
}

impl InferenceResult {
    pub fn new(duration_ms: f64, detections: Vec<Detection>) -> Self {
        Self {
            duration_ms,
            detections,
        }
    }

    /// A result that saw nothing. Valid and common.
    pub fn empty(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            detections: Vec::new(),
        }
    }
}
