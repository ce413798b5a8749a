//! Per-frame reaction policy.
//!
//! Consumes the accepted detections for one frame and decides which
//! overlay primitives to draw, whether to beep, and whether the frame is
//! worth persisting. Stateless across frames; the alert/capture class
//! sets are fixed at startup.

use std::collections::HashSet;

use chrono::{DateTime, Local};

use crate::detect::Detection;
use crate::geometry::{MappedBox, ScaleFactors};
use crate::hal::{ToneCue, DETECTION_BEEP};

/// One box-plus-label pair for the overlay.
#[derive(Clone, Debug)]
pub struct OverlayPrimitive {
    pub rect: MappedBox,
    pub label: String,
}

/// What the loop should do with this frame.
#[derive(Clone, Debug, Default)]
pub struct FeedbackActions {
    pub overlay: Vec<OverlayPrimitive>,
    pub tone: Option<ToneCue>,
    /// Trigger flag: persist this frame. Reset each frame, consumed and
    /// cleared by the capture loop after acting on it.
    pub persist: bool,
}

pub struct FeedbackController {
    alert_classes: HashSet<String>,
    capture_classes: HashSet<String>,
    scale: ScaleFactors,
}

impl FeedbackController {
    pub fn new(
        alert_classes: impl IntoIterator<Item = String>,
        capture_classes: impl IntoIterator<Item = String>,
        scale: ScaleFactors,
    ) -> Self {
        Self {
            alert_classes: alert_classes.into_iter().collect(),
            capture_classes: capture_classes.into_iter().collect(),
            scale,
        }
    }

    /// Decide the frame's actions from its accepted detections.
    ///
    /// Every detection contributes one overlay primitive and one log
    /// line (index + timestamp). Alert-class matches request a tone —
    /// at most one cue per frame no matter how many match. Capture-class
    /// matches set the persist flag.
    pub fn process(
        &self,
        detections: &[Detection],
        frame_timestamp: DateTime<Local>,
    ) -> FeedbackActions {
        let mut actions = FeedbackActions::default();
        for (i, det) in detections.iter().enumerate() {
            log::info!(
                "{} Object #{}: {}",
                frame_timestamp.format("%Y-%m-%d-%H:%M:%S"),
                i,
                det
            );
            actions.overlay.push(OverlayPrimitive {
                rect: self.scale.map(&det.bounding_box),
                label: det.to_string(),
            });
            if self.alert_classes.contains(&det.label) {
                actions.tone = Some(DETECTION_BEEP);
            }
            if self.capture_classes.contains(&det.label) {
                actions.persist = true;
            }
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;

    fn controller(alert: &[&str], capture: &[&str]) -> FeedbackController {
        FeedbackController::new(
            alert.iter().map(|s| s.to_string()),
            capture.iter().map(|s| s.to_string()),
            ScaleFactors::new((320, 240), (320, 240)),
        )
    }

    fn det(label: &str) -> Detection {
        Detection::new(label, 0.9, BoundingBox::new(1.0, 2.0, 3.0, 4.0))
    }

    #[test]
    fn every_detection_gets_an_overlay_primitive() {
        let c = controller(&["person"], &["cat"]);
        let actions = c.process(&[det("person"), det("dog")], Local::now());
        assert_eq!(actions.overlay.len(), 2);
        assert!(actions.overlay[0].label.starts_with("person"));
    }

    #[test]
    fn at_most_one_tone_per_frame() {
        let c = controller(&["person"], &[]);
        let actions = c.process(&[det("person"), det("person"), det("person")], Local::now());
        assert_eq!(actions.tone, Some(DETECTION_BEEP));
        // Option holds a single cue no matter how many alerts matched.
        assert!(!actions.persist);
    }

    #[test]
    fn capture_class_sets_persist() {
        let c = controller(&["person"], &["cat"]);
        let actions = c.process(&[det("cat")], Local::now());
        assert!(actions.persist);
        assert!(actions.tone.is_none());
    }

    #[test]
    fn overlapping_classes_trigger_both() {
        let c = controller(&["person"], &["person"]);
        let actions = c.process(&[det("person")], Local::now());
        assert!(actions.persist);
        assert_eq!(actions.tone, Some(DETECTION_BEEP));
    }

    #[test]
    fn no_matches_means_no_actions() {
        let c = controller(&["person"], &["cat"]);
        let actions = c.process(&[det("dog")], Local::now());
        assert!(actions.tone.is_none());
        assert!(!actions.persist);
        assert_eq!(actions.overlay.len(), 1);
    }

    #[test]
    fn empty_frame_is_a_no_op() {
        let c = controller(&["person"], &["cat"]);
        let actions = c.process(&[], Local::now());
        assert!(actions.overlay.is_empty());
        assert!(actions.tone.is_none());
        assert!(!actions.persist);
    }
}
