//! Soft per-frame budget watchdog.
//!
//! The accelerator runs at roughly 35 ms per frame; interpreting the
//! result, drawing the overlay, and the occasional capture add overhead
//! on top. A frame gap past the soft budget (default 0.50 s) is a sign
//! the CPU is getting overrun. The monitor only diagnoses — it never
//! halts the loop.

use std::time::{Duration, Instant};

/// Default soft budget between frame completions.
pub const DEFAULT_FRAME_BUDGET: Duration = Duration::from_millis(500);

/// Diagnostic surfaced to the caller on overrun, for logging.
#[derive(Clone, Copy, Debug)]
pub struct OverrunReport {
    /// Wall-clock gap since the previous frame's completion.
    pub frame_duration: Duration,
    /// Accelerator-reported on-device inference latency.
    pub inference_ms: f64,
}

pub struct FrameTimingMonitor {
    budget: Duration,
    last_completion: Instant,
}

impl FrameTimingMonitor {
    /// Start the monitor; the first frame is measured from this call.
    pub fn start(budget: Duration) -> Self {
        Self {
            budget,
            last_completion: Instant::now(),
        }
    }

    /// Classify one frame gap. Overrun iff strictly past the budget:
    /// a gap of exactly the budget is NOT an overrun.
    pub fn flag(&self, frame_duration: Duration, inference_ms: f64) -> Option<OverrunReport> {
        if frame_duration > self.budget {
            Some(OverrunReport {
                frame_duration,
                inference_ms,
            })
        } else {
            None
        }
    }

    /// Mark this frame complete: measure the wall-clock gap since the
    /// previous completion (or monitor start), advance the mark, and
    /// classify.
    pub fn record(&mut self, inference_ms: f64) -> Option<OverrunReport> {
        let now = Instant::now();
        let frame_duration = now - self.last_completion;
        self.last_completion = now;
        self.flag(frame_duration, inference_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_only_past_the_budget() {
        let monitor = FrameTimingMonitor::start(DEFAULT_FRAME_BUDGET);
        assert!(monitor.flag(Duration::from_millis(501), 35.0).is_some());
        assert!(monitor.flag(Duration::from_millis(499), 35.0).is_none());
        assert!(monitor.flag(Duration::from_millis(20), 35.0).is_none());
    }

    #[test]
    fn exact_budget_is_not_an_overrun() {
        let monitor = FrameTimingMonitor::start(DEFAULT_FRAME_BUDGET);
        assert!(monitor.flag(Duration::from_millis(500), 35.0).is_none());
    }

    #[test]
    fn report_carries_both_durations() {
        let monitor = FrameTimingMonitor::start(Duration::from_millis(100));
        let report = monitor.flag(Duration::from_millis(250), 42.5).unwrap();
        assert_eq!(report.frame_duration, Duration::from_millis(250));
        assert!((report.inference_ms - 42.5).abs() < f64::EPSILON);
    }

    #[test]
    fn record_advances_the_completion_mark() {
        // A generous budget: back-to-back records must not overrun.
        let mut monitor = FrameTimingMonitor::start(Duration::from_secs(3600));
        assert!(monitor.record(35.0).is_none());
        assert!(monitor.record(35.0).is_none());
    }
}
