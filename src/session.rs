//! The capture loop.
//!
//! Orchestrates one session: acquire camera/preview/overlay, start the
//! inference pull, then per frame run filter → map → feedback → side
//! effects → timing, and poll the stop conditions. Single-threaded and
//! synchronous; the only suspension point is the blocking pull on the
//! inference session. Counters and the per-frame trigger flag are owned
//! exclusively here, so no locking exists anywhere in the loop.

use anyhow::Result;
use chrono::Local;

use crate::config::SentryConfig;
use crate::detect::{confident_detections, InferenceSession};
use crate::feedback::FeedbackController;
use crate::geometry::ScaleFactors;
use crate::hal::{Annotator, Camera, TonePlayer, MODEL_LOADED};
use crate::storage;
use crate::timing::FrameTimingMonitor;

/// Session lifecycle. Transitions only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Starting,
    Running,
    Stopping,
    Stopped,
}

/// Monotone per-session counters, reset only at process start.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionCounters {
    /// Frames fully processed so far.
    pub frame_index: u64,
    /// Frames persisted to disk so far.
    pub pictures_taken: u64,
}

/// Stop conditions, polled once per frame against the completed-frame
/// counters, before the next pull.
///
/// A negative limit is the "run forever" sentinel and that condition is
/// never evaluated.
#[derive(Clone, Copy, Debug)]
pub struct SessionLimits {
    pub max_frames: i64,
    pub max_pictures: i64,
}

impl SessionLimits {
    pub const UNBOUNDED: i64 = -1;

    pub fn unbounded() -> Self {
        Self {
            max_frames: Self::UNBOUNDED,
            max_pictures: Self::UNBOUNDED,
        }
    }

    pub fn reached(&self, counters: &SessionCounters) -> bool {
        limit_hit(self.max_frames, counters.frame_index)
            || limit_hit(self.max_pictures, counters.pictures_taken)
    }
}

fn limit_hit(limit: i64, value: u64) -> bool {
    limit >= 0 && value >= limit as u64
}

/// What a completed session did.
#[derive(Clone, Copy, Debug)]
pub struct SessionReport {
    pub counters: SessionCounters,
    pub overruns: u64,
}

/// One capture session over injected hardware seams.
pub struct CaptureSession<C, A, P, S> {
    camera: C,
    annotator: A,
    player: P,
    source: S,
    config: SentryConfig,
    limits: SessionLimits,
    state: SessionState,
    counters: SessionCounters,
}

impl<C, A, P, S> CaptureSession<C, A, P, S>
where
    C: Camera,
    A: Annotator,
    P: TonePlayer,
    S: InferenceSession,
{
    pub fn new(
        config: SentryConfig,
        limits: SessionLimits,
        camera: C,
        annotator: A,
        player: P,
        source: S,
    ) -> Self {
        Self {
            camera,
            annotator,
            player,
            source,
            config,
            limits,
            state: SessionState::Starting,
            counters: SessionCounters::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn counters(&self) -> SessionCounters {
        self.counters
    }

    /// Run the session to completion.
    ///
    /// Setup failures are fatal and propagate before any frame is
    /// processed. Once the preview is up it is released exactly once on
    /// every exit path, error exits included.
    pub fn run(&mut self) -> Result<SessionReport> {
        self.state = SessionState::Starting;
        storage::ensure_images_dir(&self.config.images_dir)?;
        self.camera.configure(
            self.config.camera.sensor_mode,
            self.config.presentation_resolution(),
        )?;
        self.camera.start_preview(self.config.camera.fullscreen)?;

        let outcome = self.run_frames();

        self.state = SessionState::Stopping;
        let released = self.camera.stop_preview();
        self.state = SessionState::Stopped;

        let overruns = outcome?;
        released?;
        Ok(SessionReport {
            counters: self.counters,
            overruns,
        })
    }

    fn run_frames(&mut self) -> Result<u64> {
        let scale = ScaleFactors::new(
            self.config.presentation_resolution(),
            self.config.inference_resolution(),
        );
        let feedback = FeedbackController::new(
            self.config.classes.alert.iter().cloned(),
            self.config.classes.capture.iter().cloned(),
            scale,
        );

        log::info!("camera inference started");
        self.player.play(&MODEL_LOADED)?;
        self.state = SessionState::Running;

        let mut monitor = FrameTimingMonitor::start(self.config.frame_budget);
        let mut overruns = 0u64;

        loop {
            if self.limits.reached(&self.counters) {
                log::info!(
                    "stop condition reached after frame {} ({} pictures)",
                    self.counters.frame_index,
                    self.counters.pictures_taken
                );
                break;
            }

            let Some(result) = self.source.next_result()? else {
                log::info!("inference source exhausted, stopping");
                break;
            };

            let accepted = confident_detections(&result, self.config.inference.min_confidence);
            let actions = feedback.process(&accepted, Local::now());

            // clear/update run even on empty frames so no stale boxes
            // survive from earlier frames.
            self.annotator.clear();
            for primitive in &actions.overlay {
                self.annotator.bounding_box(primitive.rect);
                self.annotator
                    .text((primitive.rect.x0, primitive.rect.y0), &primitive.label);
            }
            self.annotator.update();

            if let Some(cue) = &actions.tone {
                self.player.play(cue)?;
            }

            if actions.persist {
                let path = storage::image_path(&self.config.images_dir, Local::now());
                self.camera.capture(&path)?;
                self.counters.pictures_taken += 1;
                log::info!("saved {}", path.display());
            }

            if let Some(overrun) = monitor.record(result.duration_ms) {
                overruns += 1;
                log::warn!(
                    "total process time: {:.3}s, accelerator inference time: {} ms",
                    overrun.frame_duration.as_secs_f64(),
                    overrun.inference_ms
                );
            }

            self.counters.frame_index += 1;
        }

        Ok(overruns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_limits_never_hit() {
        let limits = SessionLimits::unbounded();
        for frames in [0, 1, 1_000_000_000] {
            let counters = SessionCounters {
                frame_index: frames,
                pictures_taken: frames,
            };
            assert!(!limits.reached(&counters));
        }
    }

    #[test]
    fn frame_limit_hits_at_and_past_the_limit() {
        let limits = SessionLimits {
            max_frames: 3,
            max_pictures: SessionLimits::UNBOUNDED,
        };
        let at = |frame_index| SessionCounters {
            frame_index,
            pictures_taken: 0,
        };
        assert!(!limits.reached(&at(2)));
        assert!(limits.reached(&at(3)));
        assert!(limits.reached(&at(4)));
    }

    #[test]
    fn picture_limit_is_independent_of_frames() {
        let limits = SessionLimits {
            max_frames: SessionLimits::UNBOUNDED,
            max_pictures: 1,
        };
        let counters = SessionCounters {
            frame_index: 99,
            pictures_taken: 0,
        };
        assert!(!limits.reached(&counters));
        let counters = SessionCounters {
            frame_index: 99,
            pictures_taken: 1,
        };
        assert!(limits.reached(&counters));
    }

    #[test]
    fn zero_frame_limit_stops_immediately() {
        let limits = SessionLimits {
            max_frames: 0,
            max_pictures: SessionLimits::UNBOUNDED,
        };
        assert!(limits.reached(&SessionCounters::default()));
    }
}
