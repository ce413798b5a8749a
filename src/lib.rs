//! vision-sentry
//!
//! A real-time perception loop for an embedded camera with an on-device
//! object-detection accelerator. Each frame flows one direction:
//!
//! 1. Pull an inference result from the accelerator session
//! 2. Filter detections against a confidence threshold
//! 3. Map bounding boxes from inference space to presentation space
//! 4. React: overlay primitives, an audible cue, optional JPEG capture
//! 5. Record frame timing and warn on budget overruns
//!
//! Hardware collaborators (camera, overlay annotator, tone player,
//! inference engine) sit behind minimal capability traits in `hal` and
//! `detect`, so the loop runs against synthetic stubs in tests and on
//! machines without the accelerator.
//!
//! # Module Structure
//!
//! - `config`: startup configuration (file + env overrides)
//! - `geometry`: bounding boxes and inference→presentation scaling
//! - `detect`: detection types, confidence filtering, inference session seam
//! - `feedback`: per-frame reaction policy (overlay, tone, persist)
//! - `timing`: soft per-frame budget watchdog
//! - `hal`: camera / annotator / tone player seams with synthetic stubs
//! - `storage`: timestamped JPEG persistence
//! - `session`: the capture loop state machine

pub mod config;
pub mod detect;
pub mod feedback;
pub mod geometry;
pub mod hal;
pub mod session;
pub mod storage;
pub mod timing;

pub use config::SentryConfig;
pub use detect::{
    confident_detections, Detection, InferenceResult, InferenceSession, ScriptedSession,
};
pub use feedback::{FeedbackActions, FeedbackController, OverlayPrimitive};
pub use geometry::{BoundingBox, MappedBox, ScaleFactors};
pub use hal::{
    Annotator, Camera, NullAnnotator, NullTonePlayer, SyntheticCamera, ToneCue, TonePlayer,
    DETECTION_BEEP, MODEL_LOADED,
};
pub use session::{CaptureSession, SessionCounters, SessionLimits, SessionReport, SessionState};
pub use timing::{FrameTimingMonitor, OverrunReport};
