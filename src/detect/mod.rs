//! Detection results and the inference session seam.
//!
//! The accelerator runs the model on-device and hands back one
//! `InferenceResult` per frame over a lazy, session-scoped pull. Only
//! label, confidence, and bounding box are extracted from each result;
//! everything else about the accelerator payload is opaque to the loop.

mod filter;
mod result;
mod session;

pub use filter::confident_detections;
pub use result::{Detection, InferenceResult};
pub use session::{InferenceSession, ScriptedSession};
