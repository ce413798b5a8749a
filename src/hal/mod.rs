//! Hardware seams.
//!
//! The camera, overlay annotator, and tone player are vendor hardware
//! with fixed call contracts. Each sits behind a minimal capability
//! trait; production builds inject concrete adapters, tests and
//! accelerator-less machines inject the synthetic/null implementations
//! here. The loop itself never touches a device directly.

mod audio;
mod camera;
mod overlay;

pub use audio::{NullTonePlayer, ToneCue, TonePlayer, DETECTION_BEEP, MODEL_LOADED};
pub use camera::{Camera, SyntheticCamera};
pub use overlay::{Annotator, NullAnnotator};
