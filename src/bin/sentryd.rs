//! sentryd - unattended camera perception loop
//!
//! Captures frames, runs each through the object-detection accelerator,
//! draws overlay boxes, beeps on alert-class detections, and saves a
//! JPEG on capture-class detections. Without accelerator hardware it
//! runs against the synthetic camera and a scripted result stream, so
//! the full loop is exercisable on any machine.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use vision_sentry::{
    BoundingBox, CaptureSession, Detection, InferenceResult, NullAnnotator, NullTonePlayer,
    ScriptedSession, SentryConfig, SessionLimits, SyntheticCamera,
};

#[derive(Debug, Parser)]
#[command(name = "sentryd", about = "Camera object-detection loop")]
struct Args {
    /// Number of frames to run for, otherwise runs forever.
    #[arg(
        short = 'f',
        long = "num_frames",
        default_value_t = -1,
        allow_negative_numbers = true
    )]
    num_frames: i64,

    /// Max number of pictures to take, otherwise runs forever.
    #[arg(
        short = 'p',
        long = "num_pics",
        default_value_t = -1,
        allow_negative_numbers = true
    )]
    num_pics: i64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = SentryConfig::load()?;
    let limits = SessionLimits {
        max_frames: args.num_frames,
        max_pictures: args.num_pics,
    };

    log::info!(
        "sentryd starting: threshold={}, alert={:?}, capture={:?}",
        config.inference.min_confidence,
        config.classes.alert,
        config.classes.capture
    );

    let mut session = CaptureSession::new(
        config,
        limits,
        SyntheticCamera::new(),
        NullAnnotator::new(),
        NullTonePlayer::new(),
        demo_source(),
    );
    let report = session.run()?;

    log::info!(
        "session stopped: {} frames, {} pictures, {} overruns",
        report.counters.frame_index,
        report.counters.pictures_taken,
        report.overruns
    );
    Ok(())
}

/// Scripted stand-in for the accelerator: mostly empty frames with the
/// occasional person and cat, paced at the accelerator's nominal 35 ms.
fn demo_source() -> ScriptedSession {
    let quiet = InferenceResult::empty(35.0);
    let person = InferenceResult::new(
        36.0,
        vec![Detection::new(
            "person",
            0.82,
            BoundingBox::new(96.0, 40.0, 80.0, 160.0),
        )],
    );
    let cat = InferenceResult::new(
        34.0,
        vec![Detection::new(
            "cat",
            0.61,
            BoundingBox::new(180.0, 150.0, 60.0, 50.0),
        )],
    );

    let mut script = vec![quiet; 28];
    script.insert(9, person);
    script.insert(23, cat);
    ScriptedSession::cycled(script).with_interval(Duration::from_millis(35))
}
