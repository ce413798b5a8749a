use anyhow::Result;

/// A short note sequence in tone-player notation (`C6w` = C, octave 6,
/// whole note; lowercase = flat; trailing letter is duration).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToneCue {
    pub name: &'static str,
    pub notes: &'static [&'static str],
}

/// Chime played once the inference session is live.
pub const MODEL_LOADED: ToneCue = ToneCue {
    name: "model-loaded",
    notes: &["C6w", "c6w", "C6w"],
};

/// Two-note beep for an alert-class detection.
pub const DETECTION_BEEP: ToneCue = ToneCue {
    name: "detection-beep",
    notes: &["E6q", "C6q"],
};

/// Tone output device.
///
/// `play` is fire-and-forget from the loop's point of view: it blocks
/// only for the cue's own duration and holds no queue across frames.
pub trait TonePlayer {
    fn play(&mut self, cue: &ToneCue) -> Result<()>;
}

/// Silent player for tests and machines without a buzzer.
#[derive(Debug, Default)]
pub struct NullTonePlayer;

impl NullTonePlayer {
    pub fn new() -> Self {
        Self
    }
}

impl TonePlayer for NullTonePlayer {
    fn play(&mut self, cue: &ToneCue) -> Result<()> {
        log::debug!("tone: {} {:?}", cue.name, cue.notes);
        Ok(())
    }
}
