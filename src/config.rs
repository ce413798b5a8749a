use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;

const DEFAULT_SENSOR_MODE: u32 = 5;
// Highest 16:9 still resolution the sensor supports in mode 5.
const DEFAULT_PRESENTATION_WIDTH: u32 = 1640;
const DEFAULT_PRESENTATION_HEIGHT: u32 = 922;
const DEFAULT_INFERENCE_WIDTH: u32 = 320;
const DEFAULT_INFERENCE_HEIGHT: u32 = 240;
const DEFAULT_MIN_CONFIDENCE: f32 = 0.3;
const DEFAULT_ALERT_CLASS: &str = "person";
const DEFAULT_CAPTURE_CLASS: &str = "cat";
const DEFAULT_FRAME_BUDGET_MS: u64 = 500;
const DEFAULT_IMAGES_DIR: &str = "images";
const DEFAULT_TONE_GPIO: u32 = 22;
const DEFAULT_TONE_BPM: u32 = 30;

#[derive(Debug, Deserialize, Default)]
struct SentryConfigFile {
    camera: Option<CameraConfigFile>,
    inference: Option<InferenceConfigFile>,
    classes: Option<ClassConfigFile>,
    timing: Option<TimingConfigFile>,
    audio: Option<AudioConfigFile>,
    images_dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct CameraConfigFile {
    sensor_mode: Option<u32>,
    width: Option<u32>,
    height: Option<u32>,
    fullscreen: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
struct InferenceConfigFile {
    width: Option<u32>,
    height: Option<u32>,
    min_confidence: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
struct ClassConfigFile {
    alert: Option<Vec<String>>,
    capture: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
struct TimingConfigFile {
    frame_budget_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct AudioConfigFile {
    gpio: Option<u32>,
    bpm: Option<u32>,
}

/// Startup configuration for the perception loop.
///
/// Loaded once at process start: defaults, then an optional JSON file
/// pointed to by `SENTRY_CONFIG`, then `SENTRY_*` env overrides. There
/// is no persistent configuration store and nothing is reloaded
/// mid-session.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    pub camera: CameraSettings,
    pub inference: InferenceSettings,
    pub classes: ClassSettings,
    pub frame_budget: Duration,
    pub audio: AudioSettings,
    pub images_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct CameraSettings {
    pub sensor_mode: u32,
    /// Presentation resolution: preview overlay and captured stills.
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

#[derive(Debug, Clone)]
pub struct InferenceSettings {
    /// Resolution the accelerator reports bounding boxes in.
    pub width: u32,
    pub height: u32,
    pub min_confidence: f32,
}

#[derive(Debug, Clone)]
pub struct ClassSettings {
    /// Labels that trigger the audio cue.
    pub alert: Vec<String>,
    /// Labels that trigger image persistence.
    pub capture: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AudioSettings {
    pub gpio: u32,
    pub bpm: u32,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            camera: CameraSettings {
                sensor_mode: DEFAULT_SENSOR_MODE,
                width: DEFAULT_PRESENTATION_WIDTH,
                height: DEFAULT_PRESENTATION_HEIGHT,
                fullscreen: true,
            },
            inference: InferenceSettings {
                width: DEFAULT_INFERENCE_WIDTH,
                height: DEFAULT_INFERENCE_HEIGHT,
                min_confidence: DEFAULT_MIN_CONFIDENCE,
            },
            classes: ClassSettings {
                alert: vec![DEFAULT_ALERT_CLASS.to_string()],
                capture: vec![DEFAULT_CAPTURE_CLASS.to_string()],
            },
            frame_budget: Duration::from_millis(DEFAULT_FRAME_BUDGET_MS),
            audio: AudioSettings {
                gpio: DEFAULT_TONE_GPIO,
                bpm: DEFAULT_TONE_BPM,
            },
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
        }
    }
}

impl SentryConfig {
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("SENTRY_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: SentryConfigFile) -> Self {
        let mut cfg = Self::default();
        if let Some(camera) = file.camera {
            if let Some(mode) = camera.sensor_mode {
                cfg.camera.sensor_mode = mode;
            }
            if let Some(width) = camera.width {
                cfg.camera.width = width;
            }
            if let Some(height) = camera.height {
                cfg.camera.height = height;
            }
            if let Some(fullscreen) = camera.fullscreen {
                cfg.camera.fullscreen = fullscreen;
            }
        }
        if let Some(inference) = file.inference {
            if let Some(width) = inference.width {
                cfg.inference.width = width;
            }
            if let Some(height) = inference.height {
                cfg.inference.height = height;
            }
            if let Some(min_confidence) = inference.min_confidence {
                cfg.inference.min_confidence = min_confidence;
            }
        }
        if let Some(classes) = file.classes {
            if let Some(alert) = classes.alert {
                cfg.classes.alert = alert;
            }
            if let Some(capture) = classes.capture {
                cfg.classes.capture = capture;
            }
        }
        if let Some(timing) = file.timing {
            if let Some(ms) = timing.frame_budget_ms {
                cfg.frame_budget = Duration::from_millis(ms);
            }
        }
        if let Some(audio) = file.audio {
            if let Some(gpio) = audio.gpio {
                cfg.audio.gpio = gpio;
            }
            if let Some(bpm) = audio.bpm {
                cfg.audio.bpm = bpm;
            }
        }
        if let Some(dir) = file.images_dir {
            cfg.images_dir = PathBuf::from(dir);
        }
        cfg
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(raw) = std::env::var("SENTRY_MIN_CONFIDENCE") {
            if !raw.trim().is_empty() {
                self.inference.min_confidence = raw
                    .trim()
                    .parse()
                    .map_err(|e| anyhow!("invalid SENTRY_MIN_CONFIDENCE '{}': {}", raw, e))?;
            }
        }
        if let Ok(raw) = std::env::var("SENTRY_ALERT_CLASSES") {
            let parsed = split_csv(&raw);
            if !parsed.is_empty() {
                self.classes.alert = parsed;
            }
        }
        if let Ok(raw) = std::env::var("SENTRY_CAPTURE_CLASSES") {
            let parsed = split_csv(&raw);
            if !parsed.is_empty() {
                self.classes.capture = parsed;
            }
        }
        if let Ok(raw) = std::env::var("SENTRY_FRAME_BUDGET_MS") {
            if !raw.trim().is_empty() {
                let ms: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| anyhow!("invalid SENTRY_FRAME_BUDGET_MS '{}': {}", raw, e))?;
                self.frame_budget = Duration::from_millis(ms);
            }
        }
        if let Ok(dir) = std::env::var("SENTRY_IMAGES_DIR") {
            if !dir.trim().is_empty() {
                self.images_dir = PathBuf::from(dir);
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.inference.min_confidence) {
            return Err(anyhow!(
                "min_confidence must be in [0, 1], got {}",
                self.inference.min_confidence
            ));
        }
        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(anyhow!("camera resolution must be non-zero"));
        }
        if self.inference.width == 0 || self.inference.height == 0 {
            return Err(anyhow!("inference resolution must be non-zero"));
        }
        if self.frame_budget.is_zero() {
            return Err(anyhow!("frame budget must be non-zero"));
        }
        Ok(())
    }

    pub fn presentation_resolution(&self) -> (u32, u32) {
        (self.camera.width, self.camera.height)
    }

    pub fn inference_resolution(&self) -> (u32, u32) {
        (self.inference.width, self.inference.height)
    }
}

fn read_config_file(path: &Path) -> Result<SentryConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(|item| item.to_string())
        .collect()
}
