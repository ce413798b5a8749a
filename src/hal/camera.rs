use std::path::Path;

use anyhow::{Context, Result};
use image::RgbImage;

/// Camera driver: preview plus still capture.
///
/// Sensor mode and resolution are fixed at session start and not
/// renegotiated mid-session. `capture` writes a JPEG to the given path.
pub trait Camera {
    fn configure(&mut self, sensor_mode: u32, resolution: (u32, u32)) -> Result<()>;
    fn start_preview(&mut self, fullscreen: bool) -> Result<()>;
    fn capture(&mut self, path: &Path) -> Result<()>;
    fn stop_preview(&mut self) -> Result<()>;
}

/// Synthetic camera for tests and hardware-less runs.
///
/// Renders a moving test pattern and encodes real JPEG files on capture,
/// so the persistence path is exercised end to end.
pub struct SyntheticCamera {
    resolution: (u32, u32),
    previewing: bool,
    frames_captured: u64,
}

impl SyntheticCamera {
    pub fn new() -> Self {
        Self {
            resolution: (640, 480),
            previewing: false,
            frames_captured: 0,
        }
    }

    pub fn frames_captured(&self) -> u64 {
        self.frames_captured
    }

    pub fn previewing(&self) -> bool {
        self.previewing
    }
}

impl Default for SyntheticCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera for SyntheticCamera {
    fn configure(&mut self, sensor_mode: u32, resolution: (u32, u32)) -> Result<()> {
        log::debug!(
            "synthetic camera: sensor_mode={} resolution={}x{}",
            sensor_mode,
            resolution.0,
            resolution.1
        );
        self.resolution = resolution;
        Ok(())
    }

    fn start_preview(&mut self, fullscreen: bool) -> Result<()> {
        log::debug!("synthetic camera: preview started (fullscreen={})", fullscreen);
        self.previewing = true;
        Ok(())
    }

    fn capture(&mut self, path: &Path) -> Result<()> {
        let (width, height) = self.resolution;
        let seed = self.frames_captured as u32;
        // Diagonal gradient shifted per capture, so files differ.
        let img = RgbImage::from_fn(width, height, |x, y| {
            let v = ((x + y + seed * 7) % 256) as u8;
            image::Rgb([v, v / 2, 255 - v])
        });
        img.save(path)
            .with_context(|| format!("failed to write capture to {}", path.display()))?;
        self.frames_captured += 1;
        Ok(())
    }

    fn stop_preview(&mut self) -> Result<()> {
        log::debug!("synthetic camera: preview stopped");
        self.previewing = false;
        Ok(())
    }
}
