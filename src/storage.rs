//! Timestamped JPEG persistence.
//!
//! One file per persistence-triggering frame, named by a fixed pattern
//! (`image_<YYYYMMDD-HHMMSS>.jpg`) under the configured images
//! directory. No manifest or index file is kept.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

/// Build the capture path for a frame persisted at `at`.
pub fn image_path(images_dir: &Path, at: DateTime<Local>) -> PathBuf {
    images_dir.join(format!("image_{}.jpg", at.format("%Y%m%d-%H%M%S")))
}

/// Create the images directory if needed. A missing directory at capture
/// time would otherwise surface as a fatal I/O error mid-session.
pub fn ensure_images_dir(images_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(images_dir)
        .with_context(|| format!("failed to create images dir {}", images_dir.display()))
}
