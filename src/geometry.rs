//! Coordinate spaces.
//!
//! The accelerator reports bounding boxes in its fixed inference
//! resolution (e.g. 320×240); the preview overlay and captured images
//! operate at the presentation resolution (e.g. 1640×922). Every box is
//! rescaled through `ScaleFactors` before being drawn.

/// Axis-aligned rectangle in inference space: origin plus extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Rectangle in presentation space, as corner coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MappedBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

/// Per-axis scale from inference resolution to presentation resolution.
///
/// Computed once at session start and constant for the session lifetime;
/// neither resolution is renegotiated mid-session.
#[derive(Clone, Copy, Debug)]
pub struct ScaleFactors {
    pub scale_x: f32,
    pub scale_y: f32,
}

impl ScaleFactors {
    /// Derive scale factors from (width, height) pairs.
    pub fn new(presentation: (u32, u32), inference: (u32, u32)) -> Self {
        Self {
            scale_x: presentation.0 as f32 / inference.0 as f32,
            scale_y: presentation.1 as f32 / inference.1 as f32,
        }
    }

    /// Map an inference-space box to presentation-space corners.
    pub fn map(&self, b: &BoundingBox) -> MappedBox {
        MappedBox {
            x0: self.scale_x * b.x,
            y0: self.scale_y * b.y,
            x1: self.scale_x * (b.x + b.width),
            y1: self.scale_y * (b.y + b.height),
        }
    }
}
