use crate::geometry::MappedBox;

/// On-screen annotator over the live preview.
///
/// Per frame the calls must come in this order: `clear`, then any number
/// of `bounding_box`/`text`, then `update` to commit. Skipping the
/// `clear`/`update` pair leaves stale primitives from earlier frames on
/// screen.
pub trait Annotator {
    fn clear(&mut self);
    fn bounding_box(&mut self, rect: MappedBox);
    fn text(&mut self, position: (f32, f32), text: &str);
    fn update(&mut self);
}

/// Annotator that only logs. Used when no display is attached.
#[derive(Debug, Default)]
pub struct NullAnnotator;

impl NullAnnotator {
    pub fn new() -> Self {
        Self
    }
}

impl Annotator for NullAnnotator {
    fn clear(&mut self) {}

    fn bounding_box(&mut self, rect: MappedBox) {
        log::debug!(
            "overlay box: ({:.1},{:.1})-({:.1},{:.1})",
            rect.x0,
            rect.y0,
            rect.x1,
            rect.y1
        );
    }

    fn text(&mut self, position: (f32, f32), text: &str) {
        log::debug!("overlay text at ({:.0},{:.0}): {}", position.0, position.1, text);
    }

    fn update(&mut self) {}
}
