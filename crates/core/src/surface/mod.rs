use serde::{Deserialize, Serialize};

/// Line cap applied to stroked path ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineCap {
    Butt,
    Round,
}

/// Join style applied where stroked path segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineJoin {
    Miter,
    Round,
}

/// Styling applied when a path is stroked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub line_width: f32,
    pub color: String,
    pub cap: LineCap,
    pub join: LineJoin,
}

/// Drawing surface abstraction the renderer draws through.
///
/// The contract mirrors an immediate-mode 2D canvas: a single in-progress
/// path assembled with `move_to`/`line_to` and committed by `stroke`. Each
/// surface is exclusively owned by one renderer; implementations do not
/// need to be thread-safe beyond `Send`.
pub trait DrawSurface: Send {
    /// Resizes the backing store to `width * scale` by `height * scale`
    /// device pixels while the caller keeps addressing the surface in
    /// logical `width` by `height` coordinates.
    fn resize_backing(&mut self, width: f32, height: f32, scale: f32);

    /// Erases the region `[0, 0]..[width, height]` in logical coordinates.
    fn clear(&mut self, width: f32, height: f32);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);

    /// Commits the in-progress path with the given styling. The path stays
    /// open for further segments, matching canvas semantics.
    fn stroke(&mut self, style: &StrokeStyle);

    /// Discards the in-progress path. Used on disposal as an explicit flush.
    fn end_path(&mut self);
}

/// One committed polyline together with the styling it was stroked with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokedPath {
    pub points: Vec<(f32, f32)>,
    pub style: StrokeStyle,
}

/// In-memory [`DrawSurface`] that records every operation.
///
/// This is the surface used by the command line preview and by the test
/// suite: instead of rasterising it keeps the stroked polylines around so
/// callers can inspect exactly what would have been drawn.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    backing_width: f32,
    backing_height: f32,
    scale: f32,
    current_path: Vec<(f32, f32)>,
    strokes: Vec<StrokedPath>,
    cleared_regions: Vec<(f32, f32)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backing store dimensions in device pixels.
    pub fn backing_size(&self) -> (f32, f32) {
        (self.backing_width, self.backing_height)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// The most recently committed polyline, if any.
    pub fn last_stroke(&self) -> Option<&StrokedPath> {
        self.strokes.last()
    }

    pub fn strokes(&self) -> &[StrokedPath] {
        &self.strokes
    }

    /// Regions erased via [`DrawSurface::clear`], in call order.
    pub fn cleared_regions(&self) -> &[(f32, f32)] {
        &self.cleared_regions
    }

    /// Whether a path is currently being assembled.
    pub fn has_open_path(&self) -> bool {
        !self.current_path.is_empty()
    }
}

impl DrawSurface for RecordingSurface {
    fn resize_backing(&mut self, width: f32, height: f32, scale: f32) {
        self.backing_width = width * scale;
        self.backing_height = height * scale;
        self.scale = scale;
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.cleared_regions.push((width, height));
    }

    fn begin_path(&mut self) {
        self.current_path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.current_path.push((x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.current_path.push((x, y));
    }

    fn stroke(&mut self, style: &StrokeStyle) {
        self.strokes.push(StrokedPath {
            points: self.current_path.clone(),
            style: style.clone(),
        });
    }

    fn end_path(&mut self) {
        self.current_path.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> StrokeStyle {
        StrokeStyle {
            line_width: 2.0,
            color: "rgba(255, 0, 0, 1)".to_string(),
            cap: LineCap::Round,
            join: LineJoin::Round,
        }
    }

    #[test]
    fn resize_scales_backing_store() {
        let mut surface = RecordingSurface::new();
        surface.resize_backing(200.0, 100.0, 2.0);
        assert_eq!(surface.backing_size(), (400.0, 200.0));
        assert_eq!(surface.scale(), 2.0);
    }

    #[test]
    fn stroke_commits_a_copy_of_the_open_path() {
        let mut surface = RecordingSurface::new();
        surface.begin_path();
        surface.move_to(0.0, 0.0);
        surface.line_to(10.0, 5.0);
        surface.stroke(&style());

        let path = surface.last_stroke().unwrap();
        assert_eq!(path.points, vec![(0.0, 0.0), (10.0, 5.0)]);
        assert!(surface.has_open_path());
    }

    #[test]
    fn begin_path_discards_previous_segments() {
        let mut surface = RecordingSurface::new();
        surface.begin_path();
        surface.move_to(1.0, 1.0);
        surface.begin_path();
        assert!(!surface.has_open_path());
    }

    #[test]
    fn end_path_flushes_without_stroking() {
        let mut surface = RecordingSurface::new();
        surface.begin_path();
        surface.move_to(1.0, 1.0);
        surface.end_path();
        assert!(!surface.has_open_path());
        assert!(surface.strokes().is_empty());
    }
}
