use kurbo::Shape;

use crate::foundation::error::ClockResult;
use crate::foundation::geometry::Rect;
use crate::render::paints::Color;
use crate::render::surface::{DrawSurface, TransformedPath};

/// One observable call made against a [`RecordingSurface`].
///
/// Path construction is folded into the `Fill`/`Stroke` that consumes it; `bounds` is the
/// device-space bounding box of that path.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    Save,
    Restore,
    Translate(f64, f64),
    Scale(f64, f64),
    Rotate(f64),
    Fill { color: Color, bounds: Rect },
    Stroke { color: Color, width: f64, bounds: Rect },
    Clear(Rect),
}

/// Surface that draws nothing and remembers every call.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    path: TransformedPath,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            path: TransformedPath::new(),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    /// Device-space bounds of every fill, in call order.
    pub fn fill_bounds(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Fill { bounds, .. } => Some(*bounds),
                _ => None,
            })
            .collect()
    }

    /// Device-space bounds of every stroke, in call order.
    pub fn stroke_bounds(&self) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Stroke { bounds, .. } => Some(*bounds),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&SurfaceOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    /// Outstanding saves not yet restored.
    pub fn save_depth(&self) -> usize {
        self.path.depth()
    }

    fn path_bounds(&self) -> Rect {
        Rect::from(self.path.path().bounding_box())
    }
}

impl DrawSurface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn save(&mut self) {
        self.path.save();
        self.ops.push(SurfaceOp::Save);
    }

    fn restore(&mut self) -> ClockResult<()> {
        self.path.restore()?;
        self.ops.push(SurfaceOp::Restore);
        Ok(())
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.path.translate(dx, dy);
        self.ops.push(SurfaceOp::Translate(dx, dy));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.path.scale(sx, sy);
        self.ops.push(SurfaceOp::Scale(sx, sy));
    }

    fn rotate(&mut self, radians: f64) {
        self.path.rotate(radians);
        self.ops.push(SurfaceOp::Rotate(radians));
    }

    fn begin_path(&mut self) {
        self.path.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.line_to(x, y);
    }

    fn close_path(&mut self) {
        self.path.close_path();
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.path.rect(x, y, w, h);
    }

    fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, start: f64, sweep: f64) {
        self.path.ellipse(cx, cy, rx, ry, start, sweep);
    }

    fn round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64) {
        self.path.round_rect(x, y, w, h, radius);
    }

    fn fill(&mut self, color: Color) -> ClockResult<()> {
        if !self.path.is_path_empty() {
            let bounds = self.path_bounds();
            self.ops.push(SurfaceOp::Fill { color, bounds });
        }
        Ok(())
    }

    fn stroke(&mut self, color: Color, width: f64) -> ClockResult<()> {
        if !self.path.is_path_empty() {
            let bounds = self.path_bounds();
            self.ops.push(SurfaceOp::Stroke {
                color,
                width: width * self.path.scale_factor(),
                bounds,
            });
        }
        Ok(())
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> ClockResult<()> {
        let a = self.path.to_device(x, y);
        let b = self.path.to_device(x + w, y + h);
        self.ops.push(SurfaceOp::Clear(Rect::new(a.x, a.y, b.x, b.y)));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
