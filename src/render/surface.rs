//! Drawing-surface abstraction and the convenience layer glyph drawing is written against.

use kurbo::{Affine, BezPath, PathEl, Point, Shape, Vec2};

use crate::foundation::error::{ClockError, ClockResult};
use crate::foundation::math::to_radians;
use crate::render::paints::{Color, PaintStyle, Paints};

/// Immediate-mode 2D surface primitives.
///
/// Path coordinates are interpreted under the transform current at the time of the call, like
/// an HTML canvas. Angles are in radians.
pub trait DrawSurface {
    /// Surface width in device pixels.
    fn width(&self) -> f64;
    /// Surface height in device pixels.
    fn height(&self) -> f64;

    fn save(&mut self);
    /// Pop the transform pushed by the matching [`DrawSurface::save`].
    fn restore(&mut self) -> ClockResult<()>;
    fn translate(&mut self, dx: f64, dy: f64);
    fn scale(&mut self, sx: f64, sy: f64);
    fn rotate(&mut self, radians: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    /// Elliptical arc around `(cx, cy)`, joined to the current point by a line.
    fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, start: f64, sweep: f64);
    fn round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64);

    /// Fill the current path.
    fn fill(&mut self, color: Color) -> ClockResult<()>;
    /// Stroke the current path with a line `width` units wide (in local units).
    fn stroke(&mut self, color: Color, width: f64) -> ClockResult<()>;
    /// Reset the given region (local units) to the surface's clear state.
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> ClockResult<()>;
}

const ARC_TOLERANCE: f64 = 0.1;

/// Transform stack plus a path accumulated in device space.
///
/// Shared by the bundled surfaces so they agree on transform and path semantics.
#[derive(Clone, Debug, Default)]
pub struct TransformedPath {
    transform: Affine,
    stack: Vec<Affine>,
    path: BezPath,
    has_current_point: bool,
}

impl TransformedPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform(&self) -> Affine {
        self.transform
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Drop all saved state and the current path.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn save(&mut self) {
        self.stack.push(self.transform);
    }

    pub fn restore(&mut self) -> ClockResult<()> {
        self.transform = self
            .stack
            .pop()
            .ok_or_else(|| ClockError::render("restore without matching save"))?;
        Ok(())
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.transform *= Affine::translate(Vec2::new(dx, dy));
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.transform *= Affine::scale_non_uniform(sx, sy);
    }

    pub fn rotate(&mut self, radians: f64) {
        self.transform *= Affine::rotate(radians);
    }

    /// Uniform scale factor of the current transform, for stroke widths.
    pub fn scale_factor(&self) -> f64 {
        self.transform.determinant().abs().sqrt()
    }

    pub fn to_device(&self, x: f64, y: f64) -> Point {
        self.transform * Point::new(x, y)
    }

    pub fn begin_path(&mut self) {
        self.path = BezPath::new();
        self.has_current_point = false;
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.path.move_to(self.to_device(x, y));
        self.has_current_point = true;
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        if self.has_current_point {
            self.path.line_to(self.to_device(x, y));
        } else {
            self.move_to(x, y);
        }
    }

    pub fn close_path(&mut self) {
        if self.has_current_point {
            self.path.close_path();
        }
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.move_to(x, y);
        self.line_to(x + w, y);
        self.line_to(x + w, y + h);
        self.line_to(x, y + h);
        self.close_path();
    }

    pub fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, start: f64, sweep: f64) {
        let arc = kurbo::Arc::new(
            Point::new(cx, cy),
            Vec2::new(rx, ry),
            start,
            sweep,
            0.0,
        );
        let first = Point::new(cx + rx * start.cos(), cy + ry * start.sin());
        self.line_to(first.x, first.y);
        for el in arc.append_iter(ARC_TOLERANCE) {
            self.path.push(self.transform * el);
        }
    }

    pub fn round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64) {
        let rr = kurbo::RoundedRect::new(x, y, x + w, y + h, radius.max(0.0));
        for el in rr.path_elements(ARC_TOLERANCE) {
            self.path.push(self.transform * el);
        }
        self.has_current_point = true;
    }

    /// Current path in device space.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    pub fn is_path_empty(&self) -> bool {
        !self
            .path
            .elements()
            .iter()
            .any(|el| !matches!(el, PathEl::MoveTo(_) | PathEl::ClosePath))
    }
}

/// Convenience drawing helpers over a borrowed [`DrawSurface`].
///
/// Angles taken by `Painter` methods are in degrees.
pub struct Painter<'a> {
    surface: &'a mut dyn DrawSurface,
}

impl<'a> Painter<'a> {
    pub fn new(surface: &'a mut dyn DrawSurface) -> Self {
        Self { surface }
    }

    pub fn surface(&mut self) -> &mut dyn DrawSurface {
        &mut *self.surface
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.surface.translate(dx, dy);
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.surface.scale(sx, sy);
    }

    pub fn rotate(&mut self, degrees: f64) {
        self.surface.rotate(to_radians(degrees));
    }

    /// Uniform scale about `(px, py)`.
    pub fn scale_with_pivot(&mut self, scale: f64, px: f64, py: f64) {
        self.surface.translate(px, py);
        self.surface.scale(scale, scale);
        self.surface.translate(-px, -py);
    }

    pub fn rotate_with_pivot(&mut self, degrees: f64, px: f64, py: f64) {
        self.surface.translate(px, py);
        self.surface.rotate(to_radians(degrees));
        self.surface.translate(-px, -py);
    }

    pub fn begin_path(&mut self) {
        self.surface.begin_path();
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.surface.move_to(x, y);
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.surface.line_to(x, y);
    }

    pub fn close_path(&mut self) {
        self.surface.close_path();
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.surface.rect(x, y, w, h);
    }

    /// Arc of the ellipse inscribed in the box `left, top, right, bottom`.
    pub fn bounded_arc(
        &mut self,
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
        start_degrees: f64,
        sweep_degrees: f64,
    ) {
        let rx = (right - left) * 0.5;
        let ry = (bottom - top) * 0.5;
        self.surface.ellipse(
            left + rx,
            top + ry,
            rx.abs(),
            ry.abs(),
            to_radians(start_degrees),
            to_radians(sweep_degrees),
        );
    }

    pub fn fill_paint(&mut self, color: Color) -> ClockResult<()> {
        self.surface.fill(color)
    }

    pub fn stroke_paint(&mut self, color: Color, width: f64) -> ClockResult<()> {
        self.surface.stroke(color, width)
    }

    /// Fill or stroke the current path using the theme's style and stroke width.
    pub fn paint(&mut self, color: Color, paints: &Paints) -> ClockResult<()> {
        match paints.default_paint_style {
            PaintStyle::Fill => self.surface.fill(color),
            PaintStyle::Stroke => self.surface.stroke(color, paints.stroke_width),
        }
    }

    pub fn paint_circle(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        color: Color,
        paints: &Paints,
    ) -> ClockResult<()> {
        self.surface.begin_path();
        self.surface
            .ellipse(cx, cy, radius, radius, 0.0, std::f64::consts::TAU);
        self.surface.close_path();
        self.paint(color, paints)
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: Color) -> ClockResult<()> {
        self.surface.begin_path();
        self.surface
            .ellipse(cx, cy, radius, radius, 0.0, std::f64::consts::TAU);
        self.surface.close_path();
        self.surface.fill(color)
    }

    pub fn paint_rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Color,
        paints: &Paints,
    ) -> ClockResult<()> {
        self.surface.begin_path();
        self.surface.rect(x, y, w, h);
        self.paint(color, paints)
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) -> ClockResult<()> {
        self.surface.begin_path();
        self.surface.rect(x, y, w, h);
        self.surface.fill(color)
    }

    pub fn stroke_rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Color,
        width: f64,
    ) -> ClockResult<()> {
        self.surface.begin_path();
        self.surface.rect(x, y, w, h);
        self.surface.stroke(color, width)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn paint_round_rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
        color: Color,
        paints: &Paints,
    ) -> ClockResult<()> {
        self.surface.begin_path();
        self.surface.round_rect(x, y, w, h, radius);
        self.paint(color, paints)
    }

    /// Closed polygon through `points`, filled or stroked per the theme.
    pub fn paint_path(
        &mut self,
        points: &[(f64, f64)],
        color: Color,
        paints: &Paints,
    ) -> ClockResult<()> {
        self.polyline(points, true);
        self.paint(color, paints)
    }

    /// Open polyline through `points`, always stroked.
    pub fn stroke_path(
        &mut self,
        points: &[(f64, f64)],
        color: Color,
        width: f64,
    ) -> ClockResult<()> {
        self.polyline(points, false);
        self.surface.stroke(color, width)
    }

    fn polyline(&mut self, points: &[(f64, f64)], close: bool) {
        self.surface.begin_path();
        let mut it = points.iter();
        if let Some(&(x, y)) = it.next() {
            self.surface.move_to(x, y);
            for &(x, y) in it {
                self.surface.line_to(x, y);
            }
            if close {
                self.surface.close_path();
            }
        }
    }

    /// Run `f` between a save and its restore. The restore happens even if `f` fails.
    pub fn with_checkpoint<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ClockResult<R>,
    ) -> ClockResult<R> {
        self.surface.save();
        let out = f(self);
        self.surface.restore()?;
        out
    }

    pub fn with_translation<R>(
        &mut self,
        dx: f64,
        dy: f64,
        f: impl FnOnce(&mut Self) -> ClockResult<R>,
    ) -> ClockResult<R> {
        self.with_checkpoint(|p| {
            p.translate(dx, dy);
            f(p)
        })
    }

    pub fn with_scale<R>(
        &mut self,
        scale: f64,
        f: impl FnOnce(&mut Self) -> ClockResult<R>,
    ) -> ClockResult<R> {
        self.with_checkpoint(|p| {
            p.scale(scale, scale);
            f(p)
        })
    }

    pub fn with_rotation<R>(
        &mut self,
        degrees: f64,
        f: impl FnOnce(&mut Self) -> ClockResult<R>,
    ) -> ClockResult<R> {
        self.with_checkpoint(|p| {
            p.rotate(degrees);
            f(p)
        })
    }

    /// Translate then scale uniformly, as used for lines and glyphs.
    pub fn with_translation_and_scale<R>(
        &mut self,
        dx: f64,
        dy: f64,
        scale: f64,
        f: impl FnOnce(&mut Self) -> ClockResult<R>,
    ) -> ClockResult<R> {
        self.with_checkpoint(|p| {
            p.translate(dx, dy);
            p.scale(scale, scale);
            f(p)
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
