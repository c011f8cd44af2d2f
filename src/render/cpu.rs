//! Raster [`DrawSurface`] on `vello_cpu`.
//!
//! Paths are flattened to device space by [`TransformedPath`] and handed to a
//! [`vello_cpu::RenderContext`] with an identity transform. Pending drawing is committed onto
//! a retained premultiplied canvas whenever a region is cleared or the frame is read back.

use std::path::Path;

use anyhow::Context;
use kurbo::PathEl;

use crate::foundation::error::{ClockError, ClockResult};
use crate::render::paints::Color;
use crate::render::surface::{DrawSurface, TransformedPath};

/// Output pixels, RGBA8 row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    /// Whether color channels are premultiplied by alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy with straight (non-premultiplied) alpha, as PNG expects.
    pub fn to_straight_alpha(&self) -> FrameRGBA {
        if !self.premultiplied {
            return self.clone();
        }
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        FrameRGBA {
            data,
            premultiplied: false,
            ..*self
        }
    }

    /// Write as an 8-bit RGBA PNG, creating parent directories as needed.
    #[tracing::instrument(skip(self), fields(width = self.width, height = self.height))]
    pub fn save_png(&self, path: &Path) -> ClockResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let straight = self.to_straight_alpha();
        image::save_buffer_with_format(
            path,
            &straight.data,
            straight.width,
            straight.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

pub struct CpuSurface {
    width: u16,
    height: u16,
    background: Option<Color>,
    path: TransformedPath,
    ctx: vello_cpu::RenderContext,
    layer: vello_cpu::Pixmap,
    canvas: Vec<u8>,
    pending: bool,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("background", &self.background)
            .finish_non_exhaustive()
    }
}

impl CpuSurface {
    /// Surface cleared to `background`, or transparent when `None`.
    pub fn new(width: u32, height: u32, background: Option<Color>) -> ClockResult<Self> {
        let (w, h) = surface_dims(width, height)?;
        Ok(Self {
            width: w,
            height: h,
            background,
            path: TransformedPath::new(),
            ctx: vello_cpu::RenderContext::new(w, h),
            layer: vello_cpu::Pixmap::new(w, h),
            canvas: filled_canvas(w, h, background),
            pending: false,
        })
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn set_background(&mut self, background: Option<Color>) {
        self.background = background;
    }

    /// Reallocate at a new size. Drops all content and saved transforms.
    pub fn resize(&mut self, width: u32, height: u32) -> ClockResult<()> {
        let (w, h) = surface_dims(width, height)?;
        self.width = w;
        self.height = h;
        self.path.reset();
        self.ctx = vello_cpu::RenderContext::new(w, h);
        self.layer = vello_cpu::Pixmap::new(w, h);
        self.canvas = filled_canvas(w, h, self.background);
        self.pending = false;
        Ok(())
    }

    /// Commit pending drawing and return a copy of the pixels (premultiplied).
    pub fn finish(&mut self) -> ClockResult<FrameRGBA> {
        self.commit()?;
        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.canvas.clone(),
            premultiplied: true,
        })
    }

    fn commit(&mut self) -> ClockResult<()> {
        if !self.pending {
            return Ok(());
        }
        self.ctx.flush();
        self.layer.data_as_u8_slice_mut().fill(0);
        self.ctx.render_to_pixmap(&mut self.layer);
        over_in_place(&mut self.canvas, self.layer.data_as_u8_slice())?;
        self.ctx.reset();
        self.pending = false;
        Ok(())
    }

    fn prepare(&mut self, color: Color) {
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        self.pending = true;
    }
}

impl DrawSurface for CpuSurface {
    fn width(&self) -> f64 {
        f64::from(self.width)
    }

    fn height(&self) -> f64 {
        f64::from(self.height)
    }

    fn save(&mut self) {
        self.path.save();
    }

    fn restore(&mut self) -> ClockResult<()> {
        self.path.restore()
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.path.translate(dx, dy);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.path.scale(sx, sy);
    }

    fn rotate(&mut self, radians: f64) {
        self.path.rotate(radians);
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
        if self.path.is_path_empty() || color.a == 0 {
            return Ok(());
        }
        let cpu_path = bezpath_to_cpu(self.path.path());
        self.prepare(color);
        self.ctx.fill_path(&cpu_path);
        Ok(())
    }

    fn stroke(&mut self, color: Color, width: f64) -> ClockResult<()> {
        let device_width = width * self.path.scale_factor();
        if self.path.is_path_empty() || color.a == 0 || !device_width.is_finite() || device_width <= 0.0
        {
            return Ok(());
        }
        let cpu_path = bezpath_to_cpu(self.path.path());
        self.prepare(color);
        self.ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(device_width)
                .with_caps(vello_cpu::kurbo::Cap::Round)
                .with_join(vello_cpu::kurbo::Join::Round),
        );
        self.ctx.stroke_path(&cpu_path);
        Ok(())
    }

    /// Reset the device-space bounding box of the region to the background.
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> ClockResult<()> {
        self.commit()?;
        let corners = [
            self.path.to_device(x, y),
            self.path.to_device(x + w, y),
            self.path.to_device(x, y + h),
            self.path.to_device(x + w, y + h),
        ];
        let (mut x0, mut y0, mut x1, mut y1) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
        for p in corners {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        let clamp_x = |v: f64| v.clamp(0.0, f64::from(self.width)) as usize;
        let clamp_y = |v: f64| v.clamp(0.0, f64::from(self.height)) as usize;
        let (x0, x1) = (clamp_x(x0.floor()), clamp_x(x1.ceil()));
        let (y0, y1) = (clamp_y(y0.floor()), clamp_y(y1.ceil()));

        let fill = background_premul(self.background);
        let stride = usize::from(self.width) * 4;
        for row in y0..y1 {
            let start = row * stride + x0 * 4;
            let end = row * stride + x1 * 4;
            for px in self.canvas[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&fill);
            }
        }
        Ok(())
    }
}

fn surface_dims(width: u32, height: u32) -> ClockResult<(u16, u16)> {
    let dim = |v: u32, name: &str| {
        u16::try_from(v)
            .ok()
            .filter(|&d| d > 0)
            .ok_or_else(|| {
                ClockError::validation(format!(
                    "surface {name} must be in 1..={}, got {v}",
                    u16::MAX
                ))
            })
    };
    Ok((dim(width, "width")?, dim(height, "height")?))
}

fn filled_canvas(width: u16, height: u16, background: Option<Color>) -> Vec<u8> {
    let fill = background_premul(background);
    let len = usize::from(width) * usize::from(height);
    let mut out = Vec::with_capacity(len * 4);
    for _ in 0..len {
        out.extend_from_slice(&fill);
    }
    out
}

fn background_premul(background: Option<Color>) -> [u8; 4] {
    match background {
        Some(c) => premul_rgba8(c.r, c.g, c.b, c.a),
        None => [0, 0, 0, 0],
    }
}

fn premul_rgba8(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let premul = |c: u8| mul_div255(u16::from(c), u16::from(a));
    [premul(r), premul(g), premul(b), a]
}

/// Source-over of two equal-length premultiplied RGBA8 buffers.
fn over_in_place(dst: &mut [u8], src: &[u8]) -> ClockResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(ClockError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        match s[3] {
            0 => {}
            255 => d.copy_from_slice(s),
            sa => {
                let inv = 255 - u16::from(sa);
                for i in 0..4 {
                    d[i] = s[i].saturating_add(mul_div255(u16::from(d[i]), inv));
                }
            }
        }
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    let t = u32::from(x) * u32::from(y) + 128;
    (((t >> 8) + t) >> 8) as u8
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
