//! Binds a [`ClockLayout`] to a [`DrawSurface`] using the two-pass draw protocol.

use crate::foundation::error::ClockResult;
use crate::foundation::geometry::Rect;
use crate::glyph::glyph::Glyph;
use crate::layout::clock_layout::ClockLayout;
use crate::render::paints::{Color, PaintStyle, Paints};
use crate::render::surface::{DrawSurface, Painter};

/// What a [`ClockRenderer`] puts inside each glyph rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Draw the glyphs themselves.
    #[default]
    Glyphs,
    /// Outline every glyph rectangle with the first palette color; glyphs are not drawn.
    Boundaries,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClockRenderer {
    paints: Paints,
    mode: RenderMode,
}

impl ClockRenderer {
    pub fn new(paints: Paints) -> Self {
        Self {
            paints,
            mode: RenderMode::Glyphs,
        }
    }

    /// Debug overlay that strokes glyph boundaries.
    pub fn boundaries() -> Self {
        Self {
            paints: Paints {
                default_paint_style: PaintStyle::Stroke,
                colors: vec![
                    Color::BLACK,
                    Color::rgb(0, 0x80, 0),
                    Color::rgb(0xff, 0, 0),
                    Color::rgb(0xff, 0xff, 0),
                ],
                stroke_width: 4.0,
            },
            mode: RenderMode::Boundaries,
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn paints(&self) -> &Paints {
        &self.paints
    }

    pub fn set_paints(&mut self, paints: Paints) {
        self.paints = paints;
    }

    /// Draw the layout's current instant. Does nothing while the layout is not drawable.
    ///
    /// The surface is expected to be `layout.measured_size()` large; its transform is left as
    /// it was found.
    pub fn draw(&self, surface: &mut dyn DrawSurface, layout: &mut ClockLayout) -> ClockResult<()> {
        if !layout.is_drawable() {
            return Ok(());
        }
        let paints = &self.paints;
        let mode = self.mode;
        let mut painter = Painter::new(surface);

        layout.on_draw(|layout, (x, y), scale| {
            painter.with_translation_and_scale(x, y, scale, |p| {
                layout.layout_pass(&mut |glyph: &Glyph, progress: f64, rect: &Rect| match mode {
                    RenderMode::Glyphs => p.with_translation_and_scale(
                        rect.left(),
                        rect.top(),
                        glyph.scale(),
                        |p| glyph.draw(p, progress, paints),
                    ),
                    RenderMode::Boundaries => p.paint_rect(
                        rect.left(),
                        rect.top(),
                        rect.width(),
                        rect.height(),
                        paints.color(0),
                        paints,
                    ),
                })
            })
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
