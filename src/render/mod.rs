//! Drawing surfaces, theming, and the clock renderer.

/// Raster surface on `vello_cpu` and the frames it produces.
pub mod cpu;
pub mod paints;
/// Surface that records calls instead of drawing.
pub mod recording;
/// Two-pass clock drawing over a [`surface::DrawSurface`].
pub mod renderer;
/// The `DrawSurface` primitive set and the `Painter` convenience layer.
pub mod surface;
