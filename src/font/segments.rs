//! Seven-segment skeleton used to morph between digits that have no dedicated drawing.
//!
//! Segments lit in both endpoints stay put, segments only in the start digit shrink towards
//! their centre, and segments only in the end digit grow out of it.

use crate::foundation::error::ClockResult;
use crate::foundation::math::{accelerate5, decelerate3};
use crate::glyph::key::DigitTransition;
use crate::render::paints::Paints;
use crate::render::surface::Painter;

/// One bar of the skeleton in a 144 x 144 box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Palette index the segment is painted with.
    pub color: usize,
}

const THICKNESS: f64 = 24.0;

/// `a` (top), `b`, `c`, `d` (bottom), `e`, `f`, `g` (middle).
pub const SEGMENTS: [Segment; 7] = [
    Segment { x: 12.0, y: 0.0, w: 120.0, h: THICKNESS, color: 1 },
    Segment { x: 120.0, y: 12.0, w: THICKNESS, h: 60.0, color: 1 },
    Segment { x: 120.0, y: 72.0, w: THICKNESS, h: 60.0, color: 2 },
    Segment { x: 12.0, y: 120.0, w: 120.0, h: THICKNESS, color: 2 },
    Segment { x: 0.0, y: 72.0, w: THICKNESS, h: 60.0, color: 2 },
    Segment { x: 0.0, y: 12.0, w: THICKNESS, h: 60.0, color: 1 },
    Segment { x: 12.0, y: 60.0, w: 120.0, h: THICKNESS, color: 1 },
];

const A: u8 = 1 << 0;
const B: u8 = 1 << 1;
const C: u8 = 1 << 2;
const D: u8 = 1 << 3;
const E: u8 = 1 << 4;
const F: u8 = 1 << 5;
const G: u8 = 1 << 6;

/// Lit segments of `digit`; `None` (blank) lights nothing.
pub fn mask(digit: Option<u8>) -> u8 {
    match digit {
        Some(0) => A | B | C | D | E | F,
        Some(1) => B | C,
        Some(2) => A | B | D | E | G,
        Some(3) => A | B | C | D | G,
        Some(4) => B | C | F | G,
        Some(5) => A | C | D | F | G,
        Some(6) => A | C | D | E | F | G,
        Some(7) => A | B | C,
        Some(8) => A | B | C | D | E | F | G,
        Some(9) => A | B | C | D | F | G,
        _ => 0,
    }
}

/// Scale of segment `index` at `progress` through `transition`; 0 means not drawn.
pub fn segment_scale(transition: DigitTransition, index: usize, progress: f64) -> f64 {
    let bit = 1u8 << index;
    let from = mask(transition.start_digit()) & bit != 0;
    let to = mask(transition.end_digit()) & bit != 0;
    match (from, to) {
        (true, true) => 1.0,
        (true, false) => accelerate5(progress),
        (false, true) => decelerate3(progress),
        (false, false) => 0.0,
    }
}

pub fn draw_transition(
    painter: &mut Painter<'_>,
    transition: DigitTransition,
    progress: f64,
    paints: &Paints,
) -> ClockResult<()> {
    for (index, seg) in SEGMENTS.iter().enumerate() {
        let scale = segment_scale(transition, index, progress);
        if scale <= 0.0 {
            continue;
        }
        let cx = seg.x + seg.w * 0.5;
        let cy = seg.y + seg.h * 0.5;
        painter.with_checkpoint(|p| {
            p.scale_with_pivot(scale, cx, cy);
            p.paint_round_rect(
                seg.x,
                seg.y,
                seg.w,
                seg.h,
                THICKNESS * 0.5,
                paints.color(seg.color),
                paints,
            )
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/font/segments.rs"]
mod tests;
