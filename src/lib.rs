//! morphclock is the layout and animation engine of a digital clock whose digits morph
//! between values.
//!
//! The pieces, bottom up:
//!
//! - [`Options`] and the settings codec describe a clock.
//! - [`ClockLayout`] turns the time of day into glyph keys, states and rectangles.
//! - [`ClockRenderer`] draws a layout on any [`DrawSurface`], e.g. [`CpuSurface`].
//! - [`ClockAnimator`] ticks the layout on a [`FrameScheduler`], only redrawing every frame
//!   while a transition is in flight.
#![forbid(unsafe_code)]

pub mod animator;
pub mod font;
pub mod foundation;
pub mod glyph;
pub mod layout;
pub mod options;
pub mod render;
pub mod time;

pub use crate::foundation::error::{ClockError, ClockResult};
pub use crate::foundation::geometry::{Rect, Size};

pub use crate::options::alignment::{Alignment, HorizontalAlign, VerticalAlign};
pub use crate::options::format::{GlyphRole, TimeFormat, TimeResolution};
pub use crate::options::model::{Layout, Options, OptionsPatch};
pub use crate::options::settings::{
    Params, options_to_params, paints_to_params, params_to_paints, params_to_patch,
    parse_query, restore_options, to_query,
};

pub use crate::time::clock_time::ClockTime;
pub use crate::time::source::{ManualClock, SystemClock, TimeSource};

pub use crate::glyph::glyph::{Glyph, GlyphDesign, GlyphLayoutInfo};
pub use crate::glyph::key::{DigitTransition, GlyphKey};
pub use crate::glyph::state::{GlyphState, GlyphStateLock, GlyphStateMachine};

pub use crate::font::debug::DebugFont;
pub use crate::font::form::FormFont;
pub use crate::font::{Font, font_by_name};

pub use crate::layout::clock_layout::{ClockLayout, GlyphStatus, MeasureStrategy};
pub use crate::layout::measure::{
    MeasureSettings, Measurement, estimate_native_size, measure_full_day, measure_native_size,
    measure_span,
};

pub use crate::render::cpu::{CpuSurface, FrameRGBA};
pub use crate::render::paints::{Color, PaintStyle, Paints};
pub use crate::render::recording::{RecordingSurface, SurfaceOp};
pub use crate::render::renderer::{ClockRenderer, RenderMode};
pub use crate::render::surface::{DrawSurface, Painter};

pub use crate::animator::ClockAnimator;
pub use crate::animator::host::{LiveStats, run_realtime};
pub use crate::animator::scheduler::{
    CallbackHandle, CallbackKind, FrameScheduler, ManualScheduler, NextTick, RealtimeScheduler,
};
