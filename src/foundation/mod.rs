//! Shared building blocks: errors, geometry, scalar math.

pub mod error;
pub mod geometry;
pub mod math;
