//! Scalar helpers shared by layout and glyph drawing.

/// Clamp `value` into `[min, max]`. A NaN input resolves to `max`.
pub fn constrain(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

/// Normalized position of `value` within `min..max`, clamped to `[0, 1]`.
pub fn progress(value: f64, min: f64, max: f64) -> f64 {
    constrain((value - min) / (max - min), 0.0, 1.0)
}

/// Linear interpolation between `min` and `max` at `t`.
pub fn interpolate(t: f64, min: f64, max: f64) -> f64 {
    min + (max - min) * t
}

pub fn accelerate5(t: f64) -> f64 {
    (1.0 - t).powi(5)
}

pub fn decelerate5(t: f64) -> f64 {
    1.0 - accelerate5(t)
}

pub fn decelerate3(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

pub fn decelerate2(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(2)
}

pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
