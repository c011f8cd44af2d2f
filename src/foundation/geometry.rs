use std::fmt;

/// Width and height in pixels (or native glyph units before scaling).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// An empty size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a size from both extents.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Scale both extents by `factor`, flooring to whole pixels.
    pub fn scaled_by(self, factor: f64) -> Self {
        Self {
            width: (self.width * factor).floor(),
            height: (self.height * factor).floor(),
        }
    }

    /// True if either extent is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

impl From<Size> for kurbo::Size {
    fn from(s: Size) -> Self {
        kurbo::Size::new(s.width, s.height)
    }
}

/// Axis-aligned rectangle kept normalized (`left <= right`, `top <= bottom`).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "RectRepr", into = "RectRepr")]
pub struct Rect {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

#[derive(serde::Serialize, serde::Deserialize)]
struct RectRepr {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl From<RectRepr> for Rect {
    fn from(r: RectRepr) -> Self {
        Rect::new(r.left, r.top, r.right, r.bottom)
    }
}

impl From<Rect> for RectRepr {
    fn from(r: Rect) -> Self {
        Self {
            left: r.left,
            top: r.top,
            right: r.right,
            bottom: r.bottom,
        }
    }
}

impl Rect {
    /// Create a rectangle, swapping edges as needed so it is normalized.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        let mut r = Self::default();
        r.set(left, top, right, bottom);
        r
    }

    /// Replace all four edges, normalizing.
    pub fn set(&mut self, left: f64, top: f64, right: f64, bottom: f64) -> &mut Self {
        self.left = left.min(right);
        self.right = left.max(right);
        self.top = top.min(bottom);
        self.bottom = top.max(bottom);
        self
    }

    /// Grow to the union with `other`.
    ///
    /// Returns `true` if any edge moved, `false` if `other` was already contained.
    pub fn include(&mut self, other: &Rect) -> bool {
        let before = *self;
        self.left = self.left.min(other.left);
        self.top = self.top.min(other.top);
        self.right = self.right.max(other.right);
        self.bottom = self.bottom.max(other.bottom);
        *self != before
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// True if the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.area() == 0.0
    }

    pub fn to_size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rect({}, {}, {}, {})",
            self.left, self.top, self.right, self.bottom
        )
    }
}

impl From<Rect> for kurbo::Rect {
    fn from(r: Rect) -> Self {
        kurbo::Rect::new(r.left, r.top, r.right, r.bottom)
    }
}

impl From<kurbo::Rect> for Rect {
    fn from(r: kurbo::Rect) -> Self {
        Rect::new(r.x0, r.y0, r.x1, r.y1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geometry.rs"]
mod tests;
