//! Geometry primitives shared by the layout engine, panels and drop zones.
//!
//! All rectangles are axis-aligned and use `f64` pixels. Layout styles are
//! expressed as [`Length`]s, which mirror CSS `calc(P% + Npx)` values and can
//! be resolved against a container size once it is known.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle (origin at top-left).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Inclusive on all edges, matching bounding-box hit tests in the browser.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// Same rectangle moved by `(dx, dy)`.
    #[inline]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// A one-dimensional style length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Length {
    /// Size determined by content
    Auto,
    Px(f64),
    Percent(f64),
    /// `calc(percent% + px px)`
    Calc { percent: f64, px: f64 },
}

impl Length {
    /// Resolve to pixels against the length of the containing axis.
    ///
    /// `Auto` has no intrinsic value and resolves to `None`.
    pub fn resolve(&self, container: f64) -> Option<f64> {
        match *self {
            Length::Auto => None,
            Length::Px(px) => Some(px),
            Length::Percent(percent) => Some(container * percent / 100.0),
            Length::Calc { percent, px } => Some(container * percent / 100.0 + px),
        }
    }

    /// Collapse a `Calc` with a zero pixel part into a plain percentage.
    pub fn simplify(self) -> Self {
        match self {
            Length::Calc { percent, px } if px == 0.0 => Length::Percent(percent),
            Length::Calc { percent, px } if percent == 0.0 => Length::Px(px),
            other => other,
        }
    }
}
