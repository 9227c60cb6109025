//! Coordinate conversion for scroll-compensated dragging.
//!
//! Pointer events arrive in client coordinates. Slot rectangles are stored in
//! content coordinates of the scrollable container, so they stay fixed while
//! the container scrolls. A drag offset is always derived from the immutable
//! [`DragOrigin`] captured on pointer-down plus the scroll offset sampled for
//! the current frame; nothing accumulates between frames.

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// The scrollable container that hosts draggable slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Visible area, client coordinates
    pub bounds: Rect,
    pub scroll_top: f64,
    /// Full scrollable height of the content
    pub content_height: f64,
}

impl Viewport {
    #[inline]
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            scroll_top: 0.0,
            content_height: bounds.height,
        }
    }

    /// Largest valid `scroll_top`.
    #[inline]
    pub fn max_scroll(&self) -> f64 {
        (self.content_height - self.bounds.height).max(0.0)
    }

    /// Convert a client point to content coordinates.
    #[inline]
    pub fn to_content(&self, client: Point) -> Point {
        Point::new(
            client.x - self.bounds.x,
            client.y - self.bounds.y + self.scroll_top,
        )
    }

    /// Convert a content rectangle to client coordinates.
    #[inline]
    pub fn to_client(&self, content: Rect) -> Rect {
        content.translate(self.bounds.x, self.bounds.y - self.scroll_top)
    }
}

/// Which axes a panel may move along
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragAxes {
    pub x: bool,
    pub y: bool,
}

impl DragAxes {
    pub const NONE: Self = Self { x: false, y: false };
    pub const X: Self = Self { x: true, y: false };
    pub const Y: Self = Self { x: false, y: true };
    pub const XY: Self = Self { x: true, y: true };

    #[inline]
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// Displacement of a dragged panel in content coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DragOffset {
    pub dx: f64,
    pub dy: f64,
}

/// Snapshot taken on pointer-down; never mutated during the drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOrigin {
    /// Pointer position at pointer-down, client coordinates
    pub pointer: Point,
    /// Same position in content coordinates
    pub content_pointer: Point,
    /// Slot rectangle at pointer-down, content coordinates
    pub rect: Rect,
    pub scroll_top: f64,
    /// Scroll limit at pointer-down
    pub max_scroll: f64,
}

/// Whether a clamped pointer sits on the vertical limits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClampEdges {
    pub at_top: bool,
    pub at_bottom: bool,
}

impl DragOrigin {
    pub fn capture(pointer: Point, rect: Rect, viewport: &Viewport) -> Self {
        Self {
            pointer,
            content_pointer: viewport.to_content(pointer),
            rect,
            scroll_top: viewport.scroll_top,
            max_scroll: viewport.max_scroll(),
        }
    }

    /// Offset for the current frame.
    ///
    /// Scrolling the container by `s` pixels moves the panel `s` pixels in
    /// content space even when the pointer stays still.
    pub fn offset(&self, pointer: Point, scroll_top: f64, axes: DragAxes) -> DragOffset {
        DragOffset {
            dx: if axes.x { pointer.x - self.pointer.x } else { 0.0 },
            dy: if axes.y {
                (pointer.y - self.pointer.y) + (scroll_top - self.scroll_top)
            } else {
                0.0
            },
        }
    }

    /// Pointer position in content coordinates after applying `offset`.
    #[inline]
    pub fn content_pointer_at(&self, offset: DragOffset) -> Point {
        Point::new(
            self.content_pointer.x + offset.dx,
            self.content_pointer.y + offset.dy,
        )
    }

    /// Clamp the pointer so the panel's original client box stays inside the
    /// viewport.
    pub fn clamp_inside(&self, pointer: Point, viewport: &Viewport) -> (Point, ClampEdges) {
        let start = self.rect.translate(viewport.bounds.x, viewport.bounds.y - self.scroll_top);
        let bounds = viewport.bounds;

        let min_y = bounds.top() + self.pointer.y - start.top();
        let max_y = bounds.bottom() + self.pointer.y - start.bottom();
        let min_x = bounds.left() + self.pointer.x - start.left();
        let max_x = bounds.right() + self.pointer.x - start.right();

        let y = value_min_max(pointer.y, min_y, max_y);
        let x = value_min_max(pointer.x, min_x, max_x);

        (
            Point::new(x, y),
            ClampEdges {
                at_top: y == min_y,
                at_bottom: y == max_y,
            },
        )
    }
}

/// `min(max(value, min), max)`; `min` wins when the range is inverted.
#[inline]
pub fn value_min_max(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}
