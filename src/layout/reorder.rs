//! Drag-to-reorder.
//!
//! While a panel is dragged its layout works out which neighbors the panel
//! has passed (the "shifted" slots) so they can slide out of the way. On
//! drop the shifted set decides the destination index, which is reported to
//! the host; the manager never reorders its own slots.

use crate::drag::{DragOffset, DragUpdate};
use crate::geometry::{Point, Rect};
use crate::layout::manager::LayoutManager;
use crate::layout::spec::Axis;
use crate::perf::measure;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Reorder preview of a layout level
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DragState {
    pub dragging_index: Option<usize>,
    pub shifted_indices: BTreeSet<usize>,
    /// How far shifted slots move vertically
    pub shifted_height: f64,
    /// How far shifted slots move horizontally
    pub shifted_width: f64,
    /// Pointer is inside the layout's viewport
    pub dragging_inside: bool,
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        self.dragging_index.is_some()
    }

    pub fn is_shifted(&self, index: usize) -> bool {
        self.shifted_indices.contains(&index)
    }
}

/// Neighbors passed by slot `index` on a rows or columns layout.
///
/// Moving up (left), the panel's top (left) edge must cross a neighbor's
/// midpoint; moving down (right), its bottom (right) edge must.
pub fn shifted_indices_single_axis(
    axis: Axis,
    index: usize,
    rects: &[Rect],
    offset: DragOffset,
) -> BTreeSet<usize> {
    let Some(rect) = rects.get(index) else {
        return BTreeSet::new();
    };

    let (delta, leading, trailing): (f64, f64, f64) = match axis {
        Axis::Rows => (offset.dy, rect.top(), rect.bottom()),
        Axis::Columns => (offset.dx, rect.left(), rect.right()),
        Axis::Cells => return BTreeSet::new(),
    };
    let mid = |r: &Rect| match axis {
        Axis::Columns => r.mid_x(),
        _ => r.mid_y(),
    };

    if delta < 0.0 {
        let edge = leading + delta;
        (0..index).filter(|&i| edge < mid(&rects[i])).collect()
    } else if delta > 0.0 {
        let edge = trailing + delta;
        (index + 1..rects.len())
            .filter(|&i| edge > mid(&rects[i]))
            .collect()
    } else {
        BTreeSet::new()
    }
}

/// Slots between `index` and the cell under `pointer` in a wrapping grid.
///
/// When rectangles overlap the last one containing the pointer wins.
pub fn shifted_indices_cells(index: usize, rects: &[Rect], pointer: Point) -> BTreeSet<usize> {
    let Some(destination) = rects.iter().rposition(|r| r.contains(pointer)) else {
        return BTreeSet::new();
    };

    if index < destination {
        (index + 1..=destination).collect()
    } else {
        (destination..index).collect()
    }
}

/// Destination of a drop: the smallest shifted index if it lies before
/// `index`, otherwise the largest.
pub fn drop_destination(index: usize, shifted: &BTreeSet<usize>) -> Option<usize> {
    let first = *shifted.first()?;
    if first < index {
        Some(first)
    } else {
        shifted.last().copied()
    }
}

/// Sign applied to the dragged slot's size when shifting neighbors:
/// `(height, width)`.
fn amplifiers(axis: Axis, offset: DragOffset) -> (f64, f64) {
    match axis {
        Axis::Rows => (if offset.dy > 0.0 { -1.0 } else { 1.0 }, 1.0),
        Axis::Columns => (1.0, if offset.dx > 0.0 { -1.0 } else { 1.0 }),
        Axis::Cells => (1.0, 1.0),
    }
}

impl LayoutManager {
    fn compute_shifted_indices(&self, index: usize, update: &DragUpdate) -> BTreeSet<usize> {
        match self.spec().map(|spec| spec.axis) {
            Some(Axis::Cells) => {
                shifted_indices_cells(index, &self.slot_rects, update.content_pointer)
            }
            Some(axis) => {
                shifted_indices_single_axis(axis, index, &self.slot_rects, update.offset)
            }
            None => BTreeSet::new(),
        }
    }

    /// One drag frame of slot `index`.
    pub fn on_panel_drag(&mut self, index: usize, update: &DragUpdate) {
        let (shifted, elapsed_ms) = measure(|| self.compute_shifted_indices(index, update));
        self.profiler.record(self.slot_rects.len(), elapsed_ms);

        let axis = self.spec().map_or(Axis::Rows, |spec| spec.axis);
        let (height_amp, width_amp) = amplifiers(axis, update.offset);
        let rect = self.slot_rect(index);

        trace!(index, shifted = shifted.len(), "Reorder pass");
        self.drag = DragState {
            dragging_index: Some(index),
            shifted_indices: shifted,
            shifted_height: rect.height * height_amp,
            shifted_width: rect.width * width_amp,
            dragging_inside: !self.panel_is_outside(update),
        };
    }

    /// Drop of slot `index`.
    ///
    /// Reports the move through `move_to` and returns it; `None` when the
    /// panel did not pass any neighbor or no `move_to` is set.
    pub fn on_panel_drop(&mut self, index: usize, update: &DragUpdate) -> Option<(usize, usize)> {
        let shifted = self.compute_shifted_indices(index, update);
        self.drag = DragState::default();

        let to = drop_destination(index, &shifted)?;
        let move_to = self.move_to.as_mut()?;
        move_to(index, to);
        debug!(from = index, to, "Slot moved");

        self.move_adjustment(index, to);
        self.profiler.log_summary();
        Some((index, to))
    }

    /// Keep a moved column's size adjustment with it.
    fn move_adjustment(&mut self, from: usize, to: usize) {
        let len = self.size_adjustments.len();
        if from >= len || to >= len || from == to {
            return;
        }
        let adjustment = self.size_adjustments.remove(from);
        self.size_adjustments.insert(to, adjustment);
        self.notify_col_size_change();
    }

    /// Whether the dragged panel's pointer has left the viewport.
    pub fn panel_is_outside(&self, update: &DragUpdate) -> bool {
        !self.viewport.bounds.contains(update.pointer)
    }
}
