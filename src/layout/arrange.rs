//! Slot rectangles.
//!
//! Hosts that measure their own widgets call [`LayoutManager::set_slot_rects`].
//! Hosts without a layout pass of their own call [`LayoutManager::arrange`],
//! which resolves the render styles against the container and stacks
//! naturally flowing slots by their intrinsic heights.

use crate::geometry::{Rect, Size};
use crate::layout::manager::LayoutManager;
use crate::layout::sizing::{cells_per_row, column_left_values, column_width_values, fill_row_values};
use crate::layout::spec::{Axis, CellDimension, LayoutSpec};
use crate::profile_scope;

impl LayoutManager {
    /// Lay out every slot inside `container`.
    ///
    /// `intrinsic_heights[i]` is the natural height of slot `i`; missing
    /// entries count as zero for flowing slots and as the container height
    /// for columns. Rectangles are in content coordinates; the viewport's
    /// content height is updated to match. Nested layouts are arranged in
    /// their slot.
    pub fn arrange(&mut self, container: Size, intrinsic_heights: &[f64]) {
        profile_scope!("layout_arrange");

        self.set_container(container);
        let Ok(spec) = &self.spec else {
            self.slot_rects.clear();
            return;
        };

        let height_of = |i: usize| intrinsic_heights.get(i).copied().unwrap_or(0.0);
        let rects = match spec.axis {
            Axis::Columns if self.is_stacked(spec) => stack(spec, container.width, height_of),
            Axis::Columns if spec.options.compact => compact_columns(spec, container, intrinsic_heights),
            Axis::Columns => (0..spec.len())
                .map(|i| {
                    let padding = spec.options.col_padding();
                    let left = column_left_values(&spec.slots, i, padding, &self.size_adjustments);
                    let width = column_width_values(&spec.slots, i, padding, &self.size_adjustments);
                    let height = intrinsic_heights.get(i).copied().unwrap_or(container.height);
                    Rect::new(
                        left.resolve(container.width),
                        0.0,
                        width.resolve(container.width).max(0.0),
                        height,
                    )
                })
                .collect(),
            Axis::Rows if spec.options.fills_rows() => (0..spec.len())
                .map(|i| {
                    let (top, height) = fill_row_values(&spec.slots, i);
                    Rect::new(
                        0.0,
                        container.height * top / 100.0,
                        container.width,
                        container.height * height / 100.0,
                    )
                })
                .collect(),
            Axis::Rows => stack(spec, container.width, height_of),
            Axis::Cells => grid(spec, container.width, height_of),
        };

        let content_bottom = rects.iter().map(Rect::bottom).fold(0.0, f64::max);
        self.viewport.content_height = content_bottom.max(self.viewport.bounds.height);
        self.slot_rects = rects;

        let nested: Vec<(usize, Size)> = self
            .children
            .keys()
            .filter_map(|&i| self.slot_rects.get(i).map(|r| (i, Size::new(r.width, r.height))))
            .collect();
        for (index, size) in nested {
            if let Some(child) = self.children.get_mut(&index) {
                child.arrange(size, &[]);
            }
        }
    }
}

/// Full-width slots stacked top to bottom.
fn stack(spec: &LayoutSpec, width: f64, height_of: impl Fn(usize) -> f64) -> Vec<Rect> {
    let mut y = 0.0;
    spec.slots
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let height = if slot.hidden { 0.0 } else { height_of(i) };
            let rect = Rect::new(0.0, y, width, height);
            y += height;
            rect
        })
        .collect()
}

/// Inline columns at their fixed width, or an equal share of the container.
fn compact_columns(spec: &LayoutSpec, container: Size, intrinsic_heights: &[f64]) -> Vec<Rect> {
    let share = container.width / spec.len().max(1) as f64;
    let mut x = 0.0;
    spec.slots
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let width = if slot.hidden { 0.0 } else { slot.width.unwrap_or(share) };
            let height = intrinsic_heights.get(i).copied().unwrap_or(container.height);
            let rect = Rect::new(x, 0.0, width, height);
            x += width;
            rect
        })
        .collect()
}

/// Wrapping grid; each row is as tall as its tallest cell.
fn grid(spec: &LayoutSpec, width: f64, height_of: impl Fn(usize) -> f64) -> Vec<Rect> {
    let options = &spec.options;
    let per_row = cells_per_row(options.cell_width.as_ref(), options.min_cell_width, width);
    let cell_width = match &options.cell_width {
        Some(CellDimension::Fixed(px)) => px.max(options.min_cell_width.unwrap_or(0.0)),
        _ => width / per_row as f64,
    };
    let fixed_height = options.cell_height.as_ref().and_then(|h| h.resolve(width));

    let mut rects = Vec::with_capacity(spec.len());
    let mut top = 0.0;
    for row_start in (0..spec.len()).step_by(per_row) {
        let row_end = (row_start + per_row).min(spec.len());
        let row_height = (row_start..row_end)
            .map(|i| fixed_height.unwrap_or_else(|| height_of(i)))
            .fold(0.0, f64::max);

        for i in row_start..row_end {
            let column = (i - row_start) as f64;
            rects.push(Rect::new(column * cell_width, top, cell_width, row_height));
        }
        top += row_height;
    }
    rects
}
