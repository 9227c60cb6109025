//! Grid layout and drag-to-reorder engine
//!
//! A layout level arranges its slots along exactly one axis: `rows`,
//! `columns`, or a wrapping grid of `cells`. Any slot can itself be a
//! layout. Slots with drag options become panels that can be dragged past
//! their neighbors; the layout previews the new order by shifting those
//! neighbors and reports the final move through a callback.
//!
//! ## Module Structure
//!
//! - `spec`: loose descriptions and their validated form
//! - `sizing`: column/row/cell sizing math
//! - `manager`: `LayoutManager` state and pointer routing
//! - `reorder`: shifted-slot computation and drop handling
//! - `render`: render tree
//! - `arrange`: slot rectangles

mod arrange;
mod error;
mod manager;
mod reorder;
mod render;
mod sizing;
mod spec;

pub use error::{LayoutError, LayoutResult};
pub use manager::{ColSizeChange, LayoutManager, MoveTo};
pub use reorder::{DragState, drop_destination, shifted_indices_cells, shifted_indices_single_axis};
pub use render::{BoxStyle, Display, Position, RenderNode, SlotContent, SlotProps};
pub use sizing::{
    Adjustment, WidthValues, cells_per_row, column_left_values, column_width_values,
    fill_row_values, fit_adjustments,
};
pub use spec::{
    Axis, CellDimension, InvalidLayout, LayoutDescription, LayoutNode, LayoutOptions, LayoutSlot,
    LayoutSpec, RowHeight, SlotDescription,
};
