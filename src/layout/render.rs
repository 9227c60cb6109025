//! Render tree.
//!
//! [`LayoutManager::render`] produces a host-agnostic tree of positioned slot
//! wrappers. Hosts map each node to whatever their toolkit uses (a div, a
//! GPUI element, a terminal region); styles are plain [`Length`]s.

use crate::constants::{
    CELL_CLASS, COLUMN_CLASS, FULL_HEIGHT_CLASS, LAYOUT_CLASS, NO_TRANSITION_CLASS, ROW_CLASS,
};
use crate::geometry::Length;
use crate::layout::manager::LayoutManager;
use crate::layout::sizing::{cells_per_row, column_left_values, column_width_values, fill_row_values};
use crate::layout::spec::{Axis, CellDimension, InvalidLayout, LayoutNode, LayoutSlot, LayoutSpec};
use serde::Serialize;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    InlineBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Absolute,
    Relative,
}

/// Inline style of a slot wrapper
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoxStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Length>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<Display>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl BoxStyle {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Props a layout passes to the content of one slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SlotProps {
    pub index: usize,
    /// Horizontal shift while a neighbor is dragged past this slot
    pub dx: f64,
    /// Vertical shift while a neighbor is dragged past this slot
    pub dy: f64,
    /// Another slot of the same layout is being dragged
    pub neighbor_dragging: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SlotContent {
    Empty,
    /// Opaque content handle from the description
    Handle(String),
    Nested(Box<RenderNode>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderNode {
    Layout {
        class_names: Vec<String>,
        children: Vec<RenderNode>,
    },
    Slot {
        key: String,
        class_name: String,
        style: BoxStyle,
        #[serde(skip_serializing_if = "Option::is_none")]
        props: Option<SlotProps>,
        content: SlotContent,
    },
    /// Filler that keeps the last row of a grid aligned
    Blank {
        key: String,
        class_name: String,
        style: BoxStyle,
    },
    Error {
        message: String,
        layout: String,
    },
}

impl RenderNode {
    fn error(invalid: &InvalidLayout) -> Self {
        RenderNode::Error {
            message: invalid.error.to_string(),
            layout: invalid.source.clone(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, RenderNode::Error { .. })
    }

    pub fn children(&self) -> &[RenderNode] {
        match self {
            RenderNode::Layout { children, .. } => children,
            _ => &[],
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            RenderNode::Slot { key, .. } | RenderNode::Blank { key, .. } => Some(key),
            _ => None,
        }
    }

    pub fn style(&self) -> Option<&BoxStyle> {
        match self {
            RenderNode::Slot { style, .. } | RenderNode::Blank { style, .. } => Some(style),
            _ => None,
        }
    }

    pub fn props(&self) -> Option<&SlotProps> {
        match self {
            RenderNode::Slot { props, .. } => props.as_ref(),
            _ => None,
        }
    }

    /// The nested layout rendered inside a slot
    pub fn nested(&self) -> Option<&RenderNode> {
        match self {
            RenderNode::Slot {
                content: SlotContent::Nested(node),
                ..
            } => Some(node),
            _ => None,
        }
    }
}

impl LayoutManager {
    pub fn render(&self) -> RenderNode {
        let spec = match &self.spec {
            Ok(spec) => spec,
            Err(invalid) => {
                error!(error = %invalid.error, layout = %invalid.source, "Rendering invalid layout");
                return RenderNode::error(invalid);
            }
        };

        let mut class_names = Vec::with_capacity(2);
        if spec.options.full_height {
            class_names.push(FULL_HEIGHT_CLASS.to_string());
        }
        class_names.push(LAYOUT_CLASS.to_string());

        let mut children: Vec<RenderNode> = spec
            .slots
            .iter()
            .enumerate()
            .map(|(index, slot)| self.render_slot(spec, index, slot))
            .collect();

        if spec.axis == Axis::Cells {
            children.extend(self.blank_cells(spec));
        }

        RenderNode::Layout {
            class_names,
            children,
        }
    }

    fn render_slot(&self, spec: &LayoutSpec, index: usize, slot: &LayoutSlot) -> RenderNode {
        let (class_name, style) = match spec.axis {
            Axis::Columns => self.column_style(spec, index),
            Axis::Rows => (ROW_CLASS.to_string(), row_style(spec, index)),
            Axis::Cells => (CELL_CLASS.to_string(), self.cell_style(spec)),
        };
        let class_name = if self.is_resizing() {
            format!("{class_name} {NO_TRANSITION_CLASS}")
        } else {
            class_name
        };

        let (content, props) = match &slot.node {
            LayoutNode::Leaf(Some(handle)) => (
                SlotContent::Handle(handle.clone()),
                Some(self.slot_props(spec, index)),
            ),
            LayoutNode::Leaf(None) => (SlotContent::Empty, None),
            LayoutNode::Nested(_) => match self.children.get(&index) {
                Some(child) => (SlotContent::Nested(Box::new(child.render())), None),
                None => (SlotContent::Empty, None),
            },
            LayoutNode::Invalid(invalid) => {
                (SlotContent::Nested(Box::new(RenderNode::error(invalid))), None)
            }
        };

        RenderNode::Slot {
            key: spec.key_for_index(index).unwrap_or_else(|| index.to_string()),
            class_name,
            style,
            props,
            content,
        }
    }

    fn column_style(&self, spec: &LayoutSpec, index: usize) -> (String, BoxStyle) {
        let options = &spec.options;

        if self.is_stacked(spec) {
            return (String::new(), BoxStyle::default());
        }

        if options.compact {
            return (
                COLUMN_CLASS.to_string(),
                BoxStyle {
                    left: Some(Length::Px(0.0)),
                    width: Some(Length::Auto),
                    display: Some(Display::InlineBlock),
                    position: Some(Position::Relative),
                    ..Default::default()
                },
            );
        }

        let padding = options.col_padding();
        let left = column_left_values(&spec.slots, index, padding, &self.size_adjustments);
        let width = column_width_values(&spec.slots, index, padding, &self.size_adjustments);
        (
            COLUMN_CLASS.to_string(),
            BoxStyle {
                left: Some(left.to_length()),
                width: Some(width.to_length()),
                ..Default::default()
            },
        )
    }

    fn cell_style(&self, spec: &LayoutSpec) -> BoxStyle {
        let options = &spec.options;
        let width = self.container.width;

        let cell_width = options.cell_width.as_ref().and_then(|dimension| match dimension {
            CellDimension::Responsive(_) => {
                let per_row = cells_per_row(Some(dimension), options.min_cell_width, width);
                Some(Length::Percent(100.0 / per_row as f64))
            }
            CellDimension::Fixed(px) => Some(Length::Px(*px)),
        });

        BoxStyle {
            width: cell_width,
            height: options
                .cell_height
                .as_ref()
                .and_then(|h| h.resolve(width))
                .map(Length::Px),
            min_width: options.min_cell_width,
            ..Default::default()
        }
    }

    /// One blank filler per cell; wrapping flows keep the last row aligned.
    fn blank_cells(&self, spec: &LayoutSpec) -> Vec<RenderNode> {
        let style = BoxStyle {
            min_width: spec.options.min_cell_width,
            ..Default::default()
        };
        (0..spec.len())
            .map(|i| RenderNode::Blank {
                key: format!("blank-{i}"),
                class_name: CELL_CLASS.to_string(),
                style: style.clone(),
            })
            .collect()
    }

    /// Cells per row: counted from measured rects when available.
    pub(super) fn cells_in_row(&self, spec: &LayoutSpec) -> usize {
        if let Some(first) = self.slot_rects.first() {
            let count = self
                .slot_rects
                .iter()
                .take_while(|rect| rect.top() == first.top())
                .count();
            return count.max(1);
        }
        cells_per_row(
            spec.options.cell_width.as_ref(),
            spec.options.min_cell_width,
            self.container.width,
        )
    }

    pub(super) fn is_stacked(&self, spec: &LayoutSpec) -> bool {
        spec.axis == Axis::Columns
            && spec
                .options
                .stack_at
                .is_some_and(|stack_at| stack_at > self.container.width)
    }

    /// Props for the content of slot `index` under the current drag.
    pub fn slot_props(&self, spec: &LayoutSpec, index: usize) -> SlotProps {
        let drag = &self.drag;
        let mut props = SlotProps {
            index,
            dx: 0.0,
            dy: 0.0,
            neighbor_dragging: drag.dragging_index.is_some_and(|i| i != index),
        };

        if spec.options.use_drop_zones || !drag.is_shifted(index) {
            return props;
        }

        if spec.axis == Axis::Cells {
            let (dx, dy) = self.cell_shift(spec, index);
            props.dx = dx;
            props.dy = dy;
        } else {
            props.dx = drag.shifted_width;
            props.dy = drag.shifted_height;
            match spec.axis {
                Axis::Rows => props.dx = 0.0,
                Axis::Columns => props.dy = 0.0,
                Axis::Cells => {}
            }
        }
        props
    }

    /// Shift of a grid cell one position toward the dragged cell, wrapping
    /// between rows.
    fn cell_shift(&self, spec: &LayoutSpec, index: usize) -> (f64, f64) {
        let Some(dragging) = self.drag.dragging_index else {
            return (0.0, 0.0);
        };
        let per_row = self.cells_in_row(spec);
        let width = self.drag.shifted_width;
        let height = self.drag.shifted_height;
        let column = index % per_row;

        if dragging < index {
            // moves one slot back
            if column == 0 {
                (width * (per_row - 1) as f64, -height)
            } else {
                (-width, 0.0)
            }
        } else if column == per_row - 1 {
            // moves one slot forward
            (-width * (per_row - 1) as f64, height)
        } else {
            (width, 0.0)
        }
    }
}

fn row_style(spec: &LayoutSpec, index: usize) -> BoxStyle {
    if !spec.options.fills_rows() {
        return BoxStyle::default();
    }
    let (top, height) = fill_row_values(&spec.slots, index);
    BoxStyle {
        top: Some(Length::Percent(top)),
        height: Some(Length::Percent(height)),
        position: Some(Position::Absolute),
        ..Default::default()
    }
}
