//! Layout descriptions.
//!
//! [`LayoutDescription`] is the loose, JSON-shaped form callers write (the
//! same shape the layout engine has always accepted: `rows`, `columns` or
//! `cells` plus camel-cased options). [`LayoutSpec`] is the validated form the
//! engine works with: exactly one axis, spans defaulted, and nested layouts
//! decided once at construction.

use crate::drag::PanelOptions;
use crate::layout::error::{LayoutError, LayoutResult};
use crate::layout::sizing::Adjustment;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

fn is_false(value: &bool) -> bool {
    !*value
}

/// Height mode for rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowHeight {
    /// Rows share the container height by `rowSpan`
    Fill,
    /// Natural flow
    Auto,
}

/// A cell dimension: one value, or a mapping of minimum container width to
/// value (`{"0": 1, "600": 2, "900": 3}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellDimension {
    Fixed(f64),
    Responsive(BTreeMap<String, f64>),
}

impl CellDimension {
    /// Value for a container width.
    ///
    /// Responsive mappings pick the largest breakpoint not exceeding
    /// `container_width`; `None` if every breakpoint is larger.
    pub fn resolve(&self, container_width: f64) -> Option<f64> {
        match self {
            CellDimension::Fixed(value) => Some(*value),
            CellDimension::Responsive(breakpoints) => breakpoints
                .iter()
                .filter_map(|(key, value)| key.trim().parse::<f64>().ok().map(|bp| (bp, *value)))
                .filter(|(bp, _)| *bp <= container_width)
                .max_by(|a, b| a.0.total_cmp(&b.0))
                .map(|(_, value)| value),
        }
    }

    pub fn is_responsive(&self) -> bool {
        matches!(self, CellDimension::Responsive(_))
    }
}

/// Layout-wide options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    #[serde(skip_serializing_if = "is_false")]
    pub full_height: bool,
    /// Columns flow inline with their natural width
    #[serde(skip_serializing_if = "is_false")]
    pub compact: bool,
    /// Container width below which columns stack
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_at: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_height: Option<RowHeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col_padding: Option<f64>,
    /// Fixed width in px, or cells per row by breakpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_width: Option<CellDimension>,
    /// Height in px, fixed or by breakpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_height: Option<CellDimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_cell_width: Option<f64>,
    /// Enables clamping of column size adjustments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_col_width: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub initial_col_sizes: Vec<Adjustment>,
    /// Slots are moved by drop zones; suppress neighbor shifting
    #[serde(skip_serializing_if = "is_false")]
    pub use_drop_zones: bool,
}

impl LayoutOptions {
    pub fn col_padding(&self) -> f64 {
        self.col_padding.unwrap_or(0.0)
    }

    pub fn fills_rows(&self) -> bool {
        self.row_height == Some(RowHeight::Fill)
    }
}

/// Loose layout description, as written by callers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<SlotDescription>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<SlotDescription>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells: Option<Vec<SlotDescription>>,
    #[serde(flatten)]
    pub options: LayoutOptions,
}

impl LayoutDescription {
    pub fn rows(slots: Vec<SlotDescription>) -> Self {
        Self {
            rows: Some(slots),
            ..Default::default()
        }
    }

    pub fn columns(slots: Vec<SlotDescription>) -> Self {
        Self {
            columns: Some(slots),
            ..Default::default()
        }
    }

    pub fn cells(slots: Vec<SlotDescription>) -> Self {
        Self {
            cells: Some(slots),
            ..Default::default()
        }
    }

    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// How many of rows/columns/cells are present
    pub fn axis_count(&self) -> usize {
        [self.rows.is_some(), self.columns.is_some(), self.cells.is_some()]
            .into_iter()
            .filter(|present| *present)
            .count()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Loose slot description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SlotDescription {
    /// Opaque handle of the content rendered in this slot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<Value>,
    /// Fixed width in px
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col_span: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f64>,
    #[serde(skip_serializing_if = "is_false")]
    pub hidden: bool,
    /// Shows a resize grip on the left edge of the column
    #[serde(skip_serializing_if = "is_false")]
    pub resizeable: bool,
    #[serde(flatten)]
    pub panel: PanelOptions,
    /// Present when the slot is itself a layout
    #[serde(flatten)]
    pub layout: LayoutDescription,
}

impl SlotDescription {
    pub fn leaf(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn nested(layout: LayoutDescription) -> Self {
        Self {
            layout,
            ..Default::default()
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(Value::String(key.into()));
        self
    }

    pub fn col_span(mut self, span: u32) -> Self {
        self.col_span = Some(span);
        self
    }

    pub fn row_span(mut self, span: u32) -> Self {
        self.row_span = Some(span);
        self
    }

    pub fn width(mut self, px: f64) -> Self {
        self.width = Some(px);
        self
    }

    pub fn min_width(mut self, px: f64) -> Self {
        self.min_width = Some(px);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn resizeable(mut self) -> Self {
        self.resizeable = true;
        self
    }

    pub fn draggable(mut self, panel: PanelOptions) -> Self {
        self.panel = panel;
        self
    }
}

/// Which axis a layout level arranges its slots along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Rows,
    Columns,
    Cells,
}

/// A nested layout that failed validation; rendered as an error node.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidLayout {
    pub error: LayoutError,
    /// JSON of the offending description
    pub source: String,
}

impl InvalidLayout {
    pub fn new(error: LayoutError, description: &LayoutDescription) -> Self {
        Self {
            error,
            source: description.to_json(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutNode {
    Leaf(Option<String>),
    Nested(Box<LayoutSpec>),
    Invalid(InvalidLayout),
}

/// One validated slot
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSlot {
    pub key: Option<String>,
    pub width: Option<f64>,
    pub col_span: u32,
    pub row_span: u32,
    pub min_width: Option<f64>,
    pub hidden: bool,
    pub resizeable: bool,
    pub panel: PanelOptions,
    pub node: LayoutNode,
}

impl LayoutSlot {
    fn from_description(slot: &SlotDescription) -> Self {
        let node = if slot.layout.axis_count() > 0 {
            match LayoutSpec::try_from(&slot.layout) {
                Ok(spec) => LayoutNode::Nested(Box::new(spec)),
                Err(error) => LayoutNode::Invalid(InvalidLayout::new(error, &slot.layout)),
            }
        } else {
            LayoutNode::Leaf(slot.content.clone())
        };

        Self {
            key: slot.key.as_ref().map(|key| match key {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
            width: slot.width,
            col_span: slot.col_span.unwrap_or(1),
            row_span: slot.row_span.unwrap_or(1),
            min_width: slot.min_width,
            hidden: slot.hidden,
            resizeable: slot.resizeable,
            panel: slot.panel.clone(),
            node,
        }
    }

    /// Uses a fixed pixel width instead of a share of the container
    pub fn is_fixed(&self) -> bool {
        self.width.is_some()
    }
}

/// Validated layout level
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSpec {
    pub axis: Axis,
    pub slots: Vec<LayoutSlot>,
    pub options: LayoutOptions,
}

impl TryFrom<&LayoutDescription> for LayoutSpec {
    type Error = LayoutError;

    fn try_from(description: &LayoutDescription) -> LayoutResult<Self> {
        let (axis, slots) = match (&description.rows, &description.columns, &description.cells) {
            (Some(rows), None, None) => (Axis::Rows, rows),
            (None, Some(columns), None) => (Axis::Columns, columns),
            (None, None, Some(cells)) => (Axis::Cells, cells),
            _ => {
                return Err(LayoutError::AxisCount {
                    passed: description.axis_count(),
                });
            }
        };

        Ok(Self {
            axis,
            slots: slots.iter().map(LayoutSlot::from_description).collect(),
            options: description.options.clone(),
        })
    }
}

impl LayoutSpec {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, index: usize) -> LayoutResult<&LayoutSlot> {
        self.slots.get(index).ok_or(LayoutError::SlotOutOfRange {
            index,
            len: self.slots.len(),
        })
    }

    /// React-style key of a slot; falls back to the index.
    pub fn key_for_index(&self, index: usize) -> Option<String> {
        let slot = self.slots.get(index)?;
        Some(slot.key.clone().unwrap_or_else(|| index.to_string()))
    }
}
