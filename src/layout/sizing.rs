//! Slot sizing math.
//!
//! Columns are sized as `calc(P% + Npx)`: proportional columns share the
//! percentage pool by `colSpan`, and give back their share of the pixels
//! taken by fixed-width columns and padding. A user's manual resizing is kept
//! as a per-column pixel [`Adjustment`] on top of that.

use crate::geometry::Length;
use crate::layout::spec::{CellDimension, LayoutSlot};
use serde::{Deserialize, Serialize};

/// Manual size change of one column, in px
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub x: f64,
    pub y: f64,
}

/// A length split into its percentage and pixel parts
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WidthValues {
    pub percentage: f64,
    pub offset: f64,
}

impl WidthValues {
    pub fn to_length(self) -> Length {
        Length::Calc {
            percent: self.percentage,
            px: self.offset,
        }
    }

    pub fn resolve(self, container: f64) -> f64 {
        container * self.percentage / 100.0 + self.offset
    }
}

#[inline]
pub fn padding_for_column(col_padding: f64, index: usize) -> f64 {
    if index != 0 { col_padding } else { 0.0 }
}

/// Span units shared by proportional, visible slots.
pub fn total_span(slots: &[LayoutSlot], rows: bool) -> u32 {
    slots
        .iter()
        .filter(|slot| !slot.hidden && (rows || !slot.is_fixed()))
        .map(|slot| if rows { slot.row_span } else { slot.col_span })
        .sum()
}

/// Pixels taken by fixed widths and padding across visible columns.
pub fn fixed_width_total(columns: &[LayoutSlot], col_padding: f64) -> f64 {
    columns
        .iter()
        .enumerate()
        .filter(|(_, column)| !column.hidden)
        .map(|(i, column)| column.width.unwrap_or(0.0) + padding_for_column(col_padding, i))
        .sum()
}

fn adjustment_x(adjustments: &[Adjustment], index: usize) -> f64 {
    adjustments.get(index).map_or(0.0, |a| a.x)
}

/// Width of column `index`.
pub fn column_width_values(
    columns: &[LayoutSlot],
    index: usize,
    col_padding: f64,
    adjustments: &[Adjustment],
) -> WidthValues {
    let Some(column) = columns.get(index) else {
        return WidthValues::default();
    };
    if column.hidden {
        return WidthValues::default();
    }

    let adjustment = adjustment_x(adjustments, index);

    if let Some(width) = column.width {
        return WidthValues {
            percentage: 0.0,
            offset: width + adjustment,
        };
    }

    let total = total_span(columns, false);
    if total == 0 {
        return WidthValues {
            percentage: 0.0,
            offset: adjustment,
        };
    }

    let share = f64::from(column.col_span) / f64::from(total);
    let set_width = fixed_width_total(columns, col_padding);

    WidthValues {
        percentage: share * 100.0,
        offset: adjustment - share * set_width,
    }
}

/// Left edge of column `index`: preceding widths plus one padding per
/// preceding column.
pub fn column_left_values(
    columns: &[LayoutSlot],
    index: usize,
    col_padding: f64,
    adjustments: &[Adjustment],
) -> WidthValues {
    let padding = padding_for_column(col_padding, index);
    (0..index.min(columns.len())).fold(WidthValues::default(), |sum, i| {
        let width = column_width_values(columns, i, col_padding, adjustments);
        WidthValues {
            percentage: sum.percentage + width.percentage,
            offset: sum.offset + width.offset + padding,
        }
    })
}

/// `(top%, height%)` of a row in a fill layout.
pub fn fill_row_values(rows: &[LayoutSlot], index: usize) -> (f64, f64) {
    let total = total_span(rows, true);
    let Some(row) = rows.get(index) else {
        return (0.0, 0.0);
    };
    if total == 0 {
        return (0.0, 0.0);
    }

    let before: u32 = rows[..index]
        .iter()
        .filter(|r| !r.hidden)
        .map(|r| r.row_span)
        .sum();
    let span = if row.hidden { 0 } else { row.row_span };

    let total = f64::from(total);
    (
        f64::from(before) / total * 100.0,
        f64::from(span) / total * 100.0,
    )
}

/// Shrink column adjustments so every column keeps its minimum width at
/// `container_width`.
///
/// Columns below their minimum take the missing pixels back from the
/// columns that grew; if the grown columns cannot cover it, every
/// adjustment resets to zero. Returns `None` when nothing changed.
pub fn fit_adjustments(
    adjustments: &[Adjustment],
    columns: &[LayoutSlot],
    min_col_width: Option<f64>,
    container_width: f64,
) -> Option<Vec<Adjustment>> {
    let min_col_width = min_col_width?;
    if columns.is_empty() || adjustments.is_empty() {
        return None;
    }

    let col_width = container_width / columns.len() as f64;
    let mut fitted = adjustments.to_vec();
    let mut changed = false;

    for index in 0..fitted.len() {
        let Some(column) = columns.get(index) else {
            continue;
        };
        let min_width = column.min_width.unwrap_or(min_col_width);
        let col_size = col_width + fitted[index].x;
        if col_size >= min_width {
            continue;
        }

        changed = true;
        let difference = min_width - col_size;
        let total: f64 = fitted.iter().map(|a| a.x.max(0.0)).sum();

        if difference >= total {
            for adjustment in &mut fitted {
                adjustment.x = 0.0;
            }
        } else {
            fitted[index].x += difference;
            let ratio = (total - difference) / total;
            for adjustment in &mut fitted {
                if adjustment.x > 0.0 {
                    adjustment.x *= ratio;
                }
            }
        }
    }

    changed.then_some(fitted)
}

/// Cells per row for a wrapping grid at `container_width`.
pub fn cells_per_row(
    cell_width: Option<&CellDimension>,
    min_cell_width: Option<f64>,
    container_width: f64,
) -> usize {
    let min_cell_width = min_cell_width.unwrap_or(0.0);
    let per_row = match cell_width {
        Some(CellDimension::Responsive(_)) => cell_width
            .and_then(|w| w.resolve(container_width))
            .map_or(1.0, f64::floor),
        Some(CellDimension::Fixed(width)) => {
            let width = width.max(min_cell_width);
            if width > 0.0 {
                (container_width / width).floor()
            } else {
                1.0
            }
        }
        None if min_cell_width > 0.0 => (container_width / min_cell_width).floor(),
        None => 1.0,
    };
    per_row.max(1.0) as usize
}
