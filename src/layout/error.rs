//! Error types for layout descriptions

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A layout level names zero or several of rows/columns/cells
    #[error(
        "Error: Must pass one and only one of [cells, rows, columns] to the same level of a LayoutManager. Passed {passed}."
    )]
    AxisCount { passed: usize },

    #[error("slot index {index} out of range for layout with {len} slots")]
    SlotOutOfRange { index: usize, len: usize },
}

pub type LayoutResult<T> = Result<T, LayoutError>;
