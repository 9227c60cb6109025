//! Error types for import parsing
//!
//! Provides unified error handling for delimited-text and JSON previews.

use thiserror::Error;

/// Errors that can occur while parsing an uploaded file for preview
#[derive(Error, Debug)]
pub enum ImportError {
    /// Newline autodetection found no line break in the text
    #[error("no line-breaks found in uploaded CSV file")]
    NoLineBreaks,

    /// Delimiter is a newline character or a quote
    #[error("invalid delimiter {0:?}; delimiters cannot be a line break or a quote character")]
    InvalidDelimiter(char),

    /// The comment prefix equals the delimiter
    #[error("comment character same as delimiter")]
    CommentMatchesDelimiter,

    /// Text starts with the newline sequence
    #[error("first line of file cannot be empty")]
    EmptyFirstLine,

    /// A row has a different field count than the first row
    #[error("each row must have the same number of fields (row {row} has {found}, expected {expected})")]
    InconsistentFieldCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Input ended inside a quoted field
    #[error("unterminated quote")]
    UnterminatedQuote,

    /// A line of newline-delimited JSON failed to parse
    #[error("JSON format incorrect. Could not parse object: {line}")]
    InvalidNewlineJson { line: String },

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for import operations
pub type ImportResult<T> = Result<T, ImportError>;
