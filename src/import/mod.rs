//! Import preview parsing
//!
//! Parsers used to preview uploaded files before they are imported:
//! delimited text (CSV/TSV and friends), arrays of JSON objects, and
//! newline-delimited JSON. A preview only reads as many records as it needs.
//!
//! ## Error Handling
//!
//! Parsers return `ImportResult<T>`, which uses the `ImportError` type.
//! `parse_csv` additionally reports its error through a callback and
//! returns `None`, so callers can surface the message inline.

mod csv_parser;
mod error;
mod field_types;
mod json_subset;

pub use csv_parser::*;
pub use error::*;
pub use field_types::*;
pub use json_subset::*;
