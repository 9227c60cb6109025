//! panelgrid
//!
//! A grid layout engine with drag-to-reorder panels, a drop zone registry for
//! cross-container drag and drop, and the delimited-text parsers used to
//! preview files before import.
//!
//! ## Module Structure
//!
//! - `layout`: rows/columns/cells layouts, sizing, render tree, reordering
//! - `drag`: panel drag state machine, scroll-aware offsets, auto-scroll
//! - `drop_zone`: drop zone registry over `spatial_index`
//! - `import`: CSV and JSON-subset parsing, column type inference
//! - `config`: persisted settings
//! - `logging` / `perf`: tracing setup and timing helpers

pub mod config;
pub mod constants;
pub mod drag;
pub mod drop_zone;
pub mod geometry;
pub mod import;
pub mod layout;
pub mod logging;
pub mod perf;
pub mod spatial_index;

pub use config::{ConfigError, DragSettings, ImportSettings, Settings};
pub use drop_zone::{DragEvent, DropZoneError, DropZoneHandler, DropZoneManager};
pub use geometry::{Length, Point, Rect, Size};
pub use layout::{LayoutDescription, LayoutManager, RenderNode, SlotDescription};
