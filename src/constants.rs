//! Crate-wide constants.
//!
//! Centralizes magic numbers for drag behavior, parsing defaults and the
//! class names emitted by the layout renderer.

// ============================================================================
// Auto-scroll
// ============================================================================

/// Interval between auto-scroll ticks in milliseconds
pub const SCROLL_INTERVAL_MS: u64 = 25;

/// Scroll distance applied per tick while auto-scrolling, in pixels
pub const MAX_SCROLL_VELOCITY: f64 = 20.0;

/// Distance from the viewport's top/bottom edge that starts auto-scrolling
pub const SCROLL_EDGE_THRESHOLD: f64 = 30.0;

// ============================================================================
// Parsing Defaults
// ============================================================================

/// Default field delimiter
pub const DEFAULT_DELIMITER: char = ',';

/// Default quote character
pub const DEFAULT_QUOTE_CHAR: char = '"';

/// Default escape character (doubled quotes)
pub const DEFAULT_ESCAPE_CHAR: char = '"';

/// Default comment prefix
pub const DEFAULT_COMMENTS: &str = "#";

/// Default number of preview rows shown during import
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Characters that can never be used as a field delimiter
pub const BAD_DELIMITERS: [char; 3] = ['\r', '\n', '"'];

/// Values treated as missing during type inference
pub const NULL_LIKE_VALUES: [&str; 3] = ["", "null", "undefined"];

// ============================================================================
// Layout Class Names
// ============================================================================

pub const LAYOUT_CLASS: &str = "layout-manager";
pub const FULL_HEIGHT_CLASS: &str = "layout-manager-full-height";
pub const COLUMN_CLASS: &str = "layout-manager-column";
pub const ROW_CLASS: &str = "layout-manager-row";
pub const CELL_CLASS: &str = "layout-manager-cell";
pub const NO_TRANSITION_CLASS: &str = "no-transition";

pub const PANEL_CLASS: &str = "panel";
pub const PANEL_DRAGGING_CLASS: &str = "panel-dragging";
pub const NEIGHBOR_DRAGGING_CLASS: &str = "neighbor-dragging";
