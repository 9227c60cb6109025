//! Drag capability for layout slots
//!
//! - `state`: explicit per-panel drag state machine
//! - `coords`: client/content conversion and scroll-compensated offsets
//! - `autoscroll`: timer-driven scrolling near the container edges
//! - `panel`: the [`Draggable`] trait and the [`Panel`] implementation

pub mod autoscroll;
pub mod coords;
pub mod panel;
pub mod state;

pub use autoscroll::{AutoScroller, ScrollDirection, ScrollTick};
pub use coords::{ClampEdges, DragAxes, DragOffset, DragOrigin, Viewport};
pub use panel::{Draggable, DragUpdate, Panel, PanelAppearance, PanelOptions, PointerTarget};
pub use state::PanelState;
