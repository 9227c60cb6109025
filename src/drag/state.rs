//! Panel drag state machine.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Pressed        (pointer down on a draggable panel, handle check passed)
//! Pressed -> Dragging    (first pointer move)
//! Dragging -> Dragging   (pointer move, auto-scroll tick)
//!
//! Pressed | Dragging -> Idle   (pointer up; the drop is reported once)
//! ```
//!
//! The dragging styles only apply once the panel actually moved, so a plain
//! click never renders as a drag.

use crate::drag::coords::{DragOffset, DragOrigin};
use crate::geometry::Point;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum PanelState {
    /// Not interacting
    #[default]
    Idle,

    /// Pointer is down but has not moved yet
    Pressed { origin: DragOrigin },

    /// Pointer moved at least once since pointer-down
    Dragging {
        origin: DragOrigin,
        /// Last (possibly clamped) client pointer, re-issued by auto-scroll
        last_pointer: Point,
        offset: DragOffset,
    },
}

impl PanelState {
    /// Returns true between pointer-down and pointer-up
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Returns true once the panel moved
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn origin(&self) -> Option<&DragOrigin> {
        match self {
            Self::Idle => None,
            Self::Pressed { origin } | Self::Dragging { origin, .. } => Some(origin),
        }
    }

    /// Current offset; zero while merely pressed
    pub fn offset(&self) -> DragOffset {
        match self {
            Self::Dragging { offset, .. } => *offset,
            _ => DragOffset::default(),
        }
    }

    pub fn last_pointer(&self) -> Option<Point> {
        match self {
            Self::Dragging { last_pointer, .. } => Some(*last_pointer),
            _ => None,
        }
    }
}
