//! Draggable panels.
//!
//! A [`Panel`] wraps the content of one layout slot and turns raw pointer
//! events into drag updates for its layout. Any other draggable (tabs, cards,
//! results) can implement [`Draggable`] and reuse the same protocol.

use crate::config::DragSettings;
use crate::constants::{NEIGHBOR_DRAGGING_CLASS, PANEL_CLASS, PANEL_DRAGGING_CLASS};
use crate::drag::autoscroll::{AutoScroller, ScrollDirection};
use crate::drag::coords::{ClampEdges, DragAxes, DragOffset, DragOrigin, Viewport};
use crate::drag::state::PanelState;
use crate::geometry::{Length, Point, Rect};
use crate::layout::SlotProps;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-panel drag options, read from the slot description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelOptions {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub drag_x: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub drag_y: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub drag_xy: bool,
    /// Only pointer-downs on the drag handle start a drag
    #[serde(rename = "handleOnly", skip_serializing_if = "std::ops::Not::not")]
    pub handle_only: bool,
    /// Clamp the panel to the parent viewport; reaching the top or bottom
    /// limit starts auto-scroll
    #[serde(rename = "dragInsideOnly", skip_serializing_if = "std::ops::Not::not")]
    pub drag_inside_only: bool,
    /// Stretch the panel over its slot
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fill: bool,
}

impl PanelOptions {
    pub fn axes(&self) -> DragAxes {
        DragAxes {
            x: self.drag_x || self.drag_xy,
            y: self.drag_y || self.drag_xy,
        }
    }
}

/// Part of the panel that received a pointer-down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointerTarget {
    #[default]
    Body,
    /// The designated drag handle (or one of its children)
    Handle,
    /// The column resize grip
    ResizeHandle,
}

/// What a layout needs to know about a drag frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragUpdate {
    /// Client pointer after clamping
    pub pointer: Point,
    /// Panel displacement in content coordinates
    pub offset: DragOffset,
    /// Pointer in content coordinates
    pub content_pointer: Point,
}

/// Drag capability shared by every draggable element.
pub trait Draggable {
    /// Returns true if a drag started.
    fn on_pointer_down(
        &mut self,
        pointer: Point,
        target: PointerTarget,
        slot_rect: Rect,
        viewport: &Viewport,
    ) -> bool;

    fn on_pointer_move(&mut self, pointer: Point, viewport: &Viewport) -> Option<DragUpdate>;

    /// Ends the drag; returns the final update if one was active.
    fn on_pointer_up(&mut self, pointer: Point, viewport: &Viewport) -> Option<DragUpdate>;

    fn drag_state(&self) -> &PanelState;
}

/// Resolved look of a panel for one render pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PanelAppearance {
    pub class_names: Vec<&'static str>,
    pub left: Option<Length>,
    pub top: Option<Length>,
    pub width: Option<Length>,
    pub height: Option<Length>,
}

#[derive(Debug, Clone)]
pub struct Panel {
    index: usize,
    options: PanelOptions,
    state: PanelState,
    scroller: AutoScroller,
    edge_threshold: f64,
    moved: bool,
}

impl Panel {
    pub fn new(index: usize, options: PanelOptions, settings: &DragSettings) -> Self {
        Self {
            index,
            options,
            state: PanelState::Idle,
            scroller: AutoScroller::new(settings),
            edge_threshold: settings.scroll_edge_threshold,
            moved: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn options(&self) -> &PanelOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: PanelOptions) {
        self.options = options;
    }

    pub fn can_drag(&self) -> bool {
        self.options.axes().any()
    }

    /// Whether the pointer moved since the last pointer-down.
    ///
    /// Hosts use this to suppress the click that follows a drag.
    pub fn moved(&self) -> bool {
        self.moved
    }

    pub fn scroller(&self) -> &AutoScroller {
        &self.scroller
    }

    fn start_drag(&mut self, pointer: Point, slot_rect: Rect, viewport: &Viewport) -> bool {
        if !self.can_drag() {
            return false;
        }
        let origin = DragOrigin::capture(pointer, slot_rect, viewport);
        self.state = PanelState::Pressed { origin };
        debug!(index = self.index, x = pointer.x, y = pointer.y, "Panel drag started");
        true
    }

    fn drag_to(&mut self, pointer: Point, viewport: &Viewport) -> Option<DragUpdate> {
        let origin = *self.state.origin()?;
        let axes = self.options.axes();
        let mut pointer = pointer;

        let mut edges = ClampEdges::default();
        if self.options.drag_inside_only {
            let (clamped, clamp_edges) = origin.clamp_inside(pointer, viewport);
            pointer = clamped;
            edges = clamp_edges;
        }

        if axes.y {
            self.update_scrolling(pointer, viewport, edges);
        }

        let offset = origin.offset(pointer, viewport.scroll_top, axes);
        self.state = PanelState::Dragging {
            origin,
            last_pointer: pointer,
            offset,
        };

        Some(DragUpdate {
            pointer,
            offset,
            content_pointer: origin.content_pointer_at(offset),
        })
    }

    fn update_scrolling(&mut self, pointer: Point, viewport: &Viewport, edges: ClampEdges) {
        let bounds = viewport.bounds;
        if edges.at_top || pointer.y <= bounds.top() + self.edge_threshold {
            self.scroller.start(ScrollDirection::Up);
        } else if edges.at_bottom || pointer.y >= bounds.bottom() - self.edge_threshold {
            self.scroller.start(ScrollDirection::Down);
        } else {
            self.scroller.stop();
        }
    }

    /// Auto-scroll timer tick.
    ///
    /// Scrolls `viewport` and, while the scroll is still moving, re-issues
    /// the last drag position so the layout can recompute shifted slots.
    pub fn tick(&mut self, viewport: &mut Viewport) -> Option<DragUpdate> {
        let max_scroll = self.state.origin()?.max_scroll;
        let tick = self.scroller.tick(viewport, max_scroll)?;
        if !tick.redrag {
            return None;
        }
        let last = self.state.last_pointer()?;
        self.drag_to(last, viewport)
    }

    /// Styles and classes for this panel given the props its layout passed.
    pub fn appearance(&self, props: Option<&SlotProps>) -> PanelAppearance {
        let mut appearance = PanelAppearance {
            class_names: vec![PANEL_CLASS],
            ..Default::default()
        };

        if let Some(props) = props {
            if props.dx != 0.0 && self.can_drag() {
                appearance.left = Some(Length::Px(props.dx));
            }
            if props.dy != 0.0 && self.can_drag() {
                appearance.top = Some(Length::Px(props.dy));
            }
        }

        if let PanelState::Dragging { offset, .. } = self.state {
            appearance.class_names.push(PANEL_DRAGGING_CLASS);
            appearance.left = Some(Length::Px(offset.dx));
            appearance.top = Some(Length::Px(offset.dy));
        }

        if props.is_some_and(|p| p.neighbor_dragging) {
            appearance.class_names.push(NEIGHBOR_DRAGGING_CLASS);
        }

        if self.options.fill {
            appearance.width = Some(Length::Percent(100.0));
            appearance.height = Some(Length::Percent(100.0));
        }

        appearance
    }
}

impl Draggable for Panel {
    fn on_pointer_down(
        &mut self,
        pointer: Point,
        target: PointerTarget,
        slot_rect: Rect,
        viewport: &Viewport,
    ) -> bool {
        self.moved = false;

        if self.options.handle_only && target != PointerTarget::Handle {
            return false;
        }

        self.start_drag(pointer, slot_rect, viewport)
    }

    fn on_pointer_move(&mut self, pointer: Point, viewport: &Viewport) -> Option<DragUpdate> {
        let update = self.drag_to(pointer, viewport)?;
        self.moved = true;
        Some(update)
    }

    fn on_pointer_up(&mut self, pointer: Point, viewport: &Viewport) -> Option<DragUpdate> {
        let origin = *self.state.origin()?;
        self.scroller.stop();
        self.state = PanelState::Idle;

        let offset = origin.offset(pointer, viewport.scroll_top, self.options.axes());
        debug!(index = self.index, dx = offset.dx, dy = offset.dy, "Panel drag stopped");

        Some(DragUpdate {
            pointer,
            offset,
            content_pointer: origin.content_pointer_at(offset),
        })
    }

    fn drag_state(&self) -> &PanelState {
        &self.state
    }
}
