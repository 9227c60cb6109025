//! The layout manager.
//!
//! Owns one validated layout level, the geometry of its slots, one draggable
//! [`Panel`] per slot, and nested managers for slots that are layouts
//! themselves. The host feeds it pointer events and timer ticks; reorder
//! intents come back through the `move_to` callback only, the manager never
//! reorders anything itself.
//!
//! The implementation is split by concern:
//! - `manager.rs`: state, construction, pointer routing, column resizing
//! - `reorder.rs`: shifted-slot computation and drop handling
//! - `render.rs`: render tree
//! - `arrange.rs`: slot rectangles from styles

use crate::config::DragSettings;
use crate::drag::{Draggable, Panel, PointerTarget, Viewport};
use crate::geometry::{Point, Rect, Size};
use crate::layout::reorder::DragState;
use crate::layout::sizing::{Adjustment, column_width_values, fit_adjustments};
use crate::layout::spec::{Axis, InvalidLayout, LayoutDescription, LayoutNode, LayoutSpec};
use crate::perf::ReorderProfiler;
use std::collections::BTreeMap;
use tracing::{debug, error};

/// Reorder callback: `(from_index, to_index)`
pub type MoveTo = Box<dyn FnMut(usize, usize)>;

/// Called with the full adjustment list whenever it changes
pub type ColSizeChange = Box<dyn FnMut(&[Adjustment])>;

/// An in-progress column resize
#[derive(Debug, Clone, Copy)]
pub(super) struct ResizeSession {
    pub index: usize,
    pub start_x: f64,
    pub start_adjustment: f64,
    pub start_prev_adjustment: f64,
    pub min_width: f64,
    pub start_width: f64,
    pub min_prev_width: f64,
    pub start_prev_width: f64,
}

pub struct LayoutManager {
    pub(super) spec: Result<LayoutSpec, InvalidLayout>,
    pub(super) settings: DragSettings,
    pub(super) container: Size,
    pub(super) viewport: Viewport,
    /// Content coordinates of the viewport
    pub(super) slot_rects: Vec<Rect>,
    pub(super) panels: Vec<Panel>,
    pub(super) children: BTreeMap<usize, LayoutManager>,
    /// Panel that received the current pointer-down
    pub(super) active: Option<usize>,
    pub(super) drag: DragState,
    pub(super) size_adjustments: Vec<Adjustment>,
    pub(super) resize: Option<ResizeSession>,
    pub(super) move_to: Option<MoveTo>,
    pub(super) on_col_size_change: Option<ColSizeChange>,
    pub(super) profiler: ReorderProfiler,
}

impl LayoutManager {
    pub fn new(description: &LayoutDescription) -> Self {
        Self::with_settings(description, DragSettings::default())
    }

    pub fn with_settings(description: &LayoutDescription, settings: DragSettings) -> Self {
        Self::build(validate(description), settings)
    }

    pub fn from_spec(spec: LayoutSpec, settings: DragSettings) -> Self {
        Self::build(Ok(spec), settings)
    }

    fn build(spec: Result<LayoutSpec, InvalidLayout>, settings: DragSettings) -> Self {
        let size_adjustments = spec
            .as_ref()
            .map(|s| s.options.initial_col_sizes.clone())
            .unwrap_or_default();

        let mut manager = Self {
            spec,
            settings,
            container: Size::default(),
            viewport: Viewport::default(),
            slot_rects: Vec::new(),
            panels: Vec::new(),
            children: BTreeMap::new(),
            active: None,
            drag: DragState::default(),
            size_adjustments,
            resize: None,
            move_to: None,
            on_col_size_change: None,
            profiler: ReorderProfiler::new(),
        };
        manager.rebuild_slots();
        manager
    }

    /// Recreate panels and nested managers from the current spec.
    fn rebuild_slots(&mut self) {
        self.panels.clear();
        self.children.clear();
        self.active = None;
        self.drag = DragState::default();

        let Ok(spec) = &self.spec else {
            return;
        };

        for (index, slot) in spec.slots.iter().enumerate() {
            self.panels
                .push(Panel::new(index, slot.panel.clone(), &self.settings));

            match &slot.node {
                LayoutNode::Nested(inner) => {
                    let child = LayoutManager::from_spec((**inner).clone(), self.settings.clone());
                    self.children.insert(index, child);
                }
                LayoutNode::Invalid(invalid) => {
                    error!(index, error = %invalid.error, layout = %invalid.source, "Invalid nested layout");
                }
                LayoutNode::Leaf(_) => {}
            }
        }

        if spec.axis == Axis::Columns && self.size_adjustments.len() < spec.len() {
            self.size_adjustments.resize(spec.len(), Adjustment::default());
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn spec(&self) -> Option<&LayoutSpec> {
        self.spec.as_ref().ok()
    }

    /// The validation failure, if this level is misconfigured
    pub fn invalid(&self) -> Option<&InvalidLayout> {
        self.spec.as_ref().err()
    }

    pub fn is_valid(&self) -> bool {
        self.spec.is_ok()
    }

    pub fn slot_count(&self) -> usize {
        self.spec().map_or(0, LayoutSpec::len)
    }

    pub fn key_for_index(&self, index: usize) -> Option<String> {
        self.spec()?.key_for_index(index)
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn size_adjustments(&self) -> &[Adjustment] {
        &self.size_adjustments
    }

    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub fn nested(&self, index: usize) -> Option<&LayoutManager> {
        self.children.get(&index)
    }

    pub fn nested_mut(&mut self, index: usize) -> Option<&mut LayoutManager> {
        self.children.get_mut(&index)
    }

    pub fn profiler(&self) -> &ReorderProfiler {
        &self.profiler
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn slot_rects(&self) -> &[Rect] {
        &self.slot_rects
    }

    /// Slot rectangle in content coordinates; empty if unknown.
    pub fn slot_rect(&self, index: usize) -> Rect {
        self.slot_rects.get(index).copied().unwrap_or_default()
    }

    // ========================================================================
    // Inputs
    // ========================================================================

    pub fn set_move_to(&mut self, move_to: impl FnMut(usize, usize) + 'static) {
        self.move_to = Some(Box::new(move_to));
    }

    pub fn clear_move_to(&mut self) {
        self.move_to = None;
    }

    pub fn set_on_col_size_change(&mut self, callback: impl FnMut(&[Adjustment]) + 'static) {
        self.on_col_size_change = Some(Box::new(callback));
    }

    /// Replace the layout description.
    ///
    /// A change in the number of columns resets every size adjustment.
    pub fn set_layout(&mut self, description: &LayoutDescription) {
        let old_columns = self.column_count();
        self.spec = validate(description);
        let new_columns = self.column_count();

        if old_columns != new_columns && self.resize.take().is_some() {
            debug!("Column count changed, cancelling resize");
        }

        let mut changed = false;
        if let (Some(old), Some(new)) = (old_columns, new_columns) {
            if old != new {
                debug!(old, new, "Column count changed, resetting size adjustments");
                self.size_adjustments = vec![Adjustment::default(); new];
                changed = true;
            }
        }

        self.rebuild_slots();
        if self.slot_rects.len() != self.slot_count() {
            self.slot_rects.clear();
        }
        if changed {
            self.notify_col_size_change();
        }
    }

    /// Update the container size, refitting column adjustments when the
    /// width changes.
    pub fn set_container(&mut self, container: Size) {
        let width_changed = container.width != self.container.width;
        self.container = container;
        if !width_changed {
            return;
        }

        let fitted = match &self.spec {
            Ok(spec) if spec.axis == Axis::Columns => fit_adjustments(
                &self.size_adjustments,
                &spec.slots,
                spec.options.min_col_width,
                container.width,
            ),
            _ => None,
        };

        if let Some(fitted) = fitted {
            debug!(width = container.width, "Column adjustments refitted");
            self.size_adjustments = fitted;
            self.notify_col_size_change();
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Scroll position sampled from the host
    pub fn scroll_to(&mut self, scroll_top: f64) {
        self.viewport.scroll_top = scroll_top;
    }

    /// Supply measured slot rectangles (content coordinates).
    pub fn set_slot_rects(&mut self, rects: Vec<Rect>) {
        self.slot_rects = rects;
    }

    fn column_count(&self) -> Option<usize> {
        self.spec()
            .filter(|spec| spec.axis == Axis::Columns)
            .map(LayoutSpec::len)
    }

    pub(super) fn notify_col_size_change(&mut self) {
        if let Some(callback) = self.on_col_size_change.as_mut() {
            callback(&self.size_adjustments);
        }
    }

    // ========================================================================
    // Pointer Events
    // ========================================================================

    /// Pointer pressed on slot `index`. Returns true if a drag or resize
    /// started.
    pub fn pointer_down(&mut self, index: usize, pointer: Point, target: PointerTarget) -> bool {
        let Some(slot) = self.spec().and_then(|spec| spec.slots.get(index)) else {
            return false;
        };

        if target == PointerTarget::ResizeHandle && slot.resizeable {
            return self.begin_resize(index, pointer.x);
        }

        let rect = self.slot_rect(index);
        let viewport = self.viewport;
        let Some(panel) = self.panels.get_mut(index) else {
            return false;
        };

        if panel.on_pointer_down(pointer, target, rect, &viewport) {
            self.active = Some(index);
            true
        } else {
            false
        }
    }

    pub fn pointer_move(&mut self, pointer: Point) {
        if self.resize.is_some() {
            self.resize_to(pointer.x);
            return;
        }

        let Some(index) = self.active else {
            return;
        };
        let viewport = self.viewport;
        let update = self
            .panels
            .get_mut(index)
            .and_then(|panel| panel.on_pointer_move(pointer, &viewport));

        if let Some(update) = update {
            self.on_panel_drag(index, &update);
        }
    }

    /// Pointer released. Returns the move reported to `move_to`, if any.
    pub fn pointer_up(&mut self, pointer: Point) -> Option<(usize, usize)> {
        if self.resize.is_some() {
            self.end_resize();
            return None;
        }

        let index = self.active.take()?;
        let viewport = self.viewport;
        let update = self.panels.get_mut(index)?.on_pointer_up(pointer, &viewport)?;
        self.on_panel_drop(index, &update)
    }

    /// Auto-scroll timer tick; call every `scroll_interval_ms`.
    pub fn tick(&mut self) {
        let Some(index) = self.active else {
            return;
        };
        let Some(panel) = self.panels.get_mut(index) else {
            return;
        };

        if let Some(update) = panel.tick(&mut self.viewport) {
            self.on_panel_drag(index, &update);
        }
    }

    // ========================================================================
    // Column Resizing
    // ========================================================================

    fn column_pixel_width(&self, index: usize) -> f64 {
        if let Some(rect) = self.slot_rects.get(index) {
            return rect.width;
        }
        self.spec()
            .map(|spec| {
                column_width_values(
                    &spec.slots,
                    index,
                    spec.options.col_padding(),
                    &self.size_adjustments,
                )
                .resolve(self.container.width)
            })
            .unwrap_or(0.0)
    }

    /// Start moving the boundary between column `index - 1` and `index`.
    pub fn begin_resize(&mut self, index: usize, x: f64) -> bool {
        let Some(spec) = self.spec() else {
            return false;
        };
        if spec.axis != Axis::Columns || index == 0 || index >= spec.len() {
            return false;
        }

        let fallback = spec.options.min_col_width.unwrap_or(0.0);
        let min_width = spec.slots[index].min_width.unwrap_or(fallback);
        let min_prev_width = spec.slots[index - 1].min_width.unwrap_or(fallback);
        if self.size_adjustments.len() < spec.len() {
            let len = spec.len();
            self.size_adjustments.resize(len, Adjustment::default());
        }

        self.resize = Some(ResizeSession {
            index,
            start_x: x,
            start_adjustment: self.size_adjustments[index].x,
            start_prev_adjustment: self.size_adjustments[index - 1].x,
            min_width,
            start_width: self.column_pixel_width(index),
            min_prev_width,
            start_prev_width: self.column_pixel_width(index - 1),
        });
        debug!(index, x, "Column resize started");
        true
    }

    /// Move the resize boundary to `x`, keeping both columns at or above
    /// their minimum width.
    pub fn resize_to(&mut self, x: f64) {
        let Some(session) = self.resize else {
            return;
        };

        let mut diff = session.start_x - x;
        let new_width = session.start_width + diff;
        if new_width < session.min_width {
            diff += session.min_width - new_width;
        }

        let new_prev_width = session.start_prev_width - diff;
        if new_prev_width < session.min_prev_width {
            diff -= session.min_prev_width - new_prev_width;
        }

        let Some([prev, current]) = self
            .size_adjustments
            .get_mut(session.index - 1..=session.index)
        else {
            return;
        };
        current.x = session.start_adjustment + diff;
        prev.x = session.start_prev_adjustment - diff;
    }

    pub fn end_resize(&mut self) {
        if let Some(session) = self.resize.take() {
            debug!(index = session.index, "Column resize finished");
            self.notify_col_size_change();
        }
    }

    pub fn is_resizing(&self) -> bool {
        self.resize.is_some()
    }
}

fn validate(description: &LayoutDescription) -> Result<LayoutSpec, InvalidLayout> {
    LayoutSpec::try_from(description).map_err(|error| {
        error!(%error, layout = %description.to_json(), "Invalid layout");
        InvalidLayout::new(error, description)
    })
}
