//! Drop zones for cross-container drag and drop.
//!
//! A [`DropZoneManager`] is an owned registry of rectangular zones. Drag
//! sources report every pointer move and the final drop to it; the manager
//! resolves the most specific zone under the pointer (smallest area) and
//! dispatches over/out/drop events to that zone's handler.

use crate::geometry::{Point, Rect};
use crate::spatial_index::SpatialIndex;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, error, trace};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DropZoneError {
    #[error("drop zone '{0}' is already registered")]
    DuplicateId(String),

    #[error("no drop zone registered as '{0}'")]
    UnknownId(String),
}

pub type DropZoneResult<T> = Result<T, DropZoneError>;

/// A drag event delivered to a zone.
#[derive(Debug)]
pub struct DragEvent<'a, P> {
    pub payload: &'a P,
    /// Pointer, client coordinates
    pub position: Point,
    /// Handle of the element being dragged, if the source has one
    pub element: Option<&'a str>,
}

/// Callbacks of one zone. `P` is the drag payload type.
pub trait DropZoneHandler<P> {
    /// Pointer moved over the zone; fires on every move while inside.
    fn on_drag_over(&mut self, event: &DragEvent<'_, P>);

    /// Pointer left the zone, or the drag ended over it.
    fn on_drag_out(&mut self);

    fn on_drop(&mut self, event: &DragEvent<'_, P>);
}

struct Zone<P> {
    name: String,
    handler: Box<dyn DropZoneHandler<P>>,
}

pub struct DropZoneManager<P> {
    index: SpatialIndex,
    zones: HashMap<u64, Zone<P>>,
    ids: HashMap<String, u64>,
    next_id: u64,
    last_active: Option<u64>,
}

impl<P> DropZoneManager<P> {
    pub fn new() -> Self {
        Self {
            index: SpatialIndex::new(),
            zones: HashMap::new(),
            ids: HashMap::new(),
            next_id: 1,
            last_active: None,
        }
    }

    /// Register a zone.
    ///
    /// A duplicate id is logged and rejected; the first registration stays.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        bounds: Rect,
        handler: Box<dyn DropZoneHandler<P>>,
    ) -> DropZoneResult<()> {
        let name = id.into();
        if self.ids.contains_key(&name) {
            error!(id = %name, "Drop zone registered twice");
            return Err(DropZoneError::DuplicateId(name));
        }

        let zone_id = self.next_id;
        self.next_id += 1;

        self.index.insert(zone_id, bounds);
        self.ids.insert(name.clone(), zone_id);
        debug!(id = %name, "Drop zone registered");
        self.zones.insert(zone_id, Zone { name, handler });
        Ok(())
    }

    pub fn deregister(&mut self, id: &str) -> DropZoneResult<()> {
        let zone_id = self
            .ids
            .remove(id)
            .ok_or_else(|| DropZoneError::UnknownId(id.to_string()))?;

        self.index.remove(zone_id);
        self.zones.remove(&zone_id);
        if self.last_active == Some(zone_id) {
            self.last_active = None;
        }
        debug!(id, "Drop zone deregistered");
        Ok(())
    }

    /// Drop every zone, e.g. when the host view is torn down.
    ///
    /// No drag-out is sent to a zone that was hovered.
    pub fn clear(&mut self) {
        debug!(zones = self.zones.len(), "Drop zones cleared");
        self.index.clear();
        self.zones.clear();
        self.ids.clear();
        self.last_active = None;
    }

    /// Zones move with their host element (scrolling, resizing).
    pub fn update_bounds(&mut self, id: &str, bounds: Rect) -> DropZoneResult<()> {
        let zone_id = *self
            .ids
            .get(id)
            .ok_or_else(|| DropZoneError::UnknownId(id.to_string()))?;
        self.index.insert(zone_id, bounds);
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Id of the zone that received the last drag-over
    pub fn active_zone(&self) -> Option<&str> {
        self.last_active
            .and_then(|zone_id| self.zones.get(&zone_id))
            .map(|zone| zone.name.as_str())
    }

    /// Most specific zone containing `point`: smallest area, earliest
    /// registration on ties.
    fn zone_at(&self, point: Point) -> Option<u64> {
        self.index
            .query_point(point)
            .into_iter()
            .filter_map(|zone_id| self.index.bounds(zone_id).map(|b| (zone_id, b.area())))
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
            .map(|(zone_id, _)| zone_id)
    }

    fn drag_out(&mut self, zone_id: u64) {
        if let Some(zone) = self.zones.get_mut(&zone_id) {
            trace!(id = %zone.name, "Drag out");
            zone.handler.on_drag_out();
        }
    }

    /// Pointer moved during a drag. Returns the id of the zone under it.
    pub fn drag(&mut self, position: Point, payload: &P, element: Option<&str>) -> Option<&str> {
        let target = self.zone_at(position);

        if let Some(previous) = self.last_active {
            if Some(previous) != target {
                self.drag_out(previous);
            }
        }
        self.last_active = target;

        let zone = self.zones.get_mut(&target?)?;
        zone.handler.on_drag_over(&DragEvent {
            payload,
            position,
            element,
        });
        Some(zone.name.as_str())
    }

    /// The drag ended at `position`. Returns the id of the zone dropped on.
    pub fn drop(&mut self, position: Point, payload: &P, element: Option<&str>) -> Option<&str> {
        if let Some(previous) = self.last_active.take() {
            self.drag_out(previous);
        }

        let target = self.zone_at(position)?;
        let zone = self.zones.get_mut(&target)?;
        debug!(id = %zone.name, x = position.x, y = position.y, "Dropped on zone");
        zone.handler.on_drop(&DragEvent {
            payload,
            position,
            element,
        });
        Some(zone.name.as_str())
    }
}

impl<P> Default for DropZoneManager<P> {
    fn default() -> Self {
        Self::new()
    }
}
