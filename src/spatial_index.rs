//! Spatial Index Module
//!
//! R-tree over drop zone bounds. Point queries during a drag are O(log n)
//! instead of a scan over every registered zone.

use crate::geometry::{Point, Rect};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// A zone's bounding box in client coordinates.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub zone_id: u64,
    pub bounds: Rect,
}

impl SpatialEntry {
    pub fn new(zone_id: u64, bounds: Rect) -> Self {
        Self { zone_id, bounds }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.left(), self.bounds.top()],
            [self.bounds.right(), self.bounds.bottom()],
        )
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.zone_id == other.zone_id
    }
}

pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<u64, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    /// Insert or move a zone.
    pub fn insert(&mut self, zone_id: u64, bounds: Rect) {
        if let Some(old_entry) = self.entries.remove(&zone_id) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(zone_id, bounds);
        self.tree.insert(entry);
        self.entries.insert(zone_id, entry);
    }

    pub fn remove(&mut self, zone_id: u64) -> bool {
        if let Some(entry) = self.entries.remove(&zone_id) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    pub fn bounds(&self, zone_id: u64) -> Option<Rect> {
        self.entries.get(&zone_id).map(|entry| entry.bounds)
    }

    /// Zones whose bounds contain `point`, edges included.
    pub fn query_point(&self, point: Point) -> Vec<u64> {
        let point_envelope = AABB::from_point([point.x, point.y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.bounds.contains(point))
            .map(|entry| entry.zone_id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
