//! Spatial Index Module
//!
//! Provides R-tree based broad-phase lookup for hover classification.
//! Each committed shape is stored by its axis-aligned bounds; a pointer
//! query expands the point by the hit tolerance and returns the few shapes
//! whose bounds it touches, which are then classified exactly.

use crate::geometry::HitTolerance;
use crate::store::ShapeCollection;
use crate::types::{DataPoint, ShapeGeometry, ShapeId};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// A spatial entry representing a shape's bounding box.
#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub shape_id: ShapeId,
    /// Position in the collection at the time of indexing (z order)
    pub index: usize,
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl SpatialEntry {
    pub fn new(shape_id: ShapeId, index: usize, geometry: &ShapeGeometry) -> Self {
        let (min, max) = geometry.bounds();
        Self {
            shape_id,
            index,
            min_x: min.x,
            min_y: min.y,
            max_x: max.x,
            max_y: max.y,
        }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.shape_id == other.shape_id
    }
}

/// Spatial index over one revision of a shape collection.
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<ShapeId, SpatialEntry>,
    /// Revision of the collection this index was built from
    revision: Option<u64>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
            revision: None,
        }
    }

    /// Build an index for every shape in `shapes`.
    pub fn from_collection(shapes: &ShapeCollection) -> Self {
        let mut index = Self::new();
        index.rebuild(shapes);
        index
    }

    /// Rebuild if `shapes` is a different revision than the indexed one.
    ///
    /// Returns true when a rebuild happened.
    pub fn sync(&mut self, shapes: &ShapeCollection) -> bool {
        if self.revision == Some(shapes.revision()) {
            return false;
        }
        self.rebuild(shapes);
        true
    }

    pub fn rebuild(&mut self, shapes: &ShapeCollection) {
        let entries: Vec<SpatialEntry> = shapes
            .iter()
            .enumerate()
            .map(|(i, s)| SpatialEntry::new(s.id, i, &s.geometry()))
            .collect();

        self.entries = entries.iter().map(|e| (e.shape_id, *e)).collect();
        self.tree = RTree::bulk_load(entries);
        self.revision = Some(shapes.revision());
    }

    /// Shapes whose bounds lie within `tol` of `point`, topmost first.
    pub fn query_point(&self, point: DataPoint, tol: HitTolerance) -> Vec<SpatialEntry> {
        let envelope = AABB::from_corners(
            [point.x - tol.x, point.y - tol.y],
            [point.x + tol.x, point.y + tol.y],
        );

        let mut hits: Vec<SpatialEntry> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .copied()
            .collect();
        hits.sort_by(|a, b| b.index.cmp(&a.index));
        hits
    }

    /// Shapes whose bounds intersect a rectangular region.
    pub fn query_rect(&self, min: DataPoint, max: DataPoint) -> Vec<ShapeId> {
        let envelope = AABB::from_corners([min.x, min.y], [max.x, max.y]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.shape_id)
            .collect()
    }

    pub fn get(&self, id: ShapeId) -> Option<&SpatialEntry> {
        self.entries.get(&id)
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
        self.revision = None;
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
