//! Hover classification and the hover side table.
//!
//! Classification runs on every idle pointer move, so it goes through the
//! R-tree first and only tests the handful of shapes near the pointer
//! exactly. Hover state lives in a side table keyed by `ShapeId`; it never
//! touches committed shape data.

use crate::editor::{EditorHost, InteractionContext, ShapeEditor};
use crate::geometry::{HitTolerance, near_point, near_segment, point_in_quad};
use crate::profile_scope;
use crate::spatial_index::SpatialIndex;
use crate::store::ShapeCollection;
use crate::types::{DataPoint, EdgeKind, HandleKind, Shape, ShapeGeometry, ShapeId, VertexKind};
use std::collections::HashSet;
use tracing::trace;

/// Result of classifying the pointer against a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverHit {
    pub id: ShapeId,
    pub index: usize,
    pub handle: HandleKind,
}

/// Classify `point` against a single shape.
///
/// Vertices win over edges, edges over the body, so a press near a corner
/// always grabs the corner.
pub fn classify(geometry: &ShapeGeometry, point: DataPoint, tol: HitTolerance) -> Option<HandleKind> {
    let vertices = [
        (geometry.start, VertexKind::Start),
        (geometry.end, VertexKind::End),
        (geometry.parallel_start(), VertexKind::ParallelStart),
        (geometry.parallel_end(), VertexKind::ParallelEnd),
    ];
    for (vertex, kind) in vertices {
        if near_point(point, vertex, tol) {
            return Some(HandleKind::Vertex(kind));
        }
    }

    if near_segment(point, geometry.start, geometry.end, tol) {
        return Some(HandleKind::Edge(EdgeKind::Primary));
    }
    if near_segment(point, geometry.parallel_start(), geometry.parallel_end(), tol) {
        return Some(HandleKind::Edge(EdgeKind::Parallel));
    }

    point_in_quad(point, &geometry.corners()).then_some(HandleKind::Body)
}

/// Topmost shape under `point`, if any.
///
/// `index` must have been synced to `shapes`.
pub fn classify_collection(
    index: &SpatialIndex,
    shapes: &ShapeCollection,
    point: DataPoint,
    tol: HitTolerance,
) -> Option<HoverHit> {
    index.query_point(point, tol).into_iter().find_map(|entry| {
        let shape = shapes.get(entry.index)?;
        classify(&shape.geometry(), point, tol).map(|handle| HoverHit {
            id: shape.id,
            index: entry.index,
            handle,
        })
    })
}

/// Transient hover annotations, kept apart from committed shape data.
#[derive(Debug, Default)]
pub struct HoverTable {
    hovering: HashSet<ShapeId>,
    current: Option<HoverHit>,
}

impl HoverTable {
    pub fn is_hovering(&self, id: ShapeId) -> bool {
        self.hovering.contains(&id)
    }

    /// The last classifier hit.
    pub fn current(&self) -> Option<HoverHit> {
        self.current
    }

    /// Record a hover flag; returns true when it changed.
    pub fn set(&mut self, id: ShapeId, hovering: bool) -> bool {
        if hovering {
            self.hovering.insert(id)
        } else {
            self.hovering.remove(&id)
        }
    }

    pub fn len(&self) -> usize {
        self.hovering.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hovering.is_empty()
    }

    pub fn clear(&mut self) {
        self.hovering.clear();
        self.current = None;
    }
}

impl ShapeEditor {
    /// Record a hover change for `shape` and forward it to the host.
    ///
    /// Only the side table changes; nothing is committed.
    pub fn on_hover_change(&mut self, shape: &Shape, hovering: bool, host: &mut impl EditorHost) {
        if self.hover.set(shape.id, hovering) {
            trace!(shape = %shape.id, hovering, "hover changed");
        }
        host.on_hover(shape, hovering);
    }

    /// Re-run the classifier at `point` and emit hover transitions.
    pub fn update_hover(
        &mut self,
        shapes: &ShapeCollection,
        point: DataPoint,
        ctx: &InteractionContext<'_>,
        host: &mut impl EditorHost,
    ) -> Option<HoverHit> {
        profile_scope!("update_hover", crate::constants::HOVER_BUDGET_MS);

        self.index.sync(shapes);
        let tol = ctx.scales.tolerance(self.settings.hover_tolerance_px);
        let hit = if tol.is_valid() {
            classify_collection(&self.index, shapes, point, tol)
        } else {
            trace!(?tol, "skipping hover classification with degenerate tolerance");
            None
        };

        let previous = std::mem::replace(&mut self.hover.current, hit);
        let previous_id = previous.map(|h| h.id);
        let next_id = hit.map(|h| h.id);

        if previous_id != next_id {
            if let Some(prev) = previous {
                // The shape may have moved or gone since it was hovered
                match shapes.resolve(prev.id, prev.index).and_then(|i| shapes.get(i)) {
                    Some(shape) => self.on_hover_change(shape, false, host),
                    None => {
                        self.hover.set(prev.id, false);
                    }
                }
            }
            if let Some(shape) = hit.and_then(|h| shapes.get(h.index)) {
                self.on_hover_change(shape, true, host);
            }
        }

        hit
    }
}
