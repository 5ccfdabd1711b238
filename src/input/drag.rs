//! Move operations - draft preview and drag preview.
//!
//! ## Performance Notes
//!
//! Pointer moves arrive at display rate. Drag previews only merge a patch
//! into the override (O(1)); the collection is not touched or rescanned
//! until the drag completes.

use crate::constants::{DRAG_BUDGET_MS, VERTICAL_EDGE_EPSILON};
use crate::editor::{EditorHost, InteractionContext, ShapeEditor};
use crate::geometry::signed_offset;
use crate::input::state::{DragOverride, DraftPhase, GestureState};
use crate::profile_scope;
use crate::store::ShapeCollection;
use crate::types::{DataPoint, GeometryPatch, PointerEvent, ShapeId};
use tracing::{debug, trace};

impl ShapeEditor {
    /// Advance the draft with a pointer sample.
    ///
    /// The first sample places the end of the primary edge; later samples
    /// set the parallel edge's offset live. Returns true if the draft changed.
    pub fn on_pointer_move(&mut self, point: DataPoint) -> bool {
        let GestureState::Drawing { draft, moved } = &mut self.gesture else {
            return false;
        };
        if !point.is_finite() {
            trace!("draft sample ignored: non-finite point");
            return false;
        }

        match draft.phase() {
            DraftPhase::Armed => {
                // A vertical primary edge could never take an offset
                if (point.x - draft.start.x).abs() < VERTICAL_EDGE_EPSILON {
                    trace!(x = point.x, "primary edge not placed: no horizontal extent");
                    return false;
                }
                *moved = true;
                draft.end = Some(point);
                debug!(x = point.x, y = point.y, "primary edge placed");
                true
            }
            DraftPhase::Sizing | DraftPhase::Offsetting => {
                *moved = true;
                let Some(end) = draft.end else {
                    return false;
                };
                match signed_offset(draft.start, end, point) {
                    Some(offset) => {
                        if draft.offset.is_none() {
                            debug!(offset, "offsetting started");
                        }
                        draft.offset = Some(offset);
                        true
                    }
                    None => {
                        trace!("offset undefined for a vertical primary edge");
                        false
                    }
                }
            }
        }
    }

    /// Merge a live geometry preview for shape `id`.
    ///
    /// The first call of a gesture resolves the shape's position once; later
    /// calls only merge. Ignored while drawing or while another shape is
    /// being dragged. Returns true if the override changed.
    pub fn on_drag_move(&mut self, shapes: &ShapeCollection, id: ShapeId, patch: GeometryPatch) -> bool {
        profile_scope!("on_drag_move", DRAG_BUDGET_MS);

        if !patch.is_finite() {
            trace!(shape = %id, ?patch, "drag move ignored: non-finite patch");
            return false;
        }

        match &mut self.gesture {
            GestureState::Dragging { drag } if drag.id == id => {
                drag.patch.merge(patch);
                true
            }
            GestureState::Dragging { drag } => {
                trace!(shape = %id, dragging = %drag.id, "drag move ignored: other shape dragging");
                false
            }
            GestureState::Drawing { .. } => {
                trace!(shape = %id, "drag move ignored: drawing");
                false
            }
            GestureState::Idle => {
                let Some(index) = shapes.index_of(id) else {
                    trace!(shape = %id, "drag move ignored: unknown shape");
                    return false;
                };
                self.gesture = GestureState::Dragging {
                    drag: DragOverride {
                        id,
                        index,
                        patch,
                        grab: None,
                    },
                };
                debug!(shape = %id, index, "drag started");
                true
            }
        }
    }

    /// Move the grabbed handle to follow the pointer at `at`.
    pub fn on_drag_to(&mut self, at: DataPoint) -> bool {
        profile_scope!("on_drag_to", DRAG_BUDGET_MS);

        let GestureState::Dragging { drag } = &mut self.gesture else {
            return false;
        };
        let Some(grab) = drag.grab else {
            return false;
        };
        if !at.is_finite() {
            trace!("drag sample ignored: non-finite point");
            return false;
        }
        drag.patch.merge(grab.patch_for(at));
        true
    }

    /// Route a device move to the active gesture, or to hover when idle.
    pub fn handle_pointer_move(
        &mut self,
        shapes: &ShapeCollection,
        event: &PointerEvent,
        ctx: &InteractionContext<'_>,
        host: &mut impl EditorHost,
    ) {
        let Some(point) = self.track_pointer(event, ctx) else {
            return;
        };

        match self.gesture {
            GestureState::Idle => {
                self.update_hover(shapes, point, ctx, host);
            }
            GestureState::Drawing { .. } => {
                self.on_pointer_move(point);
            }
            GestureState::Dragging { .. } => {
                self.on_drag_to(point);
            }
        }
    }
}
