//! Release handling - commit or discard the active gesture.

use crate::editor::{EditorHost, InteractionContext, ShapeEditor};
use crate::input::state::{DraftPhase, GestureState};
use crate::store::ShapeCollection;
use crate::types::{AppearanceOverride, DataPoint, PointerEvent, Shape};
use tracing::{debug, trace, warn};

impl ShapeEditor {
    /// Finish (or advance) the draw gesture at `point`.
    ///
    /// - no movement since the press: the draft is discarded silently
    /// - primary edge placed but no offset yet: offset becomes 0 and the
    ///   gesture waits for the second edge
    /// - offset placed: the shape is appended, selected, and handed to the
    ///   host as a new collection
    ///
    /// Returns true when a shape was committed.
    pub fn on_press_end(
        &mut self,
        shapes: &ShapeCollection,
        point: DataPoint,
        ctx: &InteractionContext<'_>,
        event: Option<&PointerEvent>,
        host: &mut impl EditorHost,
    ) -> bool {
        let GestureState::Drawing { draft, moved } = &mut self.gesture else {
            trace!("release ignored: no draft");
            return false;
        };

        if !*moved {
            self.gesture.reset();
            debug!(x = point.x, y = point.y, "draft discarded: no movement");
            return false;
        }

        match draft.phase() {
            DraftPhase::Armed => {
                self.gesture.reset();
                debug!("draft discarded: no end point");
                false
            }
            DraftPhase::Sizing => {
                draft.offset = Some(0.0);
                debug!("primary edge released; waiting for offset");
                false
            }
            DraftPhase::Offsetting => {
                let Some(geometry) = draft.geometry() else {
                    return false;
                };
                let mut shape = Shape::new(geometry.start, geometry.end, geometry.offset);
                shape.appearance = Some(AppearanceOverride::from(&self.settings.appearance));

                self.gesture.reset();
                let next = match shapes.with_committed(shape) {
                    Ok(next) => next,
                    Err(e) => {
                        warn!("draft discarded: {}", e);
                        return false;
                    }
                };
                debug!(
                    count = next.len(),
                    offset = geometry.offset,
                    "shape committed"
                );
                host.on_complete(next, ctx, event);
                true
            }
        }
    }

    /// Merge the drag override into a new collection and hand it to the host.
    ///
    /// The override is discarded without a commit when its shape can no
    /// longer be found or the patched shape fails validation. Returns true
    /// when a commit happened.
    pub fn on_drag_complete(
        &mut self,
        shapes: &ShapeCollection,
        ctx: &InteractionContext<'_>,
        host: &mut impl EditorHost,
    ) -> bool {
        if !self.gesture.is_dragging() {
            trace!("drag completion ignored: nothing dragged");
            return false;
        }
        let GestureState::Dragging { drag } = self.gesture.take() else {
            return false;
        };

        let Some(index) = shapes.resolve(drag.id, drag.index) else {
            warn!(shape = %drag.id, "drag override discarded: shape no longer in collection");
            return false;
        };
        if index != drag.index {
            debug!(shape = %drag.id, from = drag.index, to = index, "dragged shape moved during drag");
        }

        let next = match shapes.with_patched(index, &drag.patch) {
            Ok(next) => next,
            Err(e) => {
                warn!(shape = %drag.id, "drag override discarded: {}", e);
                return false;
            }
        };
        debug!(shape = %drag.id, index, "drag committed");
        host.on_complete(next, ctx, None);
        true
    }

    /// Abandon any in-flight gesture without committing.
    ///
    /// Hosts call this when pointer capture is lost so a draft or override
    /// is never stranded. Returns true if something was discarded.
    pub fn on_pointer_lost(&mut self) -> bool {
        match self.gesture.take() {
            GestureState::Idle => false,
            GestureState::Drawing { .. } => {
                debug!("pointer lost: draft discarded");
                true
            }
            GestureState::Dragging { drag } => {
                debug!(shape = %drag.id, "pointer lost: drag override discarded");
                true
            }
        }
    }

    /// Route a device release to the active gesture.
    pub fn handle_pointer_up(
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
            GestureState::Idle => {}
            GestureState::Drawing { .. } => {
                self.on_press_end(shapes, point, ctx, Some(event), host);
            }
            GestureState::Dragging { .. } => {
                self.on_drag_complete(shapes, ctx, host);
            }
        }
    }
}
