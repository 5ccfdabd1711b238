//! Press handling - arm a new draft or grab a hovered shape.

use crate::editor::{EditorHost, InteractionContext, ShapeEditor};
use crate::input::state::{Draft, DragOverride, GestureState, HandleGrab};
use crate::store::ShapeCollection;
use crate::types::{DataPoint, GeometryPatch, HandleKind, PointerEvent, ShapeId};
use tracing::{debug, trace};

impl ShapeEditor {
    /// Arm a new draft at `point`.
    ///
    /// Ignored while disabled, while a draft is already armed (stray double
    /// fires) and while a drag is in progress. Returns true when armed.
    pub fn on_press_start(&mut self, point: DataPoint, host: &mut impl EditorHost) -> bool {
        if !self.settings.enabled {
            trace!("press ignored: drawing disabled");
            return false;
        }
        if !point.is_finite() {
            trace!("press ignored: non-finite point");
            return false;
        }

        match self.gesture {
            GestureState::Idle => {}
            GestureState::Drawing { .. } => {
                trace!("press ignored: draft already armed");
                return false;
            }
            GestureState::Dragging { .. } => {
                trace!("press ignored: drag in progress");
                return false;
            }
        }

        self.gesture = GestureState::Drawing {
            draft: Draft::armed(point),
            moved: false,
        };
        debug!(x = point.x, y = point.y, "draft armed");
        host.on_start();
        true
    }

    /// Start dragging `handle` of the shape `id`, grabbed at `at`.
    ///
    /// Only valid from Idle. Returns true when the drag started.
    pub fn on_drag_start(
        &mut self,
        shapes: &ShapeCollection,
        id: ShapeId,
        handle: HandleKind,
        at: DataPoint,
    ) -> bool {
        if !self.gesture.is_idle() {
            trace!(shape = %id, "drag start ignored: gesture in progress");
            return false;
        }
        if !at.is_finite() {
            trace!(shape = %id, "drag start ignored: non-finite point");
            return false;
        }
        let Some(index) = shapes.index_of(id) else {
            trace!(shape = %id, "drag start ignored: unknown shape");
            return false;
        };
        let Some(shape) = shapes.get(index) else {
            return false;
        };

        self.gesture = GestureState::Dragging {
            drag: DragOverride {
                id,
                index,
                patch: GeometryPatch::default(),
                grab: Some(HandleGrab {
                    handle,
                    origin: at,
                    initial: shape.geometry(),
                }),
            },
        };
        debug!(shape = %id, index, ?handle, "drag started");
        true
    }

    /// Route a device press: grab the hovered shape if there is one,
    /// otherwise start drawing.
    pub fn handle_pointer_down(
        &mut self,
        shapes: &ShapeCollection,
        event: &PointerEvent,
        ctx: &InteractionContext<'_>,
        host: &mut impl EditorHost,
    ) {
        let Some(point) = self.track_pointer(event, ctx) else {
            return;
        };

        if self.gesture.is_idle() {
            if let Some(hit) = self.update_hover(shapes, point, ctx, host) {
                self.on_drag_start(shapes, hit.id, hit.handle, point);
                return;
            }
        }

        self.on_press_start(point, host);
    }
}
