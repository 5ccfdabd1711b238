//! Gesture state machine - the single source of truth for the active gesture.
//!
//! Drawing and dragging are mutually exclusive. Holding them in one enum
//! makes "draft and drag override at once" unrepresentable.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Drawing(armed)        (press on empty surface while enabled)
//! Drawing(armed) -> sizing      (first move sets the end point)
//! Drawing(sizing) -> offsetting (next move, or a release, sets the offset)
//! Drawing(offsetting) -> Idle   (release commits the shape)
//! Drawing(armed) -> Idle        (release without movement discards the draft)
//!
//! Idle -> Dragging              (drag routed up from a hovered shape)
//! Dragging -> Idle              (drag completion merges the override)
//!
//! Any -> Idle                   (pointer lost - discards without committing)
//! ```

use crate::types::{DataPoint, EdgeKind, GeometryPatch, HandleKind, ShapeGeometry, ShapeId, VertexKind};

/// The shape being drawn, not yet part of the collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Draft {
    pub start: DataPoint,
    /// Unset until the first pointer move
    pub end: Option<DataPoint>,
    /// Unset until the second edge is being placed
    pub offset: Option<f64>,
}

/// How far a draft has progressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftPhase {
    /// Start placed, waiting for the first move
    Armed,
    /// Primary edge placed, offset not started
    Sizing,
    /// Parallel edge being placed
    Offsetting,
}

impl Draft {
    pub fn armed(start: DataPoint) -> Self {
        Self {
            start,
            end: None,
            offset: None,
        }
    }

    pub fn phase(&self) -> DraftPhase {
        match (self.end, self.offset) {
            (None, _) => DraftPhase::Armed,
            (Some(_), None) => DraftPhase::Sizing,
            (Some(_), Some(_)) => DraftPhase::Offsetting,
        }
    }

    /// Geometry to preview, once there is an end point to draw to.
    pub fn geometry(&self) -> Option<ShapeGeometry> {
        self.end
            .map(|end| ShapeGeometry::new(self.start, end, self.offset.unwrap_or(0.0)))
    }
}

/// Where a handle drag was grabbed, used to turn pointer positions into
/// geometry patches relative to the shape as it was at grab time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleGrab {
    pub handle: HandleKind,
    pub origin: DataPoint,
    pub initial: ShapeGeometry,
}

impl HandleGrab {
    /// Patch that moves the grabbed handle to follow the pointer at `at`.
    pub fn patch_for(&self, at: DataPoint) -> GeometryPatch {
        let dx = at.x - self.origin.x;
        let dy = at.y - self.origin.y;
        let g = &self.initial;

        match self.handle {
            HandleKind::Body | HandleKind::Edge(EdgeKind::Primary) => GeometryPatch {
                start: Some(g.start.translated(dx, dy)),
                end: Some(g.end.translated(dx, dy)),
                offset: None,
            },
            HandleKind::Vertex(VertexKind::Start) => GeometryPatch::start(g.start.translated(dx, dy)),
            HandleKind::Vertex(VertexKind::End) => GeometryPatch::end(g.end.translated(dx, dy)),
            HandleKind::Edge(EdgeKind::Parallel)
            | HandleKind::Vertex(VertexKind::ParallelStart)
            | HandleKind::Vertex(VertexKind::ParallelEnd) => GeometryPatch::offset(g.offset + dy),
        }
    }
}

/// Live preview of a change to a committed shape.
///
/// Never written into the collection until the drag completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOverride {
    pub id: ShapeId,
    /// Position of the shape when the drag started
    pub index: usize,
    pub patch: GeometryPatch,
    /// Present when the drag was started through a hover handle
    pub grab: Option<HandleGrab>,
}

/// Unified gesture state for the editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GestureState {
    /// No gesture in progress
    #[default]
    Idle,

    /// Drawing a new shape
    Drawing {
        draft: Draft,
        /// Whether any pointer move arrived since the press
        moved: bool,
    },

    /// Dragging an existing shape
    Dragging { drag: DragOverride },
}

impl GestureState {
    /// Returns true if the state is Idle
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns true if a draft is in progress
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    /// Returns true if a drag override is in progress
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// The active draft, if drawing
    pub fn draft(&self) -> Option<&Draft> {
        match self {
            Self::Drawing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// The active drag override, if dragging
    pub fn drag(&self) -> Option<&DragOverride> {
        match self {
            Self::Dragging { drag } => Some(drag),
            _ => None,
        }
    }

    /// Id of the shape being dragged, if any
    pub fn dragged_shape(&self) -> Option<ShapeId> {
        self.drag().map(|d| d.id)
    }

    /// Reset to Idle, returning the previous state
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
