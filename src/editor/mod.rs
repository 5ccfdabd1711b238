//! The rectangle/channel editor.
//!
//! `ShapeEditor` turns pointer events into committed shapes. It owns only
//! transient state: the active gesture (draft or drag override), hover flags,
//! the hit-test index and the last cursor position. The committed collection
//! belongs to the host; it is passed into every handler and replaced only
//! through [`EditorHost::on_complete`].
//!
//! Handlers are split by event the same way as the input module:
//! - `input::mouse_down` - press handling (arm a draft or grab a shape)
//! - `input::drag` - pointer moves (draft preview, drag preview)
//! - `input::mouse_up` - release handling (commit or discard)
//! - `input::hover` - hover classification

use crate::input::coords::{ChartScales, CoordinateContext, CoordinateConverter};
use crate::input::hover::{HoverHit, HoverTable};
use crate::input::{Draft, DragOverride, GestureState};
use crate::settings::EditorSettings;
use crate::spatial_index::SpatialIndex;
use crate::store::ShapeCollection;
use crate::types::{Appearance, DataPoint, PointerEvent, Shape, ShapeId};
use tracing::trace;

/// Callbacks from the editor to its host.
///
/// All methods default to no-ops.
pub trait EditorHost {
    /// A new draw gesture was armed; hosts typically disable other tools.
    fn on_start(&mut self) {}

    /// A draw or drag finished. `shapes` is the full replacement collection.
    fn on_complete(
        &mut self,
        _shapes: ShapeCollection,
        _ctx: &InteractionContext<'_>,
        _event: Option<&PointerEvent>,
    ) {
    }

    /// Hover over `shape` started or ended.
    fn on_hover(&mut self, _shape: &Shape, _hovering: bool) {}
}

/// Host that ignores every notification.
impl EditorHost for () {}

/// Chart state at the time of an event, handed back to the host on commit.
#[derive(Clone, Copy, Debug)]
pub struct InteractionContext<'a> {
    pub scales: &'a ChartScales,
    /// Plotted x positions, ascending; used for snapping
    pub x_samples: &'a [f64],
}

impl<'a> InteractionContext<'a> {
    pub fn new(scales: &'a ChartScales, x_samples: &'a [f64]) -> Self {
        Self { scales, x_samples }
    }

    pub fn coordinates(&self, snap: bool) -> CoordinateContext<'a> {
        CoordinateContext::new(self.scales, self.x_samples, snap)
    }
}

/// Stateful controller for drawing and dragging shapes.
pub struct ShapeEditor {
    pub(crate) settings: EditorSettings,
    pub(crate) gesture: GestureState,
    pub(crate) hover: HoverTable,
    pub(crate) index: SpatialIndex,
    pub(crate) cursor: Option<DataPoint>,
}

impl ShapeEditor {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            settings: settings.sanitized(),
            gesture: GestureState::Idle,
            hover: HoverTable::default(),
            index: SpatialIndex::new(),
            cursor: None,
        }
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: EditorSettings) {
        self.settings = settings.sanitized();
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    /// Disabling stops new drafts from arming; an in-flight gesture may finish.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.settings.enabled = enabled;
    }

    pub fn set_snap(&mut self, snap: bool) {
        self.settings.snap = snap;
    }

    /// Out-of-range values fall back to the default appearance.
    pub fn set_appearance(&mut self, appearance: Appearance) {
        self.settings.appearance = appearance;
        self.settings = std::mem::take(&mut self.settings).sanitized();
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.gesture.draft()
    }

    pub fn drag_override(&self) -> Option<&DragOverride> {
        self.gesture.drag()
    }

    pub fn is_hovering(&self, id: ShapeId) -> bool {
        self.hover.is_hovering(id)
    }

    /// The last hover classifier hit.
    pub fn hovered(&self) -> Option<HoverHit> {
        self.hover.current()
    }

    /// Last pointer position in data space.
    pub fn cursor(&self) -> Option<DataPoint> {
        self.cursor
    }

    /// Translate a device event using the scales current at this event.
    pub fn translate(&self, event: &PointerEvent, ctx: &InteractionContext<'_>) -> DataPoint {
        CoordinateConverter::screen_to_data(event.position, &ctx.coordinates(self.settings.snap))
    }

    /// Translate `event` and remember it as the cursor position.
    ///
    /// Returns `None` (and leaves the cursor alone) when the event does not
    /// map to a finite data point, e.g. a NaN device position.
    pub(crate) fn track_pointer(
        &mut self,
        event: &PointerEvent,
        ctx: &InteractionContext<'_>,
    ) -> Option<DataPoint> {
        let point = self.translate(event, ctx);
        if !point.is_finite() {
            trace!(?event, "pointer event ignored: non-finite position");
            return None;
        }
        self.cursor = Some(point);
        Some(point)
    }
}

impl Default for ShapeEditor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}
