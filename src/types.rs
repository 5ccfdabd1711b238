//! Core types for the chartmark annotation system.
//!
//! This module defines the fundamental data structures shared by the editor,
//! the hover classifier and the render contract: points in data and screen
//! space, shape geometry, per-shape appearance and the handle taxonomy.

use crate::constants::{
    DEFAULT_CURSOR_OPACITY, DEFAULT_CURSOR_RADIUS, DEFAULT_CURSOR_STROKE,
    DEFAULT_CURSOR_STROKE_WIDTH, DEFAULT_EDGE_COLOR, DEFAULT_EDGE_STROKE_WIDTH, DEFAULT_FILL,
    DEFAULT_FILL_OPACITY, DEFAULT_HANDLE_RADIUS, DEFAULT_STROKE, DEFAULT_STROKE_OPACITY,
    DEFAULT_STROKE_WIDTH, HOVER_TEXT_BG_HEIGHT, HOVER_TEXT_BG_WIDTH, HOVER_TEXT_LABEL,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Points
// ============================================================================

/// A point in logical data space (x in sample units, y in value units).
///
/// Serialized as a two-element `[x, y]` array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Offset this point by `(dx, dy)`.
    #[inline]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<[f64; 2]> for DataPoint {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<DataPoint> for [f64; 2] {
    fn from(p: DataPoint) -> Self {
        [p.x, p.y]
    }
}

impl From<(f64, f64)> for DataPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A point in device (pixel) space, origin at the top-left of the plot area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A raw pointer event as delivered by the host surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Pointer position in device space
    pub position: ScreenPoint,
    /// Whether shift was held (hosts use this for additive selection)
    #[serde(default)]
    pub shift: bool,
}

impl PointerEvent {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: ScreenPoint::new(x, y),
            shift: false,
        }
    }
}

// ============================================================================
// Shape identity and geometry
// ============================================================================

/// Stable identifier for a committed shape.
///
/// Positions in the collection change whenever the host reorders or filters
/// it; the id does not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(Uuid);

impl ShapeId {
    /// Mint a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Deterministic id, for fixtures and replay scripts.
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The geometric part of a shape: a primary edge from `start` to `end` and a
/// parallel edge displaced vertically by `offset`.
///
/// A rectangle is the special case of a horizontal primary edge; the editor
/// treats both as the same parameterized kind.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShapeGeometry {
    pub start: DataPoint,
    pub end: DataPoint,
    pub offset: f64,
}

impl ShapeGeometry {
    pub fn new(start: DataPoint, end: DataPoint, offset: f64) -> Self {
        Self { start, end, offset }
    }

    /// Start of the parallel edge.
    #[inline]
    pub fn parallel_start(&self) -> DataPoint {
        self.start.translated(0.0, self.offset)
    }

    /// End of the parallel edge.
    #[inline]
    pub fn parallel_end(&self) -> DataPoint {
        self.end.translated(0.0, self.offset)
    }

    /// Corners in winding order: start, end, parallel end, parallel start.
    pub fn corners(&self) -> [DataPoint; 4] {
        [self.start, self.end, self.parallel_end(), self.parallel_start()]
    }

    /// Axis-aligned bounds as `(min, max)`.
    pub fn bounds(&self) -> (DataPoint, DataPoint) {
        let corners = self.corners();
        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min.x = min.x.min(c.x);
            min.y = min.y.min(c.y);
            max.x = max.x.max(c.x);
            max.y = max.y.max(c.y);
        }
        (min, max)
    }

    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.offset.is_finite()
    }

    /// Apply a partial update, returning the patched geometry.
    pub fn patched(&self, patch: &GeometryPatch) -> Self {
        Self {
            start: patch.start.unwrap_or(self.start),
            end: patch.end.unwrap_or(self.end),
            offset: patch.offset.unwrap_or(self.offset),
        }
    }
}

/// Partial geometry used for live drag previews.
///
/// Fields left as `None` keep the committed value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "startPoint")]
    pub start: Option<DataPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "endPoint")]
    pub end: Option<DataPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,
}

impl GeometryPatch {
    pub fn start(point: DataPoint) -> Self {
        Self {
            start: Some(point),
            ..Self::default()
        }
    }

    pub fn end(point: DataPoint) -> Self {
        Self {
            end: Some(point),
            ..Self::default()
        }
    }

    pub fn offset(offset: f64) -> Self {
        Self {
            offset: Some(offset),
            ..Self::default()
        }
    }

    /// Later fields win; unset fields in `other` keep ours.
    pub fn merge(&mut self, other: GeometryPatch) {
        if other.start.is_some() {
            self.start = other.start;
        }
        if other.end.is_some() {
            self.end = other.end;
        }
        if other.offset.is_some() {
            self.offset = other.offset;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.offset.is_none()
    }

    /// Whether every set field is finite.
    pub fn is_finite(&self) -> bool {
        self.start.is_none_or(|p| p.is_finite())
            && self.end.is_none_or(|p| p.is_finite())
            && self.offset.is_none_or(f64::is_finite)
    }
}

// ============================================================================
// Shape
// ============================================================================

/// A committed rectangle/channel annotation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// Stable identity; minted on load when absent
    #[serde(default)]
    pub id: ShapeId,
    pub start_point: DataPoint,
    pub end_point: DataPoint,
    /// Vertical displacement of the parallel edge
    #[serde(default)]
    pub offset: f64,
    #[serde(default)]
    pub selected: bool,
    /// Per-shape appearance; merged over the collection default when rendering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance: Option<AppearanceOverride>,
}

impl Shape {
    pub fn new(start: DataPoint, end: DataPoint, offset: f64) -> Self {
        Self {
            id: ShapeId::new(),
            start_point: start,
            end_point: end,
            offset,
            selected: false,
            appearance: None,
        }
    }

    pub fn with_id(mut self, id: ShapeId) -> Self {
        self.id = id;
        self
    }

    pub fn geometry(&self) -> ShapeGeometry {
        ShapeGeometry::new(self.start_point, self.end_point, self.offset)
    }

    pub fn set_geometry(&mut self, geometry: ShapeGeometry) {
        self.start_point = geometry.start;
        self.end_point = geometry.end;
        self.offset = geometry.offset;
    }

    /// Appearance to render with, given the collection-level default.
    pub fn resolved_appearance(&self, default: &Appearance) -> Appearance {
        match &self.appearance {
            Some(over) => default.merged(over),
            None => default.clone(),
        }
    }
}

// ============================================================================
// Appearance
// ============================================================================

/// Full visual appearance for a shape and its edge handles.
///
/// Every field is required when deserialized; partial styling goes through
/// [`AppearanceOverride`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    pub stroke: String,
    pub stroke_opacity: f64,
    pub stroke_width: f64,
    pub fill: String,
    pub fill_opacity: f64,
    pub edge_stroke: String,
    pub edge_fill: String,
    pub edge_fill2: String,
    pub edge_stroke_width: f64,
    /// Edge handle radius
    pub r: f64,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            stroke: DEFAULT_STROKE.to_string(),
            stroke_opacity: DEFAULT_STROKE_OPACITY,
            stroke_width: DEFAULT_STROKE_WIDTH,
            fill: DEFAULT_FILL.to_string(),
            fill_opacity: DEFAULT_FILL_OPACITY,
            edge_stroke: DEFAULT_EDGE_COLOR.to_string(),
            edge_fill: DEFAULT_EDGE_COLOR.to_string(),
            edge_fill2: DEFAULT_EDGE_COLOR.to_string(),
            edge_stroke_width: DEFAULT_EDGE_STROKE_WIDTH,
            r: DEFAULT_HANDLE_RADIUS,
        }
    }
}

impl Appearance {
    /// Field-by-field merge: set fields of `over` replace ours.
    pub fn merged(&self, over: &AppearanceOverride) -> Appearance {
        Appearance {
            stroke: over.stroke.clone().unwrap_or_else(|| self.stroke.clone()),
            stroke_opacity: over.stroke_opacity.unwrap_or(self.stroke_opacity),
            stroke_width: over.stroke_width.unwrap_or(self.stroke_width),
            fill: over.fill.clone().unwrap_or_else(|| self.fill.clone()),
            fill_opacity: over.fill_opacity.unwrap_or(self.fill_opacity),
            edge_stroke: over.edge_stroke.clone().unwrap_or_else(|| self.edge_stroke.clone()),
            edge_fill: over.edge_fill.clone().unwrap_or_else(|| self.edge_fill.clone()),
            edge_fill2: over.edge_fill2.clone().unwrap_or_else(|| self.edge_fill2.clone()),
            edge_stroke_width: over.edge_stroke_width.unwrap_or(self.edge_stroke_width),
            r: over.r.unwrap_or(self.r),
        }
    }
}

/// Per-shape appearance; any subset of fields may be set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppearanceOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_stroke: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_fill2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
}

impl AppearanceOverride {
    /// Numeric fields that are set, with their names (used for validation).
    pub fn numeric_fields(&self) -> [(&'static str, Option<f64>); 5] {
        [
            ("strokeOpacity", self.stroke_opacity),
            ("strokeWidth", self.stroke_width),
            ("fillOpacity", self.fill_opacity),
            ("edgeStrokeWidth", self.edge_stroke_width),
            ("r", self.r),
        ]
    }

    /// First numeric field that is non-finite, negative, or an opacity above 1.
    pub fn first_invalid(&self) -> Option<(&'static str, f64)> {
        self.numeric_fields().into_iter().find_map(|(field, value)| {
            let value = value?;
            let is_opacity = field.ends_with("Opacity");
            (!value.is_finite() || value < 0.0 || (is_opacity && value > 1.0))
                .then_some((field, value))
        })
    }
}

impl From<&Appearance> for AppearanceOverride {
    fn from(a: &Appearance) -> Self {
        Self {
            stroke: Some(a.stroke.clone()),
            stroke_opacity: Some(a.stroke_opacity),
            stroke_width: Some(a.stroke_width),
            fill: Some(a.fill.clone()),
            fill_opacity: Some(a.fill_opacity),
            edge_stroke: Some(a.edge_stroke.clone()),
            edge_fill: Some(a.edge_fill.clone()),
            edge_fill2: Some(a.edge_fill2.clone()),
            edge_stroke_width: Some(a.edge_stroke_width),
            r: Some(a.r),
        }
    }
}

/// Tooltip shown near the pointer while a shape is hovered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HoverText {
    pub enable: bool,
    pub bg_height: f64,
    pub bg_width: f64,
    pub text: String,
    pub font_family: String,
    pub font_size: f64,
    pub fill: String,
    pub bg_fill: String,
    pub bg_opacity: f64,
}

impl Default for HoverText {
    fn default() -> Self {
        Self {
            enable: true,
            bg_height: HOVER_TEXT_BG_HEIGHT,
            bg_width: HOVER_TEXT_BG_WIDTH,
            text: HOVER_TEXT_LABEL.to_string(),
            font_family: "Helvetica Neue, Helvetica, Arial, sans-serif".to_string(),
            font_size: 14.0,
            fill: "#000000".to_string(),
            bg_fill: "#FA9325".to_string(),
            bg_opacity: 0.3,
        }
    }
}

/// Style of the live cursor indicator shown while the tool is enabled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CursorIndicator {
    pub stroke: String,
    pub stroke_width: f64,
    pub opacity: f64,
    pub r: f64,
}

impl Default for CursorIndicator {
    fn default() -> Self {
        Self {
            stroke: DEFAULT_CURSOR_STROKE.to_string(),
            stroke_width: DEFAULT_CURSOR_STROKE_WIDTH,
            opacity: DEFAULT_CURSOR_OPACITY,
            r: DEFAULT_CURSOR_RADIUS,
        }
    }
}

// ============================================================================
// Handles
// ============================================================================

/// Which edge of a shape a handle belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// The start-to-end edge
    Primary,
    /// The edge displaced by `offset`
    Parallel,
}

/// Which corner of a shape a handle belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexKind {
    Start,
    End,
    ParallelStart,
    ParallelEnd,
}

/// Part of a shape the pointer is over.
///
/// Decides whether a press starts a whole-shape drag or an edge/vertex drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    Body,
    Edge(EdgeKind),
    Vertex(VertexKind),
}

impl HandleKind {
    /// Cursor hint hosts can show for this handle
    pub fn cursor(&self) -> &'static str {
        match self {
            HandleKind::Body => "move",
            HandleKind::Edge(_) => "row-resize",
            HandleKind::Vertex(_) => "crosshair",
        }
    }
}
