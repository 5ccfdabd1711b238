//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestCollectionBuilder` - Builder pattern for creating shape collections
//! - `RecordingHost` - An `EditorHost` that records every notification
//! - `test_scales()` - Scales where device and data coordinates line up

use chartmark::input::coords::{ChartScales, LinearScale};
use chartmark::{DataPoint, EditorHost, InteractionContext, PointerEvent, Shape, ShapeCollection, ShapeId};

// ============================================================================
// Points and scales
// ============================================================================

pub fn p(x: f64, y: f64) -> DataPoint {
    DataPoint::new(x, y)
}

pub fn id(n: u128) -> ShapeId {
    ShapeId::from_u128(n)
}

/// x maps 1:1; y is flipped so device y = 100 - data y.
pub fn test_scales() -> ChartScales {
    ChartScales::new(
        LinearScale::new((0.0, 100.0), (0.0, 100.0)).unwrap(),
        LinearScale::new((0.0, 100.0), (100.0, 0.0)).unwrap(),
    )
}

/// Device event for the data point `(x, y)` under `test_scales()`.
pub fn event_at(x: f64, y: f64) -> PointerEvent {
    PointerEvent::at(x, 100.0 - y)
}

// ============================================================================
// TestCollectionBuilder
// ============================================================================

/// Builder for shape collections with deterministic ids.
///
/// # Example
/// ```ignore
/// let shapes = TestCollectionBuilder::new()
///     .with_shape(1, (0.0, 0.0), (10.0, 10.0), 5.0)
///     .selected(1)
///     .build();
/// ```
#[derive(Default)]
pub struct TestCollectionBuilder {
    shapes: Vec<Shape>,
}

impl TestCollectionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape with id `n`.
    pub fn with_shape(mut self, n: u128, start: (f64, f64), end: (f64, f64), offset: f64) -> Self {
        self.shapes
            .push(Shape::new(start.into(), end.into(), offset).with_id(id(n)));
        self
    }

    /// Mark shape `n` selected.
    pub fn selected(mut self, n: u128) -> Self {
        for shape in &mut self.shapes {
            if shape.id == id(n) {
                shape.selected = true;
            }
        }
        self
    }

    pub fn build(self) -> ShapeCollection {
        ShapeCollection::new(self.shapes).unwrap()
    }
}

// ============================================================================
// RecordingHost
// ============================================================================

/// A commit as seen by the host.
pub struct Commit {
    pub shapes: ShapeCollection,
    pub had_event: bool,
}

/// Host that records every callback.
#[derive(Default)]
pub struct RecordingHost {
    pub starts: usize,
    pub commits: Vec<Commit>,
    pub hovers: Vec<(ShapeId, bool)>,
}

impl RecordingHost {
    pub fn last_commit(&self) -> &ShapeCollection {
        &self.commits.last().expect("no commit recorded").shapes
    }
}

impl EditorHost for RecordingHost {
    fn on_start(&mut self) {
        self.starts += 1;
    }

    fn on_complete(
        &mut self,
        shapes: ShapeCollection,
        _ctx: &InteractionContext<'_>,
        event: Option<&PointerEvent>,
    ) {
        self.commits.push(Commit {
            shapes,
            had_event: event.is_some(),
        });
    }

    fn on_hover(&mut self, shape: &Shape, hovering: bool) {
        self.hovers.push((shape.id, hovering));
    }
}
