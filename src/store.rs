//! Shape collection store.
//!
//! `ShapeCollection` is the host-owned, ordered list of committed shapes.
//! Order is render (z) order: later shapes draw on top. The collection is
//! never mutated in place; commits produce a new value with a new revision
//! and hand it back to the host.
//!
//! Every collection is validated on construction, so the editor and the
//! renderer never see NaN geometry, duplicate ids or nonsensical
//! appearance values.

use crate::error::{ShapeError, ShapeResult};
use crate::types::{GeometryPatch, Shape, ShapeId};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for collection revisions.
static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// Validated, immutable sequence of committed shapes.
#[derive(Clone, Debug, Deserialize)]
#[serde(try_from = "Vec<Shape>")]
pub struct ShapeCollection {
    shapes: Vec<Shape>,
    /// Changes whenever the content may have changed; used for cache keys
    revision: u64,
}

impl ShapeCollection {
    /// Validate and wrap a host-supplied list of shapes.
    pub fn new(shapes: Vec<Shape>) -> ShapeResult<Self> {
        validate(&shapes)?;
        Ok(Self {
            shapes,
            revision: next_revision(),
        })
    }

    pub fn empty() -> Self {
        Self {
            shapes: Vec::new(),
            revision: next_revision(),
        }
    }

    /// Parse the persisted layout: a JSON array of shape records.
    pub fn from_json(json: &str) -> ShapeResult<Self> {
        let shapes: Vec<Shape> = serde_json::from_str(json)?;
        Self::new(shapes)
    }

    pub fn to_json_pretty(&self) -> ShapeResult<String> {
        Ok(serde_json::to_string_pretty(&self.shapes)?)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    pub fn as_slice(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn into_vec(self) -> Vec<Shape> {
        self.shapes
    }

    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == id)
    }

    /// Find `id`, checking `hint` first.
    ///
    /// O(1) when the shape has not moved since the hint was taken.
    pub fn resolve(&self, id: ShapeId, hint: usize) -> Option<usize> {
        match self.shapes.get(hint) {
            Some(shape) if shape.id == id => Some(hint),
            _ => self.index_of(id),
        }
    }

    /// The currently selected shape, if any.
    pub fn selected(&self) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.selected)
    }

    /// New collection with `shape` appended as the only selected shape.
    ///
    /// Fails if `shape` would not pass validation, or reuses an existing id.
    pub(crate) fn with_committed(&self, mut shape: Shape) -> ShapeResult<Self> {
        let index = self.shapes.len();
        validate_shape(index, &shape)?;
        if self.index_of(shape.id).is_some() {
            return Err(ShapeError::DuplicateId { id: shape.id, index });
        }

        let mut shapes: Vec<Shape> = self
            .shapes
            .iter()
            .map(|s| Shape {
                selected: false,
                ..s.clone()
            })
            .collect();
        shape.selected = true;
        shapes.push(shape);
        Ok(Self {
            shapes,
            revision: next_revision(),
        })
    }

    /// New collection with `patch` merged into the shape at `index`, which
    /// becomes selected. Other shapes are untouched.
    ///
    /// Fails if the patched shape would not pass validation.
    pub(crate) fn with_patched(&self, index: usize, patch: &GeometryPatch) -> ShapeResult<Self> {
        let shapes: Vec<Shape> = self
            .shapes
            .iter()
            .enumerate()
            .map(|(i, s)| {
                if i == index {
                    let mut shape = s.clone();
                    shape.set_geometry(s.geometry().patched(patch));
                    shape.selected = true;
                    shape
                } else {
                    s.clone()
                }
            })
            .collect();
        if let Some(shape) = shapes.get(index) {
            validate_shape(index, shape)?;
        }
        Ok(Self {
            shapes,
            revision: next_revision(),
        })
    }
}

impl Default for ShapeCollection {
    fn default() -> Self {
        Self::empty()
    }
}

/// Collections compare by content; revisions are an implementation detail.
impl PartialEq for ShapeCollection {
    fn eq(&self, other: &Self) -> bool {
        self.shapes == other.shapes
    }
}

impl Serialize for ShapeCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.shapes.serialize(serializer)
    }
}

impl TryFrom<Vec<Shape>> for ShapeCollection {
    type Error = ShapeError;

    fn try_from(shapes: Vec<Shape>) -> Result<Self, Self::Error> {
        Self::new(shapes)
    }
}

impl<'a> IntoIterator for &'a ShapeCollection {
    type Item = &'a Shape;
    type IntoIter = std::slice::Iter<'a, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}

fn validate(shapes: &[Shape]) -> ShapeResult<()> {
    let mut seen = HashSet::with_capacity(shapes.len());

    for (index, shape) in shapes.iter().enumerate() {
        validate_shape(index, shape)?;
        if !seen.insert(shape.id) {
            return Err(ShapeError::DuplicateId {
                id: shape.id,
                index,
            });
        }
    }

    Ok(())
}

/// Checks that apply to a single shape regardless of its neighbours.
fn validate_shape(index: usize, shape: &Shape) -> ShapeResult<()> {
    let geometry = [
        ("startPoint", shape.start_point.is_finite()),
        ("endPoint", shape.end_point.is_finite()),
        ("offset", shape.offset.is_finite()),
    ];
    if let Some((field, _)) = geometry.into_iter().find(|(_, ok)| !ok) {
        return Err(ShapeError::NonFiniteGeometry { index, field });
    }
    if let Some((field, value)) = shape.appearance.as_ref().and_then(|a| a.first_invalid()) {
        return Err(ShapeError::InvalidAppearance { index, field, value });
    }
    Ok(())
}
