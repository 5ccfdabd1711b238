//! Per-shape render contract.
//!
//! The editor does not draw. Each frame it produces one [`ShapeView`] per
//! visible shape (committed shapes in z order, with the drag override read
//! through, then the draft) and hands them to a host-supplied
//! [`ShapeRenderer`].

use crate::editor::ShapeEditor;
use crate::store::ShapeCollection;
use crate::types::{Appearance, CursorIndicator, DataPoint, HoverText, ShapeGeometry, ShapeId};

/// Where a view's geometry came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    /// A committed shape as stored
    Committed,
    /// A committed shape with the live drag override applied
    DragPreview,
    /// The in-progress draft
    Draft,
}

/// Everything a renderer needs to draw one shape.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeView<'a> {
    pub kind: ViewKind,
    /// Identity and position; `None` for the draft
    pub id: Option<ShapeId>,
    pub index: Option<usize>,
    pub geometry: ShapeGeometry,
    /// Collection default merged with the shape's own appearance
    pub appearance: Appearance,
    pub selected: bool,
    pub hovering: bool,
    /// Whether the shape reacts to hover and drag
    pub interactive: bool,
    pub hover_text: &'a HoverText,
}

/// Host-side drawing backend.
pub trait ShapeRenderer {
    fn draw_shape(&mut self, view: &ShapeView<'_>);

    /// Draw the live cursor indicator. Only called while drawing is enabled.
    fn draw_cursor(&mut self, _at: DataPoint, _style: &CursorIndicator) {}
}

impl ShapeEditor {
    /// Views for the current frame, bottom to top.
    pub fn views<'a>(&'a self, shapes: &ShapeCollection) -> Vec<ShapeView<'a>> {
        let default = &self.settings.appearance;
        let hover_text = &self.settings.hover_text;
        let drag = self.gesture.drag();

        let mut views: Vec<ShapeView<'a>> = shapes
            .iter()
            .enumerate()
            .map(|(index, shape)| {
                let (kind, geometry) = match drag {
                    Some(d) if d.id == shape.id => {
                        (ViewKind::DragPreview, shape.geometry().patched(&d.patch))
                    }
                    _ => (ViewKind::Committed, shape.geometry()),
                };
                ShapeView {
                    kind,
                    id: Some(shape.id),
                    index: Some(index),
                    geometry,
                    appearance: shape.resolved_appearance(default),
                    selected: shape.selected,
                    hovering: self.hover.is_hovering(shape.id),
                    interactive: true,
                    hover_text,
                }
            })
            .collect();

        // An armed draft without an end point is not a shape yet
        if let Some(geometry) = self.gesture.draft().and_then(|d| d.geometry()) {
            views.push(ShapeView {
                kind: ViewKind::Draft,
                id: None,
                index: None,
                geometry,
                appearance: default.clone(),
                selected: false,
                hovering: false,
                interactive: false,
                hover_text,
            });
        }

        views
    }

    /// Draw the current frame.
    pub fn render(&self, shapes: &ShapeCollection, renderer: &mut impl ShapeRenderer) {
        for view in self.views(shapes) {
            renderer.draw_shape(&view);
        }
        if self.settings.enabled {
            if let Some(at) = self.cursor {
                renderer.draw_cursor(at, &self.settings.cursor);
            }
        }
    }
}
