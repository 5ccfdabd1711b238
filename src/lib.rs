//! chartmark - interactive rectangle/channel annotations for chart surfaces.
//!
//! The crate is headless: hosts feed it pointer events and the current axis
//! scales, receive replacement shape collections through [`EditorHost`], and
//! draw the [`render::ShapeView`]s it produces.
//!
//! ```ignore
//! let mut editor = ShapeEditor::default();
//! let ctx = InteractionContext::new(&scales, &x_samples);
//! editor.handle_pointer_down(&shapes, &event, &ctx, &mut host);
//! ```

pub mod constants;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod input;
pub mod perf;
pub mod render;
pub mod settings;
pub mod spatial_index;
pub mod store;
pub mod types;

pub use editor::{EditorHost, InteractionContext, ShapeEditor};
pub use error::{ShapeError, ShapeResult};
pub use input::coords::{ChartScales, LinearScale};
pub use settings::EditorSettings;
pub use store::ShapeCollection;
pub use types::{DataPoint, GeometryPatch, HandleKind, PointerEvent, Shape, ShapeId};
