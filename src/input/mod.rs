//! Pointer input handling for the shape editor.
//!
//! ## Architecture
//!
//! The editor uses an explicit state machine (`GestureState`) to track
//! whether a shape is being drawn or dragged. Each event kind has its own
//! module implementing the matching `ShapeEditor` handlers.
//!
//! ## Modules
//!
//! - `coords` - Device/data coordinate translation and x snapping
//! - `state` - Gesture state machine enum and helpers
//! - `mouse_down` - Press handling (arm a draft, grab a hovered shape)
//! - `drag` - Move handling (draft preview, drag preview)
//! - `mouse_up` - Release handling (commit, discard, pointer loss)
//! - `hover` - Hover classifier and hover side table

pub mod coords;
pub mod hover;
mod state;
mod mouse_down;
mod mouse_up;
mod drag;

pub use state::{Draft, DraftPhase, DragOverride, GestureState, HandleGrab};
