//! Application-wide constants.
//!
//! Centralizes tolerances and default style values so the editor, the
//! settings layer and the tests agree on them.

// ============================================================================
// Hit Testing
// ============================================================================

/// Hover tolerance around edges and vertices, in device pixels
pub const DEFAULT_HOVER_TOLERANCE_PX: f64 = 6.0;

/// Segments shorter than this (squared, normalized units) are treated as points
pub const DEGENERATE_SEGMENT_EPSILON: f64 = 1e-12;

/// Horizontal extent below which a primary edge counts as vertical
pub const VERTICAL_EDGE_EPSILON: f64 = 1e-12;

// ============================================================================
// Shape Appearance Defaults
// ============================================================================

pub const DEFAULT_STROKE: &str = "#000000";
pub const DEFAULT_STROKE_OPACITY: f64 = 1.0;
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;
pub const DEFAULT_FILL: &str = "#8AAFE2";
pub const DEFAULT_FILL_OPACITY: f64 = 0.7;
/// Shared default for edge stroke and both edge fills
pub const DEFAULT_EDGE_COLOR: &str = "#FF0000";
pub const DEFAULT_EDGE_STROKE_WIDTH: f64 = 1.0;
/// Edge handle radius
pub const DEFAULT_HANDLE_RADIUS: f64 = 6.0;

// ============================================================================
// Cursor Indicator
// ============================================================================

pub const DEFAULT_CURSOR_STROKE: &str = "#000000";
pub const DEFAULT_CURSOR_STROKE_WIDTH: f64 = 3.0;
pub const DEFAULT_CURSOR_OPACITY: f64 = 1.0;
pub const DEFAULT_CURSOR_RADIUS: f64 = 4.0;

// ============================================================================
// Hover Text
// ============================================================================

pub const HOVER_TEXT_BG_HEIGHT: f64 = 18.0;
pub const HOVER_TEXT_BG_WIDTH: f64 = 120.0;
pub const HOVER_TEXT_LABEL: &str = "Click to select object";

// ============================================================================
// Profiling
// ============================================================================

/// Hover classification budget per pointer move, in milliseconds
pub const HOVER_BUDGET_MS: f64 = 2.0;

/// Drag preview update budget per pointer move, in milliseconds
pub const DRAG_BUDGET_MS: f64 = 1.0;
