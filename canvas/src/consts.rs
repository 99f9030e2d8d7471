//! Shared constants for the drawing surface.

// ── Surface ─────────────────────────────────────────────────────

/// Surface width in CSS pixels.
pub const SURFACE_WIDTH: f64 = 600.0;

/// Surface height in CSS pixels.
pub const SURFACE_HEIGHT: f64 = 400.0;

// ── Polyline ────────────────────────────────────────────────────

pub const STROKE_COLOR: &str = "#2563eb";
pub const STROKE_WIDTH: f64 = 2.0;
/// Applied to both line caps and line joins.
pub const STROKE_ROUNDING: &str = "round";

// ── Point markers ───────────────────────────────────────────────

pub const MARKER_COLOR: &str = "#dc2626";
pub const MARKER_RADIUS: f64 = 3.0;
