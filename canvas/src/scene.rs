//! Scene planning: what to draw for a point sequence, independent of any
//! rendering backend.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use frames::Point;

/// One drawing step, in paint order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawOp {
    /// Wipe the whole surface.
    Clear,
    /// One connected stroke through the points, in order.
    Polyline(Vec<Point>),
    /// Filled dot marking a single point.
    Marker(Point),
}

/// Plan the frame for `points`.
///
/// Always clears first. The polyline needs at least two points; markers are
/// drawn last so they sit on top of the stroke.
#[must_use]
pub fn plan(points: &[Point]) -> Vec<DrawOp> {
    let mut ops = Vec::with_capacity(points.len() + 2);
    ops.push(DrawOp::Clear);
    if points.len() >= 2 {
        ops.push(DrawOp::Polyline(points.to_vec()));
    }
    ops.extend(points.iter().copied().map(DrawOp::Marker));
    ops
}

/// Convert a click in viewport coordinates into a surface point.
///
/// `rect_left`/`rect_top` are the surface element's bounding-rect origin.
/// Coordinates are rounded to the nearest pixel.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn point_from_click(client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) -> Point {
    let x = (client_x - rect_left).round();
    let y = (client_y - rect_top).round();
    Point::new(x as i32, y as i32)
}
