//! Rendering: replays a scene plan on a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.

use std::f64::consts::PI;

use frames::Point;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::{
    MARKER_COLOR, MARKER_RADIUS, STROKE_COLOR, STROKE_ROUNDING, STROKE_WIDTH, SURFACE_HEIGHT, SURFACE_WIDTH,
};
use crate::scene::{DrawOp, plan};

const LOG_TARGET: &str = "blueprints::canvas";

/// Clear the surface and draw `points` as a connected line with markers.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw(ctx: &CanvasRenderingContext2d, points: &[Point]) -> Result<(), JsValue> {
    for op in plan(points) {
        apply(ctx, &op)?;
    }
    if points.is_empty() {
        log::debug!(target: LOG_TARGET, "surface cleared; no points to draw");
    } else {
        log::debug!(target: LOG_TARGET, "drew {} points", points.len());
    }
    Ok(())
}

fn apply(ctx: &CanvasRenderingContext2d, op: &DrawOp) -> Result<(), JsValue> {
    match op {
        DrawOp::Clear => {
            ctx.clear_rect(0.0, 0.0, SURFACE_WIDTH, SURFACE_HEIGHT);
            Ok(())
        }
        DrawOp::Polyline(points) => {
            draw_polyline(ctx, points);
            Ok(())
        }
        DrawOp::Marker(point) => draw_marker(ctx, *point),
    }
}

fn draw_polyline(ctx: &CanvasRenderingContext2d, points: &[Point]) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    ctx.set_stroke_style_str(STROKE_COLOR);
    ctx.set_line_width(STROKE_WIDTH);
    ctx.set_line_cap(STROKE_ROUNDING);
    ctx.set_line_join(STROKE_ROUNDING);

    ctx.begin_path();
    ctx.move_to(f64::from(first.x), f64::from(first.y));
    for p in rest {
        ctx.line_to(f64::from(p.x), f64::from(p.y));
    }
    ctx.stroke();
}

fn draw_marker(ctx: &CanvasRenderingContext2d, point: Point) -> Result<(), JsValue> {
    ctx.set_fill_style_str(MARKER_COLOR);
    ctx.begin_path();
    ctx.arc(f64::from(point.x), f64::from(point.y), MARKER_RADIUS, 0.0, 2.0 * PI)?;
    ctx.fill();
    Ok(())
}
