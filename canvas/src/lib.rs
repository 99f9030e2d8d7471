//! Drawing surface for blueprint point sequences.
//!
//! The surface is a fixed 600×400 canvas. Rendering is split in two so the
//! geometry can be tested without a browser: [`scene::plan`] turns a point
//! sequence into [`scene::DrawOp`]s, and [`render::draw`] replays them on a
//! `CanvasRenderingContext2d`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`scene`] | Draw-operation planning and click-to-point conversion |
//! | [`render`] | Applies a plan to a 2D context |
//! | [`consts`] | Surface size and stroke/marker styling |

pub mod consts;
pub mod render;
pub mod scene;
