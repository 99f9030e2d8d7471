//! Page-level components.

pub mod workspace;
