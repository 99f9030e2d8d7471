//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (storage, native dialogs) from
//! page and component logic so the logic stays testable natively.

pub mod credentials;
pub mod dialog;
