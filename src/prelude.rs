//! Prelude module for the calendar_nav crate.
//!
//! Re-exports the derive macros from derive_more used across the modules.

pub use derive_more::Display;
