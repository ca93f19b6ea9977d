//! Chat domain module.
//!
//! Stateless intent heuristics for the assistant.

mod intent;

pub use intent::{ChatIntent, SuggestedAction};
