//! Structured logging vocabulary.
//!
//! The library emits `tracing` events using these canonical names and field
//! keys and never installs a global subscriber; binaries and tests own
//! one-time `tracing_subscriber` initialization at process boundaries.

pub mod events;
pub mod fields;
