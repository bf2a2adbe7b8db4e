//! Routing decision engine.
//!
//! One concrete [`RoutingEngine`] implements every router capability trait;
//! it owns the uplink/downlink state machine, the discovery fallback policy,
//! and the one-time adapter binding.

mod config;
mod connections;
mod routing_engine;

pub use config::EngineConfig;
pub use routing_engine::RoutingEngine;
