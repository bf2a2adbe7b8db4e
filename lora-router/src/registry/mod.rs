//! Device-to-broker affinity registry.
//!
//! Owns every [`DeviceRegistry`](device_registry::DeviceRegistry) entry for
//! its full lifetime; all mutation happens through the registry's own
//! operations.

mod device_registry;

pub use device_registry::DeviceRegistry;
