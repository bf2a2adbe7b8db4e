//! Adapter capability boundaries.
//!
//! Transport collaborators implement these contracts; the routing core only
//! ever holds them as `Arc<dyn …>` trait objects bound once at `connect`.

mod broker;
mod gateway;
mod options;

pub use broker::{BrokerAdapter, ForwardReport};
pub use gateway::GatewayAdapter;
pub use options::{Credentials, ListenOptions};
