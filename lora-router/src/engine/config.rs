//! Engine tuning knobs.

use std::time::Duration;

/// Policy configuration for one [`RoutingEngine`](super::RoutingEngine).
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Lifetime of a discovery-learned registration; re-registered on every
    /// successful broadcast.
    pub device_ttl: Duration,
    /// Lifetime of an administratively pre-seeded registration.
    pub admin_ttl: Duration,
    /// Upper bound on any single adapter call (`forward`, `broadcast`,
    /// `ack`); an overrun counts as that operation failing.
    pub adapter_timeout: Duration,
    /// Whether a forward that fails against every targeted broker triggers
    /// one broadcast fallback for that packet.
    pub fallback_on_forward_failure: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            device_ttl: Duration::from_secs(15 * 60),
            admin_ttl: Duration::from_secs(24 * 60 * 60),
            adapter_timeout: Duration::from_secs(5),
            fallback_on_forward_failure: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EngineConfig;

    #[test]
    fn defaults_keep_admin_registrations_longer_than_discovered_ones() {
        let config = EngineConfig::default();

        assert!(config.admin_ttl > config.device_ttl);
        assert!(config.fallback_on_forward_failure);
    }
}
