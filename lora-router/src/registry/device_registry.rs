/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Concurrent, TTL-bounded mapping from device address to owning brokers.

use crate::codec::{BrokerAddress, DeviceAddress};
use crate::observability::events;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::debug;

const COMPONENT: &str = "device_registry";

/// Brokers known to own one device, and when that knowledge lapses.
///
/// Invariant: an entry with an empty broker set never exists; it is deleted
/// instead. Entries past `expires_at` are treated as absent regardless of
/// physical deletion timing.
struct RegistrationEntry {
    brokers: HashSet<BrokerAddress>,
    expires_at: Instant,
}

impl RegistrationEntry {
    fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// Concurrent device→broker-set registry with per-key merge semantics.
///
/// Lookups never block each other; writes serialize only within one map
/// shard, never across unrelated device addresses. The union merge in
/// [`register`](Self::register) runs synchronously under the shard guard with
/// no await point, so a cancelled routing task either completed the whole
/// union or never started it.
#[derive(Default)]
pub struct DeviceRegistry {
    entries: DashMap<DeviceAddress, RegistrationEntry>,
}

impl DeviceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Unions `brokers` into the entry for `device` and resets its expiry to
    /// now + `ttl`.
    ///
    /// Concurrent calls for the same device lose no update: the resolved set
    /// equals the union of all submitted sets in any interleaving. A stale
    /// (expired) entry observed here is treated as absent and its broker set
    /// discarded before the union. An empty `brokers` source is a no-op.
    pub fn register<I>(&self, device: &DeviceAddress, brokers: I, ttl: Duration)
    where
        I: IntoIterator<Item = BrokerAddress>,
    {
        let incoming: HashSet<BrokerAddress> = brokers.into_iter().collect();
        if incoming.is_empty() {
            return;
        }

        let now = Instant::now();
        match self.entries.entry(*device) {
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if entry.is_expired_at(now) {
                    entry.brokers.clear();
                }
                entry.brokers.extend(incoming);
                entry.expires_at = now + ttl;
            }
            Entry::Vacant(vacant) => {
                vacant.insert(RegistrationEntry {
                    brokers: incoming,
                    expires_at: now + ttl,
                });
            }
        }

        debug!(
            event = events::DEVICE_REGISTER,
            component = COMPONENT,
            device = %device,
            "registered broker ownership"
        );
    }

    /// Returns the brokers owning `device`, or `None` when no live entry
    /// exists.
    ///
    /// An expired entry is invisible here even if not yet removed; observing
    /// one opportunistically purges it.
    pub fn lookup(&self, device: &DeviceAddress) -> Option<HashSet<BrokerAddress>> {
        let now = Instant::now();
        let expired = match self.entries.get(device) {
            Some(entry) if !entry.is_expired_at(now) => return Some(entry.brokers.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            // The read guard above is out of scope; re-check under the shard
            // write lock so a concurrent re-register is not discarded.
            let removed = self
                .entries
                .remove_if(device, |_, entry| entry.is_expired_at(now))
                .is_some();
            if removed {
                debug!(
                    event = events::REGISTRY_ENTRY_EXPIRED,
                    component = COMPONENT,
                    device = %device,
                    "purged expired registration"
                );
            }
        }
        None
    }

    /// Removes every expired entry and returns how many were dropped.
    ///
    /// Lazy expiry keeps lookups correct without this; callers that want
    /// bounded memory can run it on their own cadence.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        before.saturating_sub(self.entries.len())
    }

    /// Number of physically present entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::DeviceRegistry;
    use crate::codec::{BrokerAddress, DeviceAddress};
    use std::collections::HashSet;
    use std::time::Duration;

    const TTL: Duration = Duration::from_secs(60);

    fn device(n: u8) -> DeviceAddress {
        DeviceAddress::new([0x26, 0, 0, n])
    }

    fn brokers(names: &[&str]) -> HashSet<BrokerAddress> {
        names.iter().copied().map(BrokerAddress::new).collect()
    }

    #[test]
    fn lookup_of_unknown_device_is_none() {
        let registry = DeviceRegistry::new();

        assert!(registry.lookup(&device(1)).is_none());
    }

    #[test]
    fn register_twice_with_same_broker_is_idempotent() {
        let registry = DeviceRegistry::new();

        registry.register(&device(1), brokers(&["b1"]), TTL);
        registry.register(&device(1), brokers(&["b1"]), TTL);

        assert_eq!(registry.lookup(&device(1)), Some(brokers(&["b1"])));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn register_merges_broker_sets() {
        let registry = DeviceRegistry::new();

        registry.register(&device(1), brokers(&["b1"]), TTL);
        registry.register(&device(1), brokers(&["b2"]), TTL);

        assert_eq!(registry.lookup(&device(1)), Some(brokers(&["b1", "b2"])));
    }

    #[test]
    fn register_with_empty_set_creates_no_entry() {
        let registry = DeviceRegistry::new();

        registry.register(&device(1), brokers(&[]), TTL);

        assert!(registry.lookup(&device(1)).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn devices_do_not_share_entries() {
        let registry = DeviceRegistry::new();

        registry.register(&device(1), brokers(&["b1"]), TTL);
        registry.register(&device(2), brokers(&["b2"]), TTL);

        assert_eq!(registry.lookup(&device(1)), Some(brokers(&["b1"])));
        assert_eq!(registry.lookup(&device(2)), Some(brokers(&["b2"])));
    }

    #[test]
    fn expired_entry_is_invisible_and_purged_on_lookup() {
        let registry = DeviceRegistry::new();

        registry.register(&device(1), brokers(&["b1"]), Duration::from_millis(5));
        std::thread::sleep(Duration::from_millis(20));

        assert!(registry.lookup(&device(1)).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn register_over_expired_entry_discards_stale_brokers() {
        let registry = DeviceRegistry::new();

        registry.register(&device(1), brokers(&["stale"]), Duration::from_millis(5));
        std::thread::sleep(Duration::from_millis(20));
        registry.register(&device(1), brokers(&["fresh"]), TTL);

        assert_eq!(registry.lookup(&device(1)), Some(brokers(&["fresh"])));
    }

    #[test]
    fn reregister_before_expiry_extends_the_entry() {
        let registry = DeviceRegistry::new();

        registry.register(&device(1), brokers(&["b1"]), Duration::from_millis(40));
        std::thread::sleep(Duration::from_millis(25));
        registry.register(&device(1), brokers(&["b1"]), Duration::from_millis(60));
        std::thread::sleep(Duration::from_millis(30));

        assert_eq!(registry.lookup(&device(1)), Some(brokers(&["b1"])));
    }

    #[test]
    fn purge_expired_drops_only_lapsed_entries() {
        let registry = DeviceRegistry::new();

        registry.register(&device(1), brokers(&["b1"]), Duration::from_millis(5));
        registry.register(&device(2), brokers(&["b2"]), TTL);
        std::thread::sleep(Duration::from_millis(20));

        assert_eq!(registry.purge_expired(), 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup(&device(2)), Some(brokers(&["b2"])));
    }
}
