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

//! Broker-side delivery boundary.

use crate::adapters::options::ListenOptions;
use crate::codec::{BrokerAddress, RoutablePayload};
use crate::error::RouterError;
use crate::router::DownlinkRouter;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

/// Per-broker outcome of one targeted forward.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ForwardReport {
    delivered: HashSet<BrokerAddress>,
    failed: HashSet<BrokerAddress>,
}

impl ForwardReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_delivered(&mut self, broker: BrokerAddress) {
        self.failed.remove(&broker);
        self.delivered.insert(broker);
    }

    pub fn record_failed(&mut self, broker: BrokerAddress) {
        if !self.delivered.contains(&broker) {
            self.failed.insert(broker);
        }
    }

    /// Partial delivery counts as overall success.
    pub fn any_delivered(&self) -> bool {
        !self.delivered.is_empty()
    }

    /// True when delivery failed for every targeted broker.
    pub fn all_failed(&self) -> bool {
        self.delivered.is_empty()
    }

    pub fn delivered(&self) -> &HashSet<BrokerAddress> {
        &self.delivered
    }

    pub fn failed(&self) -> &HashSet<BrokerAddress> {
        &self.failed
    }
}

/// Capability contract toward the application brokers.
#[async_trait]
pub trait BrokerAdapter: Send + Sync {
    /// Begins accepting broker events (downlinks) and feeding them to
    /// `router`.
    ///
    /// Invalid `options` fail with `BadOptions` before any traffic is
    /// accepted.
    async fn listen(
        &self,
        router: Arc<dyn DownlinkRouter>,
        options: ListenOptions,
    ) -> Result<(), RouterError>;

    /// Fans `payload` to every reachable broker and returns the subset that
    /// accepts ownership of the originating device.
    async fn broadcast(
        &self,
        payload: Arc<dyn RoutablePayload>,
    ) -> Result<HashSet<BrokerAddress>, RouterError>;

    /// Delivers `payload` only to `brokers` and reports the per-broker
    /// outcome.
    async fn forward(
        &self,
        payload: Arc<dyn RoutablePayload>,
        brokers: &HashSet<BrokerAddress>,
    ) -> Result<ForwardReport, RouterError>;
}
