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

//! Router capability surfaces consumed by the adapter collaborators.
//!
//! One concrete engine implements all of them; each adapter only sees the
//! capability it needs.

use crate::codec::{BrokerAddress, DeviceAddress, GatewayAddress, RoutablePayload, UplinkPacket};
use crate::error::RouterError;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

/// Uplink intake, driven by the gateway adapter.
#[async_trait]
pub trait UplinkRouter: Send + Sync {
    /// Routes one uplink frame received from `gateway` to the broker(s)
    /// owning the originating device.
    async fn handle_uplink(
        &self,
        packet: Arc<dyn UplinkPacket>,
        gateway: GatewayAddress,
    ) -> Result<(), RouterError>;
}

/// Downlink intake, driven by the broker adapter.
#[async_trait]
pub trait DownlinkRouter: Send + Sync {
    /// Routes one broker-originated payload back to its destination gateway.
    async fn handle_downlink(
        &self,
        payload: Arc<dyn RoutablePayload>,
        broker: BrokerAddress,
    ) -> Result<(), RouterError>;
}

/// Administrative pre-seeding of device ownership, bypassing discovery.
#[async_trait]
pub trait DeviceProvisioning: Send + Sync {
    async fn register_device(
        &self,
        device: DeviceAddress,
        brokers: HashSet<BrokerAddress>,
    ) -> Result<(), RouterError>;
}

/// Central error intake; classification and reporting without aborting the
/// service.
pub trait ErrorSink: Send + Sync {
    fn handle_error(&self, error: &RouterError);
}
