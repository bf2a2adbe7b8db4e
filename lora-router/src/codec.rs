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

//! Addressing newtypes and the opaque packet/payload contracts implemented by
//! the wire-codec collaborator.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Address of one end device, the registry key correlating uplink and
/// downlink traffic.
///
/// Four bytes wide, matching the LoRaWAN DevAddr field. The core never
/// interprets the bytes beyond equality and hashing.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DeviceAddress([u8; 4]);

impl DeviceAddress {
    pub const fn new(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl Display for DeviceAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Handle for one broker endpoint, meaningful only to the broker adapter.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BrokerAddress(String);

impl BrokerAddress {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for BrokerAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle for one gateway endpoint, meaningful only to the gateway adapter.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct GatewayAddress(String);

impl GatewayAddress {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for GatewayAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One uplink frame received from a gateway.
///
/// The frame bytes stay opaque to the routing core; the codec collaborator
/// owns the wire format and exposes only this accessor.
pub trait UplinkPacket: Send + Sync {
    /// Returns the broker-bound payload carried by this frame, or `None`
    /// when the frame is malformed.
    fn payload(&self) -> Option<Arc<dyn RoutablePayload>>;
}

/// Broker-bound or gateway-bound content, opaque beyond its addressing
/// accessors.
pub trait RoutablePayload: Send + Sync {
    /// Address of the originating device, or `None` when it cannot be
    /// extracted from the payload.
    fn device_address(&self) -> Option<DeviceAddress>;

    /// Destination gateway for downlink delivery, or `None` when the payload
    /// metadata does not resolve to one.
    fn gateway_address(&self) -> Option<GatewayAddress>;
}
