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

//! Closed error surface of the routing core.
//!
//! Callers branch on [`RouterErrorKind`], never on message text. Each variant
//! carries the offending address where one is known at the failure site.

use crate::codec::{BrokerAddress, DeviceAddress, GatewayAddress};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failures raised anywhere in the routing core.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RouterError {
    /// Unrecognized or invalid adapter options; no traffic was accepted.
    BadOptions(String),
    /// A handler ran before `connect` bound the adapters.
    NotInitialized,
    /// A downlink could not be resolved or delivered to its gateway.
    BadGatewayAddress(Option<GatewayAddress>),
    /// The gateway-side connection is unavailable for the operation.
    MissingConnection,
    /// The uplink frame is malformed.
    InvalidPacket,
    /// The payload yields no device address.
    InvalidPayload,
    /// No reachable broker accepted ownership of the device.
    Broadcast(DeviceAddress),
    /// Delivery failed for every targeted broker.
    Forward {
        device: DeviceAddress,
        brokers: Vec<BrokerAddress>,
    },
}

/// Fieldless discriminant of [`RouterError`], for exhaustive matching and
/// stable comparison.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RouterErrorKind {
    BadOptions,
    NotInitialized,
    BadGatewayAddress,
    MissingConnection,
    InvalidPacket,
    InvalidPayload,
    Broadcast,
    Forward,
}

/// Taxonomy an error belongs to, governing how the service reacts.
///
/// Configuration errors are fatal to startup or to the offending call;
/// everything else drops the single event and the service continues.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    Configuration,
    Addressing,
    Payload,
    Connectivity,
}

impl RouterError {
    pub fn kind(&self) -> RouterErrorKind {
        match self {
            RouterError::BadOptions(_) => RouterErrorKind::BadOptions,
            RouterError::NotInitialized => RouterErrorKind::NotInitialized,
            RouterError::BadGatewayAddress(_) => RouterErrorKind::BadGatewayAddress,
            RouterError::MissingConnection => RouterErrorKind::MissingConnection,
            RouterError::InvalidPacket => RouterErrorKind::InvalidPacket,
            RouterError::InvalidPayload => RouterErrorKind::InvalidPayload,
            RouterError::Broadcast(_) => RouterErrorKind::Broadcast,
            RouterError::Forward { .. } => RouterErrorKind::Forward,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self.kind() {
            RouterErrorKind::BadOptions | RouterErrorKind::NotInitialized => {
                ErrorClass::Configuration
            }
            RouterErrorKind::BadGatewayAddress | RouterErrorKind::MissingConnection => {
                ErrorClass::Addressing
            }
            RouterErrorKind::InvalidPacket | RouterErrorKind::InvalidPayload => ErrorClass::Payload,
            RouterErrorKind::Broadcast | RouterErrorKind::Forward => ErrorClass::Connectivity,
        }
    }
}

impl Display for RouterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterError::BadOptions(reason) => {
                write!(f, "unrecognized or invalid options: {reason}")
            }
            RouterError::NotInitialized => write!(f, "router not initialized"),
            RouterError::BadGatewayAddress(Some(gateway)) => {
                write!(f, "invalid gateway address: {gateway}")
            }
            RouterError::BadGatewayAddress(None) => write!(f, "invalid gateway address"),
            RouterError::MissingConnection => {
                write!(f, "cannot proceed without an established connection")
            }
            RouterError::InvalidPacket => write!(f, "invalid uplink packet"),
            RouterError::InvalidPayload => write!(f, "invalid payload"),
            RouterError::Broadcast(device) => {
                write!(f, "unable to broadcast payload for device {device}")
            }
            RouterError::Forward { device, brokers } => {
                write!(
                    f,
                    "unable to forward payload for device {device} to any of {} broker(s)",
                    brokers.len()
                )
            }
        }
    }
}

impl Error for RouterError {}

impl Display for ErrorClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ErrorClass::Configuration => "configuration",
            ErrorClass::Addressing => "addressing",
            ErrorClass::Payload => "payload",
            ErrorClass::Connectivity => "connectivity",
        };
        f.write_str(label)
    }
}
