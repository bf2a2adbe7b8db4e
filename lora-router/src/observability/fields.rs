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

//! Canonical structured field keys and value-format helpers.

use crate::codec::BrokerAddress;
use std::collections::HashSet;

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";
pub const ROUTER_ID: &str = "router_id";

pub const DEVICE: &str = "device";
pub const GATEWAY: &str = "gateway";
pub const BROKER: &str = "broker";
pub const BROKERS: &str = "brokers";

pub const CLASS: &str = "class";
pub const KIND: &str = "kind";
pub const REASON: &str = "reason";
pub const ERR: &str = "err";

pub const NONE: &str = "none";
pub const REASON_ADAPTER_ERROR: &str = "adapter_error";
pub const REASON_ADAPTER_TIMEOUT: &str = "adapter_timeout";
pub const REASON_ALL_REJECTED: &str = "all_rejected";
pub const REASON_ALREADY_CONNECTED: &str = "already_connected";
pub const REASON_NO_ACCEPTING_BROKER: &str = "no_accepting_broker";

/// Formats a broker set as a stable, comma-joined list for log fields.
pub fn format_broker_set(brokers: &HashSet<BrokerAddress>) -> String {
    if brokers.is_empty() {
        return NONE.to_string();
    }
    let mut sorted: Vec<&str> = brokers.iter().map(BrokerAddress::as_str).collect();
    sorted.sort_unstable();
    sorted.join(",")
}
