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

//! Drives one discovery round-trip and one cached forward against in-memory
//! adapters, printing the resolved ownership along the way.
//!
//! Run with: `cargo run --example discovery_roundtrip`

use lora_router::{DeviceAddress, GatewayAddress, RoutingEngine, UplinkRouter};
use mock_adapters::{MockBrokerNetwork, RecordingGatewayAdapter, StaticPacket};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    mock_adapters::init_tracing();

    let engine = Arc::new(RoutingEngine::with_defaults("demo-router"));
    let gateway_adapter = Arc::new(RecordingGatewayAdapter::new());
    let broker_network = Arc::new(MockBrokerNetwork::new());

    let device = DeviceAddress::new([0x26, 0x01, 0x1B, 0xDA]);
    broker_network.claim_device(device, "broker-eu-1");
    broker_network.claim_device(device, "broker-eu-2");

    engine
        .connect(gateway_adapter, broker_network.clone())
        .expect("adapters should connect");

    let gateway = GatewayAddress::new("eui-b827ebfffe87bd22");

    engine
        .handle_uplink(StaticPacket::for_device(device), gateway.clone())
        .await
        .expect("first uplink should discover ownership");
    println!(
        "after discovery: device {device} owned by {:?} ({} broadcast)",
        engine.registry().lookup(&device),
        broker_network.broadcast_count(),
    );

    engine
        .handle_uplink(StaticPacket::for_device(device), gateway)
        .await
        .expect("second uplink should be forwarded");
    println!(
        "after second uplink: {} forward(s), still {} broadcast",
        broker_network.forward_count(),
        broker_network.broadcast_count(),
    );
}
