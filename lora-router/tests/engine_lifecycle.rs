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

mod support;

use lora_router::{
    BrokerAdapter, BrokerAddress, DeviceAddress, DownlinkRouter, ErrorClass, GatewayAdapter,
    GatewayAddress, ListenOptions, RouterErrorKind, UplinkRouter,
};
use mock_adapters::{StaticPacket, StaticPayload};
use std::sync::Arc;

fn device() -> DeviceAddress {
    DeviceAddress::new([0x26, 0x01, 0x00, 0x01])
}

#[tokio::test]
async fn uplink_without_connect_touches_no_adapter() {
    let harness = support::disconnected_harness(support::test_config());

    let err = harness
        .engine
        .handle_uplink(
            StaticPacket::for_device(device()),
            GatewayAddress::new("gw-0"),
        )
        .await
        .expect_err("engine is not connected");

    assert_eq!(err.kind(), RouterErrorKind::NotInitialized);
    assert_eq!(harness.brokers.broadcast_count(), 0);
    assert_eq!(harness.brokers.forward_count(), 0);
    assert!(harness.engine.registry().is_empty());
    assert_eq!(
        harness.reporter.classified(),
        vec![(ErrorClass::Configuration, RouterErrorKind::NotInitialized)]
    );
}

#[tokio::test]
async fn downlink_without_connect_is_missing_connection() {
    let harness = support::disconnected_harness(support::test_config());

    let err = harness
        .engine
        .handle_downlink(
            StaticPayload::for_gateway(GatewayAddress::new("gw-0")),
            BrokerAddress::new("broker-1"),
        )
        .await
        .expect_err("engine is not connected");

    assert_eq!(err.kind(), RouterErrorKind::MissingConnection);
    assert_eq!(harness.gateway.ack_count(), 0);
}

#[tokio::test]
async fn invalid_packet_is_dropped_with_no_side_effects() {
    let harness = support::connected_harness(support::test_config());

    let err = harness
        .engine
        .handle_uplink(StaticPacket::malformed(), GatewayAddress::new("gw-0"))
        .await
        .expect_err("malformed frame");

    assert_eq!(err.kind(), RouterErrorKind::InvalidPacket);
    assert!(harness.engine.registry().is_empty());
    assert_eq!(harness.brokers.broadcast_count(), 0);
    assert_eq!(harness.brokers.forward_count(), 0);
    assert_eq!(
        harness.reporter.classified(),
        vec![(ErrorClass::Payload, RouterErrorKind::InvalidPacket)]
    );
}

#[tokio::test]
async fn payload_without_device_is_dropped_with_no_side_effects() {
    let harness = support::connected_harness(support::test_config());

    let err = harness
        .engine
        .handle_uplink(StaticPacket::without_device(), GatewayAddress::new("gw-0"))
        .await
        .expect_err("payload yields no device address");

    assert_eq!(err.kind(), RouterErrorKind::InvalidPayload);
    assert!(harness.engine.registry().is_empty());
    assert_eq!(harness.brokers.broadcast_count(), 0);
    assert_eq!(harness.brokers.forward_count(), 0);
}

#[tokio::test]
async fn downlink_acks_the_resolved_gateway() {
    let harness = support::connected_harness(support::test_config());
    let gateway = GatewayAddress::new("eui-b827ebfffe87bd22");

    harness
        .engine
        .handle_downlink(
            StaticPayload::for_gateway(gateway.clone()),
            BrokerAddress::new("broker-1"),
        )
        .await
        .expect("downlink should be delivered");

    assert_eq!(harness.gateway.acked_gateways(), vec![gateway]);
    assert!(harness.reporter.kinds().is_empty());
}

#[tokio::test]
async fn downlink_without_gateway_is_bad_gateway_address() {
    let harness = support::connected_harness(support::test_config());

    let err = harness
        .engine
        .handle_downlink(StaticPayload::unaddressed(), BrokerAddress::new("broker-1"))
        .await
        .expect_err("payload resolves to no gateway");

    assert_eq!(err.kind(), RouterErrorKind::BadGatewayAddress);
    assert_eq!(harness.gateway.ack_count(), 0);
}

#[tokio::test]
async fn downlink_delivery_failure_maps_to_bad_gateway_address() {
    let harness = support::connected_harness(support::test_config());
    harness.gateway.fail_acks();

    let err = harness
        .engine
        .handle_downlink(
            StaticPayload::for_gateway(GatewayAddress::new("gw-0")),
            BrokerAddress::new("broker-1"),
        )
        .await
        .expect_err("gateway adapter rejects delivery");

    assert_eq!(err.kind(), RouterErrorKind::BadGatewayAddress);
}

#[tokio::test]
async fn downlink_timeout_maps_to_missing_connection() {
    let harness = support::connected_harness(support::test_config());
    harness.gateway.hang_acks();

    let err = harness
        .engine
        .handle_downlink(
            StaticPayload::for_gateway(GatewayAddress::new("gw-0")),
            BrokerAddress::new("broker-1"),
        )
        .await
        .expect_err("ack hangs past the adapter timeout");

    assert_eq!(err.kind(), RouterErrorKind::MissingConnection);
}

#[tokio::test]
async fn listen_rejects_invalid_options_before_accepting_traffic() {
    let harness = support::connected_harness(support::test_config());
    let router: Arc<dyn UplinkRouter> = harness.engine.clone();

    let err = harness
        .gateway
        .listen(router, ListenOptions::new("not-an-endpoint"))
        .await
        .expect_err("options should be rejected");

    assert_eq!(err.kind(), RouterErrorKind::BadOptions);
    assert!(!harness.gateway.is_listening());
}

#[tokio::test]
async fn listen_with_valid_options_starts_both_adapters() {
    let harness = support::connected_harness(support::test_config());

    harness
        .gateway
        .listen(
            harness.engine.clone() as Arc<dyn UplinkRouter>,
            ListenOptions::new("0.0.0.0:1700"),
        )
        .await
        .expect("gateway listen");
    harness
        .brokers
        .listen(
            harness.engine.clone() as Arc<dyn DownlinkRouter>,
            ListenOptions::new("0.0.0.0:1690"),
        )
        .await
        .expect("broker listen");

    assert!(harness.gateway.is_listening());
    assert!(harness.brokers.is_listening());
}

#[tokio::test]
async fn second_connect_is_rejected_and_reported() {
    let harness = support::connected_harness(support::test_config());

    let err = harness
        .engine
        .connect(harness.gateway.clone(), harness.brokers.clone())
        .expect_err("binding is one-time");

    assert_eq!(err.kind(), RouterErrorKind::BadOptions);
    assert_eq!(
        harness.reporter.classified(),
        vec![(ErrorClass::Configuration, RouterErrorKind::BadOptions)]
    );
}
