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

//! In-memory adapters, codec fixtures, and a capturing reporter used by the
//! `lora-router` integration tests.
//!
//! The broker network is scriptable: tests declare which brokers claim which
//! devices, which brokers fail targeted forwards, and whether calls hang, and
//! every adapter call is counted so tests can assert exactly how the engine
//! drove the boundary.

use async_trait::async_trait;
use dashmap::{DashMap, DashSet};
use lora_router::{
    BrokerAdapter, BrokerAddress, DeviceAddress, DownlinkRouter, ErrorClass, ErrorReporter,
    ForwardReport, GatewayAdapter, GatewayAddress, ListenOptions, RoutablePayload, RouterError,
    RouterErrorKind, UplinkPacket, UplinkRouter,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One-time tracing initialization for tests and examples.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Payload fixture with scripted addressing accessors.
pub struct StaticPayload {
    device: Option<DeviceAddress>,
    gateway: Option<GatewayAddress>,
}

impl StaticPayload {
    pub fn for_device(device: DeviceAddress) -> Arc<Self> {
        Arc::new(Self {
            device: Some(device),
            gateway: None,
        })
    }

    pub fn for_gateway(gateway: GatewayAddress) -> Arc<Self> {
        Arc::new(Self {
            device: None,
            gateway: Some(gateway),
        })
    }

    /// A payload that resolves to no gateway, for downlink failure paths.
    pub fn unaddressed() -> Arc<Self> {
        Arc::new(Self {
            device: None,
            gateway: None,
        })
    }
}

impl RoutablePayload for StaticPayload {
    fn device_address(&self) -> Option<DeviceAddress> {
        self.device
    }

    fn gateway_address(&self) -> Option<GatewayAddress> {
        self.gateway.clone()
    }
}

/// Uplink frame fixture.
pub struct StaticPacket {
    payload: Option<Arc<StaticPayload>>,
}

impl StaticPacket {
    /// A well-formed frame for `device`.
    pub fn for_device(device: DeviceAddress) -> Arc<Self> {
        Arc::new(Self {
            payload: Some(StaticPayload::for_device(device)),
        })
    }

    /// A frame whose payload accessor fails (malformed frame).
    pub fn malformed() -> Arc<Self> {
        Arc::new(Self { payload: None })
    }

    /// A well-formed frame whose payload yields no device address.
    pub fn without_device() -> Arc<Self> {
        Arc::new(Self {
            payload: Some(StaticPayload::unaddressed()),
        })
    }
}

impl UplinkPacket for StaticPacket {
    fn payload(&self) -> Option<Arc<dyn RoutablePayload>> {
        self.payload
            .as_ref()
            .map(|payload| Arc::clone(payload) as Arc<dyn RoutablePayload>)
    }
}

/// Gateway adapter that records every ack and can be scripted to fail or
/// hang.
#[derive(Default)]
pub struct RecordingGatewayAdapter {
    listening: AtomicBool,
    fail_acks: AtomicBool,
    hang_acks: AtomicBool,
    ack_count: AtomicUsize,
    acked: Mutex<Vec<GatewayAddress>>,
}

impl RecordingGatewayAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_acks(&self) {
        self.fail_acks.store(true, Ordering::Relaxed);
    }

    pub fn hang_acks(&self) {
        self.hang_acks.store(true, Ordering::Relaxed);
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Relaxed)
    }

    pub fn ack_count(&self) -> usize {
        self.ack_count.load(Ordering::Relaxed)
    }

    pub fn acked_gateways(&self) -> Vec<GatewayAddress> {
        self.acked.lock().expect("ack record mutex").clone()
    }
}

#[async_trait]
impl GatewayAdapter for RecordingGatewayAdapter {
    async fn listen(
        &self,
        _router: Arc<dyn UplinkRouter>,
        options: ListenOptions,
    ) -> Result<(), RouterError> {
        options.validate()?;
        self.listening.store(true, Ordering::Relaxed);
        Ok(())
    }

    async fn ack(
        &self,
        _payload: Arc<dyn RoutablePayload>,
        gateway: &GatewayAddress,
    ) -> Result<(), RouterError> {
        if self.hang_acks.load(Ordering::Relaxed) {
            futures::future::pending::<()>().await;
        }
        self.ack_count.fetch_add(1, Ordering::Relaxed);
        if self.fail_acks.load(Ordering::Relaxed) {
            return Err(RouterError::BadGatewayAddress(Some(gateway.clone())));
        }
        self.acked
            .lock()
            .expect("ack record mutex")
            .push(gateway.clone());
        Ok(())
    }
}

/// Scriptable in-memory broker population.
#[derive(Default)]
pub struct MockBrokerNetwork {
    listening: AtomicBool,
    owners: DashMap<DeviceAddress, HashSet<BrokerAddress>>,
    failing: DashSet<BrokerAddress>,
    hang_forwards: AtomicBool,
    hang_broadcasts: AtomicBool,
    broadcast_count: AtomicUsize,
    forward_count: AtomicUsize,
    forwarded_targets: Mutex<Vec<HashSet<BrokerAddress>>>,
}

impl MockBrokerNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares that `broker` claims ownership of `device` on broadcast.
    pub fn claim_device(&self, device: DeviceAddress, broker: &str) {
        self.owners
            .entry(device)
            .or_default()
            .insert(BrokerAddress::new(broker));
    }

    /// Makes targeted forwards to `broker` fail from now on.
    pub fn fail_forwards_to(&self, broker: &str) {
        self.failing.insert(BrokerAddress::new(broker));
    }

    pub fn hang_forwards(&self) {
        self.hang_forwards.store(true, Ordering::Relaxed);
    }

    pub fn hang_broadcasts(&self) {
        self.hang_broadcasts.store(true, Ordering::Relaxed);
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Relaxed)
    }

    pub fn broadcast_count(&self) -> usize {
        self.broadcast_count.load(Ordering::Relaxed)
    }

    pub fn forward_count(&self) -> usize {
        self.forward_count.load(Ordering::Relaxed)
    }

    /// Broker sets targeted by each forward, in call order.
    pub fn forwarded_targets(&self) -> Vec<HashSet<BrokerAddress>> {
        self.forwarded_targets
            .lock()
            .expect("forward record mutex")
            .clone()
    }
}

#[async_trait]
impl BrokerAdapter for MockBrokerNetwork {
    async fn listen(
        &self,
        _router: Arc<dyn DownlinkRouter>,
        options: ListenOptions,
    ) -> Result<(), RouterError> {
        options.validate()?;
        self.listening.store(true, Ordering::Relaxed);
        Ok(())
    }

    async fn broadcast(
        &self,
        payload: Arc<dyn RoutablePayload>,
    ) -> Result<HashSet<BrokerAddress>, RouterError> {
        if self.hang_broadcasts.load(Ordering::Relaxed) {
            futures::future::pending::<()>().await;
        }
        self.broadcast_count.fetch_add(1, Ordering::Relaxed);
        let accepting = payload
            .device_address()
            .and_then(|device| self.owners.get(&device).map(|owners| owners.clone()))
            .unwrap_or_default();
        Ok(accepting)
    }

    async fn forward(
        &self,
        _payload: Arc<dyn RoutablePayload>,
        brokers: &HashSet<BrokerAddress>,
    ) -> Result<ForwardReport, RouterError> {
        if self.hang_forwards.load(Ordering::Relaxed) {
            futures::future::pending::<()>().await;
        }
        self.forward_count.fetch_add(1, Ordering::Relaxed);
        self.forwarded_targets
            .lock()
            .expect("forward record mutex")
            .push(brokers.clone());

        let mut report = ForwardReport::new();
        for broker in brokers {
            if self.failing.contains(broker) {
                report.record_failed(broker.clone());
            } else {
                report.record_delivered(broker.clone());
            }
        }
        Ok(report)
    }
}

/// Reporter capturing every classified error for assertions.
#[derive(Default)]
pub struct CapturingReporter {
    seen: Mutex<Vec<(ErrorClass, RouterErrorKind)>>,
}

impl CapturingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kinds(&self) -> Vec<RouterErrorKind> {
        self.seen
            .lock()
            .expect("reporter mutex")
            .iter()
            .map(|(_, kind)| *kind)
            .collect()
    }

    pub fn classified(&self) -> Vec<(ErrorClass, RouterErrorKind)> {
        self.seen.lock().expect("reporter mutex").clone()
    }
}

impl ErrorReporter for CapturingReporter {
    fn report(&self, class: ErrorClass, error: &RouterError) {
        self.seen
            .lock()
            .expect("reporter mutex")
            .push((class, error.kind()));
    }
}
