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

//! Uplink/downlink routing state machine.

use crate::adapters::{BrokerAdapter, GatewayAdapter};
use crate::codec::{BrokerAddress, DeviceAddress, GatewayAddress, RoutablePayload, UplinkPacket};
use crate::engine::config::EngineConfig;
use crate::engine::connections::{AdapterBinding, Connections};
use crate::error::{RouterError, RouterErrorKind};
use crate::observability::{events, fields};
use crate::registry::DeviceRegistry;
use crate::reporter::{ErrorReporter, TracingReporter};
use crate::router::{DeviceProvisioning, DownlinkRouter, ErrorSink, UplinkRouter};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, warn};
use uuid::Uuid;

const COMPONENT: &str = "routing_engine";

/// The routing decision engine.
///
/// Stateless across uplinks except through its [`DeviceRegistry`]; every
/// inbound event is an independent unit of work, with writes serialized only
/// per device address. Adapters are bound once via [`connect`](Self::connect)
/// and consumed through lock-free snapshots thereafter.
pub struct RoutingEngine {
    name: String,
    router_id: String,
    config: EngineConfig,
    registry: Arc<DeviceRegistry>,
    binding: AdapterBinding,
    reporter: Arc<dyn ErrorReporter>,
}

impl RoutingEngine {
    pub fn new(name: &str, config: EngineConfig, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self {
            name: name.to_string(),
            router_id: Uuid::new_v4().to_string(),
            config,
            registry: Arc::new(DeviceRegistry::new()),
            binding: AdapterBinding::new(),
            reporter,
        }
    }

    /// Engine with default policy, reporting through [`TracingReporter`].
    pub fn with_defaults(name: &str) -> Self {
        Self::new(name, EngineConfig::default(), Arc::new(TracingReporter))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The affinity registry, exposed for administrative inspection.
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Binds the gateway-side and broker-side adapters, once.
    ///
    /// Handlers racing this call deterministically see either both adapters
    /// or neither. A second call is rejected and the first binding stays
    /// active.
    pub fn connect(
        &self,
        gateway: Arc<dyn GatewayAdapter>,
        broker: Arc<dyn BrokerAdapter>,
    ) -> Result<(), RouterError> {
        match self.binding.bind(gateway, broker) {
            Ok(()) => {
                debug!(
                    event = events::CONNECT_OK,
                    component = COMPONENT,
                    router_id = self.router_id.as_str(),
                    name = self.name.as_str(),
                    "adapters connected"
                );
                Ok(())
            }
            Err(error) => {
                warn!(
                    event = events::CONNECT_REJECTED,
                    component = COMPONENT,
                    router_id = self.router_id.as_str(),
                    reason = fields::REASON_ALREADY_CONNECTED,
                    "connect rejected"
                );
                Err(self.fail(error))
            }
        }
    }

    /// Reports the error through the central sink and hands it back to the
    /// caller.
    fn fail(&self, error: RouterError) -> RouterError {
        self.handle_error(&error);
        error
    }

    /// Targeted delivery to the brokers already known for `device`.
    ///
    /// Any outcome other than at-least-one delivery (all rejected, adapter
    /// error, timeout) collapses to a `Forward` error; the caller decides
    /// whether discovery fallback applies.
    async fn forward_known(
        &self,
        connections: &Connections,
        payload: Arc<dyn RoutablePayload>,
        device: &DeviceAddress,
        known: &HashSet<BrokerAddress>,
    ) -> Result<(), RouterError> {
        debug!(
            event = events::FORWARD_ATTEMPT,
            component = COMPONENT,
            router_id = self.router_id.as_str(),
            device = %device,
            brokers = %fields::format_broker_set(known),
            "forwarding to known brokers"
        );

        let outcome = timeout(
            self.config.adapter_timeout,
            connections.broker.forward(payload, known),
        )
        .await;

        let reason = match outcome {
            Ok(Ok(report)) if report.any_delivered() => {
                debug!(
                    event = events::FORWARD_OK,
                    component = COMPONENT,
                    router_id = self.router_id.as_str(),
                    device = %device,
                    brokers = %fields::format_broker_set(report.delivered()),
                    "forward delivered"
                );
                return Ok(());
            }
            Ok(Ok(_)) => fields::REASON_ALL_REJECTED,
            Ok(Err(_)) => fields::REASON_ADAPTER_ERROR,
            Err(_) => fields::REASON_ADAPTER_TIMEOUT,
        };

        warn!(
            event = events::FORWARD_ALL_FAILED,
            component = COMPONENT,
            router_id = self.router_id.as_str(),
            device = %device,
            brokers = %fields::format_broker_set(known),
            reason,
            "forward failed for every targeted broker"
        );

        let mut brokers: Vec<BrokerAddress> = known.iter().cloned().collect();
        brokers.sort_unstable();
        Err(RouterError::Forward {
            device: *device,
            brokers,
        })
    }

    /// Discovery round-trip: fan out to all reachable brokers, register the
    /// accepting subset.
    async fn discover(
        &self,
        connections: &Connections,
        payload: Arc<dyn RoutablePayload>,
        device: &DeviceAddress,
    ) -> Result<(), RouterError> {
        debug!(
            event = events::BROADCAST_ATTEMPT,
            component = COMPONENT,
            router_id = self.router_id.as_str(),
            device = %device,
            "broadcasting for ownership discovery"
        );

        let accepting = match timeout(
            self.config.adapter_timeout,
            connections.broker.broadcast(payload),
        )
        .await
        {
            Ok(Ok(brokers)) => brokers,
            Ok(Err(error)) => {
                warn!(
                    event = events::BROADCAST_EMPTY,
                    component = COMPONENT,
                    router_id = self.router_id.as_str(),
                    device = %device,
                    reason = fields::REASON_ADAPTER_ERROR,
                    err = %error,
                    "broadcast failed"
                );
                HashSet::new()
            }
            Err(_) => {
                warn!(
                    event = events::BROADCAST_EMPTY,
                    component = COMPONENT,
                    router_id = self.router_id.as_str(),
                    device = %device,
                    reason = fields::REASON_ADAPTER_TIMEOUT,
                    "broadcast timed out"
                );
                HashSet::new()
            }
        };

        if accepting.is_empty() {
            warn!(
                event = events::BROADCAST_EMPTY,
                component = COMPONENT,
                router_id = self.router_id.as_str(),
                device = %device,
                reason = fields::REASON_NO_ACCEPTING_BROKER,
                "no broker accepted ownership; dropping packet"
            );
            return Err(self.fail(RouterError::Broadcast(*device)));
        }

        self.registry
            .register(device, accepting.iter().cloned(), self.config.device_ttl);
        debug!(
            event = events::BROADCAST_ACCEPTED,
            component = COMPONENT,
            router_id = self.router_id.as_str(),
            device = %device,
            brokers = %fields::format_broker_set(&accepting),
            "ownership discovered and registered"
        );
        Ok(())
    }
}

#[async_trait]
impl UplinkRouter for RoutingEngine {
    async fn handle_uplink(
        &self,
        packet: Arc<dyn UplinkPacket>,
        gateway: GatewayAddress,
    ) -> Result<(), RouterError> {
        let Some(connections) = self.binding.load() else {
            return Err(self.fail(RouterError::NotInitialized));
        };

        let Some(payload) = packet.payload() else {
            debug!(
                event = events::UPLINK_DROP_INVALID_PACKET,
                component = COMPONENT,
                router_id = self.router_id.as_str(),
                gateway = %gateway,
                "dropping malformed uplink frame"
            );
            return Err(self.fail(RouterError::InvalidPacket));
        };

        let Some(device) = payload.device_address() else {
            debug!(
                event = events::UPLINK_DROP_INVALID_PAYLOAD,
                component = COMPONENT,
                router_id = self.router_id.as_str(),
                gateway = %gateway,
                "dropping uplink payload without device address"
            );
            return Err(self.fail(RouterError::InvalidPayload));
        };

        debug!(
            event = events::UPLINK_RECEIVE,
            component = COMPONENT,
            router_id = self.router_id.as_str(),
            device = %device,
            gateway = %gateway,
            "uplink received"
        );

        if let Some(known) = self.registry.lookup(&device) {
            match self
                .forward_known(&connections, payload.clone(), &device, &known)
                .await
            {
                Ok(()) => return Ok(()),
                Err(forward_error) => {
                    // Stale or incorrect mapping suspected. Fall back to
                    // discovery at most once per uplink.
                    self.handle_error(&forward_error);
                    if !self.config.fallback_on_forward_failure {
                        return Err(forward_error);
                    }
                }
            }
        }

        self.discover(&connections, payload, &device).await
    }
}

#[async_trait]
impl DownlinkRouter for RoutingEngine {
    async fn handle_downlink(
        &self,
        payload: Arc<dyn RoutablePayload>,
        broker: BrokerAddress,
    ) -> Result<(), RouterError> {
        let Some(connections) = self.binding.load() else {
            return Err(self.fail(RouterError::MissingConnection));
        };

        debug!(
            event = events::DOWNLINK_RECEIVE,
            component = COMPONENT,
            router_id = self.router_id.as_str(),
            broker = %broker,
            "downlink received"
        );

        let Some(gateway) = payload.gateway_address() else {
            return Err(self.fail(RouterError::BadGatewayAddress(None)));
        };

        match timeout(
            self.config.adapter_timeout,
            connections.gateway.ack(payload, &gateway),
        )
        .await
        {
            Ok(Ok(())) => {
                debug!(
                    event = events::DOWNLINK_ACK_OK,
                    component = COMPONENT,
                    router_id = self.router_id.as_str(),
                    gateway = %gateway,
                    "downlink acknowledged to gateway"
                );
                Ok(())
            }
            Ok(Err(error)) => {
                warn!(
                    event = events::DOWNLINK_ACK_FAILED,
                    component = COMPONENT,
                    router_id = self.router_id.as_str(),
                    gateway = %gateway,
                    err = %error,
                    "downlink delivery failed"
                );
                let mapped = match error.kind() {
                    RouterErrorKind::MissingConnection => RouterError::MissingConnection,
                    _ => RouterError::BadGatewayAddress(Some(gateway)),
                };
                Err(self.fail(mapped))
            }
            Err(_) => {
                warn!(
                    event = events::DOWNLINK_ACK_FAILED,
                    component = COMPONENT,
                    router_id = self.router_id.as_str(),
                    gateway = %gateway,
                    reason = fields::REASON_ADAPTER_TIMEOUT,
                    "downlink delivery timed out"
                );
                Err(self.fail(RouterError::MissingConnection))
            }
        }
    }
}

#[async_trait]
impl DeviceProvisioning for RoutingEngine {
    async fn register_device(
        &self,
        device: DeviceAddress,
        brokers: HashSet<BrokerAddress>,
    ) -> Result<(), RouterError> {
        if brokers.is_empty() {
            return Err(self.fail(RouterError::BadOptions(
                "device registration requires at least one broker".to_string(),
            )));
        }

        self.registry
            .register(&device, brokers.iter().cloned(), self.config.admin_ttl);
        debug!(
            event = events::DEVICE_REGISTER_ADMIN,
            component = COMPONENT,
            router_id = self.router_id.as_str(),
            device = %device,
            brokers = %fields::format_broker_set(&brokers),
            "device pre-seeded"
        );
        Ok(())
    }
}

impl ErrorSink for RoutingEngine {
    fn handle_error(&self, error: &RouterError) {
        self.reporter.report(error.class(), error);
    }
}
