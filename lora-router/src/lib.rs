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

//! # lora-router
//!
//! `lora-router` is the routing core of a LoRaWAN-style network: it decides
//! which application broker(s) own the device behind each uplink, discovers
//! ownership by broadcast when it is unknown, caches it with a TTL, and
//! routes broker downlinks back to the originating gateway.
//!
//! Typical usage is API-first and remains centered on [`RoutingEngine`] and
//! the two adapter contracts ([`GatewayAdapter`], [`BrokerAdapter`])
//! implemented by transport collaborators. Internal modules are organized by
//! domain layer to keep behavior ownership explicit.
//!
//! ## Routing an uplink
//!
//! ```
//! use lora_router::{BrokerAddress, DeviceAddress, GatewayAddress, RoutingEngine, UplinkRouter};
//! use std::sync::Arc;
//!
//! # use async_trait::async_trait;
//! # use lora_router::{
//! #     BrokerAdapter, DownlinkRouter, ForwardReport, GatewayAdapter, ListenOptions,
//! #     RoutablePayload, RouterError, UplinkPacket,
//! # };
//! # use std::collections::HashSet;
//! #
//! # struct OneBrokerNetwork;
//! #
//! # #[async_trait]
//! # impl BrokerAdapter for OneBrokerNetwork {
//! #     async fn listen(
//! #         &self,
//! #         _router: Arc<dyn DownlinkRouter>,
//! #         options: ListenOptions,
//! #     ) -> Result<(), RouterError> {
//! #         options.validate()
//! #     }
//! #
//! #     async fn broadcast(
//! #         &self,
//! #         _payload: Arc<dyn RoutablePayload>,
//! #     ) -> Result<HashSet<BrokerAddress>, RouterError> {
//! #         Ok([BrokerAddress::new("broker-1")].into_iter().collect())
//! #     }
//! #
//! #     async fn forward(
//! #         &self,
//! #         _payload: Arc<dyn RoutablePayload>,
//! #         brokers: &HashSet<BrokerAddress>,
//! #     ) -> Result<ForwardReport, RouterError> {
//! #         let mut report = ForwardReport::new();
//! #         for broker in brokers {
//! #             report.record_delivered(broker.clone());
//! #         }
//! #         Ok(report)
//! #     }
//! # }
//! #
//! # struct NoopGateway;
//! #
//! # #[async_trait]
//! # impl GatewayAdapter for NoopGateway {
//! #     async fn listen(
//! #         &self,
//! #         _router: Arc<dyn UplinkRouter>,
//! #         options: ListenOptions,
//! #     ) -> Result<(), RouterError> {
//! #         options.validate()
//! #     }
//! #
//! #     async fn ack(
//! #         &self,
//! #         _payload: Arc<dyn RoutablePayload>,
//! #         _gateway: &GatewayAddress,
//! #     ) -> Result<(), RouterError> {
//! #         Ok(())
//! #     }
//! # }
//! #
//! # struct SensorFrame {
//! #     device: DeviceAddress,
//! # }
//! #
//! # struct SensorPayload {
//! #     device: DeviceAddress,
//! # }
//! #
//! # impl RoutablePayload for SensorPayload {
//! #     fn device_address(&self) -> Option<DeviceAddress> {
//! #         Some(self.device)
//! #     }
//! #
//! #     fn gateway_address(&self) -> Option<GatewayAddress> {
//! #         None
//! #     }
//! # }
//! #
//! # impl UplinkPacket for SensorFrame {
//! #     fn payload(&self) -> Option<Arc<dyn RoutablePayload>> {
//! #         Some(Arc::new(SensorPayload { device: self.device }))
//! #     }
//! # }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let engine = RoutingEngine::with_defaults("quick-start");
//! engine
//!     .connect(Arc::new(NoopGateway), Arc::new(OneBrokerNetwork))
//!     .unwrap();
//!
//! // First uplink for an unseen device triggers discovery and caches the
//! // accepting broker; later uplinks forward without another broadcast.
//! let device = DeviceAddress::new([0x26, 0x01, 0x1B, 0xDA]);
//! engine
//!     .handle_uplink(
//!         Arc::new(SensorFrame { device }),
//!         GatewayAddress::new("eui-b827ebfffe87bd22"),
//!     )
//!     .await
//!     .unwrap();
//!
//! assert_eq!(
//!     engine.registry().lookup(&device),
//!     Some([BrokerAddress::new("broker-1")].into_iter().collect()),
//! );
//! # });
//! ```
//!
//! ## Error surface
//!
//! Errors form a closed set of comparable kinds so callers can branch
//! exhaustively; each error also names its taxonomy, which governs how the
//! service reacts.
//!
//! ```
//! use lora_router::{ErrorClass, RouterError, RouterErrorKind};
//!
//! let err = RouterError::InvalidPacket;
//! assert_eq!(err.kind(), RouterErrorKind::InvalidPacket);
//! assert_eq!(err.class(), ErrorClass::Payload);
//! ```
//!
//! ## Internal architecture map
//!
//! - Codec boundary: opaque addressing newtypes and packet/payload contracts
//! - Registry: concurrent TTL-bounded device-to-broker affinity store
//! - Engine: uplink/downlink state machine and one-time adapter binding
//! - Adapters: gateway-side and broker-side capability contracts
//! - Reporter: classified error sink
//!
//! ## Observability model
//!
//! The workspace uses `tracing` for logs/events. Library code emits
//! events/spans and does not unconditionally initialize a global subscriber.
//! Binaries and tests are responsible for one-time `tracing_subscriber`
//! initialization at process boundaries.

mod adapters;
pub use adapters::{BrokerAdapter, Credentials, ForwardReport, GatewayAdapter, ListenOptions};

mod codec;
pub use codec::{BrokerAddress, DeviceAddress, GatewayAddress, RoutablePayload, UplinkPacket};

mod engine;
pub use engine::{EngineConfig, RoutingEngine};

mod error;
pub use error::{ErrorClass, RouterError, RouterErrorKind};

mod registry;
pub use registry::DeviceRegistry;

mod reporter;
pub use reporter::{ErrorReporter, TracingReporter};

mod router;
pub use router::{DeviceProvisioning, DownlinkRouter, ErrorSink, UplinkRouter};

#[doc(hidden)]
pub mod observability;
