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

//! Gateway-side delivery boundary.

use crate::adapters::options::ListenOptions;
use crate::codec::{GatewayAddress, RoutablePayload};
use crate::error::RouterError;
use crate::router::UplinkRouter;
use async_trait::async_trait;
use std::sync::Arc;

/// Capability contract toward the radio-network edge.
///
/// Implemented by a transport collaborator (UDP semtech forwarder bridge,
/// TCP, …); the routing core never sees frames on the wire.
#[async_trait]
pub trait GatewayAdapter: Send + Sync {
    /// Begins accepting gateway events and feeding them to `router`.
    ///
    /// Invalid `options` fail with `BadOptions` before any traffic is
    /// accepted.
    async fn listen(
        &self,
        router: Arc<dyn UplinkRouter>,
        options: ListenOptions,
    ) -> Result<(), RouterError>;

    /// Delivers one downlink payload to `gateway`.
    async fn ack(
        &self,
        payload: Arc<dyn RoutablePayload>,
        gateway: &GatewayAddress,
    ) -> Result<(), RouterError>;
}
