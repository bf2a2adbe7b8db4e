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

//! Error reporting sink.

use crate::error::{ErrorClass, RouterError};
use crate::observability::events;
use tracing::warn;

const COMPONENT: &str = "reporter";

/// Observability collaborator receiving every classified error raised in the
/// routing core.
///
/// Implementations must be infallible; reporting never aborts the routing
/// path.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, class: ErrorClass, error: &RouterError);
}

/// Default reporter emitting one structured `tracing` event per error.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, class: ErrorClass, error: &RouterError) {
        warn!(
            event = events::ROUTER_ERROR,
            component = COMPONENT,
            class = %class,
            kind = ?error.kind(),
            err = %error,
            "router error reported"
        );
    }
}
