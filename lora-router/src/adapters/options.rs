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

//! Validated listen configuration for adapter collaborators.

use crate::error::RouterError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

fn default_connection_timeout_ms() -> u64 {
    5_000
}

/// Configuration an adapter needs before accepting inbound traffic.
///
/// Invalid combinations fail at [`validate`](Self::validate), before any
/// traffic is accepted, never at first use.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ListenOptions {
    /// Endpoint the adapter binds to, as `host:port`.
    pub bind_endpoint: String,
    /// Upper bound on one inbound connection handshake.
    #[serde(default = "default_connection_timeout_ms")]
    pub connection_timeout_ms: u64,
    /// Credentials presented to the remote side, when the transport needs
    /// them.
    #[serde(default)]
    pub credentials: Option<Credentials>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Credentials {
    pub username: String,
    pub api_key: String,
}

impl ListenOptions {
    pub fn new(bind_endpoint: impl Into<String>) -> Self {
        Self {
            bind_endpoint: bind_endpoint.into(),
            connection_timeout_ms: default_connection_timeout_ms(),
            credentials: None,
        }
    }

    /// Parses options from a JSON5 document and validates them.
    pub fn from_json5(contents: &str) -> Result<Self, RouterError> {
        let options: ListenOptions = json5::from_str(contents)
            .map_err(|err| RouterError::BadOptions(err.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Rejects unusable configuration with `BadOptions`.
    pub fn validate(&self) -> Result<(), RouterError> {
        if self.bind_endpoint.parse::<SocketAddr>().is_err() {
            return Err(RouterError::BadOptions(format!(
                "bind endpoint is not a socket address: {}",
                self.bind_endpoint
            )));
        }
        if self.connection_timeout_ms == 0 {
            return Err(RouterError::BadOptions(
                "connection timeout must be non-zero".to_string(),
            ));
        }
        if let Some(credentials) = &self.credentials {
            if credentials.username.is_empty() || credentials.api_key.is_empty() {
                return Err(RouterError::BadOptions(
                    "credentials must carry a username and an api key".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_millis(self.connection_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::{Credentials, ListenOptions};
    use crate::error::RouterErrorKind;

    #[test]
    fn default_options_on_a_socket_address_validate() {
        let options = ListenOptions::new("0.0.0.0:1700");

        assert!(options.validate().is_ok());
    }

    #[test]
    fn non_socket_bind_endpoint_is_rejected() {
        let options = ListenOptions::new("not-an-endpoint");

        let err = options.validate().expect_err("should reject");
        assert_eq!(err.kind(), RouterErrorKind::BadOptions);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut options = ListenOptions::new("127.0.0.1:1700");
        options.connection_timeout_ms = 0;

        let err = options.validate().expect_err("should reject");
        assert_eq!(err.kind(), RouterErrorKind::BadOptions);
    }

    #[test]
    fn blank_credentials_are_rejected() {
        let mut options = ListenOptions::new("127.0.0.1:1700");
        options.credentials = Some(Credentials {
            username: "router".to_string(),
            api_key: String::new(),
        });

        let err = options.validate().expect_err("should reject");
        assert_eq!(err.kind(), RouterErrorKind::BadOptions);
    }

    #[test]
    fn json5_document_parses_and_validates() {
        let options = ListenOptions::from_json5(
            r#"{
                bind_endpoint: "0.0.0.0:1700",
                connection_timeout_ms: 2500,
                credentials: { username: "router", api_key: "secret" },
            }"#,
        )
        .expect("document should parse");

        assert_eq!(options.bind_endpoint, "0.0.0.0:1700");
        assert_eq!(options.connection_timeout().as_millis(), 2500);
    }

    #[test]
    fn unknown_fields_fail_before_any_traffic() {
        let err = ListenOptions::from_json5(
            r#"{ bind_endpoint: "0.0.0.0:1700", frame_size: 512 }"#,
        )
        .expect_err("unknown field should reject");

        assert_eq!(err.kind(), RouterErrorKind::BadOptions);
    }

    #[test]
    fn options_round_trip_through_serde_json() {
        let options = ListenOptions::new("10.0.0.1:1700");
        let encoded = serde_json::to_string(&options).expect("options serialize");
        let decoded: ListenOptions = serde_json::from_str(&encoded).expect("options deserialize");

        assert_eq!(decoded.bind_endpoint, options.bind_endpoint);
        assert_eq!(decoded.connection_timeout_ms, options.connection_timeout_ms);
    }
}
