//! Canonical structured event names used across `lora-router`.

// Uplink path events.
pub const UPLINK_RECEIVE: &str = "uplink_receive";
pub const UPLINK_DROP_INVALID_PACKET: &str = "uplink_drop_invalid_packet";
pub const UPLINK_DROP_INVALID_PAYLOAD: &str = "uplink_drop_invalid_payload";
pub const FORWARD_ATTEMPT: &str = "forward_attempt";
pub const FORWARD_OK: &str = "forward_ok";
pub const FORWARD_ALL_FAILED: &str = "forward_all_failed";
pub const BROADCAST_ATTEMPT: &str = "broadcast_attempt";
pub const BROADCAST_ACCEPTED: &str = "broadcast_accepted";
pub const BROADCAST_EMPTY: &str = "broadcast_empty";

// Downlink path events.
pub const DOWNLINK_RECEIVE: &str = "downlink_receive";
pub const DOWNLINK_ACK_OK: &str = "downlink_ack_ok";
pub const DOWNLINK_ACK_FAILED: &str = "downlink_ack_failed";

// Registry events.
pub const DEVICE_REGISTER: &str = "device_register";
pub const DEVICE_REGISTER_ADMIN: &str = "device_register_admin";
pub const REGISTRY_ENTRY_EXPIRED: &str = "registry_entry_expired";

// Lifecycle and error-sink events.
pub const CONNECT_OK: &str = "connect_ok";
pub const CONNECT_REJECTED: &str = "connect_rejected";
pub const ROUTER_ERROR: &str = "router_error";
