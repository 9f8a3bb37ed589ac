//! The bounded-wait fetch bridge
#[allow(clippy::module_inception)]
mod bridge;
mod config;
mod outcome;

pub use bridge::{CredentialBridge, CredentialBridgeBuilder};
pub use config::{BridgeConfig, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_CONCURRENT_FETCHES};
