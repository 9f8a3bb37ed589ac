//! Credential Bridge
//!
//! A bounded-wait bridge between an asynchronous credential source and a
//! synchronous, real-time consumer (a native producer core that asks "give
//! me a usable security token right now" on its own thread).
//!
//! # Guarantees
//!
//! - **Time-bounded** - Every call returns within the configured deadline
//! - **Never throws** - Failures collapse into an explicit empty token; no
//!   error or panic crosses the boundary to the consumer
//! - **No partial results** - Serialized credentials and their expiration
//!   travel together or not at all
//! - **Bounded workers** - Timed-out fetch jobs are cancelled best-effort
//!   and concurrent source access is gated by a semaphore
//!
//! The calling thread blocks only on the bounded wait; fetch work runs on a
//! shared tokio runtime supplied by the environment.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![forbid(unsafe_code)]

/// The bounded-wait fetch bridge and its configuration
pub mod bridge;
/// Core types, errors, and time-unit primitives
pub mod core;
/// Ready-made credential source implementations
pub mod providers;
/// Test doubles for the credential source
pub mod testing;
/// Traits at the inbound (producer core) and outbound (source) seams
pub mod traits;

/// Commonly used types and traits
pub mod prelude {
    pub use crate::bridge::{BridgeConfig, CredentialBridge};
    pub use crate::core::{
        AuthInfo, AuthInfoKind, Capability, CapabilityError, Credentials, FetchError,
        SecretString, SourceError,
    };
    pub use crate::providers::StaticCredentialSource;
    pub use crate::traits::{AuthCallbacks, CredentialSource};
    pub use async_trait::async_trait;
}

// Re-export commonly used external types
pub use chrono::{DateTime, Utc};
