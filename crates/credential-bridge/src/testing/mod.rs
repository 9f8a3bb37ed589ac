//! Test doubles and fixtures for exercising the bridge without a real
//! credential source.
//!
//! Public so downstream crates can drive their own integrations against a
//! scriptable source; not intended for production wiring.
mod mocks;

pub use mocks::MockCredentialSource;

use chrono::Utc;

use crate::core::Credentials;

/// A plausible temporary-credentials snapshot expiring an hour from now
pub fn test_credentials() -> Credentials {
    Credentials::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG")
        .with_session_token("FwoGZXIvYXdzEBY")
        .with_expiration(Utc::now() + chrono::Duration::hours(1))
}
