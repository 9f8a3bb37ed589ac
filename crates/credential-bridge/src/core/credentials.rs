//! Credential snapshot handed out by a [`CredentialSource`]
//!
//! [`CredentialSource`]: crate::traits::CredentialSource

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::secure::SecretString;
use crate::core::ticks;

/// A point-in-time snapshot of short-lived credentials.
///
/// Owned by the external source; the bridge only reads one snapshot per
/// fetch and serializes it into an opaque blob. `expiration` of `None`
/// means the credentials never expire.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Public access key identifier
    pub access_key_id: String,

    /// Secret key material (redacted from Debug output)
    pub secret_access_key: SecretString,

    /// Optional session token for temporary credentials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<SecretString>,

    /// Absolute expiration instant; `None` = never expires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

impl Credentials {
    /// Create credentials that never expire
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: SecretString::new(secret_access_key),
            session_token: None,
            expiration: None,
        }
    }

    /// Attach a session token
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(SecretString::new(token));
        self
    }

    /// Attach an absolute expiration
    pub fn with_expiration(mut self, expiration: DateTime<Utc>) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// Expiration in producer ticks (hundreds of nanoseconds since epoch).
    ///
    /// `None` expirations map to [`ticks::NEVER_EXPIRES`], unscaled.
    pub fn expiration_ticks(&self) -> u64 {
        ticks::expiration_to_ticks(self.expiration)
    }

    /// Remaining lifetime, if the credentials expire and have not already
    pub fn ttl(&self) -> Option<Duration> {
        self.expiration
            .and_then(|exp| (exp - Utc::now()).to_std().ok())
    }

    /// Check whether the snapshot has already expired
    pub fn is_expired(&self) -> bool {
        self.expiration.is_some_and(|exp| exp <= Utc::now())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("session_token", &self.session_token.as_ref().map(|_| "[REDACTED]"))
            .field("expiration", &self.expiration)
            .finish()
    }
}
