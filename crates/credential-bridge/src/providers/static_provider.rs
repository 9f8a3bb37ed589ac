//! Fixed-snapshot credential source

use async_trait::async_trait;

use crate::core::{Credentials, SourceError};
use crate::traits::CredentialSource;

/// Credential source that hands out the same snapshot on every fetch.
///
/// Useful for development wiring and long-lived credentials; it never
/// refreshes, so expiring snapshots will eventually go stale.
#[derive(Clone, Debug)]
pub struct StaticCredentialSource {
    credentials: Credentials,
}

impl StaticCredentialSource {
    /// Create a source around a fixed snapshot
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl CredentialSource for StaticCredentialSource {
    async fn updated_credentials(&self) -> Result<Credentials, SourceError> {
        Ok(self.credentials.clone())
    }
}
