//! Outbound seam: the external credential source

use async_trait::async_trait;

use crate::core::{Credentials, SourceError};

/// External provider of short-lived credentials.
///
/// The bridge asks for one fresh snapshot per fetch; how the source obtains
/// or refreshes them (device identity, token exchange, certificate
/// provisioning) is its own concern. Implementations are shared across
/// concurrent calls and must not assume exclusive access from any one
/// caller; the bridge serializes fetches through its gate by default.
#[async_trait]
pub trait CredentialSource: Send + Sync + 'static {
    /// Return the current credentials, refreshing them first if the source
    /// deems its cached ones too old.
    ///
    /// May take arbitrarily long; the bridge bounds the wait, not the
    /// source.
    async fn updated_credentials(&self) -> Result<Credentials, SourceError>;
}
