//! Bridge configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default bounded wait for a credential fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Default bound on fetches touching the source at once (single-flight)
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 1;

/// Tunables for [`CredentialBridge`].
///
/// Deserializes from config files with humantime durations
/// (`fetch_timeout = "10s"`); missing fields take their defaults.
///
/// [`CredentialBridge`]: crate::bridge::CredentialBridge
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// How long a caller blocks waiting for a fetch before receiving the
    /// absent token instead
    #[serde(with = "humantime_serde")]
    pub fetch_timeout: Duration,

    /// Permits on the fetch gate; 1 serializes all source access
    /// (single-flight). Values below 1 are treated as 1.
    pub max_concurrent_fetches: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }
}

impl BridgeConfig {
    /// Override the bounded-wait deadline
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Override the concurrent-fetch bound
    pub fn with_max_concurrent_fetches(mut self, fetches: usize) -> Self {
        self.max_concurrent_fetches = fetches;
        self
    }
}
