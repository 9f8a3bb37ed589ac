//! Credential bridge - bounded-wait fetch between source and producer core
//!
//! Schedules one fetch-and-serialize job per call on a shared tokio runtime,
//! waits on a per-call channel with a hard deadline, and always hands the
//! caller a token value - never an error.

use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::bridge::config::BridgeConfig;
use crate::bridge::outcome::FetchOutcome;
use crate::core::{
    AuthInfo, AuthInfoKind, BuildError, Capability, CapabilityError, FetchError,
};
use crate::traits::{AuthCallbacks, CredentialSource};

/// Bounded-wait bridge from an asynchronous [`CredentialSource`] to the
/// synchronous [`AuthCallbacks`] surface a producer core consumes.
///
/// Each call spawns exactly one fetch job on the shared runtime and waits on
/// a single-use channel, so the outcome of one call can never leak into
/// another. On deadline expiry the caller is released immediately and the
/// in-flight job is aborted best-effort. Access to the source is gated by a
/// semaphore (one permit by default, serializing fetches).
///
/// # Blocking
///
/// [`security_token`](Self::security_token) blocks the calling thread for up
/// to the configured deadline. Call it from a plain OS thread (the producer
/// core's own thread), never from inside the async runtime.
#[derive(Clone)]
pub struct CredentialBridge {
    source: Arc<dyn CredentialSource>,
    runtime: Handle,
    fetch_gate: Arc<Semaphore>,
    config: BridgeConfig,
}

impl CredentialBridge {
    /// Create builder for constructing a bridge instance
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::sync::Arc;
    /// use credential_bridge::prelude::*;
    ///
    /// # fn example(source: Arc<dyn CredentialSource>) -> Result<(), Box<dyn std::error::Error>> {
    /// let bridge = CredentialBridge::builder()
    ///     .source(source)
    ///     .runtime(tokio::runtime::Handle::current())
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> CredentialBridgeBuilder<No> {
        CredentialBridgeBuilder::new()
    }

    /// Fetch a security token, waiting at most the configured deadline.
    ///
    /// Always returns a token value: serialized credentials with their
    /// expiration on success, the absent pair `(empty, 0)` on source
    /// failure, encoding failure, cancellation, or timeout. Soft failures
    /// are logged, never raised.
    pub fn security_token(&self) -> AuthInfo {
        let started = Instant::now();
        let (tx, rx) = mpsc::sync_channel::<FetchOutcome>(1);

        let source = Arc::clone(&self.source);
        let gate = Arc::clone(&self.fetch_gate);
        let job = self.runtime.spawn(async move {
            let outcome = fetch_once(source, gate).await;
            // The receiver is gone when the caller already timed out; the
            // late outcome is discarded with it.
            let _ = tx.send(outcome);
        });

        let outcome = match rx.recv_timeout(self.config.fetch_timeout) {
            Ok(outcome) => outcome,
            Err(RecvTimeoutError::Timeout) => {
                job.abort();
                FetchOutcome::TimedOut {
                    waited: started.elapsed(),
                }
            }
            Err(RecvTimeoutError::Disconnected) => FetchOutcome::Failed(FetchError::Canceled),
        };

        assemble(outcome)
    }

    /// Retrieve the device certificate.
    ///
    /// Certificate integration is not provisioned in this configuration;
    /// this always fails hard, unlike the soft token fallback.
    pub fn device_certificate(&self) -> Result<AuthInfo, CapabilityError> {
        Err(CapabilityError::NotProvisioned {
            capability: Capability::DeviceCertificate,
        })
    }

    /// Retrieve the device fingerprint.
    ///
    /// Provisioning is not implemented in this configuration; this always
    /// fails hard, unlike the soft token fallback.
    pub fn device_fingerprint(&self) -> Result<String, CapabilityError> {
        Err(CapabilityError::NotProvisioned {
            capability: Capability::DeviceFingerprint,
        })
    }

    /// The configuration this bridge was built with
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}

impl AuthCallbacks for CredentialBridge {
    fn security_token(&self) -> AuthInfo {
        Self::security_token(self)
    }

    fn device_certificate(&self) -> Result<AuthInfo, CapabilityError> {
        Self::device_certificate(self)
    }

    fn device_fingerprint(&self) -> Result<String, CapabilityError> {
        Self::device_fingerprint(self)
    }
}

impl std::fmt::Debug for CredentialBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialBridge")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// One fetch attempt, run on the worker side of the channel.
async fn fetch_once(source: Arc<dyn CredentialSource>, gate: Arc<Semaphore>) -> FetchOutcome {
    // The gate is never closed while a bridge holds it; a closed gate means
    // the bridge is being torn down mid-call.
    let Ok(_permit) = gate.acquire_owned().await else {
        return FetchOutcome::Failed(FetchError::Canceled);
    };

    match materialize(source.as_ref()).await {
        Ok((blob, expires_at)) => FetchOutcome::Fetched { blob, expires_at },
        Err(err) => FetchOutcome::Failed(err),
    }
}

/// Obtain one fresh snapshot, compute its expiration in producer ticks, and
/// serialize it. Blob and expiration only ever leave together.
async fn materialize(source: &dyn CredentialSource) -> Result<(Vec<u8>, u64), FetchError> {
    let credentials = source.updated_credentials().await?;
    let expires_at = credentials.expiration_ticks();
    let blob = serde_json::to_vec(&credentials)?;
    Ok((blob, expires_at))
}

/// Collapse the fetch outcome into the outward token value, on the calling
/// thread. Anything but success yields the absent pair.
fn assemble(outcome: FetchOutcome) -> AuthInfo {
    match outcome {
        FetchOutcome::Fetched { blob, expires_at } => {
            debug!(
                blob_len = blob.len(),
                expires_at, "credential fetch completed"
            );
            AuthInfo::security_token(blob, expires_at)
        }
        FetchOutcome::Failed(err) => {
            warn!(
                kind = err.kind(),
                error = %err,
                "credential fetch failed, handing out empty token"
            );
            AuthInfo::absent(AuthInfoKind::SecurityToken)
        }
        FetchOutcome::TimedOut { waited } => {
            warn!(
                waited_ms = waited.as_millis() as u64,
                "credential fetch timed out, handing out empty token"
            );
            AuthInfo::absent(AuthInfoKind::SecurityToken)
        }
    }
}

// Type-level markers for builder typestate pattern
#[doc(hidden)]
pub struct Yes;
#[doc(hidden)]
pub struct No;

/// Builder for [`CredentialBridge`] with typestate pattern.
///
/// The credential source is required at compile time; the runtime handle
/// falls back to the handle entered on the building thread.
pub struct CredentialBridgeBuilder<HasSource> {
    source: Option<Arc<dyn CredentialSource>>,
    runtime: Option<Handle>,
    config: BridgeConfig,
    _marker: PhantomData<HasSource>,
}

impl CredentialBridgeBuilder<No> {
    /// Create new builder instance
    pub fn new() -> Self {
        Self {
            source: None,
            runtime: None,
            config: BridgeConfig::default(),
            _marker: PhantomData,
        }
    }

    /// Set the credential source (required)
    pub fn source(self, source: Arc<dyn CredentialSource>) -> CredentialBridgeBuilder<Yes> {
        CredentialBridgeBuilder {
            source: Some(source),
            runtime: self.runtime,
            config: self.config,
            _marker: PhantomData,
        }
    }
}

impl<S> CredentialBridgeBuilder<S> {
    /// Set the runtime the fetch jobs run on (optional; defaults to the
    /// runtime entered on the thread calling [`build`](CredentialBridgeBuilder::build))
    pub fn runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    /// Set the full configuration (optional)
    pub fn config(mut self, config: BridgeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the bounded-wait deadline (shorthand)
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.config.fetch_timeout = timeout;
        self
    }
}

impl CredentialBridgeBuilder<Yes> {
    /// Build the bridge.
    ///
    /// # Errors
    ///
    /// [`BuildError::NoRuntime`] when no handle was supplied and the
    /// building thread is not inside a tokio runtime.
    pub fn build(self) -> Result<CredentialBridge, BuildError> {
        let runtime = match self.runtime {
            Some(handle) => handle,
            None => Handle::try_current().map_err(|_| BuildError::NoRuntime)?,
        };

        // A zero-permit gate would park every fetch forever.
        let permits = self.config.max_concurrent_fetches.max(1);

        Ok(CredentialBridge {
            source: self.source.unwrap(), // Safe: typestate guarantees Some
            runtime,
            fetch_gate: Arc::new(Semaphore::new(permits)),
            config: self.config,
        })
    }
}

impl Default for CredentialBridgeBuilder<No> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SourceError;
    use crate::testing::MockCredentialSource;

    #[test]
    fn test_assemble_success_keeps_both_halves() {
        let token = assemble(FetchOutcome::Fetched {
            blob: vec![1, 2, 3],
            expires_at: 10_000,
        });
        assert!(token.is_present());
        assert_eq!(token.expires_at(), 10_000);
    }

    #[test]
    fn test_assemble_failure_is_empty_zero_pair() {
        let token = assemble(FetchOutcome::Failed(FetchError::Source(
            SourceError::unavailable("down"),
        )));
        assert!(!token.is_present());
        assert_eq!(token.expires_at(), 0);
        assert_eq!(token.kind(), AuthInfoKind::SecurityToken);
    }

    #[test]
    fn test_assemble_timeout_is_empty_zero_pair() {
        let token = assemble(FetchOutcome::TimedOut {
            waited: Duration::from_millis(10),
        });
        assert!(!token.is_present());
        assert_eq!(token.expires_at(), 0);
    }

    #[test]
    fn test_assemble_degrades_partial_fetch() {
        // A snapshot whose expiration clamps to tick zero must not hand the
        // caller bytes with no usable expiration.
        let token = assemble(FetchOutcome::Fetched {
            blob: vec![1],
            expires_at: 0,
        });
        assert!(!token.is_present());
        assert!(token.blob().is_empty());
    }

    #[test]
    fn test_build_without_runtime_fails() {
        let source = Arc::new(MockCredentialSource::failing("unused"));
        let result = CredentialBridge::builder().source(source).build();
        assert!(matches!(result, Err(BuildError::NoRuntime)));
    }

    #[tokio::test]
    async fn test_build_inside_runtime_uses_current_handle() {
        let source = Arc::new(MockCredentialSource::failing("unused"));
        let bridge = CredentialBridge::builder()
            .source(source)
            .fetch_timeout(Duration::from_millis(50))
            .build()
            .expect("ambient runtime should be picked up");
        assert_eq!(bridge.config().fetch_timeout, Duration::from_millis(50));
    }
}
