//! Error types for the credential bridge
//!
//! Two propagation classes exist, by design contract:
//! - Soft failures ([`SourceError`], [`FetchError`]) are absorbed by the
//!   bridge and collapse into the empty/zero token; they never cross the
//!   boundary to the consumer as errors.
//! - Hard failures ([`CapabilityError`], [`BuildError`]) indicate
//!   misconfiguration rather than a transient condition and do surface.

use thiserror::Error;

/// Failure reported by an external credential source
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not be reached or had no credentials to give
    #[error("credential source unavailable: {reason}")]
    Unavailable {
        /// What went wrong, in source-specific terms
        reason: String,
    },

    /// The source refused to refresh (revoked identity, bad request, ...)
    #[error("credential source rejected the refresh: {reason}")]
    Rejected {
        /// Why the refresh was refused
        reason: String,
    },

    /// Any other source-specific failure
    #[error("credential source error: {source}")]
    Other {
        /// Underlying source-side error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl SourceError {
    /// The source could not produce credentials
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// The source refused the refresh
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Wrap an arbitrary source-side error
    pub fn other(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Other {
            source: Box::new(source),
        }
    }
}

/// Soft failure of a single fetch attempt.
///
/// Timeout is deliberately not a variant here: it is produced by the waiting
/// side, never by the job, and lives in the fetch outcome instead.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The credential source failed to produce credentials
    #[error("credential source failed: {0}")]
    Source(#[from] SourceError),

    /// Encoding the fetched credentials failed
    #[error("failed to encode credentials: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The fetch job went away before completing (worker torn down,
    /// job aborted, or the runtime is shutting down)
    #[error("credential fetch was cancelled before completion")]
    Canceled,
}

impl FetchError {
    /// Stable lowercase label for structured logging and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Source(_) => "source",
            Self::Serialization(_) => "serialization",
            Self::Canceled => "canceled",
        }
    }
}

/// A capability the producer core may ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Certificate-based device authentication
    DeviceCertificate,
    /// Device fingerprint provisioning
    DeviceFingerprint,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DeviceCertificate => f.write_str("device certificate"),
            Self::DeviceFingerprint => f.write_str("device fingerprint"),
        }
    }
}

/// Hard configuration error: a capability this bridge is not provisioned
/// for was invoked.
///
/// Distinct from the soft empty-token fallback so callers and tests can
/// tell "not provisioned" apart from "fetch failed".
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// The capability is not available in this configuration
    #[error("{capability} support is not provisioned in this configuration")]
    NotProvisioned {
        /// Which capability was asked for
        capability: Capability,
    },
}

impl CapabilityError {
    /// The capability that was asked for
    pub fn capability(&self) -> Capability {
        match self {
            Self::NotProvisioned { capability } => *capability,
        }
    }
}

/// Construction-time error for the bridge builder
#[derive(Debug, Error)]
pub enum BuildError {
    /// No runtime handle was supplied and none is entered on this thread
    #[error("no tokio runtime handle available for the fetch worker")]
    NoRuntime,
}
