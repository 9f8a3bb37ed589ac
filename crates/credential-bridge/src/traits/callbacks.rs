//! Inbound seam: the synchronous surface the producer core calls

use crate::core::{AuthInfo, CapabilityError};

/// Authentication callbacks consumed by a native producer core on its own
/// thread, at a cadence it controls.
///
/// `security_token` is infallible by contract: the consumer is a real-time
/// core that cannot tolerate an error crossing the boundary, so every
/// failure mode collapses into the absent token. The two device-capability
/// entry points are the exception: an unprovisioned capability is a
/// configuration defect and surfaces as a typed hard error.
pub trait AuthCallbacks: Send + Sync {
    /// Fetch a security token within the configured deadline, or the absent
    /// token if credentials could not be produced in time.
    fn security_token(&self) -> AuthInfo;

    /// Retrieve the device certificate, if this configuration provisions
    /// certificate-based authentication.
    fn device_certificate(&self) -> Result<AuthInfo, CapabilityError>;

    /// Retrieve the device fingerprint, if this configuration provisions
    /// device provisioning.
    fn device_fingerprint(&self) -> Result<String, CapabilityError>;
}
