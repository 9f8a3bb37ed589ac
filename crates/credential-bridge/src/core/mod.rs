//! Core types for the credential bridge
mod credentials;
mod error;
mod secure;
mod ticks;
mod token;

pub use credentials::Credentials;
pub use error::{BuildError, Capability, CapabilityError, FetchError, SourceError};
pub use secure::SecretString;
pub use ticks::{NEVER_EXPIRES, TICKS_PER_MILLISECOND, expiration_to_ticks, millis_to_ticks};
pub use token::{AuthInfo, AuthInfoKind};
