//! Traits at the bridge's seams
mod callbacks;
mod source;

pub use callbacks::AuthCallbacks;
pub use source::CredentialSource;
