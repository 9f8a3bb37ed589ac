//! Internal result of a single fetch attempt

use std::time::Duration;

use crate::core::FetchError;

/// What one fetch attempt produced. Never exposed outward; the assembler
/// collapses it into the token value handed to the caller.
#[derive(Debug)]
pub(crate) enum FetchOutcome {
    /// The job fetched and serialized a snapshot; both halves travel
    /// together so partial results cannot exist.
    Fetched {
        /// Serialized credential bytes
        blob: Vec<u8>,
        /// Expiration in producer ticks
        expires_at: u64,
    },

    /// The job ran and failed
    Failed(FetchError),

    /// The bounded wait expired before the job reported back
    TimedOut {
        /// How long the caller actually waited
        waited: Duration,
    },
}
