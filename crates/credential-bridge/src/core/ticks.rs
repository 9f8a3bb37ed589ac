//! Producer tick unit: hundreds of nanoseconds since the Unix epoch
//!
//! The consuming producer core counts time in 100 ns ticks while credential
//! sources report expirations in milliseconds. The conversions here are the
//! single place that scale factor lives.

use chrono::{DateTime, Utc};

/// Producer ticks per millisecond (one tick is 100 ns).
pub const TICKS_PER_MILLISECOND: u64 = 10_000;

/// Sentinel expiration meaning "credentials never expire".
///
/// Passed through unscaled by [`millis_to_ticks`]; the maximum representable
/// instant in either unit.
pub const NEVER_EXPIRES: u64 = u64::MAX;

/// Convert a millisecond timestamp to producer ticks.
///
/// [`NEVER_EXPIRES`] is returned as-is; anything else that would overflow the
/// tick range saturates at the sentinel.
pub fn millis_to_ticks(millis: u64) -> u64 {
    if millis == NEVER_EXPIRES {
        return NEVER_EXPIRES;
    }
    millis.saturating_mul(TICKS_PER_MILLISECOND)
}

/// Convert an optional absolute expiration into producer ticks.
///
/// `None` means the credentials never expire and maps to [`NEVER_EXPIRES`].
/// Instants before the epoch clamp to tick zero, which downstream token
/// construction treats as "no usable expiration".
pub fn expiration_to_ticks(expiration: Option<DateTime<Utc>>) -> u64 {
    match expiration {
        None => NEVER_EXPIRES,
        Some(instant) => millis_to_ticks(instant.timestamp_millis().max(0) as u64),
    }
}
