//! Scriptable credential source

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::core::{Credentials, SourceError};
use crate::traits::CredentialSource;

/// Mock credential source with configurable behavior.
///
/// Supports scripted responses, artificial fetch delays (switchable between
/// calls), and concurrency accounting so tests can assert how the bridge
/// actually drove the source.
pub struct MockCredentialSource {
    state: Mutex<MockState>,
    fetches: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

struct MockState {
    response: Result<Credentials, String>,
    delay: Option<Duration>,
}

impl MockCredentialSource {
    /// Source that returns the given snapshot on every fetch
    pub fn returning(credentials: Credentials) -> Self {
        Self {
            state: Mutex::new(MockState {
                response: Ok(credentials),
                delay: None,
            }),
            fetches: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Source whose every fetch fails with an unavailable error
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(MockState {
                response: Err(reason.into()),
                delay: None,
            }),
            fetches: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// Set artificial delay for subsequent fetches
    pub fn with_delay(self, delay: Duration) -> Self {
        self.state.lock().delay = Some(delay);
        self
    }

    /// Change the delay between calls (`None` removes it)
    pub fn set_delay(&self, delay: Option<Duration>) {
        self.state.lock().delay = delay;
    }

    /// Change the snapshot handed out by subsequent fetches
    pub fn set_credentials(&self, credentials: Credentials) {
        self.state.lock().response = Ok(credentials);
    }

    /// Make subsequent fetches fail
    pub fn set_failure(&self, reason: impl Into<String>) {
        self.state.lock().response = Err(reason.into());
    }

    /// Total fetches started
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Fetches currently inside the source (drops back down when a fetch
    /// finishes or its job is aborted)
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of fetches ever inside the source at once
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

/// Decrements the in-flight gauge even when the fetch future is dropped
/// mid-delay by an aborted job.
struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CredentialSource for MockCredentialSource {
    async fn updated_credentials(&self) -> Result<Credentials, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now_in_flight, Ordering::SeqCst);
        let _guard = InFlightGuard(&self.in_flight);

        let (response, delay) = {
            let state = self.state.lock();
            (state.response.clone(), state.delay)
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        response.map_err(|reason| SourceError::Unavailable { reason })
    }
}
