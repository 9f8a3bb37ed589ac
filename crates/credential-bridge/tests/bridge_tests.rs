//! End-to-end tests for the bounded-wait token fetch, driven from plain OS
//! threads the way a native producer core would call in.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::DateTime;
use credential_bridge::bridge::{BridgeConfig, CredentialBridge};
use credential_bridge::core::{
    AuthInfoKind, Capability, CapabilityError, Credentials, NEVER_EXPIRES,
};
use credential_bridge::testing::{MockCredentialSource, test_credentials};
use credential_bridge::traits::AuthCallbacks;
use pretty_assertions::assert_eq;

fn test_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_time()
        .build()
        .expect("failed to build test runtime")
}

fn build_bridge(
    source: &Arc<MockCredentialSource>,
    runtime: &tokio::runtime::Runtime,
    config: BridgeConfig,
) -> CredentialBridge {
    CredentialBridge::builder()
        .source(source.clone())
        .runtime(runtime.handle().clone())
        .config(config)
        .build()
        .expect("bridge builds with an explicit runtime handle")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn successful_fetch_scales_expiration_to_producer_ticks() {
    init_tracing();
    let runtime = test_runtime();
    let expiration = DateTime::from_timestamp_millis(1_700_000_000_000).expect("valid timestamp");
    let source = Arc::new(MockCredentialSource::returning(
        Credentials::new("AKIDEXAMPLE", "wJalrXUtnFEMI").with_expiration(expiration),
    ));
    let bridge = build_bridge(&source, &runtime, BridgeConfig::default());

    let token = bridge.security_token();

    assert!(token.is_present());
    assert_eq!(token.kind(), AuthInfoKind::SecurityToken);
    assert_eq!(token.expires_at(), 17_000_000_000_000_000);
    assert_eq!(source.fetch_count(), 1);

    // The blob is the source snapshot, decodable on the far side of the
    // boundary.
    let restored: Credentials =
        serde_json::from_slice(token.blob()).expect("blob holds a credentials snapshot");
    assert_eq!(restored.access_key_id, "AKIDEXAMPLE");
    assert_eq!(restored.expiration, Some(expiration));
}

#[test]
fn source_failure_yields_empty_zero_pair() {
    init_tracing();
    let runtime = test_runtime();
    let source = Arc::new(MockCredentialSource::failing("token endpoint down"));
    let bridge = build_bridge(&source, &runtime, BridgeConfig::default());

    let token = bridge.security_token();

    assert!(!token.is_present());
    assert!(token.blob().is_empty());
    assert_eq!(token.expires_at(), 0);
    assert_eq!(token.kind(), AuthInfoKind::SecurityToken);
}

#[test]
fn slow_source_releases_caller_at_deadline() {
    init_tracing();
    let runtime = test_runtime();
    let source = Arc::new(
        MockCredentialSource::returning(test_credentials()).with_delay(Duration::from_secs(2)),
    );
    let config = BridgeConfig::default().with_fetch_timeout(Duration::from_millis(100));
    let bridge = build_bridge(&source, &runtime, config);

    let started = Instant::now();
    let token = bridge.security_token();
    let elapsed = started.elapsed();

    assert!(!token.is_present());
    assert_eq!(token.expires_at(), 0);
    assert!(
        elapsed >= Duration::from_millis(100),
        "wait must cover the full deadline, returned after {elapsed:?}"
    );
    assert!(
        elapsed < Duration::from_secs(1),
        "caller must be released near the deadline, not the source's pace; took {elapsed:?}"
    );
}

#[test]
fn never_expiring_credentials_pass_sentinel_through_unscaled() {
    let runtime = test_runtime();
    let source = Arc::new(MockCredentialSource::returning(Credentials::new(
        "AKIDSTATIC",
        "secret",
    )));
    let bridge = build_bridge(&source, &runtime, BridgeConfig::default());

    let token = bridge.security_token();

    assert!(token.is_present());
    assert!(token.never_expires());
    assert_eq!(token.expires_at(), NEVER_EXPIRES);
}

#[test]
fn pre_epoch_expiration_degrades_to_absent_token() {
    let runtime = test_runtime();
    let expiration = DateTime::from_timestamp_millis(-1_000).expect("valid timestamp");
    let source = Arc::new(MockCredentialSource::returning(
        Credentials::new("AKIDOLD", "secret").with_expiration(expiration),
    ));
    let bridge = build_bridge(&source, &runtime, BridgeConfig::default());

    let token = bridge.security_token();

    assert!(!token.is_present());
    assert_eq!(token.expires_at(), 0);
}

#[test]
fn device_capabilities_fail_hard_not_soft() {
    let runtime = test_runtime();
    let source = Arc::new(MockCredentialSource::returning(test_credentials()));
    let bridge = build_bridge(&source, &runtime, BridgeConfig::default());

    let cert_err = bridge
        .device_certificate()
        .expect_err("certificate integration is not provisioned");
    assert!(matches!(
        cert_err,
        CapabilityError::NotProvisioned {
            capability: Capability::DeviceCertificate
        }
    ));

    let fp_err = bridge
        .device_fingerprint()
        .expect_err("provisioning is not implemented");
    assert_eq!(fp_err.capability(), Capability::DeviceFingerprint);

    // The stubs never touched the source.
    assert_eq!(source.fetch_count(), 0);
}

#[test]
fn bridge_serves_the_callbacks_trait_object() {
    let runtime = test_runtime();
    let source = Arc::new(MockCredentialSource::returning(test_credentials()));
    let bridge = build_bridge(&source, &runtime, BridgeConfig::default());

    let callbacks: &dyn AuthCallbacks = &bridge;
    let token = callbacks.security_token();

    assert!(token.is_present());
    assert!(callbacks.device_certificate().is_err());
}

#[test]
fn repeated_calls_fetch_fresh_snapshots() {
    let runtime = test_runtime();
    let source = Arc::new(MockCredentialSource::returning(test_credentials()));
    let bridge = build_bridge(&source, &runtime, BridgeConfig::default());

    let first = bridge.security_token();
    let second = bridge.security_token();

    assert!(first.is_present());
    assert!(second.is_present());
    // No caching across calls: every call is one fetch.
    assert_eq!(source.fetch_count(), 2);
}
