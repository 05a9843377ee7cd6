use crate::common::{target, CountingDiagnostics, ScriptedProbe};
use pulsar_readiness::services::readiness::{await_ready, Diagnostics, HealthStatus, ReadinessError};
use std::time::Duration;
use tokio::time::Instant;

use HealthStatus::{Healthy, Unhealthy, Unknown};

// =============================================================================
// READINESS POLLER - VERDICTS
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_healthy_first_returns_without_sleeping() {
    let probe = ScriptedProbe::always(Healthy);
    let logs = CountingDiagnostics::logs("unused");
    let t = target("zookeeper", &probe, &logs, Duration::from_secs(5), 10);

    let start = Instant::now();
    let ready = await_ready(&t).await.unwrap();

    assert_eq!(ready.name, "zookeeper");
    assert_eq!(ready.attempts, 1);
    assert_eq!(probe.calls(), 1);
    assert_eq!(logs.calls(), 0);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_then_healthy_succeeds() {
    let probe = ScriptedProbe::new(&[Unknown, Unknown, Healthy], Unknown);
    let logs = CountingDiagnostics::logs("unused");
    let t = target("bookie", &probe, &logs, Duration::ZERO, 3);

    let ready = await_ready(&t).await.unwrap();

    assert_eq!(ready.attempts, 3);
    assert_eq!(probe.calls(), 3);
    assert_eq!(logs.calls(), 0);
}

#[tokio::test]
async fn test_unknown_then_unhealthy_fails_fast() {
    let probe = ScriptedProbe::new(&[Unknown, Unhealthy], Healthy);
    let logs = CountingDiagnostics::logs("bookie: journal directory not writable");
    let t = target("bookie", &probe, &logs, Duration::ZERO, 3);

    let err = await_ready(&t).await.unwrap_err();

    match err {
        ReadinessError::Unhealthy { target, attempt, diagnostics } => {
            assert_eq!(target, "bookie");
            assert_eq!(attempt, 2);
            assert_eq!(
                diagnostics,
                Diagnostics::Collected("bookie: journal directory not writable".to_string())
            );
        }
        other => panic!("expected Unhealthy, got {:?}", other),
    }
    assert_eq!(probe.calls(), 2);
    assert_eq!(logs.calls(), 1);
}

#[tokio::test]
async fn test_unhealthy_at_attempt_k_checks_exactly_k_times() {
    for k in 1..=5 {
        let mut script = vec![Unknown; (k - 1) as usize];
        script.push(Unhealthy);
        let probe = ScriptedProbe::new(&script, Healthy);
        let logs = CountingDiagnostics::logs("boom");
        let t = target("broker", &probe, &logs, Duration::ZERO, 5);

        let err = await_ready(&t).await.unwrap_err();

        assert!(matches!(err, ReadinessError::Unhealthy { attempt, .. } if attempt == k));
        assert_eq!(probe.calls(), k);
        assert_eq!(logs.calls(), 1);
    }
}

#[tokio::test]
async fn test_always_unknown_times_out() {
    let probe = ScriptedProbe::always(Unknown);
    let logs = CountingDiagnostics::logs("still starting");
    let t = target("broker", &probe, &logs, Duration::ZERO, 2);

    let err = await_ready(&t).await.unwrap_err();

    assert!(matches!(err, ReadinessError::TimedOut { attempts: 2, .. }));
    assert_eq!(err.target(), "broker");
    assert_eq!(err.diagnostics(), &Diagnostics::Collected("still starting".to_string()));
    assert_eq!(probe.calls(), 2);
    assert_eq!(logs.calls(), 1);
}

// =============================================================================
// READINESS POLLER - TIMING
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_interval_is_constant_between_checks() {
    let probe = ScriptedProbe::new(&[Unknown, Unknown, Healthy], Unknown);
    let logs = CountingDiagnostics::logs("unused");
    let t = target("broker", &probe, &logs, Duration::from_secs(5), 10);

    let start = Instant::now();
    await_ready(&t).await.unwrap();

    // two waits of 5s, no growth
    assert_eq!(start.elapsed(), Duration::from_secs(10));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_does_not_wait_after_last_attempt() {
    let probe = ScriptedProbe::always(Unknown);
    let logs = CountingDiagnostics::logs("unused");
    let t = target("pulsar-manager", &probe, &logs, Duration::from_secs(5), 3);

    let start = Instant::now();
    let err = await_ready(&t).await.unwrap_err();

    assert_eq!(err.kind(), "timed_out");
    assert_eq!(probe.calls(), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(10));
}

// =============================================================================
// READINESS POLLER - DIAGNOSTICS AND IDEMPOTENCE
// =============================================================================

#[tokio::test]
async fn test_diagnostics_failure_reported_alongside_verdict() {
    let probe = ScriptedProbe::always(Unknown);
    let logs = CountingDiagnostics::failing("Error: No such container: broker");
    let t = target("broker", &probe, &logs, Duration::ZERO, 1);

    let err = await_ready(&t).await.unwrap_err();

    assert!(matches!(err, ReadinessError::TimedOut { .. }));
    assert_eq!(
        err.diagnostics(),
        &Diagnostics::Unavailable("Error: No such container: broker".to_string())
    );
    assert!(err.to_string().contains("diagnostics unavailable"));
    assert_eq!(logs.calls(), 1);
}

#[tokio::test]
async fn test_repeated_waits_on_healthy_target_agree() {
    let probe = ScriptedProbe::always(Healthy);
    let logs = CountingDiagnostics::logs("unused");
    let t = target("zookeeper", &probe, &logs, Duration::from_secs(1), 3);

    let first = await_ready(&t).await.unwrap();
    let second = await_ready(&t).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(probe.calls(), 2);
    assert_eq!(logs.calls(), 0);
}
