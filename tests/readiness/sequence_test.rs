use crate::common::{target, CountingDiagnostics, ScriptedProbe};
use pulsar_readiness::services::readiness::{HealthStatus, ReadinessError, StartupSequence};
use std::time::Duration;

use HealthStatus::{Healthy, Unhealthy, Unknown};

// =============================================================================
// STARTUP SEQUENCE
// =============================================================================

#[tokio::test]
async fn test_all_targets_ready_in_order() {
    let zk = ScriptedProbe::new(&[Unknown, Healthy], Unknown);
    let bookie = ScriptedProbe::always(Healthy);
    let broker = ScriptedProbe::new(&[Unknown, Unknown, Healthy], Unknown);
    let logs = CountingDiagnostics::logs("unused");

    let sequence = StartupSequence::new(vec![
        target("zookeeper", &zk, &logs, Duration::ZERO, 5),
        target("bookie", &bookie, &logs, Duration::ZERO, 5),
        target("broker", &broker, &logs, Duration::ZERO, 5),
    ]);
    assert_eq!(sequence.len(), 3);

    let report = sequence.run().await.unwrap();

    let names: Vec<&str> = report.ready.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["zookeeper", "bookie", "broker"]);
    assert_eq!(report.total_attempts(), 6);
    assert_eq!(logs.calls(), 0);
}

#[tokio::test]
async fn test_first_failure_stops_the_sequence() {
    let zk = ScriptedProbe::always(Healthy);
    let bookie = ScriptedProbe::new(&[Unhealthy], Healthy);
    let broker = ScriptedProbe::always(Healthy);
    let zk_logs = CountingDiagnostics::logs("zk ok");
    let bookie_logs = CountingDiagnostics::logs("bookie crashed");

    let sequence = StartupSequence::new(vec![
        target("zookeeper", &zk, &zk_logs, Duration::ZERO, 3),
        target("bookie", &bookie, &bookie_logs, Duration::ZERO, 3),
        target("broker", &broker, &zk_logs, Duration::ZERO, 3),
    ]);

    let err = sequence.run().await.unwrap_err();

    assert!(matches!(err, ReadinessError::Unhealthy { .. }));
    assert_eq!(err.target(), "bookie");
    assert_eq!(bookie_logs.calls(), 1);
    assert_eq!(zk_logs.calls(), 0);
    assert_eq!(broker.calls(), 0);
}

#[tokio::test]
async fn test_timeout_in_middle_is_returned_unchanged() {
    let zk = ScriptedProbe::always(Healthy);
    let broker = ScriptedProbe::always(Unknown);
    let logs = CountingDiagnostics::logs("waiting for bookies");

    let sequence = StartupSequence::new(vec![
        target("zookeeper", &zk, &logs, Duration::ZERO, 2),
        target("broker", &broker, &logs, Duration::ZERO, 2),
    ]);

    let err = sequence.run().await.unwrap_err();

    assert!(matches!(err, ReadinessError::TimedOut { attempts: 2, .. }));
    assert_eq!(err.target(), "broker");
    assert_eq!(broker.calls(), 2);
    assert_eq!(logs.calls(), 1);
}
