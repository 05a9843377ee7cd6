use tokio::time::sleep;

use super::types::{Diagnostics, HealthStatus, PollTarget, ReadinessError, Ready};

/// Poll `target` until it reports healthy, reports unhealthy, or runs out of attempts.
///
/// Diagnostics are collected once, only when the wait fails.
pub async fn await_ready(target: &PollTarget) -> Result<Ready, ReadinessError> {
    for attempt in 1..=target.max_attempts {
        let status = target.probe.check().await;
        tracing::debug!(
            target_name = %target.name,
            attempt,
            max_attempts = target.max_attempts,
            %status,
            "readiness check"
        );

        match status {
            HealthStatus::Healthy => {
                tracing::info!("✅ {} is ready (attempt {})", target.name, attempt);
                return Ok(Ready {
                    name: target.name.clone(),
                    attempts: attempt,
                });
            }
            HealthStatus::Unhealthy => {
                tracing::error!("❌ {} reported unhealthy (attempt {})", target.name, attempt);
                let diagnostics = collect_diagnostics(target).await;
                return Err(ReadinessError::Unhealthy {
                    target: target.name.clone(),
                    attempt,
                    diagnostics,
                });
            }
            HealthStatus::Unknown => {
                // No check follows the last attempt
                if attempt < target.max_attempts && !target.interval.is_zero() {
                    sleep(target.interval).await;
                }
            }
        }
    }

    let attempts = target.max_attempts;
    tracing::error!("⏳ {} not ready after {} attempts", target.name, attempts);
    let diagnostics = collect_diagnostics(target).await;
    Err(ReadinessError::TimedOut {
        target: target.name.clone(),
        attempts,
        diagnostics,
    })
}

async fn collect_diagnostics(target: &PollTarget) -> Diagnostics {
    let diagnostics = Diagnostics::from(target.diagnostics.collect().await);
    if let Diagnostics::Unavailable(reason) = &diagnostics {
        tracing::warn!(
            target_name = %target.name,
            reason = %reason,
            "failed to collect diagnostics"
        );
    }
    diagnostics
}
