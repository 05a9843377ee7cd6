use chrono::{DateTime, Utc};

use super::poller::await_ready;
use super::types::{PollTarget, ReadinessError, Ready};

/// Outcome of a full ordered startup wait
#[derive(Debug, Clone)]
pub struct StartupReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub ready: Vec<Ready>,
}

impl StartupReport {
    pub fn total_attempts(&self) -> u32 {
        self.ready.iter().map(|r| r.attempts).sum()
    }
}

/// Awaits targets one at a time, in order.
///
/// Later services depend on earlier ones, so the first failure stops the sequence.
pub struct StartupSequence {
    targets: Vec<PollTarget>,
}

impl StartupSequence {
    pub fn new(targets: Vec<PollTarget>) -> Self {
        Self { targets }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub async fn run(&self) -> Result<StartupReport, ReadinessError> {
        let started_at = Utc::now();
        let mut ready = Vec::with_capacity(self.targets.len());

        for (index, target) in self.targets.iter().enumerate() {
            tracing::info!(
                "Waiting for {} ({}/{})",
                target.name,
                index + 1,
                self.targets.len()
            );
            ready.push(await_ready(target).await?);
        }

        Ok(StartupReport {
            started_at,
            finished_at: Utc::now(),
            ready,
        })
    }
}
