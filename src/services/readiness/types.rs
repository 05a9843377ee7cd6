use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Status reported by a single health query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    /// Not yet in a terminal ready/failed state
    Unknown,
}

impl HealthStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Healthy => "healthy",
            Self::Unhealthy => "unhealthy",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Queries the current status of a watched resource
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn check(&self) -> HealthStatus;
}

/// Fetches diagnostic context (e.g. recent log lines) for a failed resource
#[async_trait]
pub trait DiagnosticsSource: Send + Sync {
    async fn collect(&self) -> Result<String, String>;
}

/// Diagnostic context attached to a failure verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostics {
    Collected(String),
    /// Retrieval itself failed; carries the reason
    Unavailable(String),
}

impl Diagnostics {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Collected(_))
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collected(output) => f.write_str(output),
            Self::Unavailable(reason) => write!(f, "diagnostics unavailable: {}", reason),
        }
    }
}

impl From<Result<String, String>> for Diagnostics {
    fn from(result: Result<String, String>) -> Self {
        match result {
            Ok(output) => Self::Collected(output),
            Err(reason) => Self::Unavailable(reason),
        }
    }
}

/// One watched resource plus the timing of the wait on it.
///
/// Built right before a wait and dropped once it returns.
#[derive(Clone)]
pub struct PollTarget {
    pub name: String,
    pub probe: Arc<dyn HealthProbe>,
    pub diagnostics: Arc<dyn DiagnosticsSource>,
    pub interval: Duration,
    pub max_attempts: u32,
}

impl PollTarget {
    pub fn new(
        name: impl Into<String>,
        probe: Arc<dyn HealthProbe>,
        diagnostics: Arc<dyn DiagnosticsSource>,
        interval: Duration,
        max_attempts: u32,
    ) -> Self {
        Self {
            name: name.into(),
            probe,
            diagnostics,
            interval,
            max_attempts,
        }
    }
}

impl fmt::Debug for PollTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollTarget")
            .field("name", &self.name)
            .field("interval", &self.interval)
            .field("max_attempts", &self.max_attempts)
            .finish()
    }
}

/// Successful wait
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ready {
    pub name: String,
    pub attempts: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum ReadinessError {
    #[error("{target} reported unhealthy on attempt {attempt}\n{diagnostics}")]
    Unhealthy {
        target: String,
        attempt: u32,
        diagnostics: Diagnostics,
    },

    #[error("{target} not ready after {attempts} attempts\n{diagnostics}")]
    TimedOut {
        target: String,
        attempts: u32,
        diagnostics: Diagnostics,
    },
}

impl ReadinessError {
    pub fn target(&self) -> &str {
        match self {
            Self::Unhealthy { target, .. } | Self::TimedOut { target, .. } => target,
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        match self {
            Self::Unhealthy { diagnostics, .. } | Self::TimedOut { diagnostics, .. } => {
                diagnostics
            }
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::Unhealthy { .. } => "unhealthy",
            Self::TimedOut { .. } => "timed_out",
        }
    }
}
