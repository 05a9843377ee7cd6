use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::services::readiness::{HealthProbe, HealthStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortStatus {
    Open,
    Closed(String),
}

impl PortStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

/// TCP reachability check for a published service port
#[derive(Debug, Clone)]
pub struct PortCheck {
    pub address: String,
    pub timeout: Duration,
}

impl PortCheck {
    pub fn new(address: impl Into<String>, timeout: Duration) -> Self {
        Self {
            address: address.into(),
            timeout,
        }
    }

    pub async fn probe(&self) -> PortStatus {
        match timeout(self.timeout, TcpStream::connect(&self.address)).await {
            Ok(Ok(_)) => PortStatus::Open,
            Ok(Err(e)) => PortStatus::Closed(e.to_string()),
            Err(_) => PortStatus::Closed(format!("no answer within {:?}", self.timeout)),
        }
    }
}

/// A port that does not accept connections yet is still starting, not failed
#[async_trait]
impl HealthProbe for PortCheck {
    async fn check(&self) -> HealthStatus {
        match self.probe().await {
            PortStatus::Open => HealthStatus::Healthy,
            PortStatus::Closed(_) => HealthStatus::Unknown,
        }
    }
}

/// Probe every address and log the outcome; returns the addresses that are closed
pub async fn check_ports(checks: &[PortCheck]) -> Vec<String> {
    let mut closed = Vec::new();
    for check in checks {
        match check.probe().await {
            PortStatus::Open => tracing::info!("🔌 {} is accepting connections", check.address),
            PortStatus::Closed(reason) => {
                tracing::warn!("🔌 {} is not reachable: {}", check.address, reason);
                closed.push(check.address.clone());
            }
        }
    }
    closed
}
