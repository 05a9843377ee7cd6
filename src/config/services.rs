/// Compose service to wait for, in startup order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSpec {
    /// Service name as used for logging
    pub name: String,
    /// Container name passed to `docker inspect` / `docker logs`
    pub container: String,
}

impl ServiceSpec {
    pub fn new(name: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            container: container.into(),
        }
    }

    /// Parse `service` or `service:container`
    pub fn parse(entry: &str) -> Option<Self> {
        let entry = entry.trim();
        if entry.is_empty() {
            return None;
        }
        match entry.split_once(':') {
            Some((name, container)) => {
                let (name, container) = (name.trim(), container.trim());
                if name.is_empty() || container.is_empty() {
                    None
                } else {
                    Some(Self::new(name, container))
                }
            }
            None => Some(Self::new(entry, entry)),
        }
    }
}

/// ZooKeeper first, then BookKeeper, Broker and Pulsar Manager
pub fn default_services() -> Vec<ServiceSpec> {
    ["zookeeper", "bookie", "broker", "pulsar-manager"]
        .iter()
        .map(|name| ServiceSpec::new(*name, *name))
        .collect()
}

pub fn default_ports() -> Vec<String> {
    vec![
        "localhost:2181".to_string(),
        "localhost:6650".to_string(),
        "localhost:8080".to_string(),
        "localhost:9527".to_string(),
    ]
}
