pub mod client;
pub mod compose;
pub mod inspect;
pub mod probe;
pub mod stats;

pub use client::{CommandOutput, DockerCli, DockerError};
pub use compose::ComposeRunner;
pub use inspect::{inspect_state, ContainerState};
pub use probe::{ContainerProbe, LogTail};
pub use stats::{resource_usage, ContainerStats};
