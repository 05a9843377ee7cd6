pub mod poller;
pub mod sequence;
pub mod types;

pub use poller::await_ready;
pub use sequence::{StartupReport, StartupSequence};
pub use types::*;
