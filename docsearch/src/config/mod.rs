//! Startup configuration and wiring.

mod dependencies;
mod logging;

pub use dependencies::{Dependencies, Settings};
pub use logging::init_tracing;
