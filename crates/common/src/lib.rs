pub mod config;
pub mod logging;
mod spans;

pub use config::Environment;
pub use logging::setup_logging;
