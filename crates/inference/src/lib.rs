pub mod app;
pub mod backend;
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod processing;
pub mod report;
pub mod service;

// Re-export commonly used types for convenience
pub use backend::{BackendOptions, InferenceBackend};
pub use config::InferenceConfig;
pub use errors::PipelineError;
pub use models::{ModelPair, ModelStage};
pub use report::ConsoleReport;
pub use service::{AgeEstimationService, FaceOutcome};
