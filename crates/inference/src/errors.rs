use crate::models::ModelStage;
use annotate::{AnnotateError, OutputError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a run. Each maps to exit code 1.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Could not read image {}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{stage} model files not found (looking for {topology} and {weights})")]
    MissingModel {
        stage: ModelStage,
        topology: &'static str,
        weights: &'static str,
    },

    #[error("Failed to load {} model: {source:#}", .stage.noun())]
    ModelLoad {
        stage: ModelStage,
        #[source]
        source: anyhow::Error,
    },

    #[error("Face detection failed: {0:#}")]
    Localization(#[source] anyhow::Error),

    #[error(transparent)]
    Annotate(#[from] AnnotateError),

    #[error("Could not write output image {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: OutputError,
    },
}
