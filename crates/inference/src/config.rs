use crate::models::{ModelSpec, ModelStage};
use annotate::DEFAULT_JPEG_QUALITY;
use preprocess::BlobSpec;
use std::env;
use std::path::PathBuf;

pub use common::Environment;

/// res10 SSD face detector: 300x300 input, BGR mean.
pub const FACE_BLOB: BlobSpec = BlobSpec::new((300, 300), [104.0, 177.0, 123.0]);

/// Levi-Hassner age network: 227x227 input, BGR mean of its training set.
pub const AGE_BLOB: BlobSpec = BlobSpec::new((227, 227), [78.426_34, 87.768_91, 114.895_85]);

pub const LOCALIZER_MODEL: ModelSpec = ModelSpec {
    stage: ModelStage::FaceDetection,
    topology: "res10_300x300_ssd.onnx",
    weights: "res10_300x300_ssd.onnx.data",
};

pub const CLASSIFIER_MODEL: ModelSpec = ModelSpec {
    stage: ModelStage::AgeEstimation,
    topology: "age_net.onnx",
    weights: "age_net.onnx.data",
};

pub const DEFAULT_SEARCH_PATHS: [&str; 4] =
    ["./models/", "../models/", "/opt/age-estimator/models/", "./"];

pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;

/// Settings for one run. Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub environment: Environment,
    pub search_paths: Vec<PathBuf>,
    pub localizer_model: ModelSpec,
    pub classifier_model: ModelSpec,
    pub face_blob: BlobSpec,
    pub age_blob: BlobSpec,
    /// Detections must score strictly above this value.
    pub confidence_threshold: f32,
    pub jpeg_quality: u8,
    pub intra_threads: usize,
}

impl InferenceConfig {
    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Self {
        let environment = Environment::from_env();

        let search_paths = env::var_os("MODEL_SEARCH_PATHS")
            .map(|value| {
                env::split_paths(&value)
                    .filter(|p| !p.as_os_str().is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|paths| !paths.is_empty())
            .unwrap_or_else(default_search_paths);

        let confidence_threshold = env::var("CONFIDENCE_THRESHOLD")
            .ok()
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|t| (0.0..=1.0).contains(t))
            .unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD);

        let jpeg_quality = env::var("JPEG_QUALITY")
            .ok()
            .and_then(|s| s.parse::<u8>().ok())
            .map(|q| q.clamp(1, 100))
            .unwrap_or(DEFAULT_JPEG_QUALITY);

        let intra_threads = env::var("INTRA_THREADS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(1);

        Self {
            environment,
            search_paths,
            localizer_model: LOCALIZER_MODEL,
            classifier_model: CLASSIFIER_MODEL,
            face_blob: FACE_BLOB,
            age_blob: AGE_BLOB,
            confidence_threshold,
            jpeg_quality,
            intra_threads,
        }
    }

    /// Create default configuration for testing
    #[cfg(test)]
    pub fn test_default() -> Self {
        Self {
            environment: Environment::Development,
            search_paths: default_search_paths(),
            localizer_model: LOCALIZER_MODEL,
            classifier_model: CLASSIFIER_MODEL,
            face_blob: FACE_BLOB,
            age_blob: AGE_BLOB,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            intra_threads: 1,
        }
    }
}

fn default_search_paths() -> Vec<PathBuf> {
    DEFAULT_SEARCH_PATHS.iter().map(PathBuf::from).collect()
}
