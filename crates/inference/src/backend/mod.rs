use crate::models::ModelPair;
use ndarray::{Array, ArrayD, IxDyn};

#[cfg(feature = "ort-backend")]
pub mod ort;

/// Knobs shared by every backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendOptions {
    pub intra_threads: usize,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self { intra_threads: 1 }
    }
}

/// A loaded network that maps one input blob to its first output tensor.
pub trait InferenceBackend {
    fn load_model(model: &ModelPair, options: &BackendOptions) -> anyhow::Result<Self>
    where
        Self: Sized;

    /// Run one forward pass
    fn infer(&mut self, blob: &Array<f32, IxDyn>) -> anyhow::Result<ArrayD<f32>>;
}

#[cfg(test)]
pub(crate) mod scripted;
