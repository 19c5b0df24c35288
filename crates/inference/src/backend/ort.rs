use super::{BackendOptions, InferenceBackend};
use crate::models::ModelPair;
use common::span;
use ndarray::{Array, ArrayD, IxDyn};
use ort::{
    session::{Session, builder::GraphOptimizationLevel},
    value::TensorRef,
};
use std::path::Path;

pub struct OrtBackend {
    session: Session,
}

impl OrtBackend {
    /// ONNX Runtime resolves external data relative to the model file, so the
    /// weights blob has to sit in the topology's directory.
    fn check_weights_location(model: &ModelPair) -> anyhow::Result<()> {
        let topology_dir = model.topology.parent().unwrap_or(Path::new(""));
        let weights_dir = model.weights.parent().unwrap_or(Path::new(""));

        if topology_dir != weights_dir {
            anyhow::bail!(
                "weights {} must be next to {}",
                model.weights.display(),
                model.topology.display()
            );
        }
        Ok(())
    }
}

impl InferenceBackend for OrtBackend {
    fn load_model(model: &ModelPair, options: &BackendOptions) -> anyhow::Result<Self> {
        Self::check_weights_location(model)?;

        // Initialize ORT environment (idempotent)
        let _ = ort::init().commit();

        tracing::info!(
            stage = %model.stage,
            intra_threads = options.intra_threads,
            "Initializing ONNX Runtime with CPU execution provider"
        );

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(options.intra_threads)?
            .with_execution_providers([
                ort::execution_providers::CPUExecutionProvider::default().build(),
            ])?
            .commit_from_file(&model.topology)?;

        tracing::info!("Model loaded from {}", model.topology.display());
        Ok(Self { session })
    }

    fn infer(&mut self, blob: &Array<f32, IxDyn>) -> anyhow::Result<ArrayD<f32>> {
        let _s = span!("forward");

        let outputs = self
            .session
            .run(ort::inputs![TensorRef::from_array_view(blob.view())?])?;

        let output = outputs[0].try_extract_array::<f32>()?;
        Ok(output.into_owned())
    }
}
