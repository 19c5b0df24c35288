//! Backend double that replays queued outputs instead of running a network.

use super::{BackendOptions, InferenceBackend};
use crate::models::ModelPair;
use ndarray::{Array, ArrayD, IxDyn};
use std::collections::VecDeque;

#[derive(Default)]
pub struct ScriptedBackend {
    replies: VecDeque<anyhow::Result<ArrayD<f32>>>,
    pub seen_shapes: Vec<Vec<usize>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, output: ArrayD<f32>) -> Self {
        self.replies.push_back(Ok(output));
        self
    }

    pub fn fail(mut self, message: &'static str) -> Self {
        self.replies.push_back(Err(anyhow::anyhow!(message)));
        self
    }
}

impl InferenceBackend for ScriptedBackend {
    fn load_model(_: &ModelPair, _: &BackendOptions) -> anyhow::Result<Self> {
        Ok(Self::new())
    }

    fn infer(&mut self, blob: &Array<f32, IxDyn>) -> anyhow::Result<ArrayD<f32>> {
        self.seen_shapes.push(blob.shape().to_vec());
        self.replies
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("no scripted reply left")))
    }
}

/// `[1, 1, N, 7]` detector output from `(confidence, x1, y1, x2, y2)` rows.
pub fn detector_output(rows: &[(f32, f32, f32, f32, f32)]) -> ArrayD<f32> {
    let flat: Vec<f32> = rows
        .iter()
        .flat_map(|&(c, x1, y1, x2, y2)| [0.0, 1.0, c, x1, y1, x2, y2])
        .collect();
    Array::from_shape_vec(IxDyn(&[1, 1, rows.len(), 7]), flat).unwrap()
}

/// `[1, 8]` score vector with all mass on `winner`.
pub fn age_scores(winner: usize) -> ArrayD<f32> {
    let mut scores = vec![0.0; 8];
    scores[winner] = 1.0;
    Array::from_shape_vec(IxDyn(&[1, 8]), scores).unwrap()
}
