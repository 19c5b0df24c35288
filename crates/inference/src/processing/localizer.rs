use crate::backend::InferenceBackend;
use anyhow::Context;
use common::span;
use image::RgbImage;
use ndarray::ArrayViewD;
use preprocess::{BlobSpec, CpuPreProcessor, Preprocess};
use schema::Detection;

/// Values per detector output row: image id, label, confidence, x1, y1, x2, y2.
const ROW_LEN: usize = 7;

/// Runs the SSD face detector over a whole image.
pub struct FaceLocalizer {
    preprocessor: CpuPreProcessor,
    pub confidence_threshold: f32,
}

impl FaceLocalizer {
    pub fn new(spec: BlobSpec, confidence_threshold: f32) -> Self {
        Self {
            preprocessor: CpuPreProcessor::new(spec),
            confidence_threshold,
        }
    }

    /// Detections in the detector's output order. No suppression of overlaps.
    pub fn detect<B: InferenceBackend>(
        &mut self,
        backend: &mut B,
        image: &RgbImage,
    ) -> anyhow::Result<Vec<Detection>> {
        let _s = span!("localize");

        let blob = self
            .preprocessor
            .preprocess(image.as_raw(), image.width(), image.height())
            .context("preparing detector input")?;
        let output = backend.infer(&blob).context("detector forward pass")?;

        self.parse_detections(&output.view(), image.width(), image.height())
    }

    /// Decode a `[1, 1, N, 7]` detector tensor into pixel-space boxes.
    #[tracing::instrument(skip(self, output))]
    pub fn parse_detections(
        &self,
        output: &ArrayViewD<f32>,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Vec<Detection>> {
        let shape = output.shape();
        if shape.len() != 4 || shape[3] != ROW_LEN {
            anyhow::bail!(
                "unexpected detector output shape {:?}, expected [1, 1, N, {}]",
                shape,
                ROW_LEN
            );
        }

        let rows = shape[0] * shape[1] * shape[2];
        let table = output.to_shape((rows, ROW_LEN))?;

        let mut detections = Vec::new();
        for row in table.rows() {
            let confidence = row[2];
            if confidence.is_nan() || confidence <= self.confidence_threshold {
                continue;
            }

            // Truncation toward zero, then clamping to the image.
            let x1 = (row[3] * width as f32) as i32;
            let y1 = (row[4] * height as f32) as i32;
            let x2 = (row[5] * width as f32) as i32;
            let y2 = (row[6] * height as f32) as i32;

            match Detection::clamped(x1, y1, x2, y2, confidence, width, height) {
                Some(detection) => detections.push(detection),
                None => tracing::debug!(x1, y1, x2, y2, confidence, "Dropping degenerate box"),
            }
        }

        tracing::debug!(count = detections.len(), rows, "Parsed detections");
        Ok(detections)
    }
}
