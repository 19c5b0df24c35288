use crate::backend::InferenceBackend;
use anyhow::Context;
use common::span;
use image::{RgbImage, imageops};
use preprocess::{BlobSpec, CpuPreProcessor, Preprocess};
use schema::{AGE_BRACKET_COUNT, AgeBracket, Detection};

/// Runs the age network on one face crop at a time.
pub struct AgeClassifier {
    preprocessor: CpuPreProcessor,
}

impl AgeClassifier {
    pub fn new(spec: BlobSpec) -> Self {
        Self {
            preprocessor: CpuPreProcessor::new(spec),
        }
    }

    /// Crop `detection` out of the unannotated `image` and pick its bracket.
    pub fn classify<B: InferenceBackend>(
        &mut self,
        backend: &mut B,
        image: &RgbImage,
        detection: &Detection,
    ) -> anyhow::Result<AgeBracket> {
        let _s = span!("classify");

        if detection.x2() > image.width() || detection.y2() > image.height() {
            anyhow::bail!(
                "face box ({}, {}, {}, {}) lies outside the {}x{} image",
                detection.x1(),
                detection.y1(),
                detection.x2(),
                detection.y2(),
                image.width(),
                image.height()
            );
        }

        let face = imageops::crop_imm(
            image,
            detection.x1(),
            detection.y1(),
            detection.width(),
            detection.height(),
        )
        .to_image();

        let blob = self
            .preprocessor
            .preprocess(face.as_raw(), face.width(), face.height())
            .context("preparing age input")?;
        let scores = backend.infer(&blob).context("age forward pass")?;

        let scores: Vec<f32> = scores.iter().copied().collect();
        select_bracket(&scores)
    }
}

/// Arg-max over the bracket scores. Ties go to the lowest index; NaN never wins.
pub fn select_bracket(scores: &[f32]) -> anyhow::Result<AgeBracket> {
    if scores.len() != AGE_BRACKET_COUNT {
        anyhow::bail!(
            "expected {} age scores, got {}",
            AGE_BRACKET_COUNT,
            scores.len()
        );
    }

    let mut best: Option<(usize, f32)> = None;
    for (index, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((index, score)),
        }
    }

    let (index, _) = best.context("every age score is NaN")?;
    AgeBracket::from_index(index).context("age bracket index out of range")
}
