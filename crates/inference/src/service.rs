use crate::{
    backend::InferenceBackend,
    config::InferenceConfig,
    errors::PipelineError,
    processing::{AgeClassifier, FaceLocalizer},
};
use image::RgbImage;
use schema::{Detection, FaceResult};

/// What happened to one accepted detection.
#[derive(Debug, Clone, PartialEq)]
pub enum FaceOutcome {
    Classified(FaceResult),
    /// Classification failed; the face is left out of the annotation.
    Skipped {
        index: usize,
        detection: Detection,
        reason: String,
    },
}

impl FaceOutcome {
    pub fn result(&self) -> Option<&FaceResult> {
        match self {
            FaceOutcome::Classified(result) => Some(result),
            FaceOutcome::Skipped { .. } => None,
        }
    }
}

/// Classified faces in detection order.
pub fn classified(outcomes: &[FaceOutcome]) -> Vec<FaceResult> {
    outcomes.iter().filter_map(FaceOutcome::result).copied().collect()
}

/// Detector followed by the per-face age classifier, each with its own model.
pub struct AgeEstimationService<B: InferenceBackend> {
    face_backend: B,
    age_backend: B,
    localizer: FaceLocalizer,
    classifier: AgeClassifier,
}

impl<B: InferenceBackend> AgeEstimationService<B> {
    pub fn new(face_backend: B, age_backend: B, config: &InferenceConfig) -> Self {
        Self {
            face_backend,
            age_backend,
            localizer: FaceLocalizer::new(config.face_blob, config.confidence_threshold),
            classifier: AgeClassifier::new(config.age_blob),
        }
    }

    pub fn detect_faces(&mut self, image: &RgbImage) -> Result<Vec<Detection>, PipelineError> {
        self.localizer
            .detect(&mut self.face_backend, image)
            .map_err(PipelineError::Localization)
    }

    /// Never fails the run: errors become [`FaceOutcome::Skipped`].
    pub fn classify_face(
        &mut self,
        index: usize,
        image: &RgbImage,
        detection: &Detection,
    ) -> FaceOutcome {
        match self
            .classifier
            .classify(&mut self.age_backend, image, detection)
        {
            Ok(bracket) => FaceOutcome::Classified(FaceResult::new(*detection, bracket)),
            Err(e) => {
                let reason = format!("{e:#}");
                tracing::warn!(index, reason = %reason, "Skipping face");
                FaceOutcome::Skipped {
                    index,
                    detection: *detection,
                    reason,
                }
            }
        }
    }

    /// One outcome per accepted detection, numbered from 1.
    #[tracing::instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn process(&mut self, image: &RgbImage) -> Result<Vec<FaceOutcome>, PipelineError> {
        let detections = self.detect_faces(image)?;
        tracing::debug!(count = detections.len(), "Faces above threshold");

        let outcomes = detections
            .iter()
            .enumerate()
            .map(|(i, detection)| self.classify_face(i + 1, image, detection))
            .collect();

        Ok(outcomes)
    }
}
