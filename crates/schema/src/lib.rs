//! Domain types shared by the inference pipeline and the annotator.

mod age;
mod detection;

pub use age::{AGE_BRACKET_COUNT, AgeBracket};
pub use detection::Detection;

/// A classified face: the detection, its age bracket and the detection
/// confidence that is displayed next to the label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceResult {
    pub detection: Detection,
    pub bracket: AgeBracket,
    pub confidence: f32,
}

impl FaceResult {
    pub fn new(detection: Detection, bracket: AgeBracket) -> Self {
        Self {
            detection,
            bracket,
            confidence: detection.confidence(),
        }
    }
}
