pub mod classifier;
pub mod localizer;

pub use classifier::AgeClassifier;
pub use localizer::FaceLocalizer;
