//! Model artifact lookup.
//!
//! Each model is a pair of files: a topology description and a weights blob.
//! Both are searched over an ordered list of directories; the first directory
//! containing a file wins. Weights sitting next to the chosen topology are
//! preferred, since the runtime only reads them from there.

use crate::{config::InferenceConfig, errors::PipelineError};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStage {
    FaceDetection,
    AgeEstimation,
}

impl ModelStage {
    /// Lowercase name for use inside sentences.
    pub fn noun(&self) -> &'static str {
        match self {
            ModelStage::FaceDetection => "face detection",
            ModelStage::AgeEstimation => "age estimation",
        }
    }
}

impl fmt::Display for ModelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelStage::FaceDetection => f.write_str("Face detection"),
            ModelStage::AgeEstimation => f.write_str("Age estimation"),
        }
    }
}

/// File names of a model's artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec {
    pub stage: ModelStage,
    pub topology: &'static str,
    pub weights: &'static str,
}

/// Resolved locations of a model's artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPair {
    pub stage: ModelStage,
    pub topology: PathBuf,
    pub weights: PathBuf,
}

/// First `dir/file_name` in `search_paths` for which `exists` holds.
pub fn resolve_with<F>(search_paths: &[PathBuf], file_name: &str, exists: F) -> Option<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    search_paths
        .iter()
        .map(|dir| dir.join(file_name))
        .find(|candidate| exists(candidate.as_path()))
}

pub fn resolve_file(search_paths: &[PathBuf], file_name: &str) -> Option<PathBuf> {
    resolve_with(search_paths, file_name, Path::is_file)
}

pub fn resolve_pair_with<F>(
    search_paths: &[PathBuf],
    spec: &ModelSpec,
    exists: F,
) -> Result<ModelPair, PipelineError>
where
    F: Fn(&Path) -> bool,
{
    let topology = resolve_with(search_paths, spec.topology, &exists);
    let colocated = topology
        .as_deref()
        .and_then(Path::parent)
        .map(|dir| dir.join(spec.weights))
        .filter(|candidate| exists(candidate.as_path()));
    let weights = colocated.or_else(|| resolve_with(search_paths, spec.weights, &exists));

    match (topology, weights) {
        (Some(topology), Some(weights)) => Ok(ModelPair {
            stage: spec.stage,
            topology,
            weights,
        }),
        _ => Err(PipelineError::MissingModel {
            stage: spec.stage,
            topology: spec.topology,
            weights: spec.weights,
        }),
    }
}

pub fn resolve_pair(search_paths: &[PathBuf], spec: &ModelSpec) -> Result<ModelPair, PipelineError> {
    resolve_pair_with(search_paths, spec, Path::is_file)
}

/// Resolves the localizer pair, then the classifier pair.
pub fn resolve_models(config: &InferenceConfig) -> Result<(ModelPair, ModelPair), PipelineError> {
    let localizer = resolve_pair(&config.search_paths, &config.localizer_model)?;
    let classifier = resolve_pair(&config.search_paths, &config.classifier_model)?;

    tracing::debug!(
        face_topology = %localizer.topology.display(),
        face_weights = %localizer.weights.display(),
        age_topology = %classifier.topology.display(),
        age_weights = %classifier.weights.display(),
        "Resolved model files"
    );

    Ok((localizer, classifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CLASSIFIER_MODEL, LOCALIZER_MODEL};
    use std::collections::HashSet;
    use std::fs;
    use tempfile::tempdir;

    fn dirs(paths: &[&str]) -> Vec<PathBuf> {
        paths.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_first_matching_directory_wins() {
        let existing: HashSet<PathBuf> = [
            PathBuf::from("../models/deploy.onnx"),
            PathBuf::from("./deploy.onnx"),
        ]
        .into();
        let search = dirs(&["./models/", "../models/", "/opt/models/", "./"]);

        let found = resolve_with(&search, "deploy.onnx", |p| existing.contains(p));

        assert_eq!(found, Some(PathBuf::from("../models/deploy.onnx")));
    }

    #[test]
    fn test_no_match_returns_none() {
        let search = dirs(&["./models/", "./"]);
        assert_eq!(resolve_with(&search, "deploy.onnx", |_| false), None);
        assert_eq!(resolve_with(&[], "deploy.onnx", |_| true), None);
    }

    #[test]
    fn test_weights_next_to_topology_win_over_a_stray_copy() {
        let existing: HashSet<PathBuf> = [
            PathBuf::from("./models/age_net.onnx.data"),
            PathBuf::from("../models/age_net.onnx"),
            PathBuf::from("../models/age_net.onnx.data"),
        ]
        .into();
        let search = dirs(&["./models/", "../models/", "./"]);

        let pair = resolve_pair_with(&search, &CLASSIFIER_MODEL, |p| existing.contains(p)).unwrap();

        assert_eq!(pair.stage, ModelStage::AgeEstimation);
        assert_eq!(pair.topology, PathBuf::from("../models/age_net.onnx"));
        assert_eq!(pair.weights, PathBuf::from("../models/age_net.onnx.data"));
        assert_eq!(pair.topology.parent(), pair.weights.parent());
    }

    #[test]
    fn test_weights_fall_back_to_first_match_when_not_colocated() {
        let existing: HashSet<PathBuf> = [
            PathBuf::from("b/age_net.onnx"),
            PathBuf::from("a/age_net.onnx.data"),
            PathBuf::from("c/age_net.onnx.data"),
        ]
        .into();
        let search = dirs(&["a", "b", "c"]);

        let pair = resolve_pair_with(&search, &CLASSIFIER_MODEL, |p| existing.contains(p)).unwrap();

        assert_eq!(pair.topology, PathBuf::from("b/age_net.onnx"));
        assert_eq!(pair.weights, PathBuf::from("a/age_net.onnx.data"));
    }

    #[test]
    fn test_missing_weights_names_the_whole_pair() {
        let existing: HashSet<PathBuf> = [PathBuf::from("m/res10_300x300_ssd.onnx")].into();
        let search = dirs(&["m"]);

        let err = resolve_pair_with(&search, &LOCALIZER_MODEL, |p| existing.contains(p)).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Face detection model files not found (looking for res10_300x300_ssd.onnx and res10_300x300_ssd.onnx.data)"
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let search = dirs(&["x", "y"]);
        let exists = |p: &Path| p.starts_with("y");

        let first = resolve_pair_with(&search, &CLASSIFIER_MODEL, exists).unwrap();
        let second = resolve_pair_with(&search, &CLASSIFIER_MODEL, exists).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_file_ignores_directories() {
        let root = tempdir().unwrap();
        let first = root.path().join("first");
        let second = root.path().join("second");
        fs::create_dir_all(first.join("age_net.onnx")).unwrap();
        fs::create_dir_all(&second).unwrap();
        fs::write(second.join("age_net.onnx"), b"onnx").unwrap();

        let found = resolve_file(&[first, second.clone()], "age_net.onnx");

        assert_eq!(found, Some(second.join("age_net.onnx")));
    }

    #[test]
    fn test_resolve_models_reports_localizer_before_classifier() {
        let root = tempdir().unwrap();
        let mut config = InferenceConfig::test_default();
        config.search_paths = vec![root.path().to_path_buf()];

        let err = resolve_models(&config).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MissingModel {
                stage: ModelStage::FaceDetection,
                ..
            }
        ));

        fs::write(root.path().join(LOCALIZER_MODEL.topology), b"onnx").unwrap();
        fs::write(root.path().join(LOCALIZER_MODEL.weights), b"data").unwrap();

        let err = resolve_models(&config).unwrap_err();
        assert!(err.to_string().starts_with("Age estimation model files not found"));

        fs::write(root.path().join(CLASSIFIER_MODEL.topology), b"onnx").unwrap();
        fs::write(root.path().join(CLASSIFIER_MODEL.weights), b"data").unwrap();

        let (localizer, classifier) = resolve_models(&config).unwrap();
        assert_eq!(localizer.topology, root.path().join(LOCALIZER_MODEL.topology));
        assert_eq!(classifier.weights, root.path().join(CLASSIFIER_MODEL.weights));
    }
}
