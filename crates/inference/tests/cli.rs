//! End-to-end checks of the `age-estimator` binary that need no real models.

#![allow(deprecated)] // cargo_bin deprecation

use assert_cmd::Command;
use image::{Rgb, RgbImage};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// Workspace with a readable photo and an empty model directory.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("models")).unwrap();
        RgbImage::from_pixel(64, 48, Rgb([200, 200, 200]))
            .save(dir.path().join("photo.png"))
            .unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn models(&self) -> PathBuf {
        self.path("models")
    }

    fn add_model(&self, topology: &str, weights: &str) {
        fs::write(self.models().join(topology), b"not an onnx graph").unwrap();
        fs::write(self.models().join(weights), b"").unwrap();
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("age-estimator").unwrap();
        cmd.current_dir(self.dir.path())
            .env("MODEL_SEARCH_PATHS", self.models())
            .env_remove("RUST_LOG");
        cmd
    }
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_single_argument_prints_usage() {
    let fixture = Fixture::new();

    fixture
        .command()
        .arg("photo.png")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage"));

    assert_eq!(entries(fixture.dir.path()), vec!["models", "photo.png"]);
}

#[test]
fn test_help_flag_is_a_usage_error() {
    for flag in ["--help", "-V"] {
        Fixture::new()
            .command()
            .arg(flag)
            .assert()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(
                predicate::str::contains("Usage")
                    .and(predicate::str::contains("Example: age-estimator photo.jpg output.jpg")),
            );
    }
}

#[test]
fn test_paths_starting_with_a_hyphen_are_accepted() {
    let fixture = Fixture::new();
    fs::copy(fixture.path("photo.png"), fixture.path("-photo.png")).unwrap();

    // Parsed as two paths: the run gets as far as model lookup.
    fixture
        .command()
        .args(["-photo.png", "-out.jpg"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: Face detection model files not found",
        ));

    assert!(!fixture.path("-out.jpg").exists());
}

#[test]
fn test_unreadable_input_is_reported() {
    let fixture = Fixture::new();
    fs::write(fixture.path("broken.jpg"), b"\xff\xd8 truncated").unwrap();

    fixture
        .command()
        .args(["broken.jpg", "out.jpg"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: Could not read image broken.jpg"));

    assert!(!fixture.path("out.jpg").exists());
}

#[test]
fn test_missing_face_models_are_named() {
    let fixture = Fixture::new();

    fixture
        .command()
        .args(["photo.png", "out.jpg"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Loading models").not())
        .stderr(predicate::str::contains(
            "Error: Face detection model files not found \
             (looking for res10_300x300_ssd.onnx and res10_300x300_ssd.onnx.data)",
        ));

    assert!(!fixture.path("out.jpg").exists());
}

#[test]
fn test_missing_age_models_are_named() {
    let fixture = Fixture::new();
    fixture.add_model("res10_300x300_ssd.onnx", "res10_300x300_ssd.onnx.data");

    fixture
        .command()
        .args(["photo.png", "out.jpg"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: Age estimation model files not found \
             (looking for age_net.onnx and age_net.onnx.data)",
        ));

    assert!(!fixture.path("out.jpg").exists());
}

#[test]
fn test_corrupt_face_model_fails_to_load() {
    let fixture = Fixture::new();
    fixture.add_model("res10_300x300_ssd.onnx", "res10_300x300_ssd.onnx.data");
    fixture.add_model("age_net.onnx", "age_net.onnx.data");

    fixture
        .command()
        .args(["photo.png", "out.jpg"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Loading models..."))
        .stderr(predicate::str::contains(
            "Error: Failed to load face detection model",
        ));

    assert!(!fixture.path("out.jpg").exists());
}
