//! Human-readable run report. Progress goes to stdout, problems to stderr.

use crate::{models::ModelPair, service::FaceOutcome};
use schema::FaceResult;
use std::fmt::Display;
use std::io::{self, Stderr, Stdout, Write};
use std::path::Path;

pub struct ConsoleReport<O: Write, E: Write> {
    out: O,
    err: E,
}

impl ConsoleReport<Stdout, Stderr> {
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

// A closed stdout must not turn a finished run into a failure, so write
// errors are dropped.
impl<O: Write, E: Write> ConsoleReport<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    pub fn models(&mut self, face: &ModelPair, age: &ModelPair) {
        let _ = writeln!(self.out, "Loading models...");
        let _ = writeln!(self.out, "{}: {}", face.stage, face.weights.display());
        let _ = writeln!(self.out, "{}: {}", age.stage, age.weights.display());
    }

    pub fn processing(&mut self, width: u32, height: u32) {
        let _ = writeln!(self.out, "Processing image ({}x{})...", width, height);
    }

    /// Prints one line per outcome and returns the faces to annotate.
    pub fn faces(&mut self, outcomes: &[FaceOutcome]) -> Vec<FaceResult> {
        let mut results = Vec::with_capacity(outcomes.len());

        for outcome in outcomes {
            match outcome {
                FaceOutcome::Classified(result) => {
                    results.push(*result);
                    let _ = writeln!(
                        self.out,
                        "Face {}: {} (confidence: {:.2})",
                        results.len(),
                        result.bracket,
                        result.confidence
                    );
                }
                FaceOutcome::Skipped { index, reason, .. } => {
                    let _ = writeln!(
                        self.err,
                        "Warning: Error processing face {}: {}",
                        index, reason
                    );
                }
            }
        }

        results
    }

    pub fn summary(&mut self, faces: usize) {
        if faces == 0 {
            let _ = writeln!(self.out, "No faces detected in the image.");
        } else {
            let _ = writeln!(self.out, "Total faces detected: {}", faces);
        }
    }

    pub fn saved(&mut self, path: &Path) {
        let _ = writeln!(self.out, "Success! Output saved to: {}", path.display());
    }

    pub fn error(&mut self, error: &dyn Display) {
        let _ = writeln!(self.err, "Error: {}", error);
    }

    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}
