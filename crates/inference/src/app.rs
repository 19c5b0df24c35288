//! One complete run: read, resolve, load, estimate, annotate, write.

use crate::{
    backend::{BackendOptions, InferenceBackend},
    config::InferenceConfig,
    errors::PipelineError,
    models::{ModelPair, resolve_models},
    report::ConsoleReport,
    service::AgeEstimationService,
};
use annotate::{Annotator, Palette, write_image};
use image::{ImageError, ImageReader, RgbImage};
use std::io::Write;
use std::path::Path;

/// Decode any supported format by content, then flatten to 8-bit RGB.
pub fn read_image(path: &Path) -> Result<RgbImage, PipelineError> {
    let input_error = |source: ImageError| PipelineError::Input {
        path: path.to_path_buf(),
        source,
    };

    let image = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| input_error(ImageError::IoError(e)))?
        .decode()
        .map_err(input_error)?;

    Ok(image.to_rgb8())
}

pub fn load_backend<B: InferenceBackend>(
    model: &ModelPair,
    options: &BackendOptions,
) -> Result<B, PipelineError> {
    tracing::info!(stage = %model.stage, path = %model.topology.display(), "Loading model");

    B::load_model(model, options).map_err(|source| PipelineError::ModelLoad {
        stage: model.stage,
        source,
    })
}

/// Detect, classify and draw onto `image`. Returns the number of faces drawn.
pub fn estimate_and_render<B, O, E>(
    service: &mut AgeEstimationService<B>,
    annotator: &Annotator,
    image: &mut RgbImage,
    report: &mut ConsoleReport<O, E>,
) -> Result<usize, PipelineError>
where
    B: InferenceBackend,
    O: Write,
    E: Write,
{
    report.processing(image.width(), image.height());

    let outcomes = service.process(image)?;
    let results = report.faces(&outcomes);
    report.summary(results.len());

    annotator.annotate(image, &results);
    Ok(results.len())
}

pub fn run<B, O, E>(
    input: &Path,
    output: &Path,
    config: &InferenceConfig,
    report: &mut ConsoleReport<O, E>,
) -> Result<(), PipelineError>
where
    B: InferenceBackend,
    O: Write,
    E: Write,
{
    let mut image = read_image(input)?;
    tracing::debug!(width = image.width(), height = image.height(), "Image decoded");

    let (face_model, age_model) = resolve_models(config)?;
    report.models(&face_model, &age_model);

    let options = BackendOptions {
        intra_threads: config.intra_threads,
    };
    let face_backend = load_backend::<B>(&face_model, &options)?;
    let age_backend = load_backend::<B>(&age_model, &options)?;

    let annotator = Annotator::new(Palette::default())?;
    let mut service = AgeEstimationService::new(face_backend, age_backend, config);

    let faces = estimate_and_render(&mut service, &annotator, &mut image, report)?;

    write_image(&image, output, config.jpeg_quality).map_err(|source| PipelineError::Output {
        path: output.to_path_buf(),
        source,
    })?;

    tracing::info!(faces, output = %output.display(), "Run complete");
    report.saved(output);
    Ok(())
}
