use crate::errors::OutputError;
use image::{ImageFormat, RgbImage, codecs::jpeg::JpegEncoder};
use std::io::{BufWriter, Write};
use std::path::Path;

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Encodes `image` according to the extension of `path` and writes it there.
///
/// JPEG output uses `jpeg_quality`; other formats use their default encoder.
/// The bytes go to a temporary file next to `path` which is renamed into place
/// only after a successful encode, so a failure never leaves a partial file.
pub fn write_image(image: &RgbImage, path: &Path, jpeg_quality: u8) -> Result<(), OutputError> {
    let format = ImageFormat::from_path(path)
        .map_err(|_| OutputError::UnsupportedFormat(path.to_path_buf()))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staging = tempfile::Builder::new()
        .prefix(".age-estimator-")
        .tempfile_in(dir)?;

    {
        let mut writer = BufWriter::new(staging.as_file_mut());
        match format {
            ImageFormat::Jpeg => {
                image.write_with_encoder(JpegEncoder::new_with_quality(&mut writer, jpeg_quality))?
            }
            other => image.write_to(&mut writer, other)?,
        }
        writer.flush()?;
    }

    staging.persist(path).map_err(|e| OutputError::IoError(e.error))?;

    tracing::debug!(path = %path.display(), format = ?format, "Output image written");
    Ok(())
}
