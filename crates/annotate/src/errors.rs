use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error("Embedded label font is invalid")]
    InvalidFont,
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Unsupported output format for {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Encode error: {0}")]
    EncodeError(#[from] image::ImageError),
}
