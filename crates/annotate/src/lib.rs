pub mod annotator;
pub mod errors;
pub mod output;

pub use annotator::{Annotator, NO_FACES_TEXT, Palette};
pub use errors::{AnnotateError, OutputError};
pub use output::{DEFAULT_JPEG_QUALITY, write_image};
