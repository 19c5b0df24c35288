use clap::Parser;
use std::path::PathBuf;

pub const USAGE_EXAMPLE: &str = "Example: age-estimator photo.jpg output.jpg";

/// Detect faces in an image and label each with an estimated age bracket.
///
/// Exactly two positional arguments. There are no flags, so any two strings,
/// including ones starting with `-`, are taken as paths.
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(
    name = "age-estimator",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Image to analyse
    #[arg(allow_hyphen_values = true)]
    pub input_image: PathBuf,

    /// Annotated copy to write; the extension selects the format
    #[arg(allow_hyphen_values = true)]
    pub output_image: PathBuf,
}
