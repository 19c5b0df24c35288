pub mod config;
pub mod cpu;

use ndarray::{Array, IxDyn};

pub use config::BlobSpec;
pub use cpu::CpuPreProcessor;

/// Trait for image preprocessing implementations
pub trait Preprocess {
    /// Turn an image into a network input blob
    ///
    /// # Arguments
    /// * `pixels` - RGB pixel data in HWC format
    /// * `width` - Image width
    /// * `height` - Image height
    ///
    /// # Returns
    /// A `[1, 3, H, W]` tensor in B, G, R channel order with the mean removed
    fn preprocess(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> anyhow::Result<Array<f32, IxDyn>>;

    /// Get the input size this preprocessor targets
    fn input_size(&self) -> (u32, u32);
}
