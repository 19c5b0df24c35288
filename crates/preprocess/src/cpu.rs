use crate::{BlobSpec, Preprocess};
use common::{span, span_debug};
use fast_image_resize::{
    FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer,
    images::{Image, ImageRef},
};
use ndarray::{Array, IxDyn};

/// Stretches an image to the network input size and subtracts the channel mean.
///
/// No letterboxing: the aspect ratio is distorted, as both the SSD detector and
/// the age network were trained on. Output channels are ordered B, G, R and
/// values stay in the 0..255 range before mean removal (scale factor 1.0).
pub struct CpuPreProcessor {
    spec: BlobSpec,
    resizer: Resizer,
    resized: Image<'static>,
}

impl CpuPreProcessor {
    pub fn new(spec: BlobSpec) -> Self {
        let (width, height) = spec.input_size;
        Self {
            spec,
            resizer: Resizer::new(),
            resized: Image::new(width, height, PixelType::U8x3),
        }
    }

    fn resize(&mut self, pixels: &[u8], width: u32, height: u32) -> anyhow::Result<()> {
        let _s = span_debug!("resize");

        if width == 0 || height == 0 {
            anyhow::bail!("Cannot preprocess an empty {}x{} image", width, height);
        }

        let expected_size = (width as usize) * (height as usize) * 3;
        if pixels.len() != expected_size {
            anyhow::bail!(
                "Buffer size mismatch: expected {}, got {} bytes",
                expected_size,
                pixels.len()
            );
        }

        let src = ImageRef::new(width, height, pixels, PixelType::U8x3)?;

        self.resizer.resize(
            &src,
            &mut self.resized,
            &ResizeOptions::new().resize_alg(ResizeAlg::Interpolation(FilterType::Bilinear)),
        )?;

        Ok(())
    }

    fn normalize(&self) -> anyhow::Result<Array<f32, IxDyn>> {
        let _s = span_debug!("normalize");

        let width = self.resized.width() as usize;
        let height = self.resized.height() as usize;
        let spatial = width * height;
        let [mean_b, mean_g, mean_r] = self.spec.mean;

        let mut output = vec![0.0f32; 3 * spatial];

        for (i, px) in self.resized.buffer().chunks_exact(3).enumerate() {
            output[i] = px[2] as f32 - mean_b;
            output[i + spatial] = px[1] as f32 - mean_g;
            output[i + 2 * spatial] = px[0] as f32 - mean_r;
        }

        Ok(Array::from_shape_vec(IxDyn(&self.spec.shape()), output)?)
    }
}

impl Preprocess for CpuPreProcessor {
    fn preprocess(
        &mut self,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> anyhow::Result<Array<f32, IxDyn>> {
        let _s = span!("preprocess");

        tracing::trace!(
            width,
            height,
            target_width = self.spec.input_size.0,
            target_height = self.spec.input_size.1,
            "Building input blob"
        );

        self.resize(pixels, width, height)?;
        self.normalize()
    }

    fn input_size(&self) -> (u32, u32) {
        self.spec.input_size
    }
}
