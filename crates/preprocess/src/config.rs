/// Input geometry and per-channel mean of a network.
///
/// `mean` is given in blob channel order (B, G, R).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobSpec {
    pub input_size: (u32, u32),
    pub mean: [f32; 3],
}

impl BlobSpec {
    pub const fn new(input_size: (u32, u32), mean: [f32; 3]) -> Self {
        Self { input_size, mean }
    }

    /// NCHW shape of a single-image blob.
    pub fn shape(&self) -> [usize; 4] {
        [1, 3, self.input_size.1 as usize, self.input_size.0 as usize]
    }
}
