/// A face candidate in image pixel coordinates.
///
/// Always satisfies `x1 < x2 <= width` and `y1 < y2 <= height` for the image it
/// was built against; see [`Detection::clamped`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    x1: u32,
    y1: u32,
    x2: u32,
    y2: u32,
    confidence: f32,
}

impl Detection {
    /// Clamps a raw pixel box to a `width` x `height` image.
    ///
    /// Returns `None` when the clamped box has zero or negative width or height.
    pub fn clamped(
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        confidence: f32,
        width: u32,
        height: u32,
    ) -> Option<Self> {
        let x1 = i64::from(x1).max(0);
        let y1 = i64::from(y1).max(0);
        let x2 = i64::from(x2).min(i64::from(width));
        let y2 = i64::from(y2).min(i64::from(height));

        if x2 <= x1 || y2 <= y1 {
            return None;
        }

        Some(Self {
            x1: x1 as u32,
            y1: y1 as u32,
            x2: x2 as u32,
            y2: y2 as u32,
            confidence,
        })
    }

    pub fn x1(&self) -> u32 {
        self.x1
    }

    pub fn y1(&self) -> u32 {
        self.y1
    }

    pub fn x2(&self) -> u32 {
        self.x2
    }

    pub fn y2(&self) -> u32 {
        self.y2
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }
}
