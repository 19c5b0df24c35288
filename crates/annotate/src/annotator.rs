use crate::errors::AnnotateError;
use ab_glyph::{FontRef, PxScale};
use common::span;
use image::{Rgb, RgbImage};
use imageproc::{
    drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_text_mut, text_size},
    rect::Rect,
};
use schema::{Detection, FaceResult};

static LABEL_FONT: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

pub const NO_FACES_TEXT: &str = "No faces detected";

const LABEL_PADDING: i64 = 5;
const LABEL_GAP: i64 = 10;
const BANNER_PADDING: i64 = 10;

/// Colors used for annotations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub box_color: Rgb<u8>,
    pub label_background: Rgb<u8>,
    pub label_text: Rgb<u8>,
    pub banner_background: Rgb<u8>,
    pub banner_text: Rgb<u8>,
    /// Opacity of the banner background, 0.0 (invisible) to 1.0 (opaque).
    pub banner_alpha: f32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            box_color: Rgb([0, 255, 0]),
            label_background: Rgb([0, 255, 0]),
            label_text: Rgb([0, 0, 0]),
            banner_background: Rgb([0, 0, 0]),
            banner_text: Rgb([255, 255, 255]),
            banner_alpha: 0.6,
        }
    }
}

/// Draws age labels and face boxes, or a "no faces" banner, onto an image.
pub struct Annotator {
    font: FontRef<'static>,
    palette: Palette,
    label_scale: PxScale,
    banner_scale: PxScale,
    box_thickness: u32,
}

impl Annotator {
    pub fn new(palette: Palette) -> Result<Self, AnnotateError> {
        let font = FontRef::try_from_slice(LABEL_FONT).map_err(|_| AnnotateError::InvalidFont)?;

        Ok(Self {
            font,
            palette,
            label_scale: PxScale::from(24.0),
            banner_scale: PxScale::from(32.0),
            box_thickness: 2,
        })
    }

    /// Renders every result, or the banner when `results` is empty.
    pub fn annotate(&self, image: &mut RgbImage, results: &[FaceResult]) {
        let _s = span!("annotate");

        if results.is_empty() {
            tracing::debug!("No faces to draw, rendering banner");
            self.draw_no_faces_banner(image);
            return;
        }

        for result in results {
            self.draw_face(image, result);
        }
    }

    fn draw_face(&self, image: &mut RgbImage, result: &FaceResult) {
        let det = &result.detection;

        for inset in 0..self.box_thickness {
            let width = det.width().saturating_sub(2 * inset);
            let height = det.height().saturating_sub(2 * inset);
            if width == 0 || height == 0 {
                break;
            }
            let rect = Rect::at((det.x1() + inset) as i32, (det.y1() + inset) as i32)
                .of_size(width, height);
            draw_hollow_rect_mut(image, rect, self.palette.box_color);
        }

        let label = result.bracket.label();
        let background = self.label_rect(det, label, image.width(), image.height());
        draw_filled_rect_mut(image, background, self.palette.label_background);
        draw_text_mut(
            image,
            self.palette.label_text,
            background.left() + LABEL_PADDING as i32,
            background.top() + LABEL_PADDING as i32,
            self.label_scale,
            &self.font,
            label,
        );
    }

    /// Background rectangle of a face label.
    ///
    /// Sits just above the box; moves down when the box touches the top edge
    /// and left when it would run past the right edge. Always inside the image.
    pub fn label_rect(&self, det: &Detection, label: &str, image_width: u32, image_height: u32) -> Rect {
        let (text_width, text_height) = text_size(self.label_scale, &self.font, label);
        let (text_width, text_height) = (i64::from(text_width), i64::from(text_height));

        let bg_width = text_width + 2 * LABEL_PADDING;
        let bg_height = text_height + 2 * LABEL_PADDING;

        let baseline = (i64::from(det.y1()) - LABEL_GAP).max(text_height + LABEL_PADDING);
        let top = baseline - text_height - LABEL_PADDING;

        fit_rect(
            i64::from(det.x1()),
            top,
            bg_width,
            bg_height,
            image_width,
            image_height,
        )
    }

    /// Background rectangle of the "no faces" banner, centered on the image.
    pub fn banner_rect(&self, image_width: u32, image_height: u32) -> Rect {
        let (text_width, text_height) = text_size(self.banner_scale, &self.font, NO_FACES_TEXT);
        let (text_width, text_height) = (i64::from(text_width), i64::from(text_height));

        let bg_width = text_width + 2 * BANNER_PADDING;
        let bg_height = text_height + 2 * BANNER_PADDING;
        let left = (i64::from(image_width) - bg_width) / 2;
        let top = (i64::from(image_height) - bg_height) / 2;

        fit_rect(left, top, bg_width, bg_height, image_width, image_height)
    }

    fn draw_no_faces_banner(&self, image: &mut RgbImage) {
        let background = self.banner_rect(image.width(), image.height());
        shade_rect(
            image,
            background,
            self.palette.banner_background,
            self.palette.banner_alpha,
        );

        let (text_width, text_height) = text_size(self.banner_scale, &self.font, NO_FACES_TEXT);
        let x = (i64::from(image.width()) - i64::from(text_width)) / 2;
        let y = (i64::from(image.height()) - i64::from(text_height)) / 2;
        draw_text_mut(
            image,
            self.palette.banner_text,
            x as i32,
            y as i32,
            self.banner_scale,
            &self.font,
            NO_FACES_TEXT,
        );
    }
}

/// Moves a `width` x `height` rectangle at (`left`, `top`) so it lies inside
/// the image, shrinking it only when the image itself is smaller.
fn fit_rect(left: i64, top: i64, width: i64, height: i64, image_width: u32, image_height: u32) -> Rect {
    let width = width.clamp(1, i64::from(image_width).max(1));
    let height = height.clamp(1, i64::from(image_height).max(1));
    let left = left.min(i64::from(image_width) - width).max(0);
    let top = top.min(i64::from(image_height) - height).max(0);

    Rect::at(left as i32, top as i32).of_size(width as u32, height as u32)
}

/// Alpha-blends `color` over the pixels covered by `rect`.
fn shade_rect(image: &mut RgbImage, rect: Rect, color: Rgb<u8>, alpha: f32) {
    let alpha = alpha.clamp(0.0, 1.0);
    let x_end = (rect.right() + 1).min(image.width() as i32);
    let y_end = (rect.bottom() + 1).min(image.height() as i32);

    for y in rect.top().max(0)..y_end {
        for x in rect.left().max(0)..x_end {
            let pixel = image.get_pixel_mut(x as u32, y as u32);
            for (channel, target) in pixel.0.iter_mut().zip(color.0) {
                let blended = f32::from(*channel) * (1.0 - alpha) + f32::from(target) * alpha;
                *channel = blended.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}
