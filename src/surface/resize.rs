//! Resampling.
//!
//! All scaling goes through fast-image-resize with a Lanczos3 kernel.
//! Alpha-bearing surfaces are premultiplied for the convolution and
//! demultiplied afterwards, which keeps transparent pixels from bleeding
//! dark fringes into their neighbors.

use std::num::NonZeroU32;

use fast_image_resize::{FilterType, Image, MulDiv, PixelType, ResizeAlg, Resizer};
use image::RgbaImage;

use crate::error::FilterError;
use crate::surface::Surface;

/// Sizing policy for [`Surface::thumbnail`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    /// Fit within the target box, shrinking only (never upscale)
    Down,
    /// Fit within the target box, scaling either direction
    Both,
    /// Exactly the target size, ignoring aspect ratio
    Force,
}

/// Aspect-preserving fit of a source into a bounding box.
///
/// Targets are clamped to at least 1px; so are the fitted dimensions, so a
/// very wide source fitted into a square never collapses to zero height.
pub(crate) fn fit_within(
    src_w: u32,
    src_h: u32,
    target_w: u32,
    target_h: u32,
    down_only: bool,
) -> (u32, u32) {
    let target_w = target_w.max(1);
    let target_h = target_h.max(1);
    let scale_w = target_w as f64 / src_w as f64;
    let scale_h = target_h as f64 / src_h as f64;
    let mut scale = scale_w.min(scale_h);
    if down_only {
        scale = scale.min(1.0);
    }
    (
        ((src_w as f64 * scale).round() as u32).max(1),
        ((src_h as f64 * scale).round() as u32).max(1),
    )
}

impl Surface {
    /// Resize per the sizing policy. `Down`/`Both` preserve aspect ratio
    /// within the `(target_w, target_h)` box; `Force` stretches to exactly
    /// that size.
    pub fn thumbnail(
        &mut self,
        target_w: u32,
        target_h: u32,
        sizing: Sizing,
    ) -> Result<(), FilterError> {
        let (dst_w, dst_h) = match sizing {
            Sizing::Force => (target_w.max(1), target_h.max(1)),
            Sizing::Down => fit_within(self.width(), self.height(), target_w, target_h, true),
            Sizing::Both => fit_within(self.width(), self.height(), target_w, target_h, false),
        };
        if dst_w == self.width() && dst_h == self.height() {
            return Ok(());
        }
        let resized = resample(self.pixels(), dst_w, dst_h, self.has_alpha())?;
        self.replace_pixels(resized);
        Ok(())
    }

    /// Decode a blob and fit it per the sizing policy in one step.
    pub fn thumbnail_from_blob(
        blob: &[u8],
        target_w: u32,
        target_h: u32,
        sizing: Sizing,
    ) -> Result<Surface, FilterError> {
        let mut surface = Surface::from_blob(blob)?;
        surface.thumbnail(target_w, target_h, sizing)?;
        Ok(surface)
    }
}

/// Resample an RGBA buffer to the given size with Lanczos3.
fn resample(
    pixels: &RgbaImage,
    target_w: u32,
    target_h: u32,
    premultiply: bool,
) -> Result<RgbaImage, FilterError> {
    let src_width = NonZeroU32::new(pixels.width())
        .ok_or_else(|| FilterError::engine("resize", "source width is 0"))?;
    let src_height = NonZeroU32::new(pixels.height())
        .ok_or_else(|| FilterError::engine("resize", "source height is 0"))?;
    let dst_width = NonZeroU32::new(target_w)
        .ok_or_else(|| FilterError::engine("resize", "target width is 0"))?;
    let dst_height = NonZeroU32::new(target_h)
        .ok_or_else(|| FilterError::engine("resize", "target height is 0"))?;

    let mut src_image = Image::from_vec_u8(
        src_width,
        src_height,
        pixels.as_raw().clone(),
        PixelType::U8x4,
    )
    .map_err(|e| FilterError::engine("resize", format!("failed to create source image: {:?}", e)))?;

    let mut dst_image = Image::new(dst_width, dst_height, PixelType::U8x4);

    let mul_div = MulDiv::default();
    if premultiply {
        mul_div
            .multiply_alpha_inplace(&mut src_image.view_mut())
            .map_err(|e| FilterError::engine("resize", format!("premultiply failed: {:?}", e)))?;
    }

    let mut resizer = Resizer::new(ResizeAlg::Convolution(FilterType::Lanczos3));
    resizer
        .resize(&src_image.view(), &mut dst_image.view_mut())
        .map_err(|e| FilterError::engine("resize", format!("resize operation failed: {:?}", e)))?;

    if premultiply {
        mul_div
            .divide_alpha_inplace(&mut dst_image.view_mut())
            .map_err(|e| FilterError::engine("resize", format!("demultiply failed: {:?}", e)))?;
    }

    RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
        .ok_or_else(|| FilterError::engine("resize", "failed to create output image buffer"))
}
