//! Raster surface abstraction
//!
//! Wraps a mutable RGBA8 pixel buffer together with the logical metadata
//! the filter pipeline cares about: an alpha-presence flag and an optional
//! embedded color profile. All geometry-changing primitives replace the
//! buffer and its dimensions in one step.
//!
//! # Features
//!
//! - Crop, embed/pad with border-extension modes, tile replication
//! - Alpha management: add/flatten, per-channel linear transforms
//! - Resampling with force / down-only sizing (`resize`)
//! - Alpha-over and destination-in compositing (`composite`)
//! - HSL modulate, Gaussian blur, sharpen, border trim (`adjust`)
//! - Vector mask rasterization (`vector`)

mod adjust;
mod composite;
mod resize;
mod vector;

pub use composite::BlendMode;
pub use resize::Sizing;

use image::{imageops, Rgba, RgbaImage};

use crate::color::Color;
use crate::error::FilterError;

/// Border-extension strategy for [`Surface::embed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extend {
    /// Extend with black (transparent black on alpha surfaces)
    Black,
    /// Extend with opaque white
    White,
    /// Extend with an explicit opaque background color
    Background(Color),
}

impl Extend {
    /// Pick the extension mode for a resolved fill color: exact black and
    /// white map to the dedicated border-extension modes, anything else
    /// needs a background embed.
    pub fn from_color(color: Color) -> Extend {
        if color.is_black() {
            Extend::Black
        } else if color.is_white() {
            Extend::White
        } else {
            Extend::Background(color)
        }
    }
}

/// Quarter-turn rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    D90,
    D180,
    D270,
}

/// A mutable raster image buffer with alpha and profile metadata.
///
/// Pixels are stored RGBA8 throughout; surfaces without a logical alpha
/// channel keep the alpha byte at 255 and report `has_alpha() == false`.
#[derive(Debug, Clone)]
pub struct Surface {
    pixels: RgbaImage,
    has_alpha: bool,
    icc_profile: Option<Vec<u8>>,
}

impl Surface {
    /// Wrap an RGBA buffer as an alpha-bearing surface.
    pub fn from_rgba(pixels: RgbaImage) -> Surface {
        Surface {
            pixels,
            has_alpha: true,
            icc_profile: None,
        }
    }

    /// Create an opaque single-color surface.
    pub fn solid(width: u32, height: u32, color: Color) -> Surface {
        let pixels = RgbaImage::from_pixel(width, height, Rgba([color.r, color.g, color.b, 255]));
        Surface {
            pixels,
            has_alpha: false,
            icc_profile: None,
        }
    }

    /// Decode encoded image bytes (PNG/JPEG/WebP/GIF) into a surface.
    ///
    /// Alpha presence follows the decoded color type, so JPEG input yields
    /// an opaque surface and RGBA PNG input an alpha-bearing one.
    pub fn from_blob(blob: &[u8]) -> Result<Surface, FilterError> {
        let decoded = image::load_from_memory(blob)
            .map_err(|e| FilterError::engine("decode", e.to_string()))?;
        let has_alpha = decoded.color().has_alpha();
        Ok(Surface {
            pixels: decoded.to_rgba8(),
            has_alpha,
            icc_profile: None,
        })
    }

    pub(crate) fn from_parts(pixels: RgbaImage, has_alpha: bool) -> Surface {
        Surface {
            pixels,
            has_alpha,
            icc_profile: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Logical channel count: 3 without alpha, 4 with.
    pub fn channels(&self) -> u8 {
        if self.has_alpha {
            4
        } else {
            3
        }
    }

    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut RgbaImage {
        &mut self.pixels
    }

    pub(crate) fn replace_pixels(&mut self, pixels: RgbaImage) {
        self.pixels = pixels;
    }

    pub(crate) fn set_has_alpha(&mut self, has_alpha: bool) {
        self.has_alpha = has_alpha;
    }

    /// Embedded ICC profile bytes, if any.
    pub fn icc_profile(&self) -> Option<&[u8]> {
        self.icc_profile.as_deref()
    }

    pub fn set_icc_profile(&mut self, profile: Vec<u8>) {
        self.icc_profile = Some(profile);
    }

    /// Drop the embedded color profile (stripIcc / stripExif).
    pub fn remove_icc_profile(&mut self) {
        self.icc_profile = None;
    }

    /// Give the surface a logical alpha channel. Existing pixels stay
    /// opaque; no-op if alpha is already present.
    pub fn add_alpha(&mut self) {
        self.has_alpha = true;
    }

    /// Blend against an opaque background and drop the alpha channel.
    pub fn flatten(&mut self, background: Color) {
        if self.has_alpha {
            for pixel in self.pixels.pixels_mut() {
                let alpha = pixel[3] as f32 / 255.0;
                pixel[0] = blend_channel(pixel[0], background.r, alpha);
                pixel[1] = blend_channel(pixel[1], background.g, alpha);
                pixel[2] = blend_channel(pixel[2], background.b, alpha);
                pixel[3] = 255;
            }
        }
        self.has_alpha = false;
    }

    /// Per-channel affine transform: `v' = scale[i]·v + offset[i]`,
    /// rounded and clamped to u8 range.
    ///
    /// Coefficient length must match the logical channel count; callers
    /// transforming RGB on an alpha-bearing surface append an identity
    /// entry for alpha (see `filters::tone`).
    pub fn linear(&mut self, scale: &[f64], offset: &[f64]) -> Result<(), FilterError> {
        if scale.len() != offset.len() {
            return Err(FilterError::engine(
                "linear",
                format!(
                    "coefficient length mismatch: {} vs {}",
                    scale.len(),
                    offset.len()
                ),
            ));
        }
        if scale.len() != self.channels() as usize {
            return Err(FilterError::engine(
                "linear",
                format!(
                    "expected {} coefficients, got {}",
                    self.channels(),
                    scale.len()
                ),
            ));
        }
        for pixel in self.pixels.pixels_mut() {
            for (i, (s, o)) in scale.iter().zip(offset.iter()).enumerate() {
                let v = pixel[i] as f64 * s + o;
                pixel[i] = v.round().clamp(0.0, 255.0) as u8;
            }
        }
        Ok(())
    }

    /// Extract a sub-rectangle. The region must lie inside the surface.
    pub fn crop(&mut self, x: u32, y: u32, width: u32, height: u32) -> Result<(), FilterError> {
        if width == 0 || height == 0 {
            return Err(FilterError::engine("crop", "empty crop region"));
        }
        if x.checked_add(width).map_or(true, |r| r > self.width())
            || y.checked_add(height).map_or(true, |b| b > self.height())
        {
            return Err(FilterError::engine(
                "crop",
                format!(
                    "region {}x{}+{}+{} outside {}x{}",
                    width,
                    height,
                    x,
                    y,
                    self.width(),
                    self.height()
                ),
            ));
        }
        self.pixels = imageops::crop_imm(&self.pixels, x, y, width, height).to_image();
        Ok(())
    }

    /// Place this surface at `(left, top)` on a `width`x`height` canvas
    /// filled per the extension mode. Source pixels falling outside the
    /// canvas are clipped.
    pub fn embed(
        &mut self,
        left: i64,
        top: i64,
        width: u32,
        height: u32,
        extend: Extend,
    ) -> Result<(), FilterError> {
        if width == 0 || height == 0 {
            return Err(FilterError::engine("embed", "empty target canvas"));
        }
        let fill = match extend {
            Extend::Black => Rgba([0, 0, 0, if self.has_alpha { 0 } else { 255 }]),
            Extend::White => Rgba([255, 255, 255, 255]),
            Extend::Background(c) => Rgba([c.r, c.g, c.b, 255]),
        };
        let mut canvas = RgbaImage::from_pixel(width, height, fill);

        let src_w = self.width() as i64;
        let src_h = self.height() as i64;
        let x0 = left.max(0);
        let y0 = top.max(0);
        let x1 = (left + src_w).min(width as i64);
        let y1 = (top + src_h).min(height as i64);
        for y in y0..y1 {
            for x in x0..x1 {
                let src = self.pixels.get_pixel((x - left) as u32, (y - top) as u32);
                canvas.put_pixel(x as u32, y as u32, *src);
            }
        }
        self.pixels = canvas;
        Ok(())
    }

    /// Tile the surface `across` x `down` times.
    pub fn replicate(&mut self, across: u32, down: u32) -> Result<(), FilterError> {
        if across == 0 || down == 0 {
            return Err(FilterError::engine("replicate", "zero tile count"));
        }
        if across == 1 && down == 1 {
            return Ok(());
        }
        let tile_w = self.width();
        let tile_h = self.height();
        let out_w = tile_w
            .checked_mul(across)
            .ok_or_else(|| FilterError::engine("replicate", "tiled width overflows"))?;
        let out_h = tile_h
            .checked_mul(down)
            .ok_or_else(|| FilterError::engine("replicate", "tiled height overflows"))?;

        let mut canvas = RgbaImage::new(out_w, out_h);
        for ty in 0..down {
            for tx in 0..across {
                imageops::replace(
                    &mut canvas,
                    &self.pixels,
                    (tx * tile_w) as i64,
                    (ty * tile_h) as i64,
                );
            }
        }
        self.pixels = canvas;
        Ok(())
    }

    /// Rotate by a quarter-turn multiple (clockwise).
    pub fn rotate(&mut self, rotation: Rotation) {
        self.pixels = match rotation {
            Rotation::D90 => imageops::rotate90(&self.pixels),
            Rotation::D180 => imageops::rotate180(&self.pixels),
            Rotation::D270 => imageops::rotate270(&self.pixels),
        };
    }

    /// Average color of the one-pixel border, for `auto` color resolution.
    pub fn edge_average_color(&self) -> Color {
        let (w, h) = (self.width(), self.height());
        if w == 0 || h == 0 {
            return Color::black();
        }
        let mut sum = [0u64; 3];
        let mut count = 0u64;
        let sample = |x: u32, y: u32, sum: &mut [u64; 3], count: &mut u64| {
            let p = self.pixels.get_pixel(x, y);
            sum[0] += p[0] as u64;
            sum[1] += p[1] as u64;
            sum[2] += p[2] as u64;
            *count += 1;
        };
        for x in 0..w {
            sample(x, 0, &mut sum, &mut count);
            if h > 1 {
                sample(x, h - 1, &mut sum, &mut count);
            }
        }
        for y in 1..h.saturating_sub(1) {
            sample(0, y, &mut sum, &mut count);
            if w > 1 {
                sample(w - 1, y, &mut sum, &mut count);
            }
        }
        Color::new(
            (sum[0] / count) as u8,
            (sum[1] / count) as u8,
            (sum[2] / count) as u8,
        )
    }
}

fn blend_channel(src: u8, bg: u8, alpha: f32) -> u8 {
    (src as f32 * alpha + bg as f32 * (1.0 - alpha)).round() as u8
}
