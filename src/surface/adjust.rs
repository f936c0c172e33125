//! Pixel-level adjustments: HSL modulation, blur, sharpen, and trim.

use image::imageops;

use crate::error::FilterError;
use crate::surface::Surface;

impl Surface {
    /// Scale lightness and saturation and rotate hue, per pixel.
    ///
    /// `brightness` and `saturation` are multipliers (1.0 = unchanged),
    /// `hue` is a rotation in degrees. Alpha is left untouched.
    pub fn modulate(&mut self, brightness: f64, saturation: f64, hue: f64) {
        let hue_shift = (hue / 360.0) as f32;
        for pixel in self.pixels_mut().pixels_mut() {
            let (h, s, l) = rgb_to_hsl(
                pixel[0] as f32 / 255.0,
                pixel[1] as f32 / 255.0,
                pixel[2] as f32 / 255.0,
            );
            let mut h = h + hue_shift;
            h -= h.floor();
            let s = (s * saturation as f32).clamp(0.0, 1.0);
            let l = (l * brightness as f32).clamp(0.0, 1.0);
            let (r, g, b) = hsl_to_rgb(h, s, l);
            pixel[0] = (r * 255.0).round() as u8;
            pixel[1] = (g * 255.0).round() as u8;
            pixel[2] = (b * 255.0).round() as u8;
        }
    }

    /// Gaussian blur with the given standard deviation.
    pub fn gaussian_blur(&mut self, sigma: f64) {
        let blurred = imageops::blur(self.pixels(), sigma as f32);
        self.replace_pixels(blurred);
    }

    /// Unsharp-mask sharpening.
    ///
    /// The difference against a gaussian-blurred copy is amplified by `m2`
    /// wherever it exceeds the flatness threshold `x1`; smaller differences
    /// are treated as noise and left alone.
    pub fn sharpen(&mut self, sigma: f64, x1: i32, m2: i32) {
        let blurred = imageops::blur(self.pixels(), sigma as f32);
        for (pixel, soft) in self.pixels_mut().pixels_mut().zip(blurred.pixels()) {
            for c in 0..3 {
                let delta = pixel[c] as i32 - soft[c] as i32;
                if delta.abs() > x1 {
                    pixel[c] = (pixel[c] as i32 + m2 * delta).clamp(0, 255) as u8;
                }
            }
        }
    }

    /// Crop away a uniform border.
    ///
    /// The background color is sampled from the top-left corner, or the
    /// bottom-right one when `from_bottom_right` is set. A pixel counts as
    /// background when no RGB channel differs from the sample by more than
    /// `tolerance`. Leaves the surface alone when everything matches.
    pub fn trim(&mut self, tolerance: u32, from_bottom_right: bool) -> Result<(), FilterError> {
        if self.width() == 0 || self.height() == 0 {
            return Ok(());
        }
        let reference = if from_bottom_right {
            *self.pixels().get_pixel(self.width() - 1, self.height() - 1)
        } else {
            *self.pixels().get_pixel(0, 0)
        };

        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0u32;
        let mut max_y = 0u32;
        for (x, y, pixel) in self.pixels().enumerate_pixels() {
            let diff = (0..3)
                .map(|c| (pixel[c] as i32 - reference[c] as i32).unsigned_abs())
                .max()
                .unwrap_or(0);
            if diff > tolerance {
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }

        if min_x == u32::MAX {
            // nothing but background; trimming to nothing is never useful
            return Ok(());
        }
        let width = max_x - min_x + 1;
        let height = max_y - min_y + 1;
        if min_x == 0 && min_y == 0 && width == self.width() && height == self.height() {
            return Ok(());
        }
        self.crop(min_x, min_y, width, height)
    }
}

/// RGB (0..1) to HSL (all 0..1).
fn rgb_to_hsl(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if (max - min).abs() < 1e-6 {
        return (0.0, 0.0, l);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let h = if (max - r).abs() < 1e-6 {
        let mut h = (g - b) / d;
        if h < 0.0 {
            h += 6.0;
        }
        h / 6.0
    } else if (max - g).abs() < 1e-6 {
        ((b - r) / d + 2.0) / 6.0
    } else {
        ((r - g) / d + 4.0) / 6.0
    };

    (h, s, l)
}

/// HSL (all 0..1) to RGB (0..1).
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    if s.abs() < 1e-6 {
        return (l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    (
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use image::{Rgba, RgbaImage};

    // Test: HSL modulation

    #[test]
    fn test_modulate_brightness_scales_lightness() {
        let mut surface = Surface::solid(4, 4, Color::new(64, 64, 64));
        surface.modulate(2.0, 1.0, 0.0);
        let p = surface.pixels().get_pixel(0, 0);
        assert!((p[0] as i32 - 128).abs() <= 2, "got {:?}", p);
    }

    #[test]
    fn test_modulate_zero_saturation_desaturates() {
        let mut surface = Surface::solid(4, 4, Color::new(255, 0, 0));
        surface.modulate(1.0, 0.0, 0.0);
        let p = surface.pixels().get_pixel(0, 0);
        assert_eq!(p[0], p[1]);
        assert_eq!(p[1], p[2]);
        // pure red has lightness 0.5
        assert!((p[0] as i32 - 128).abs() <= 2);
    }

    #[test]
    fn test_modulate_hue_rotation_red_to_green() {
        let mut surface = Surface::solid(2, 2, Color::new(255, 0, 0));
        surface.modulate(1.0, 1.0, 120.0);
        let p = surface.pixels().get_pixel(0, 0);
        assert!(p[0] < 8 && p[1] > 247 && p[2] < 8, "got {:?}", p);
    }

    #[test]
    fn test_modulate_negative_hue_wraps() {
        let mut surface = Surface::solid(2, 2, Color::new(255, 0, 0));
        surface.modulate(1.0, 1.0, -240.0);
        let p = surface.pixels().get_pixel(0, 0);
        assert!(p[1] > 247, "expected green after wrap, got {:?}", p);
    }

    #[test]
    fn test_modulate_preserves_alpha() {
        let pixels = RgbaImage::from_pixel(3, 3, Rgba([200, 50, 50, 90]));
        let mut surface = Surface::from_rgba(pixels);
        surface.modulate(1.5, 0.5, 45.0);
        assert_eq!(surface.pixels().get_pixel(1, 1)[3], 90);
    }

    #[test]
    fn test_modulate_identity_is_stable() {
        let mut surface = Surface::solid(3, 3, Color::new(13, 77, 213));
        surface.modulate(1.0, 1.0, 0.0);
        let p = surface.pixels().get_pixel(1, 1);
        assert!((p[0] as i32 - 13).abs() <= 1);
        assert!((p[1] as i32 - 77).abs() <= 1);
        assert!((p[2] as i32 - 213).abs() <= 1);
    }

    // Test: blur and sharpen

    #[test]
    fn test_gaussian_blur_softens_edge() {
        let mut pixels = RgbaImage::new(16, 16);
        for (x, _y, p) in pixels.enumerate_pixels_mut() {
            *p = if x < 8 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            };
        }
        let mut surface = Surface::from_rgba(pixels);
        surface.gaussian_blur(2.0);
        let p = surface.pixels().get_pixel(8, 8);
        assert!(p[0] > 10 && p[0] < 245, "edge not softened: {:?}", p);
    }

    #[test]
    fn test_gaussian_blur_keeps_flat_region_flat() {
        let mut surface = Surface::solid(12, 12, Color::new(40, 80, 120));
        surface.gaussian_blur(3.0);
        let p = surface.pixels().get_pixel(6, 6);
        assert!((p[0] as i32 - 40).abs() <= 2);
        assert!((p[1] as i32 - 80).abs() <= 2);
        assert!((p[2] as i32 - 120).abs() <= 2);
    }

    #[test]
    fn test_sharpen_amplifies_edge_contrast() {
        let mut pixels = RgbaImage::new(16, 16);
        for (x, _y, p) in pixels.enumerate_pixels_mut() {
            *p = if x < 8 {
                Rgba([60, 60, 60, 255])
            } else {
                Rgba([190, 190, 190, 255])
            };
        }
        let mut surface = Surface::from_rgba(pixels);
        surface.sharpen(1.5, 1, 2);
        // dark side of the edge gets darker, bright side brighter
        assert!(surface.pixels().get_pixel(7, 8)[0] < 60);
        assert!(surface.pixels().get_pixel(8, 8)[0] > 190);
    }

    #[test]
    fn test_sharpen_leaves_flat_region_alone() {
        let mut surface = Surface::solid(10, 10, Color::new(90, 90, 90));
        surface.sharpen(2.0, 1, 2);
        let p = surface.pixels().get_pixel(5, 5);
        assert_eq!((p[0], p[1], p[2]), (90, 90, 90));
    }

    // Test: trim

    fn bordered(background: Color, content: Color) -> Surface {
        let mut surface = Surface::solid(10, 10, background);
        for y in 3..7 {
            for x in 3..7 {
                surface.pixels_mut().put_pixel(
                    x,
                    y,
                    Rgba([content.r, content.g, content.b, 255]),
                );
            }
        }
        surface
    }

    #[test]
    fn test_trim_removes_uniform_border() {
        let mut surface = bordered(Color::white(), Color::new(200, 0, 0));
        surface.trim(0, false).unwrap();
        assert_eq!((surface.width(), surface.height()), (4, 4));
        assert_eq!(surface.pixels().get_pixel(0, 0)[0], 200);
    }

    #[test]
    fn test_trim_bottom_right_reference() {
        // content occupies the top-left corner itself, so only the
        // bottom-right sample sees the border color
        let mut surface = Surface::solid(10, 10, Color::white());
        for y in 0..4 {
            for x in 0..4 {
                surface.pixels_mut().put_pixel(x, y, Rgba([0, 0, 200, 255]));
            }
        }
        surface.trim(0, true).unwrap();
        assert_eq!((surface.width(), surface.height()), (4, 4));
    }

    #[test]
    fn test_trim_all_background_is_noop() {
        let mut surface = Surface::solid(8, 8, Color::new(7, 7, 7));
        surface.trim(0, false).unwrap();
        assert_eq!((surface.width(), surface.height()), (8, 8));
    }

    #[test]
    fn test_trim_tolerance_absorbs_near_background() {
        let mut surface = bordered(Color::white(), Color::black());
        // near-white speck inside the border, within tolerance
        surface
            .pixels_mut()
            .put_pixel(1, 1, Rgba([248, 248, 248, 255]));
        surface.trim(10, false).unwrap();
        assert_eq!((surface.width(), surface.height()), (4, 4));
    }

    #[test]
    fn test_trim_nothing_to_do_when_no_border() {
        let mut surface = Surface::solid(5, 5, Color::black());
        surface.pixels_mut().put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        surface.pixels_mut().put_pixel(4, 4, Rgba([255, 0, 0, 255]));
        surface.trim(0, false).unwrap();
        assert_eq!((surface.width(), surface.height()), (5, 5));
    }
}
