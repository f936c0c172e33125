//! Alpha compositing.
//!
//! Overlays are blended with Porter-Duff operators over a clipped region,
//! so placements that hang off any edge simply lose the out-of-bounds part.

use image::Rgba;

use crate::surface::Surface;

/// Porter-Duff operator used by [`Surface::composite`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Overlay over base: the usual watermark blend
    Over,
    /// Keep the base only where the overlay has coverage; everything
    /// outside the overlay (or under its transparent pixels) is cut away
    DestIn,
}

impl Surface {
    /// Blend `overlay` onto this surface with its top-left corner at
    /// `(x, y)`. Offsets may be negative or run past the edge; only the
    /// visible region is touched.
    pub fn composite(&mut self, overlay: &Surface, x: i64, y: i64, mode: BlendMode) {
        match mode {
            BlendMode::Over => self.composite_over(overlay, x, y),
            BlendMode::DestIn => self.composite_dest_in(overlay, x, y),
        }
    }

    fn composite_over(&mut self, overlay: &Surface, x: i64, y: i64) {
        let target_width = self.width() as i64;
        let target_height = self.height() as i64;
        let overlay_width = overlay.width() as i64;
        let overlay_height = overlay.height() as i64;

        // Visible region, clamped to the target bounds
        let x_start = x.max(0);
        let y_start = y.max(0);
        let x_end = (x + overlay_width).min(target_width);
        let y_end = (y + overlay_height).min(target_height);

        let overlay_has_alpha = overlay.has_alpha();
        for ty in y_start..y_end {
            for tx in x_start..x_end {
                let ox = (tx - x) as u32;
                let oy = (ty - y) as u32;

                let fg = *overlay.pixels().get_pixel(ox, oy);
                let bg = *self.pixels().get_pixel(tx as u32, ty as u32);
                self.pixels_mut()
                    .put_pixel(tx as u32, ty as u32, blend_over(bg, fg));
            }
        }

        if overlay_has_alpha && !self.has_alpha() {
            self.set_has_alpha(true);
        }
    }

    fn composite_dest_in(&mut self, overlay: &Surface, x: i64, y: i64) {
        let overlay_width = overlay.width() as i64;
        let overlay_height = overlay.height() as i64;

        for (tx, ty, pixel) in self.pixels_mut().enumerate_pixels_mut() {
            let ox = tx as i64 - x;
            let oy = ty as i64 - y;
            // The overlay sits on an implicit transparent canvas, so
            // coverage outside it is zero and the base is cut away there.
            let mask_alpha = if ox >= 0 && ox < overlay_width && oy >= 0 && oy < overlay_height {
                overlay.pixels().get_pixel(ox as u32, oy as u32)[3]
            } else {
                0
            };
            pixel[3] = ((pixel[3] as u32 * mask_alpha as u32 + 127) / 255) as u8;
        }

        self.set_has_alpha(true);
    }
}

/// Blend two pixels with the "over" operator:
/// result = foreground + background * (1 - foreground.alpha)
fn blend_over(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    let fg_alpha = foreground[3] as f32 / 255.0;
    let bg_alpha = background[3] as f32 / 255.0;

    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f32 / 255.0;
        let bg_f = bg as f32 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0) as u8,
    ])
}
