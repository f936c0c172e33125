//! Fill: pad a surface out to a target size, either with a flat color or
//! with a blurred, stretched copy of the image itself as the backdrop.

use crate::color::resolve_color;
use crate::constants::FILL_BLUR_SIGMA;
use crate::error::FilterError;
use crate::pool::SurfacePool;
use crate::surface::{BlendMode, Extend, Sizing, Surface};

/// Pad `surface` to `(target_w, target_h)`.
///
/// With any color token except `"blur"` (or with blur disabled), the
/// surface is flattened if it carries alpha and embedded centered over the
/// resolved color. Exact black and white use the cheap border-extension
/// modes; everything else pays for a background embed.
///
/// With `"blur"`, a copy of the source is fitted inside the padding box,
/// the original is stretched to the full target and heavily blurred, and
/// the copy is composited centered on top. The copy is adopted by the pool
/// the moment it exists, so an error on any later step still releases it.
#[allow(clippy::too_many_arguments)]
pub(crate) fn fill(
    surface: &mut Surface,
    pool: &SurfacePool,
    target_w: u32,
    target_h: u32,
    h_pad: u32,
    v_pad: u32,
    upscale: bool,
    color_token: &str,
    disable_blur: bool,
) -> Result<(), FilterError> {
    if color_token != "blur" || disable_blur {
        let color = resolve_color(surface, color_token);
        if surface.has_alpha() {
            surface.flatten(color);
        }
        let left = (target_w as i64 - surface.width() as i64) / 2;
        let top = (target_h as i64 - surface.height() as i64) / 2;
        surface.embed(left, top, target_w, target_h, Extend::from_color(color))?;
    } else {
        let mut copy = pool.adopt(surface.clone());
        let inner_w = (target_w as i64 - 2 * h_pad as i64).max(0) as u32;
        let inner_h = (target_h as i64 - 2 * v_pad as i64).max(0) as u32;
        if upscale || inner_w < surface.width() || inner_h < surface.height() {
            copy.thumbnail(inner_w, inner_h, Sizing::Both)?;
        }
        surface.thumbnail(target_w, target_h, Sizing::Force)?;
        surface.gaussian_blur(FILL_BLUR_SIGMA);
        let x = (target_w as i64 - copy.width() as i64) / 2;
        let y = (target_h as i64 - copy.height() as i64) / 2;
        surface.composite(&copy, x, y, BlendMode::Over);
    }
    Ok(())
}
