//! Effect filters that stand alone: blur, sharpen, rotation, profile
//! stripping, background flattening, and border trim.

use crate::color::resolve_color;
use crate::error::FilterError;
use crate::surface::{Rotation, Surface};

/// Fixed flat/jagged sharpen thresholds, matching the convolution defaults
/// the pipeline has always shipped with.
const SHARPEN_X1: i32 = 1;
const SHARPEN_M2: i32 = 2;

pub(crate) fn blur(surface: &mut Surface, sigma: f64) {
    surface.gaussian_blur(sigma);
}

pub(crate) fn sharpen(surface: &mut Surface, sigma: f64) {
    surface.sharpen(sigma, SHARPEN_X1, SHARPEN_M2);
}

pub(crate) fn rotate(surface: &mut Surface, rotation: Rotation) {
    surface.rotate(rotation);
}

/// Both `stripIcc` and `stripExif` map here; the embedded profile is the
/// only metadata a surface carries.
pub(crate) fn strip_profile(surface: &mut Surface) {
    surface.remove_icc_profile();
}

/// Flatten against the resolved color. Surfaces without alpha are left
/// alone; there is nothing to flatten.
pub(crate) fn background_color(surface: &mut Surface, token: &str) {
    if !surface.has_alpha() {
        return;
    }
    let color = resolve_color(surface, token);
    surface.flatten(color);
}

pub(crate) fn trim(
    surface: &mut Surface,
    tolerance: u32,
    from_bottom_right: bool,
) -> Result<(), FilterError> {
    surface.trim(tolerance, from_bottom_right)
}
