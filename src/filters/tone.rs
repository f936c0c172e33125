//! Whole-surface tone transforms: linear channel math and HSL modulation.

use crate::error::FilterError;
use crate::surface::Surface;

/// Apply a per-channel linear transform to the RGB bands, extending the
/// coefficient vectors with an identity entry when the surface carries
/// alpha so transparency passes through unmodified.
pub(crate) fn linear_rgb(
    surface: &mut Surface,
    scale: [f64; 3],
    offset: [f64; 3],
) -> Result<(), FilterError> {
    let mut scale = scale.to_vec();
    let mut offset = offset.to_vec();
    if surface.has_alpha() {
        scale.push(1.0);
        offset.push(0.0);
    }
    surface.linear(&scale, &offset)
}

pub(crate) fn grayscale(surface: &mut Surface) {
    surface.modulate(1.0, 0.0, 0.0);
}

/// `brightness(b)`: add `255*b/100` to every RGB channel.
pub(crate) fn brightness(surface: &mut Surface, percent: f64) -> Result<(), FilterError> {
    let b = percent * 255.0 / 100.0;
    linear_rgb(surface, [1.0, 1.0, 1.0], [b, b, b])
}

/// `contrast(a)`: the classic contrast curve around the midpoint.
pub(crate) fn contrast(surface: &mut Surface, percent: f64) -> Result<(), FilterError> {
    let (a, b) = contrast_coefficients(percent);
    linear_rgb(surface, [a, a, a], [b, b, b])
}

/// Scale and offset for a contrast percentage.
///
/// The input is mapped onto [-255, 255] and run through
/// `a' = 259(a+255) / (255(259-a))`; the offset re-centers the curve so
/// 128 stays fixed. Zero percent yields the identity `(1, 0)`.
pub(crate) fn contrast_coefficients(percent: f64) -> (f64, f64) {
    let a = (percent * 255.0 / 100.0).clamp(-255.0, 255.0);
    let a = (259.0 * (a + 255.0)) / (255.0 * (259.0 - a));
    let b = 128.0 - a * 128.0;
    (a, b)
}

pub(crate) fn hue(surface: &mut Surface, degrees: f64) {
    surface.modulate(1.0, 1.0, degrees);
}

pub(crate) fn saturation(surface: &mut Surface, percent: f64) {
    surface.modulate(1.0, 1.0 + percent / 100.0, 0.0);
}

/// `rgb(r,g,b)`: independent channel offsets of `255*x/100` each.
pub(crate) fn rgb(surface: &mut Surface, r: f64, g: f64, b: f64) -> Result<(), FilterError> {
    linear_rgb(
        surface,
        [1.0, 1.0, 1.0],
        [r * 255.0 / 100.0, g * 255.0 / 100.0, b * 255.0 / 100.0],
    )
}

/// `modulate(b,s,h)`: percentages for brightness and saturation, degrees
/// for hue.
pub(crate) fn modulate(surface: &mut Surface, brightness: f64, saturation: f64, hue: f64) {
    surface.modulate(1.0 + brightness / 100.0, 1.0 + saturation / 100.0, hue);
}
