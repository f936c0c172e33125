//! SVG rasterization for generated masks.

use image::RgbaImage;

use crate::constants::MAX_MASK_DIMENSION;
use crate::error::FilterError;
use crate::surface::Surface;

impl Surface {
    /// Rasterize an SVG document at its natural size.
    ///
    /// The result always carries alpha; uncovered areas come out fully
    /// transparent, which is what makes these usable as dest-in masks.
    pub fn from_svg(data: &[u8]) -> Result<Surface, FilterError> {
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_data(data, &opts)
            .map_err(|e| FilterError::engine("svg", format!("failed to parse document: {}", e)))?;

        let size = tree.size();
        let width = raster_dimension(size.width())?;
        let height = raster_dimension(size.height())?;
        if width > MAX_MASK_DIMENSION || height > MAX_MASK_DIMENSION {
            return Err(FilterError::engine(
                "svg",
                format!(
                    "raster size too large: {}x{} (max {})",
                    width, height, MAX_MASK_DIMENSION
                ),
            ));
        }

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| FilterError::engine("svg", "failed to allocate pixmap"))?;

        let sx = width as f32 / size.width();
        let sy = height as f32 / size.height();
        let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
        resvg::render(&tree, xform, &mut pixmap.as_mut());

        // tiny-skia stores premultiplied pixels; surfaces use straight alpha
        let mut raw = Vec::with_capacity(width as usize * height as usize * 4);
        for pixel in pixmap.pixels() {
            let c = pixel.demultiply();
            raw.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        let pixels = RgbaImage::from_raw(width, height, raw)
            .ok_or_else(|| FilterError::engine("svg", "failed to build pixel buffer"))?;
        Ok(Surface::from_parts(pixels, true))
    }
}

fn raster_dimension(v: f32) -> Result<u32, FilterError> {
    if !v.is_finite() || v <= 0.0 {
        return Err(FilterError::engine("svg", "document has invalid size"));
    }
    Ok((v.ceil() as u32).max(1))
}
