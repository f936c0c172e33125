//! Round corner: carve rounded corners out of the surface with a
//! rasterized vector mask, optionally flattening the result.

use crate::color::resolve_color;
use crate::error::FilterError;
use crate::filters::args::{parse_int, url_decode};
use crate::pool::SurfacePool;
use crate::surface::{BlendMode, Sizing, Surface};

/// Parsed `roundCorner(rx[,ry[,color]])` arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundCornerArgs {
    pub rx: i64,
    pub ry: i64,
    /// Flatten color token; when present the rounded corners end up
    /// painted instead of transparent
    pub color: Option<String>,
}

impl RoundCornerArgs {
    /// Returns `None` when no radius was given, which makes the directive
    /// a no-op. A trailing color is only recognized in the exact 3-arg
    /// form; `ry` falls back to `rx`.
    pub(crate) fn parse(args: &[String]) -> Option<RoundCornerArgs> {
        if args.is_empty() {
            return None;
        }
        let color = if args.len() == 3 {
            Some(args[2].clone())
        } else {
            None
        };
        let numeric = if color.is_some() { &args[..2] } else { args };

        let rx = parse_int(&url_decode(&numeric[0]));
        let ry = if numeric.len() > 1 {
            parse_int(&numeric[1])
        } else {
            rx
        };
        Some(RoundCornerArgs { rx, ry, color })
    }
}

pub(crate) fn round_corner(
    surface: &mut Surface,
    pool: &SurfacePool,
    args: &RoundCornerArgs,
) -> Result<(), FilterError> {
    // resolve before masking; `auto` must sample the original edges
    let flatten_color = args
        .color
        .as_deref()
        .map(|token| resolve_color(surface, token));

    let w = surface.width();
    let h = surface.height();
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}">
  <rect rx="{rx}" ry="{ry}"
   x="0" y="0" width="{w}" height="{h}"
   fill="#fff"/>
</svg>"##,
        w = w,
        h = h,
        rx = args.rx,
        ry = args.ry,
    );

    let mut mask = pool.adopt(Surface::from_svg(svg.as_bytes())?);
    mask.thumbnail(w, h, Sizing::Both)?;
    surface.composite(&mask, 0, 0, BlendMode::DestIn);

    if let Some(color) = flatten_color {
        surface.flatten(color);
    }
    Ok(())
}
