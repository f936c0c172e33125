//! Watermark: load an auxiliary image, size and fade it, and composite it
//! onto the base at a resolved position, optionally tiled.

use crate::config::ProcessorConfig;
use crate::error::FilterError;
use crate::filters::args::{parse_float, parse_int, url_decode};
use crate::geometry::Align;
use crate::loader::ImageLoader;
use crate::pool::SurfacePool;
use crate::surface::{BlendMode, Sizing, Surface};

/// Overlay size bound for one axis: a percentage of the base dimension,
/// or the base dimension itself when the argument was `none`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeRatio {
    Natural,
    Percent(i64),
}

impl SizeRatio {
    fn parse(arg: &str) -> SizeRatio {
        if arg == "none" {
            SizeRatio::Natural
        } else {
            SizeRatio::Percent(parse_int(arg))
        }
    }

    fn bound(&self, base: u32) -> i64 {
        match *self {
            SizeRatio::Natural => base as i64,
            SizeRatio::Percent(pct) => base as i64 * pct / 100,
        }
    }
}

/// Parsed `watermark(image[,x,y[,alpha[,w_ratio,h_ratio]]])` arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkArgs {
    /// Loader reference, percent-decoded
    pub reference: String,
    /// Alignment per axis; absent in the 1-arg form (composite at origin)
    pub position: Option<(Align, Align)>,
    /// Opacity reduction in percent (30 leaves 70% opacity)
    pub alpha_percent: Option<f64>,
    /// Per-axis size bounds; absent means the configured maximums apply
    pub size: Option<(SizeRatio, SizeRatio)>,
}

impl WatermarkArgs {
    /// Returns `None` when no image reference was given, which makes the
    /// directive a no-op.
    pub(crate) fn parse(args: &[String]) -> Option<WatermarkArgs> {
        if args.is_empty() {
            return None;
        }
        let reference = url_decode(&args[0]);
        let position = if args.len() >= 3 {
            Some((Align::parse_x(&args[1]), Align::parse_y(&args[2])))
        } else {
            None
        };
        let alpha_percent = if args.len() >= 4 {
            Some(parse_float(&args[3]))
        } else {
            None
        };
        let size = if args.len() >= 6 {
            Some((SizeRatio::parse(&args[4]), SizeRatio::parse(&args[5])))
        } else {
            None
        };
        Some(WatermarkArgs {
            reference,
            position,
            alpha_percent,
            size,
        })
    }
}

/// Overlay opacity for an alpha-percentage argument.
pub(crate) fn watermark_opacity(alpha_percent: f64) -> f64 {
    1.0 - alpha_percent / 100.0
}

pub(crate) fn watermark(
    surface: &mut Surface,
    loader: &dyn ImageLoader,
    pool: &SurfacePool,
    config: &ProcessorConfig,
    args: &WatermarkArgs,
) -> Result<(), FilterError> {
    let blob = loader.load(&args.reference)?;

    let fitted = match &args.size {
        Some((ratio_w, ratio_h)) => {
            let w = ratio_w.bound(surface.width()).max(1) as u32;
            let h = ratio_h.bound(surface.height()).max(1) as u32;
            Surface::thumbnail_from_blob(&blob, w, h, Sizing::Down)?
        }
        None => {
            Surface::thumbnail_from_blob(&blob, config.max_width, config.max_height, Sizing::Down)?
        }
    };
    // adopted before anything else can fail, so error paths release it
    let mut overlay = pool.adopt(fitted);

    if let Some(alpha) = args.alpha_percent {
        let opacity = watermark_opacity(alpha);
        overlay.add_alpha();
        overlay.linear(&[1.0, 1.0, 1.0, opacity], &[0.0, 0.0, 0.0, 0.0])?;
    }

    let mut x = 0i64;
    let mut y = 0i64;
    let mut repeat_x = 1u32;
    let mut repeat_y = 1u32;
    if let Some((align_x, align_y)) = &args.position {
        let horizontal = align_x.resolve(surface.width(), overlay.width());
        let vertical = align_y.resolve(surface.height(), overlay.height());
        x = horizontal.offset;
        y = vertical.offset;
        repeat_x = horizontal.repeat;
        repeat_y = vertical.repeat;
    }
    if repeat_x as u64 * repeat_y as u64 > 1 {
        overlay.replicate(repeat_x, repeat_y)?;
    }

    surface.composite(&overlay, x, y, BlendMode::Over);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::loader::StaticLoader;
    use bytes::Bytes;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_blob(width: u32, height: u32, rgba: [u8; 4]) -> Bytes {
        let img = RgbaImage::from_pixel(width, height, Rgba(rgba));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageOutputFormat::Png)
            .unwrap();
        Bytes::from(buf)
    }

    fn loader_with(reference: &str, blob: Bytes) -> StaticLoader {
        StaticLoader::new().with(reference, blob)
    }

    // Test: argument parsing arity

    #[test]
    fn test_parse_arity_forms() {
        assert!(WatermarkArgs::parse(&[]).is_none());

        let one = WatermarkArgs::parse(&["mark.png".into()]).unwrap();
        assert_eq!(one.reference, "mark.png");
        assert!(one.position.is_none());
        assert!(one.alpha_percent.is_none());
        assert!(one.size.is_none());

        let three =
            WatermarkArgs::parse(&["mark.png".into(), "left".into(), "bottom".into()]).unwrap();
        assert_eq!(three.position, Some((Align::Start, Align::End)));

        let four = WatermarkArgs::parse(&[
            "mark.png".into(),
            "10".into(),
            "10".into(),
            "30".into(),
        ])
        .unwrap();
        assert_eq!(four.alpha_percent, Some(30.0));

        let six = WatermarkArgs::parse(&[
            "mark.png".into(),
            "center".into(),
            "center".into(),
            "0".into(),
            "30".into(),
            "none".into(),
        ])
        .unwrap();
        assert_eq!(
            six.size,
            Some((SizeRatio::Percent(30), SizeRatio::Natural))
        );
    }

    #[test]
    fn test_parse_decodes_reference() {
        let args = WatermarkArgs::parse(&["https%3A%2F%2Fcdn%2Fmark.png".into()]).unwrap();
        assert_eq!(args.reference, "https://cdn/mark.png");
    }

    #[test]
    fn test_opacity_mapping() {
        assert!((watermark_opacity(30.0) - 0.7).abs() < 1e-9);
        assert!((watermark_opacity(0.0) - 1.0).abs() < 1e-9);
        assert!(watermark_opacity(100.0).abs() < 1e-9);
    }

    // Test: compositing behavior

    #[test]
    fn test_watermark_composites_at_origin_by_default() {
        let mut base = Surface::solid(100, 100, Color::white());
        let pool = SurfacePool::new();
        let loader = loader_with("mark.png", png_blob(10, 10, [255, 0, 0, 255]));
        let args = WatermarkArgs::parse(&["mark.png".into()]).unwrap();

        watermark(&mut base, &loader, &pool, &ProcessorConfig::default(), &args).unwrap();

        let inside = base.pixels().get_pixel(5, 5);
        assert_eq!((inside[0], inside[1], inside[2]), (255, 0, 0));
        let outside = base.pixels().get_pixel(50, 50);
        assert_eq!((outside[0], outside[1], outside[2]), (255, 255, 255));
        assert_eq!(pool.registered(), 1);
        assert!(pool.is_balanced());
    }

    #[test]
    fn test_watermark_alpha_fades_overlay() {
        let mut base = Surface::solid(20, 20, Color::black());
        let pool = SurfacePool::new();
        let loader = loader_with("w.png", png_blob(20, 20, [255, 255, 255, 255]));
        let args = WatermarkArgs::parse(&[
            "w.png".into(),
            "left".into(),
            "top".into(),
            "50".into(),
        ])
        .unwrap();

        watermark(&mut base, &loader, &pool, &ProcessorConfig::default(), &args).unwrap();

        // 50% white over black
        let p = base.pixels().get_pixel(10, 10);
        assert!(p[0] > 118 && p[0] < 138, "got {:?}", p);
    }

    #[test]
    fn test_watermark_negative_offset_wraps_to_far_edge() {
        let mut base = Surface::solid(100, 100, Color::white());
        let pool = SurfacePool::new();
        let loader = loader_with("m.png", png_blob(20, 20, [255, 0, 0, 255]));
        let args =
            WatermarkArgs::parse(&["m.png".into(), "-10".into(), "top".into()]).unwrap();

        watermark(&mut base, &loader, &pool, &ProcessorConfig::default(), &args).unwrap();

        // x resolves to 100 - 20 - 10 = 70
        let inside = base.pixels().get_pixel(75, 5);
        assert_eq!((inside[0], inside[1], inside[2]), (255, 0, 0));
        let before = base.pixels().get_pixel(65, 5);
        assert_eq!((before[0], before[1], before[2]), (255, 255, 255));
    }

    #[test]
    fn test_watermark_repeat_tiles_full_axis() {
        let mut base = Surface::solid(50, 10, Color::white());
        let pool = SurfacePool::new();
        let loader = loader_with("t.png", png_blob(20, 10, [0, 0, 255, 255]));
        let args =
            WatermarkArgs::parse(&["t.png".into(), "repeat".into(), "top".into()]).unwrap();

        watermark(&mut base, &loader, &pool, &ProcessorConfig::default(), &args).unwrap();

        // 50/20 + 1 = 3 tiles cover the full width
        for x in [0u32, 25, 49] {
            let p = base.pixels().get_pixel(x, 5);
            assert_eq!((p[0], p[1], p[2]), (0, 0, 255), "at x={}", x);
        }
        assert!(pool.is_balanced());
    }

    #[test]
    fn test_watermark_ratio_resizes_overlay() {
        let mut base = Surface::solid(100, 100, Color::white());
        let pool = SurfacePool::new();
        let loader = loader_with("r.png", png_blob(50, 50, [255, 0, 0, 255]));
        let args = WatermarkArgs::parse(&[
            "r.png".into(),
            "center".into(),
            "center".into(),
            "0".into(),
            "30".into(),
            "30".into(),
        ])
        .unwrap();

        watermark(&mut base, &loader, &pool, &ProcessorConfig::default(), &args).unwrap();

        // overlay shrinks to 30x30 and centers at (35,35)
        let inside = base.pixels().get_pixel(50, 50);
        assert_eq!((inside[0], inside[1], inside[2]), (255, 0, 0));
        let outside = base.pixels().get_pixel(30, 50);
        assert_eq!((outside[0], outside[1], outside[2]), (255, 255, 255));
    }

    #[test]
    fn test_watermark_loader_failure_propagates() {
        let mut base = Surface::solid(10, 10, Color::white());
        let pool = SurfacePool::new();
        let loader = StaticLoader::new();
        let args = WatermarkArgs::parse(&["missing.png".into()]).unwrap();

        let err = watermark(&mut base, &loader, &pool, &ProcessorConfig::default(), &args)
            .unwrap_err();
        assert!(matches!(err, FilterError::Loader { .. }));
        // failed before any surface was adopted
        assert_eq!(pool.registered(), 0);
        assert!(pool.is_balanced());
    }
}
