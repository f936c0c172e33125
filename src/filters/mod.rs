//! Filter vocabulary: directive parsing and dispatch.
//!
//! Directives arrive as `(name, args)` pairs already tokenized upstream.
//! Each one is parsed exactly once into a typed [`FilterOp`]; the string
//! arguments never reach the handlers. Names are matched exactly, and a
//! name outside the vocabulary is skipped rather than rejected so older
//! deployments tolerate directives they do not know yet.

pub(crate) mod args;
mod effects;
pub(crate) mod fill;
mod round_corner;
mod tone;
mod watermark;

pub use round_corner::RoundCornerArgs;
pub use watermark::{SizeRatio, WatermarkArgs};

use crate::config::ProcessorConfig;
use crate::error::FilterError;
use crate::filters::args::{parse_float, parse_int};
use crate::loader::ImageLoader;
use crate::pool::SurfacePool;
use crate::surface::{Rotation, Surface};

/// One filter invocation: a name plus positional string arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDirective {
    pub name: String,
    pub args: Vec<String>,
}

impl FilterDirective {
    pub fn new(name: impl Into<String>, args: &[&str]) -> FilterDirective {
        FilterDirective {
            name: name.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// A directive parsed into typed arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    Watermark(WatermarkArgs),
    RoundCorner(RoundCornerArgs),
    BackgroundColor { color: String },
    Rotate(Rotation),
    Grayscale,
    Brightness { percent: f64 },
    Contrast { percent: f64 },
    Hue { degrees: f64 },
    Saturation { percent: f64 },
    Rgb { r: f64, g: f64, b: f64 },
    Modulate { brightness: f64, saturation: f64, hue: f64 },
    Blur { sigma: f64 },
    Sharpen { sigma: f64 },
    StripIcc,
    StripExif,
    Trim { tolerance: u32, from_bottom_right: bool },
}

/// Outcome of parsing one directive.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Parsed {
    Op(FilterOp),
    /// Recognized name whose arguments make it do nothing
    Noop,
    /// Name outside the vocabulary
    Unknown,
}

/// Parse a directive into a typed operation.
pub(crate) fn parse(directive: &FilterDirective) -> Parsed {
    let args = &directive.args;
    match directive.name.as_str() {
        "watermark" => match WatermarkArgs::parse(args) {
            Some(parsed) => Parsed::Op(FilterOp::Watermark(parsed)),
            None => Parsed::Noop,
        },
        "roundCorner" => match RoundCornerArgs::parse(args) {
            Some(parsed) => Parsed::Op(FilterOp::RoundCorner(parsed)),
            None => Parsed::Noop,
        },
        "backgroundColor" => match args.first() {
            Some(color) => Parsed::Op(FilterOp::BackgroundColor {
                color: color.clone(),
            }),
            None => Parsed::Noop,
        },
        "rotate" => match args.first().map(|a| parse_int(a)) {
            // the stored rotation compensates for the render orientation
            // flip, so a requested 90 runs as a 270 quarter-turn
            Some(90) => Parsed::Op(FilterOp::Rotate(Rotation::D270)),
            Some(180) => Parsed::Op(FilterOp::Rotate(Rotation::D180)),
            Some(270) => Parsed::Op(FilterOp::Rotate(Rotation::D90)),
            _ => Parsed::Noop,
        },
        "grayscale" => Parsed::Op(FilterOp::Grayscale),
        "brightness" => match args.first() {
            Some(arg) => Parsed::Op(FilterOp::Brightness {
                percent: parse_float(arg),
            }),
            None => Parsed::Noop,
        },
        "contrast" => match args.first() {
            Some(arg) => Parsed::Op(FilterOp::Contrast {
                percent: parse_float(arg),
            }),
            None => Parsed::Noop,
        },
        "hue" => match args.first() {
            Some(arg) => Parsed::Op(FilterOp::Hue {
                degrees: parse_float(arg),
            }),
            None => Parsed::Noop,
        },
        "saturation" => match args.first() {
            Some(arg) => Parsed::Op(FilterOp::Saturation {
                percent: parse_float(arg),
            }),
            None => Parsed::Noop,
        },
        "rgb" => {
            if args.len() == 3 {
                Parsed::Op(FilterOp::Rgb {
                    r: parse_float(&args[0]),
                    g: parse_float(&args[1]),
                    b: parse_float(&args[2]),
                })
            } else {
                Parsed::Noop
            }
        }
        "modulate" => {
            if args.len() == 3 {
                Parsed::Op(FilterOp::Modulate {
                    brightness: parse_float(&args[0]),
                    saturation: parse_float(&args[1]),
                    hue: parse_float(&args[2]),
                })
            } else {
                Parsed::Noop
            }
        }
        "blur" => {
            let sigma = match args.len() {
                2 => parse_float(&args[1]),
                1 => parse_float(&args[0]),
                _ => 0.0,
            } / 2.0;
            if sigma > 0.0 {
                Parsed::Op(FilterOp::Blur { sigma })
            } else {
                Parsed::Noop
            }
        }
        "sharpen" => {
            let sigma = match args.len() {
                1 => parse_float(&args[0]),
                2 | 3 => parse_float(&args[1]),
                _ => 0.0,
            };
            Parsed::Op(FilterOp::Sharpen {
                sigma: 1.0 + sigma * 2.0,
            })
        }
        "stripIcc" => Parsed::Op(FilterOp::StripIcc),
        "stripExif" => Parsed::Op(FilterOp::StripExif),
        "trim" => Parsed::Op(FilterOp::Trim {
            tolerance: args.first().map(|a| parse_int(a).max(0) as u32).unwrap_or(0),
            from_bottom_right: args.get(1).map(|p| p == "bottom-right").unwrap_or(false),
        }),
        _ => Parsed::Unknown,
    }
}

/// Run one operation against the surface.
pub(crate) fn apply(
    op: &FilterOp,
    surface: &mut Surface,
    loader: &dyn ImageLoader,
    pool: &SurfacePool,
    config: &ProcessorConfig,
) -> Result<(), FilterError> {
    match op {
        FilterOp::Watermark(wm) => watermark::watermark(surface, loader, pool, config, wm),
        FilterOp::RoundCorner(rc) => round_corner::round_corner(surface, pool, rc),
        FilterOp::BackgroundColor { color } => {
            effects::background_color(surface, color);
            Ok(())
        }
        FilterOp::Rotate(rotation) => {
            effects::rotate(surface, *rotation);
            Ok(())
        }
        FilterOp::Grayscale => {
            tone::grayscale(surface);
            Ok(())
        }
        FilterOp::Brightness { percent } => tone::brightness(surface, *percent),
        FilterOp::Contrast { percent } => tone::contrast(surface, *percent),
        FilterOp::Hue { degrees } => {
            tone::hue(surface, *degrees);
            Ok(())
        }
        FilterOp::Saturation { percent } => {
            tone::saturation(surface, *percent);
            Ok(())
        }
        FilterOp::Rgb { r, g, b } => tone::rgb(surface, *r, *g, *b),
        FilterOp::Modulate {
            brightness,
            saturation,
            hue,
        } => {
            tone::modulate(surface, *brightness, *saturation, *hue);
            Ok(())
        }
        FilterOp::Blur { sigma } => {
            effects::blur(surface, *sigma);
            Ok(())
        }
        FilterOp::Sharpen { sigma } => {
            effects::sharpen(surface, *sigma);
            Ok(())
        }
        FilterOp::StripIcc | FilterOp::StripExif => {
            effects::strip_profile(surface);
            Ok(())
        }
        FilterOp::Trim {
            tolerance,
            from_bottom_right,
        } => effects::trim(surface, *tolerance, *from_bottom_right),
    }
}
