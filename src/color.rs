//! Color token resolution.
//!
//! Filter arguments name colors as `#rrggbb`/`#rgb` hex (with or without the
//! leading `#`), as CSS/SVG named colors, or as the sentinel `auto`, which
//! samples the image itself. Unrecognized tokens resolve to black; color
//! arguments are never a reason to fail a request.
//!
//! # Example
//!
//! ```ignore
//! let c = resolve_color(&surface, "cornflowerblue");
//! assert_eq!(c, Color::new(100, 149, 237));
//! ```

use crate::surface::Surface;

/// An opaque RGB pixel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// White color.
    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }

    /// Black color.
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// Exact equality against (0,0,0). Not a luminance threshold: #010101
    /// is not black for the purposes of fill's border-extension shortcut.
    pub fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Exact equality against (255,255,255).
    pub fn is_white(&self) -> bool {
        self.r == 255 && self.g == 255 && self.b == 255
    }

    /// CSS hex form, `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parse a hex color string into RGB components.
///
/// Supports both #RGB and #RRGGBB formats; the leading '#' is optional.
/// Returns None on any malformed digit (callers fall back to black).
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    match hex.len() {
        3 => {
            // #RGB format - each character represents a hex digit, doubled
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            // Double each component: 0xF -> 0xFF, 0xA -> 0xAA
            Some(Color::new(r * 17, g * 17, b * 17))
        }
        6 => {
            // #RRGGBB format
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::new(r, g, b))
        }
        _ => None,
    }
}

/// Look up a CSS/SVG 1.1 named color. The name must already be lowercase.
pub fn named_color(name: &str) -> Option<Color> {
    NAMED_COLORS
        .binary_search_by(|(entry, _)| entry.cmp(&name))
        .ok()
        .map(|idx| NAMED_COLORS[idx].1)
}

/// Resolve a color token against a surface.
///
/// Precedence: named color, hex, `auto` (edge-average sample of the
/// surface), then black for everything else. `blur` is not a color; the
/// fill path intercepts it before resolution, so here it falls through to
/// black like any unknown token.
pub fn resolve_color(surface: &Surface, token: &str) -> Color {
    let lower = token.to_lowercase();
    if let Some(color) = named_color(&lower) {
        return color;
    }
    if let Some(color) = parse_hex_color(&lower) {
        return color;
    }
    if lower == "auto" {
        return surface.edge_average_color();
    }
    Color::black()
}

/// SVG 1.1 color keywords, sorted by name for binary search.
static NAMED_COLORS: &[(&str, Color)] = &[
    ("aliceblue", Color::new(240, 248, 255)),
    ("antiquewhite", Color::new(250, 235, 215)),
    ("aqua", Color::new(0, 255, 255)),
    ("aquamarine", Color::new(127, 255, 212)),
    ("azure", Color::new(240, 255, 255)),
    ("beige", Color::new(245, 245, 220)),
    ("bisque", Color::new(255, 228, 196)),
    ("black", Color::new(0, 0, 0)),
    ("blanchedalmond", Color::new(255, 235, 205)),
    ("blue", Color::new(0, 0, 255)),
    ("blueviolet", Color::new(138, 43, 226)),
    ("brown", Color::new(165, 42, 42)),
    ("burlywood", Color::new(222, 184, 135)),
    ("cadetblue", Color::new(95, 158, 160)),
    ("chartreuse", Color::new(127, 255, 0)),
    ("chocolate", Color::new(210, 105, 30)),
    ("coral", Color::new(255, 127, 80)),
    ("cornflowerblue", Color::new(100, 149, 237)),
    ("cornsilk", Color::new(255, 248, 220)),
    ("crimson", Color::new(220, 20, 60)),
    ("cyan", Color::new(0, 255, 255)),
    ("darkblue", Color::new(0, 0, 139)),
    ("darkcyan", Color::new(0, 139, 139)),
    ("darkgoldenrod", Color::new(184, 134, 11)),
    ("darkgray", Color::new(169, 169, 169)),
    ("darkgreen", Color::new(0, 100, 0)),
    ("darkgrey", Color::new(169, 169, 169)),
    ("darkkhaki", Color::new(189, 183, 107)),
    ("darkmagenta", Color::new(139, 0, 139)),
    ("darkolivegreen", Color::new(85, 107, 47)),
    ("darkorange", Color::new(255, 140, 0)),
    ("darkorchid", Color::new(153, 50, 204)),
    ("darkred", Color::new(139, 0, 0)),
    ("darksalmon", Color::new(233, 150, 122)),
    ("darkseagreen", Color::new(143, 188, 143)),
    ("darkslateblue", Color::new(72, 61, 139)),
    ("darkslategray", Color::new(47, 79, 79)),
    ("darkslategrey", Color::new(47, 79, 79)),
    ("darkturquoise", Color::new(0, 206, 209)),
    ("darkviolet", Color::new(148, 0, 211)),
    ("deeppink", Color::new(255, 20, 147)),
    ("deepskyblue", Color::new(0, 191, 255)),
    ("dimgray", Color::new(105, 105, 105)),
    ("dimgrey", Color::new(105, 105, 105)),
    ("dodgerblue", Color::new(30, 144, 255)),
    ("firebrick", Color::new(178, 34, 34)),
    ("floralwhite", Color::new(255, 250, 240)),
    ("forestgreen", Color::new(34, 139, 34)),
    ("fuchsia", Color::new(255, 0, 255)),
    ("gainsboro", Color::new(220, 220, 220)),
    ("ghostwhite", Color::new(248, 248, 255)),
    ("gold", Color::new(255, 215, 0)),
    ("goldenrod", Color::new(218, 165, 32)),
    ("gray", Color::new(128, 128, 128)),
    ("green", Color::new(0, 128, 0)),
    ("greenyellow", Color::new(173, 255, 47)),
    ("grey", Color::new(128, 128, 128)),
    ("honeydew", Color::new(240, 255, 240)),
    ("hotpink", Color::new(255, 105, 180)),
    ("indianred", Color::new(205, 92, 92)),
    ("indigo", Color::new(75, 0, 130)),
    ("ivory", Color::new(255, 255, 240)),
    ("khaki", Color::new(240, 230, 140)),
    ("lavender", Color::new(230, 230, 250)),
    ("lavenderblush", Color::new(255, 240, 245)),
    ("lawngreen", Color::new(124, 252, 0)),
    ("lemonchiffon", Color::new(255, 250, 205)),
    ("lightblue", Color::new(173, 216, 230)),
    ("lightcoral", Color::new(240, 128, 128)),
    ("lightcyan", Color::new(224, 255, 255)),
    ("lightgoldenrodyellow", Color::new(250, 250, 210)),
    ("lightgray", Color::new(211, 211, 211)),
    ("lightgreen", Color::new(144, 238, 144)),
    ("lightgrey", Color::new(211, 211, 211)),
    ("lightpink", Color::new(255, 182, 193)),
    ("lightsalmon", Color::new(255, 160, 122)),
    ("lightseagreen", Color::new(32, 178, 170)),
    ("lightskyblue", Color::new(135, 206, 250)),
    ("lightslategray", Color::new(119, 136, 153)),
    ("lightslategrey", Color::new(119, 136, 153)),
    ("lightsteelblue", Color::new(176, 196, 222)),
    ("lightyellow", Color::new(255, 255, 224)),
    ("lime", Color::new(0, 255, 0)),
    ("limegreen", Color::new(50, 205, 50)),
    ("linen", Color::new(250, 240, 230)),
    ("magenta", Color::new(255, 0, 255)),
    ("maroon", Color::new(128, 0, 0)),
    ("mediumaquamarine", Color::new(102, 205, 170)),
    ("mediumblue", Color::new(0, 0, 205)),
    ("mediumorchid", Color::new(186, 85, 211)),
    ("mediumpurple", Color::new(147, 112, 219)),
    ("mediumseagreen", Color::new(60, 179, 113)),
    ("mediumslateblue", Color::new(123, 104, 238)),
    ("mediumspringgreen", Color::new(0, 250, 154)),
    ("mediumturquoise", Color::new(72, 209, 204)),
    ("mediumvioletred", Color::new(199, 21, 133)),
    ("midnightblue", Color::new(25, 25, 112)),
    ("mintcream", Color::new(245, 255, 250)),
    ("mistyrose", Color::new(255, 228, 225)),
    ("moccasin", Color::new(255, 228, 181)),
    ("navajowhite", Color::new(255, 222, 173)),
    ("navy", Color::new(0, 0, 128)),
    ("oldlace", Color::new(253, 245, 230)),
    ("olive", Color::new(128, 128, 0)),
    ("olivedrab", Color::new(107, 142, 35)),
    ("orange", Color::new(255, 165, 0)),
    ("orangered", Color::new(255, 69, 0)),
    ("orchid", Color::new(218, 112, 214)),
    ("palegoldenrod", Color::new(238, 232, 170)),
    ("palegreen", Color::new(152, 251, 152)),
    ("paleturquoise", Color::new(175, 238, 238)),
    ("palevioletred", Color::new(219, 112, 147)),
    ("papayawhip", Color::new(255, 239, 213)),
    ("peachpuff", Color::new(255, 218, 185)),
    ("peru", Color::new(205, 133, 63)),
    ("pink", Color::new(255, 192, 203)),
    ("plum", Color::new(221, 160, 221)),
    ("powderblue", Color::new(176, 224, 230)),
    ("purple", Color::new(128, 0, 128)),
    ("red", Color::new(255, 0, 0)),
    ("rosybrown", Color::new(188, 143, 143)),
    ("royalblue", Color::new(65, 105, 225)),
    ("saddlebrown", Color::new(139, 69, 19)),
    ("salmon", Color::new(250, 128, 114)),
    ("sandybrown", Color::new(244, 164, 96)),
    ("seagreen", Color::new(46, 139, 87)),
    ("seashell", Color::new(255, 245, 238)),
    ("sienna", Color::new(160, 82, 45)),
    ("silver", Color::new(192, 192, 192)),
    ("skyblue", Color::new(135, 206, 235)),
    ("slateblue", Color::new(106, 90, 205)),
    ("slategray", Color::new(112, 128, 144)),
    ("slategrey", Color::new(112, 128, 144)),
    ("snow", Color::new(255, 250, 250)),
    ("springgreen", Color::new(0, 255, 127)),
    ("steelblue", Color::new(70, 130, 180)),
    ("tan", Color::new(210, 180, 140)),
    ("teal", Color::new(0, 128, 128)),
    ("thistle", Color::new(216, 191, 216)),
    ("tomato", Color::new(255, 99, 71)),
    ("turquoise", Color::new(64, 224, 208)),
    ("violet", Color::new(238, 130, 238)),
    ("wheat", Color::new(245, 222, 179)),
    ("white", Color::new(255, 255, 255)),
    ("whitesmoke", Color::new(245, 245, 245)),
    ("yellow", Color::new(255, 255, 0)),
    ("yellowgreen", Color::new(154, 205, 50)),
];
