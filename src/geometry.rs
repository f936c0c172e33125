//! Overlay placement arithmetic.
//!
//! Alignment tokens position an overlay of known size on a base canvas.
//! Each axis resolves independently to a pixel offset plus a tile count
//! (always 1 except for `repeat`). Negative resolved offsets wrap around
//! to measure from the far edge, so `-10` means "10px in from the right"
//! on the horizontal axis.

/// One axis of an overlay placement: pixel offset plus tile count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub offset: i64,
    pub repeat: u32,
}

impl Placement {
    fn at(offset: i64) -> Self {
        Placement { offset, repeat: 1 }
    }
}

/// Parsed alignment token for one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `left` / `top`: offset 0
    Start,
    /// `center`: centered, integer floor
    Center,
    /// `right` / `bottom`: flush against the far edge
    End,
    /// `repeat`: offset 0, tiled to cover the base dimension
    Repeat,
    /// `NNp`: percentage of the base dimension, signed
    Percent(i64),
    /// plain signed pixel offset (unparseable input defaults to 0)
    Offset(i64),
}

impl Align {
    /// Parse a horizontal alignment token (`left`/`right` vocabulary).
    pub fn parse_x(token: &str) -> Align {
        match token {
            "left" => Align::Start,
            "right" => Align::End,
            _ => Self::parse_common(token),
        }
    }

    /// Parse a vertical alignment token (`top`/`bottom` vocabulary).
    pub fn parse_y(token: &str) -> Align {
        match token {
            "top" => Align::Start,
            "bottom" => Align::End,
            _ => Self::parse_common(token),
        }
    }

    fn parse_common(token: &str) -> Align {
        match token {
            "center" => Align::Center,
            "repeat" => Align::Repeat,
            _ => {
                if let Some(stripped) = token.strip_suffix('p') {
                    Align::Percent(stripped.parse().unwrap_or(0))
                } else {
                    Align::Offset(token.parse().unwrap_or(0))
                }
            }
        }
    }

    /// Resolve this alignment against a base and overlay dimension.
    ///
    /// A negative resolved offset, from any source, is reinterpreted as an
    /// offset from the far edge: `base - overlay + offset`.
    pub fn resolve(&self, base: u32, overlay: u32) -> Placement {
        let base = base as i64;
        let overlay = overlay as i64;
        let placement = match *self {
            Align::Start => Placement::at(0),
            Align::Center => Placement::at((base - overlay) / 2),
            Align::End => Placement::at(base - overlay),
            Align::Repeat => Placement {
                offset: 0,
                // one extra tile guarantees full coverage of the base axis
                repeat: (base / overlay.max(1) + 1) as u32,
            },
            Align::Percent(pct) => Placement::at(pct * base / 100),
            Align::Offset(px) => Placement::at(px),
        };
        if placement.offset < 0 {
            Placement {
                offset: base - overlay + placement.offset,
                ..placement
            }
        } else {
            placement
        }
    }
}
