//! CSS color parsing for the export background.
//!
//! The dialog's color input and swatch picker produce hex strings
//! (`#F2F3F4`), `rgba(...)` strings, or the keyword `transparent`.
//! This module parses those into an [`Rgba`] the rasteriser can fill
//! with. Anything else typed into the free-text field (named colors,
//! `hsl()`, percentages) goes through `svgtypes`, the color grammar
//! `usvg` itself uses.

use std::str::FromStr;

/// Straight (non-premultiplied) 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Errors from [`Rgba::from_str`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// Not a CSS color at all.
    #[error("unsupported color: {0:?}")]
    Unsupported(String),

    /// Recognized syntax with an invalid component.
    #[error("invalid color {input:?}: {reason}")]
    Invalid { input: String, reason: &'static str },
}

impl Rgba {
    /// Fully transparent black, what CSS `transparent` means.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Opaque black, the fill a browser canvas uses under a JPEG.
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    #[must_use]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Hex notation, `#rrggbb` when opaque and `#rrggbbaa` otherwise.
    #[must_use]
    pub fn to_hex(self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Composite this color over an opaque backdrop.
    #[must_use]
    pub fn over(self, backdrop: Self) -> Self {
        let a = u16::from(self.a);
        #[allow(clippy::cast_possible_truncation)]
        let blend = |fg: u8, bg: u8| {
            let v = u16::from(fg) * a + u16::from(bg) * (255 - a);
            ((v + 127) / 255) as u8
        };
        Self::opaque(
            blend(self.r, backdrop.r),
            blend(self.g, backdrop.g),
            blend(self.b, backdrop.b),
        )
    }
}

impl FromStr for Rgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        if lower == "transparent" {
            return Ok(Self::TRANSPARENT);
        }
        if let Some(hex) = lower.strip_prefix('#') {
            return parse_hex(hex, trimmed);
        }
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
        {
            let args = args
                .strip_suffix(')')
                .ok_or_else(|| invalid(trimmed, "missing closing parenthesis"))?;
            return parse_functional(args, trimmed);
        }
        lower
            .parse::<svgtypes::Color>()
            .map(|c| Self {
                r: c.red,
                g: c.green,
                b: c.blue,
                a: c.alpha,
            })
            .map_err(|_| ColorError::Unsupported(trimmed.to_owned()))
    }
}

fn invalid(input: &str, reason: &'static str) -> ColorError {
    ColorError::Invalid {
        input: input.to_owned(),
        reason,
    }
}

/// Parse the digits after `#`: 3, 4, 6, or 8 hex digits.
fn parse_hex(hex: &str, input: &str) -> Result<Rgba, ColorError> {
    let digits: Vec<u8> = hex
        .chars()
        .map(|ch| {
            ch.to_digit(16)
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(|| invalid(input, "invalid hex digit"))
        })
        .collect::<Result<_, _>>()?;

    match digits.len() {
        // Short form: #rgb(a) → #rrggbb(aa)
        3 | 4 => {
            let c = |i: usize| digits[i] * 17;
            let a = if digits.len() == 4 { c(3) } else { 255 };
            Ok(Rgba {
                r: c(0),
                g: c(1),
                b: c(2),
                a,
            })
        }
        6 | 8 => {
            let c = |i: usize| digits[i] * 16 + digits[i + 1];
            let a = if digits.len() == 8 { c(6) } else { 255 };
            Ok(Rgba {
                r: c(0),
                g: c(2),
                b: c(4),
                a,
            })
        }
        _ => Err(invalid(input, "hex color must have 3, 4, 6, or 8 digits")),
    }
}

/// Parse `r, g, b` or `r, g, b, a` with channels in 0–255 and alpha in
/// 0–1.
fn parse_functional(args: &str, input: &str) -> Result<Rgba, ColorError> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if !(3..=4).contains(&parts.len()) {
        return Err(invalid(input, "expected 3 or 4 components"));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let channel = |part: &str| -> Result<u8, ColorError> {
        let v: f32 = part
            .parse()
            .map_err(|_| invalid(input, "channel is not a number"))?;
        if !(0.0..=255.0).contains(&v) {
            return Err(invalid(input, "channel out of range 0-255"));
        }
        Ok(v.round() as u8)
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let alpha = match parts.get(3) {
        None => 255,
        Some(part) => {
            let v: f32 = part
                .parse()
                .map_err(|_| invalid(input, "alpha is not a number"))?;
            if !(0.0..=1.0).contains(&v) {
                return Err(invalid(input, "alpha out of range 0-1"));
            }
            (v * 255.0).round() as u8
        }
    };

    Ok(Rgba {
        r: channel(parts[0])?,
        g: channel(parts[1])?,
        b: channel(parts[2])?,
        a: alpha,
    })
}
