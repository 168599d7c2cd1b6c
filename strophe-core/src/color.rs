//! Status pixel color handling
//!
//! Layer colors come from the config as either a 6-digit hex string
//! (optionally prefixed with `#`) or a 3-element integer triple. Both
//! normalize to an 8-bit [`Rgb`] triple at load time.

/// Errors that can occur when parsing a color specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorError {
    /// Not a 6-hex-digit string or 3-element triple
    InvalidColor,
}

/// An 8-bit RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `"#FF8000"` or `"FF8000"`
    ///
    /// The string must be exactly 6 hex digits after stripping an
    /// optional leading `#`.
    pub fn parse_hex(input: &str) -> Result<Self, ColorError> {
        let hex = input.strip_prefix('#').unwrap_or(input);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ColorError::InvalidColor);
        }

        let channel = |range: &str| u8::from_str_radix(range, 16).map_err(|_| ColorError::InvalidColor);

        Ok(Self {
            r: channel(&hex[0..2])?,
            g: channel(&hex[2..4])?,
            b: channel(&hex[4..6])?,
        })
    }

    /// Scale each channel by a brightness factor in 0.0..=1.0
    ///
    /// Values outside the range are clamped.
    pub fn scaled(self, brightness: f32) -> Self {
        let b = brightness.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * b) as u8,
            g: (self.g as f32 * b) as u8,
            b: (self.b as f32 * b) as u8,
        }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(triple: [u8; 3]) -> Self {
        Self {
            r: triple[0],
            g: triple[1],
            b: triple[2],
        }
    }
}
