pub mod blend;
pub mod error;

use std::convert::TryFrom;
use std::ops::Add;
use std::str::FromStr;

use image::Rgb;
use lazy_static::lazy_static;
use regex::Regex;

pub use error::ColorError;
pub use error::ColorResult;


lazy_static! {
    static ref HEX_PATTERN: Regex = Regex::new("^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").unwrap();
}

/// An sRGB color with an opacity.
///
/// Channels only change through the validating setters, so a `Color`
/// always holds three channels in [0, 255] and an alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {

    rgb: Rgb<u8>,

    alpha: f64,

}

impl Default for Color {

    fn default() -> Self {
        Color {
            rgb: Rgb::from([0, 0, 0]),
            alpha: 1.0,
        }
    }
}

impl Color {

    /// Builds a color from at most one of a hex string and an rgb triple.
    /// Giving neither yields opaque black.
    pub fn new(hex: Option<&str>, rgb: Option<&[i32]>) -> ColorResult<Self> {
        match (hex, rgb) {
            (Some(_), Some(_)) => Err(ColorError::InvalidArguments("provide just one color initialization".to_string())),
            (Some(hex), None) => Color::from_hex(hex),
            (None, Some(rgb)) => Color::from_rgb(rgb),
            (None, None) => Ok(Color::default()),
        }
    }

    pub fn from_hex(hex: &str) -> ColorResult<Self> {
        let mut color = Color::default();
        color.set_hex(hex)?;
        Ok(color)
    }

    pub fn from_rgb(rgb: &[i32]) -> ColorResult<Self> {
        let mut color = Color::default();
        color.set_rgb(rgb)?;
        Ok(color)
    }

    pub fn is_valid_hex(hex: &str) -> bool {
        HEX_PATTERN.is_match(hex)
    }

    pub fn is_valid_alpha(alpha: f64) -> bool {
        (0.0..=1.0).contains(&alpha)
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.rgb[0], self.rgb[1], self.rgb[2])
    }

    pub fn set_hex(&mut self, hex: &str) -> ColorResult<()> {
        if !Color::is_valid_hex(hex) {
            return Err(ColorError::InvalidFormat("invalid hex".to_string()));
        }
        self.rgb = parse_hex(&hex[1..]);
        Ok(())
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.rgb.0
    }

    pub fn set_rgb(&mut self, rgb: &[i32]) -> ColorResult<()> {
        if rgb.len() != 3 {
            return Err(ColorError::InvalidFormat("3 parameters needed".to_string()));
        }
        let mut channels = [0u8; 3];
        for (c, v) in channels.iter_mut().zip(rgb) {
            *c = u8::try_from(*v)
                .map_err(|_| ColorError::InvalidRange(format!("invalid channel {}, must be int between 0 and 255", v)))?;
        }
        self.rgb = Rgb::from(channels);
        Ok(())
    }

    pub fn r(&self) -> u8 {
        self.rgb[0]
    }

    pub fn g(&self) -> u8 {
        self.rgb[1]
    }

    pub fn b(&self) -> u8 {
        self.rgb[2]
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) -> ColorResult<()> {
        if !Color::is_valid_alpha(alpha) {
            return Err(ColorError::InvalidRange("invalid alpha, must be float between 0 and 1".to_string()));
        }
        self.alpha = alpha;
        Ok(())
    }

    pub fn with_alpha(mut self, alpha: f64) -> ColorResult<Self> {
        self.set_alpha(alpha)?;
        Ok(self)
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha == 1.0
    }

    /// Composites the translucent operand over the opaque one.
    ///
    /// When `other` is opaque it is the base and `self` is laid over it,
    /// which includes the case of both being opaque.
    pub fn blend(&self, other: &Color) -> ColorResult<Color> {
        if !self.is_opaque() && !other.is_opaque() {
            return Err(ColorError::InvalidState("at least one color must have alpha 1".to_string()));
        }
        let rgb = if other.is_opaque() {
            blend::mix(&other.rgb, &self.rgb, self.alpha)
        } else {
            blend::mix(&self.rgb, &other.rgb, other.alpha)
        };
        Ok(Color::from(rgb))
    }
}

impl From<Rgb<u8>> for Color {

    fn from(rgb: Rgb<u8>) -> Self {
        Color {
            rgb,
            alpha: 1.0,
        }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl<'a> Add<&'a Color> for &'a Color {
    type Output = ColorResult<Color>;

    fn add(self, other: &'a Color) -> Self::Output {
        self.blend(other)
    }
}

/// `digits` is already known to be 3 or 6 hex digits.
fn parse_hex(digits: &str) -> Rgb<u8> {
    let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).unwrap_or(0);
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0);
    if digits.len() == 3 {
        Rgb::from([nibble(0) * 17, nibble(1) * 17, nibble(2) * 17])
    } else {
        Rgb::from([byte(0), byte(2), byte(4)])
    }
}
