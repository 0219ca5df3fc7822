use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// Color
//------------------------------------------------------------------------------

/// An opaque sRGB color. Parsed from `#rrggbb` notation, which is the only
/// form the request surfaces accept.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const WHITE: Rgb = Rgb(255, 255, 255);

impl Rgb {
    pub fn parse(s: &str) -> Result<Self> {
        let t = s.trim().trim_start_matches('#');
        if t.len() != 6 {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let b = hex::decode(t).map_err(|_| Error::InvalidColor(s.to_string()))?;
        Ok(Rgb(b[0], b[1], b[2]))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    /// Adds `amount` to each channel independently, clamped to [0, 255].
    /// Used to derive a gradient/stripe partner color when none is supplied.
    pub fn adjust(self, amount: i16) -> Self {
        let clamp = |c: u8| (c as i16 + amount).clamp(0, 255) as u8;
        Rgb(clamp(self.0), clamp(self.1), clamp(self.2))
    }

    pub fn channels(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }
}

impl FromStr for Rgb {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Rgb::parse(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;
    fn try_from(s: String) -> Result<Self> {
        Rgb::parse(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> String {
        c.to_hex()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// Module shape
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleShape {
    #[default]
    Square,
    Circle,
    Diamond,
}

// Eye shape
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EyeShape {
    #[default]
    Square,
    Circle,
    Leaf,
}

// Gradient direction
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientDirection {
    #[default]
    Horizontal,
    Vertical,
    Diagonal,
}

// Border pattern
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BorderPattern {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Double,
    Gradient,
    Striped,
}

// Output format
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Png,
    Jpeg,
    Svg,
    Pdf,
}

impl OutputFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Svg => "image/svg+xml",
            Self::Pdf => "application/pdf",
        }
    }
}

#[cfg(test)]
mod color_tests {
    use super::*;

    #[test]
    fn parse_hex_roundtrip() {
        let c = Rgb::parse("#4b6179").unwrap();
        assert_eq!(c, Rgb(0x4b, 0x61, 0x79));
        assert_eq!(c.to_hex(), "#4b6179");
    }

    #[test]
    fn parse_without_hash() {
        assert_eq!(Rgb::parse("ff0000").unwrap(), Rgb(255, 0, 0));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(Rgb::parse("#fff").is_err());
        assert!(Rgb::parse("#zzzzzz").is_err());
        assert!(Rgb::parse("").is_err());
    }

    #[test]
    fn adjust_clamps_channels() {
        assert_eq!(Rgb(250, 10, 128).adjust(60), Rgb(255, 70, 188));
        assert_eq!(Rgb(250, 10, 128).adjust(-60), Rgb(190, 0, 68));
    }

    #[test]
    fn unknown_enum_tag_is_an_error() {
        assert!(serde_json::from_str::<ModuleShape>("\"rounded\"").is_err());
        assert!(serde_json::from_str::<BorderPattern>("\"zigzag\"").is_err());
    }
}
