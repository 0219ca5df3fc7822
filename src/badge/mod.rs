use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::options::BorderOptions;
use crate::types::{Rgb, BLACK, WHITE};

pub mod compose;
pub mod layout;

pub use compose::composite;

// Paper formats
//------------------------------------------------------------------------------

/// All pixel-valued style fields are declared at this reference resolution
/// and rescaled by `max(width, height) / 1004` before layout math runs.
pub const REFERENCE_SIZE: u32 = 1004;

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaperFormat {
    #[default]
    Standard,
    A4,
    A5,
    A6,
    Letter,
}

impl PaperFormat {
    /// Landscape dimensions (long x short edge).
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Standard => (1004, 650),
            Self::A4 => (1754, 1240),
            Self::A5 => (1240, 874),
            Self::A6 => (874, 620),
            Self::Letter => (1650, 1276),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QrSide {
    #[default]
    Left,
    Right,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentLayout {
    #[default]
    SideBySide,
    Centered,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogoAnchor {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
    TopCenter,
    BottomCenter,
}

impl LogoAnchor {
    pub fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight | Self::TopCenter)
    }

    pub const ALL: [LogoAnchor; 6] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
        Self::TopCenter,
        Self::BottomCenter,
    ];
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontPreset {
    #[default]
    Classic,
    Modern,
    Elegant,
    Mono,
}

impl FontPreset {
    pub fn family(self) -> &'static str {
        match self {
            Self::Classic => "Georgia, serif",
            Self::Modern => "Helvetica, Arial, sans-serif",
            Self::Elegant => "Garamond, serif",
            Self::Mono => "Courier New, monospace",
        }
    }
}

// Badge layout config
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoSpec {
    pub url: String,
    /// Width/height box in reference units.
    pub size: u32,
    #[serde(default)]
    pub position: LogoAnchor,
}

/// One badge's visual configuration. Pixel-valued fields are in reference
/// units until [`BadgeStyle::scaled`] maps them onto the target format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BadgeStyle {
    pub format: PaperFormat,
    pub orientation: Orientation,
    pub background: Rgb,
    pub text_color: Rgb,
    pub font: FontPreset,
    pub qr_side: QrSide,
    pub qr_size: u32,
    pub content_layout: ContentLayout,
    pub border: Option<BorderOptions>,
    pub event_logo: Option<LogoSpec>,
    pub company_logo: Option<LogoSpec>,
    pub event_name: Option<String>,

    // Deprecated single-logo aliases, folded onto `event_logo` by
    // `normalized` so internal logic only ever sees the new shape.
    pub logo_url: Option<String>,
    pub logo_size: Option<u32>,
    pub logo_position: Option<LogoAnchor>,
}

pub const DEFAULT_QR_SIZE: u32 = 280;
pub const DEFAULT_LOGO_SIZE: u32 = 120;

impl Default for BadgeStyle {
    fn default() -> Self {
        Self {
            format: PaperFormat::default(),
            orientation: Orientation::default(),
            background: WHITE,
            text_color: BLACK,
            font: FontPreset::default(),
            qr_side: QrSide::default(),
            qr_size: DEFAULT_QR_SIZE,
            content_layout: ContentLayout::default(),
            border: None,
            event_logo: None,
            company_logo: None,
            event_name: None,
            logo_url: None,
            logo_size: None,
            logo_position: None,
        }
    }
}

impl BadgeStyle {
    /// Maps the deprecated `logoUrl`/`logoSize`/`logoPosition` aliases onto
    /// `event_logo` once, at the boundary. An explicit `event_logo` wins.
    pub fn normalized(mut self) -> Self {
        if self.event_logo.is_none() {
            if let Some(url) = self.logo_url.take() {
                self.event_logo = Some(LogoSpec {
                    url,
                    size: self.logo_size.unwrap_or(DEFAULT_LOGO_SIZE),
                    position: self.logo_position.unwrap_or_default(),
                });
            }
        }
        self.logo_url = None;
        self.logo_size = None;
        self.logo_position = None;
        self
    }

    /// Linear rescale of every pixel-valued field so layouts stay
    /// proportionally identical across paper formats.
    pub fn scaled(mut self, factor: f64) -> Self {
        let scale = |v: u32| (v as f64 * factor).round() as u32;
        self.qr_size = scale(self.qr_size);
        if let Some(border) = &mut self.border {
            border.width = scale(border.width);
            border.radius = scale(border.radius);
        }
        if let Some(logo) = &mut self.event_logo {
            logo.size = scale(logo.size);
        }
        if let Some(logo) = &mut self.company_logo {
            logo.size = scale(logo.size);
        }
        self
    }
}

// Badge record
//------------------------------------------------------------------------------

/// One person/organization/destination tuple. Produced by a single API call
/// or one bulk-file row; validated the same way in both cases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BadgeRecord {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub website: Option<String>,
    pub linkedin: Option<String>,
}

impl BadgeRecord {
    /// Validation messages are user-facing and bilingual-platform French,
    /// matching the bulk ingestion summaries.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.first_name.trim().is_empty() {
            return Err("Prénom manquant".into());
        }
        if self.last_name.trim().is_empty() {
            return Err("Nom manquant".into());
        }
        if self.company.trim().is_empty() {
            return Err("Entreprise manquante".into());
        }
        if self.destination().is_none() {
            return Err("Site web ou LinkedIn manquant".into());
        }
        Ok(())
    }

    /// QR payload: the website when present, otherwise the linkedin URL.
    pub fn destination(&self) -> Option<&str> {
        fn filled(s: &Option<String>) -> Option<&str> {
            s.as_deref().map(str::trim).filter(|t| !t.is_empty())
        }
        filled(&self.website).or_else(|| filled(&self.linkedin))
    }

    pub fn require_destination(&self) -> Result<&str> {
        self.destination().ok_or(Error::MissingDestination)
    }
}
