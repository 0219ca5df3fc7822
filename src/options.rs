use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{
    BorderPattern, EyeShape, GradientDirection, ModuleShape, OutputFormat, Rgb, BLACK, WHITE,
};

// QR render request
//------------------------------------------------------------------------------

/// Everything needed to draw one symbol. Immutable once built; renderers take
/// it by reference and never mutate shared state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrOptions {
    pub payload: String,
    pub pixel_size: u32,
    pub foreground: Rgb,
    pub background: Rgb,
    /// Quiet-zone width in modules.
    pub margin: u32,
    pub module_shape: ModuleShape,
    pub eye_shape: EyeShape,
    pub gradient: Option<Gradient>,
    pub logo: Option<LogoOptions>,
    pub border: Option<BorderOptions>,
    /// Rounded outer corners, applied as a raster mask. Unlike `border`,
    /// this alone does not force the vector construction path.
    pub corner_radius: u32,
    /// Named style bundle applied underneath explicit fields.
    pub template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradient {
    /// Exactly two stops, start and end.
    pub colors: [Rgb; 2],
    pub direction: GradientDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoOptions {
    /// URL, `data:` URI, or path under the caller's asset root.
    pub reference: String,
    /// Logo width as a percentage of the symbol width.
    pub size_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderOptions {
    pub width: u32,
    pub color: Rgb,
    #[serde(default)]
    pub radius: u32,
    #[serde(default)]
    pub pattern: BorderPattern,
    #[serde(default)]
    pub secondary_color: Option<Rgb>,
}

pub const DEFAULT_PIXEL_SIZE: u32 = 400;
pub const DEFAULT_MARGIN: u32 = 2;
pub const DEFAULT_LOGO_PERCENT: u32 = 20;

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            payload: String::new(),
            pixel_size: DEFAULT_PIXEL_SIZE,
            foreground: BLACK,
            background: WHITE,
            margin: DEFAULT_MARGIN,
            module_shape: ModuleShape::default(),
            eye_shape: EyeShape::default(),
            gradient: None,
            logo: None,
            border: None,
            corner_radius: 0,
            template: None,
        }
    }
}

impl QrOptions {
    pub fn new(payload: impl Into<String>) -> Self {
        Self { payload: payload.into(), ..Self::default() }
    }

    /// Resolves the named template (if any) and merges it underneath the
    /// explicit request fields. Request-level fields win; returns an error for
    /// a template name with no registered bundle.
    pub fn resolve(mut self) -> Result<Self> {
        if self.payload.trim().is_empty() {
            return Err(Error::EmptyPayload);
        }
        let Some(name) = self.template.take() else {
            return Ok(self);
        };
        let template = QrTemplate::builtin(&name)
            .ok_or_else(|| Error::UnknownTemplate(name.clone()))?;
        if self.module_shape == ModuleShape::default() {
            self.module_shape = template.module_shape;
        }
        if self.eye_shape == EyeShape::default() {
            self.eye_shape = template.eye_shape;
        }
        if self.gradient.is_none() {
            self.gradient = template.gradient;
        }
        if self.border.is_none() {
            self.border = template.border;
        }
        self.template = Some(name);
        Ok(self)
    }

    /// Whether the request needs the vector construction path. Only that path
    /// supports non-square geometry and gradient fills; the fast raster path
    /// is reserved for the plain-square default.
    pub fn needs_vector_path(&self) -> bool {
        self.module_shape != ModuleShape::Square
            || self.eye_shape != EyeShape::Square
            || self.gradient.is_some()
            || self.border.is_some()
    }
}

// Templates
//------------------------------------------------------------------------------

/// A pre-set bundle of shape/gradient/border fields. Bundles never carry a
/// payload or size; those always come from the request.
#[derive(Debug, Clone)]
pub struct QrTemplate {
    pub module_shape: ModuleShape,
    pub eye_shape: EyeShape,
    pub gradient: Option<Gradient>,
    pub border: Option<BorderOptions>,
}

impl QrTemplate {
    pub fn builtin(name: &str) -> Option<Self> {
        let t = match name {
            "classic" => Self {
                module_shape: ModuleShape::Square,
                eye_shape: EyeShape::Square,
                gradient: None,
                border: None,
            },
            "dots" => Self {
                module_shape: ModuleShape::Circle,
                eye_shape: EyeShape::Circle,
                gradient: None,
                border: None,
            },
            "ocean" => Self {
                module_shape: ModuleShape::Circle,
                eye_shape: EyeShape::Leaf,
                gradient: Some(Gradient {
                    colors: [Rgb(0x0e, 0x4d, 0x92), Rgb(0x36, 0xb3, 0xd1)],
                    direction: GradientDirection::Diagonal,
                }),
                border: None,
            },
            "sunset" => Self {
                module_shape: ModuleShape::Diamond,
                eye_shape: EyeShape::Leaf,
                gradient: Some(Gradient {
                    colors: [Rgb(0xff, 0x5e, 0x3a), Rgb(0xff, 0xc3, 0x00)],
                    direction: GradientDirection::Vertical,
                }),
                border: Some(BorderOptions {
                    width: 12,
                    color: Rgb(0xff, 0x5e, 0x3a),
                    radius: 16,
                    pattern: BorderPattern::Solid,
                    secondary_color: None,
                }),
            },
            _ => return None,
        };
        Some(t)
    }
}

// Plan capability gate
//------------------------------------------------------------------------------

/// Pass/fail flags supplied by the caller's billing layer. The core knows
/// nothing about plans or prices; it only refuses features the caller has
/// already marked as gated off.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Capabilities {
    pub gradient: bool,
    pub custom_shapes: bool,
    pub vector_export: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self { gradient: true, custom_shapes: true, vector_export: true }
    }
}

impl Capabilities {
    pub fn permit(&self, opts: &QrOptions, format: OutputFormat) -> Result<()> {
        if !self.gradient && opts.gradient.is_some() {
            return Err(Error::FeatureNotPermitted("gradient"));
        }
        if !self.custom_shapes
            && (opts.module_shape != ModuleShape::Square || opts.eye_shape != EyeShape::Square)
        {
            return Err(Error::FeatureNotPermitted("custom shapes"));
        }
        if !self.vector_export
            && matches!(format, OutputFormat::Svg | OutputFormat::Pdf)
        {
            return Err(Error::FeatureNotPermitted("vector export"));
        }
        Ok(())
    }
}
