//! # qrbadge
//!
//! A Rust library for generating styled QR codes and compositing event badges.
//! QR symbols render through two interchangeable paths: a fast raster fill for
//! plain square codes, and a vector path for gradients, shaped modules, custom
//! eyes and decorative borders.
//!
//! ## Features
//!
//! - **Styled QR Generation**: Square, circle and diamond modules, three eye
//!   shapes, two-stop gradients, decorative borders, embedded center logos
//! - **Multiple Outputs**: PNG, JPEG, standalone SVG, and single-page PDF
//! - **Badge Compositing**: Nominative event badges with configurable paper
//!   formats, layouts, fonts, logo anchors and overlap-safe placement
//! - **Bulk Ingestion**: CSV and spreadsheet uploads with bilingual headers
//!   and per-row validation reports
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use qrbadge::{render_in_format, OutputFormat, QrOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let opts = QrOptions::new("https://example.com");
//! let rendered = render_in_format(&opts, OutputFormat::Png, None, None)?;
//! assert_eq!(rendered.mime_type, "image/png");
//! # Ok(())
//! # }
//! ```
//!
//! ### Styled Output
//!
//! ```rust
//! use qrbadge::{render_in_format, Gradient, GradientDirection, ModuleShape,
//!     OutputFormat, QrOptions, Rgb};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let opts = QrOptions {
//!     module_shape: ModuleShape::Circle,
//!     gradient: Some(Gradient {
//!         colors: [Rgb::parse("#667eea")?, Rgb::parse("#764ba2")?],
//!         direction: GradientDirection::Diagonal,
//!     }),
//!     ..QrOptions::new("https://example.com")
//! };
//! let rendered = render_in_format(&opts, OutputFormat::Svg, None, None)?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Compositing a Badge
//!
//! ```rust,no_run
//! use qrbadge::badge::{composite, BadgeRecord, BadgeStyle};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let record = BadgeRecord {
//!     first_name: "Jean".into(),
//!     last_name: "Dupont".into(),
//!     company: "Acme".into(),
//!     website: Some("https://acme.com".into()),
//!     linkedin: None,
//! };
//! let img = composite(&record, &BadgeStyle::default(), None)?;
//! img.save("badge.png")?;
//! # Ok(())
//! # }
//! ```

pub mod badge;
pub mod border;
pub mod error;
pub mod export;
pub mod geometry;
pub mod ingest;
pub mod logo;
pub mod matrix;
pub mod options;
pub mod pdf;
pub mod raster;
pub mod types;
pub mod vector;

pub use error::{Error, Result};
pub use export::{render_in_format, Rendered};
pub use ingest::{parse_records, BatchResult, RowError};
pub use matrix::ModuleMatrix;
pub use options::{BorderOptions, Capabilities, Gradient, LogoOptions, QrOptions};
pub use raster::render_raster;
pub use types::{
    BorderPattern, EyeShape, GradientDirection, ModuleShape, OutputFormat, Rgb,
};
pub use vector::render_vector;
