use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum Error {
    /// QR payload was empty or missing.
    #[error("empty payload")]
    EmptyPayload,

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    #[error("failed to encode QR matrix")]
    QrEncode,

    #[error("svg render failed: {0}")]
    SvgRender(String),

    #[error("failed to encode output image")]
    ImageEncode,

    /// Badge record carries neither a website nor a linkedin URL.
    #[error("record needs a website or linkedin url")]
    MissingDestination,

    #[error("logo unavailable: {0}")]
    Logo(String),

    #[error("unsupported file format: {0}")]
    UnsupportedFile(String),

    /// Bulk upload could not be read as a table at all.
    #[error("malformed table: {0}")]
    Table(String),

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The caller's plan gate rejected a requested feature.
    #[error("feature not permitted: {0}")]
    FeatureNotPermitted(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
