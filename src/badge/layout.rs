use super::{BadgeStyle, ContentLayout, LogoAnchor, Orientation, QrSide, REFERENCE_SIZE};

// Badge layout engine
//------------------------------------------------------------------------------
//
// Pure functions of an already-scaled style. Nothing here touches pixels;
// the compositor consumes the resolved rectangles.

/// Padding around the QR rectangle that logos must clear.
pub const QR_CLEARANCE: f64 = 10.0;
/// Logo anchor margin, as a fraction of badge width.
const LOGO_MARGIN_FRAC: f64 = 0.03;
/// QR edge margin in side-by-side layout, as a fraction of badge width.
const QR_MARGIN_FRAC: f64 = 0.04;
/// Bottom margin under a centered QR, in reference units.
const CENTERED_QR_BOTTOM: f64 = 40.0;

const NAME_FONT: f64 = 48.0;
const COMPANY_FONT: f64 = 36.0;
const EVENT_FONT: f64 = 28.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Whether the rectangles intersect in both axes once `self` is grown by
    /// `pad` on every side.
    pub fn intersects(&self, other: &Rect, pad: f64) -> bool {
        self.left - pad < other.right()
            && self.right() + pad > other.left
            && self.top - pad < other.bottom()
            && self.bottom() + pad > other.top
    }
}

/// Physical pixel dimensions for the configured format and orientation.
pub fn resolve_dimensions(style: &BadgeStyle) -> (u32, u32) {
    let (long, short) = style.format.dimensions();
    match style.orientation {
        Orientation::Landscape => (long, short),
        Orientation::Portrait => (short, long),
    }
}

/// Scale from reference units to this badge's pixels.
pub fn scale_factor(width: u32, height: u32) -> f64 {
    width.max(height) as f64 / REFERENCE_SIZE as f64
}

fn border_width(style: &BadgeStyle) -> f64 {
    style.border.as_ref().map(|b| b.width as f64).unwrap_or(0.0)
}

/// QR placement. Centered layout parks the symbol bottom-center; side-by-side
/// centers it vertically against the chosen edge, inside the border.
pub fn resolve_qr_rect(style: &BadgeStyle, w: f64, h: f64, scale: f64) -> Rect {
    let size = style.qr_size as f64;
    let bw = border_width(style);
    match style.content_layout {
        ContentLayout::Centered => Rect {
            left: (w - size) / 2.0,
            top: h - size - CENTERED_QR_BOTTOM * scale - bw,
            width: size,
            height: size,
        },
        ContentLayout::SideBySide => {
            let qr_margin = w * QR_MARGIN_FRAC;
            let left = match style.qr_side {
                QrSide::Left => qr_margin + bw,
                QrSide::Right => w - size - qr_margin - bw,
            };
            Rect { left, top: (h - size) / 2.0, width: size, height: size }
        }
    }
}

fn anchored(anchor: LogoAnchor, size: f64, w: f64, h: f64, inset: f64) -> Rect {
    let left = match anchor {
        LogoAnchor::TopLeft | LogoAnchor::BottomLeft => inset,
        LogoAnchor::TopRight | LogoAnchor::BottomRight => w - size - inset,
        LogoAnchor::TopCenter | LogoAnchor::BottomCenter => (w - size) / 2.0,
    };
    let top = if anchor.is_top() { inset } else { h - size - inset };
    Rect { left, top, width: size, height: size }
}

/// Resolves one logo's rectangle: naive anchor placement, then two
/// avoidance passes, first against the QR symbol and then against an
/// earlier-placed logo sharing the same anchor. A best-effort heuristic,
/// not a constraint solver; three-way collisions stay unresolved.
pub fn resolve_logo_rect(
    style: &BadgeStyle,
    anchor: LogoAnchor,
    size: f64,
    w: f64,
    h: f64,
    qr: &Rect,
    earlier: Option<(LogoAnchor, &Rect)>,
) -> Rect {
    let inset = w * LOGO_MARGIN_FRAC + border_width(style);
    let mut rect = anchored(anchor, size, w, h, inset);

    if rect.intersects(qr, QR_CLEARANCE) {
        // Shift horizontally away from the QR edge the logo was anchored
        // near; the side with free space is opposite the QR's half.
        rect.left = if qr.center_x() <= w / 2.0 {
            qr.right() + QR_CLEARANCE
        } else {
            qr.left - size - QR_CLEARANCE
        };
    }

    if let Some((other_anchor, other)) = earlier {
        if other_anchor == anchor {
            let margin = w * LOGO_MARGIN_FRAC;
            // Stack vertically, moving away from the earlier logo.
            rect.top = if anchor.is_top() {
                other.bottom() + margin
            } else {
                other.top - size - margin
            };
        }
    }

    rect
}

/// Text block anchor plus per-line font sizes, all linear in the badge
/// scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextAnchor {
    /// Horizontal center of the text block.
    pub x: f64,
    /// Top of the first line's em box.
    pub top: f64,
    pub name_px: f64,
    pub company_px: f64,
    pub event_px: f64,
    pub line_gap: f64,
}

pub fn resolve_text_anchor(
    style: &BadgeStyle,
    w: f64,
    h: f64,
    scale: f64,
    qr: &Rect,
    max_logo: f64,
) -> TextAnchor {
    let name_px = NAME_FONT * scale;
    let company_px = COMPANY_FONT * scale;
    let event_px = EVENT_FONT * scale;
    let line_gap = 16.0 * scale;

    // Vertical space reserved by the taller logo, when any logo exists.
    let logo_space = if max_logo > 0.0 { max_logo + 40.0 * scale } else { 0.0 };
    let block_h = name_px + line_gap + company_px
        + if style.event_name.is_some() { line_gap + event_px } else { 0.0 };

    let (x, top) = match style.content_layout {
        ContentLayout::Centered => {
            // Block floats between the reserved logo band and the QR.
            let span_top = logo_space;
            let span_bottom = qr.top;
            let top = span_top + ((span_bottom - span_top) - block_h).max(0.0) / 2.0;
            (w / 2.0, top)
        }
        ContentLayout::SideBySide => {
            let x = match style.qr_side {
                QrSide::Left => (qr.right() + w) / 2.0,
                QrSide::Right => qr.left / 2.0,
            };
            let top = ((h - block_h) / 2.0).max(logo_space + line_gap);
            (x, top)
        }
    };

    TextAnchor { x, top, name_px, company_px, event_px, line_gap }
}
