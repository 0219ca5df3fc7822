use std::path::Path;

use image::{Rgba, RgbaImage};
use tracing::{debug, warn};

use super::layout::{
    resolve_dimensions, resolve_logo_rect, resolve_qr_rect, resolve_text_anchor, scale_factor,
    Rect,
};
use super::{BadgeRecord, BadgeStyle, LogoAnchor, LogoSpec};
use crate::border::border_fragment;
use crate::error::Result;
use crate::logo;
use crate::options::QrOptions;
use crate::raster::{blend, rasterize_svg, render_raster};

// Badge compositor
//------------------------------------------------------------------------------

/// Renders one badge: background, logos, text-and-border overlay, QR symbol.
///
/// The record's destination URL is the one hard precondition; everything
/// else degrades gracefully (an unavailable logo is omitted, never fatal).
pub fn composite(
    record: &BadgeRecord,
    style: &BadgeStyle,
    asset_root: Option<&Path>,
) -> Result<RgbaImage> {
    let destination = record.require_destination()?;

    let style = style.clone().normalized();
    let (w, h) = resolve_dimensions(&style);
    let scale = scale_factor(w, h);
    let style = style.scaled(scale);
    let (wf, hf) = (w as f64, h as f64);
    debug!(w, h, scale, "compositing badge");

    let qr_rect = resolve_qr_rect(&style, wf, hf, scale);

    // Back of the stack: solid background.
    let bg = style.background;
    let mut canvas = RgbaImage::from_pixel(w, h, Rgba([bg.0, bg.1, bg.2, 255]));

    // Logos next, event logo placed first.
    let mut placed: Option<(LogoAnchor, Rect)> = None;
    for spec in [style.event_logo.as_ref(), style.company_logo.as_ref()].into_iter().flatten() {
        let rect = resolve_logo_rect(
            &style,
            spec.position,
            spec.size as f64,
            wf,
            hf,
            &qr_rect,
            placed.as_ref().map(|(a, r)| (*a, r)),
        );
        if let Some(img) = fetch_logo(spec, asset_root) {
            blend(&mut canvas, &img, rect.left.max(0.0) as u32, rect.top.max(0.0) as u32);
        }
        placed = Some((spec.position, rect));
    }

    // Text and border render as one vector overlay at full badge size.
    let max_logo = [style.event_logo.as_ref(), style.company_logo.as_ref()]
        .into_iter()
        .flatten()
        .map(|l| l.size as f64)
        .fold(0.0, f64::max);
    let overlay_svg = text_overlay(record, &style, wf, hf, scale, &qr_rect, max_logo);
    let overlay = rasterize_svg(&overlay_svg, w, h)?;
    blend(&mut canvas, &overlay, 0, 0);

    // QR symbol on top; colors follow the badge palette.
    let qr_opts = QrOptions {
        pixel_size: qr_rect.width.round() as u32,
        foreground: style.text_color,
        background: style.background,
        ..QrOptions::new(destination)
    };
    let qr = render_raster(&qr_opts, asset_root)?;
    blend(&mut canvas, &qr, qr_rect.left.max(0.0) as u32, qr_rect.top.max(0.0) as u32);

    Ok(canvas)
}

fn fetch_logo(spec: &LogoSpec, asset_root: Option<&Path>) -> Option<RgbaImage> {
    match logo::load_logo(&spec.url, asset_root) {
        Ok(img) => Some(logo::normalize(&img, spec.size, spec.size)),
        Err(e) => {
            warn!(url = %spec.url, error = %e, "omitting badge logo");
            None
        }
    }
}

fn text_overlay(
    record: &BadgeRecord,
    style: &BadgeStyle,
    w: f64,
    h: f64,
    scale: f64,
    qr: &Rect,
    max_logo: f64,
) -> String {
    let anchor = resolve_text_anchor(style, w, h, scale, qr, max_logo);
    let family = style.font.family();
    let color = style.text_color.to_hex();

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w:.0}\" height=\"{h:.0}\" \
         viewBox=\"0 0 {w:.2} {h:.2}\">"
    );

    let name = format!("{} {}", record.first_name.trim(), record.last_name.trim());
    let mut baseline = anchor.top + anchor.name_px;
    svg.push_str(&text_element(&name, anchor.x, baseline, anchor.name_px, family, &color, true));
    baseline += anchor.line_gap + anchor.company_px;
    svg.push_str(&text_element(
        record.company.trim(),
        anchor.x,
        baseline,
        anchor.company_px,
        family,
        &color,
        false,
    ));
    if let Some(event) = style.event_name.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        baseline += anchor.line_gap + anchor.event_px;
        svg.push_str(&text_element(event, anchor.x, baseline, anchor.event_px, family, &color, false));
    }

    if let Some(border) = &style.border {
        svg.push_str(&border_fragment(w, h, border));
    }

    svg.push_str("</svg>");
    svg
}

fn text_element(
    text: &str,
    x: f64,
    baseline: f64,
    px: f64,
    family: &str,
    color: &str,
    bold: bool,
) -> String {
    let weight = if bold { " font-weight=\"bold\"" } else { "" };
    format!(
        "<text x=\"{x:.2}\" y=\"{baseline:.2}\" text-anchor=\"middle\" font-family=\"{family}\" \
         font-size=\"{px:.2}\" fill=\"{color}\"{weight}>{}</text>",
        escape_xml(text)
    )
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
