use crate::options::BorderOptions;
use crate::types::{BorderPattern, GradientDirection, Rgb};

// Border generator
//------------------------------------------------------------------------------

/// Channel offset used to derive a gradient/stripe partner color when the
/// caller supplies no secondary.
const AUTO_LIGHTEN: i16 = 60;

fn n(v: f64) -> String {
    format!("{v:.2}")
}

/// `<linearGradient>` definition with two stops. Shared between the symbol
/// fill and the gradient border pattern.
pub fn gradient_def(id: &str, colors: [Rgb; 2], direction: GradientDirection) -> String {
    let (x2, y2) = match direction {
        GradientDirection::Horizontal => ("100%", "0%"),
        GradientDirection::Vertical => ("0%", "100%"),
        GradientDirection::Diagonal => ("100%", "100%"),
    };
    format!(
        "<linearGradient id=\"{id}\" x1=\"0%\" y1=\"0%\" x2=\"{x2}\" y2=\"{y2}\">\
         <stop offset=\"0%\" stop-color=\"{}\"/>\
         <stop offset=\"100%\" stop-color=\"{}\"/>\
         </linearGradient>",
        colors[0].to_hex(),
        colors[1].to_hex()
    )
}

fn rounded_rect(inset: f64, w: f64, h: f64, rx: f64, stroke: &str, width: f64, extra: &str) -> String {
    format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{}\" fill=\"none\" \
         stroke=\"{}\" stroke-width=\"{}\"{extra}/>",
        n(inset),
        n(inset),
        n(w - 2.0 * inset),
        n(h - 2.0 * inset),
        n(rx),
        stroke,
        n(width)
    )
}

/// Vector fragment drawing a rounded-rectangle border over a `w` x `h`
/// canvas. Pattern/gradient definitions are emitted inline ahead of the
/// strokes that reference them.
pub fn border_fragment(w: f64, h: f64, opts: &BorderOptions) -> String {
    let bw = opts.width as f64;
    let rx = opts.radius as f64;
    let color = opts.color.to_hex();
    let inset = bw / 2.0;
    match opts.pattern {
        BorderPattern::Solid => rounded_rect(inset, w, h, rx, &color, bw, ""),
        BorderPattern::Dashed => {
            let extra = format!(" stroke-dasharray=\"{} {}\"", n(bw * 3.0), n(bw * 1.5));
            rounded_rect(inset, w, h, rx, &color, bw, &extra)
        }
        BorderPattern::Dotted => {
            let extra =
                format!(" stroke-dasharray=\"0 {}\" stroke-linecap=\"round\"", n(bw * 2.0));
            rounded_rect(inset, w, h, rx, &color, bw, &extra)
        }
        BorderPattern::Double => {
            // Two concentric strokes at 35% of the requested width, the
            // second offset inward by 70% of it.
            let stroke_w = bw * 0.35;
            let outer_inset = stroke_w / 2.0;
            let inner_inset = outer_inset + bw * 0.7;
            format!(
                "{}{}",
                rounded_rect(outer_inset, w, h, rx, &color, stroke_w, ""),
                rounded_rect(inner_inset, w, h, (rx - bw * 0.7).max(0.0), &color, stroke_w, "")
            )
        }
        BorderPattern::Gradient => {
            let partner = opts.secondary_color.unwrap_or_else(|| opts.color.adjust(AUTO_LIGHTEN));
            let def = gradient_def(
                "borderGradient",
                [opts.color, partner],
                GradientDirection::Diagonal,
            );
            format!(
                "<defs>{def}</defs>{}",
                rounded_rect(inset, w, h, rx, "url(#borderGradient)", bw, "")
            )
        }
        BorderPattern::Striped => {
            let partner = opts.secondary_color.unwrap_or_else(|| opts.color.adjust(AUTO_LIGHTEN));
            let tile = (bw * 2.0).max(4.0);
            let def = format!(
                "<pattern id=\"borderStripes\" width=\"{t}\" height=\"{t}\" \
                 patternUnits=\"userSpaceOnUse\" patternTransform=\"rotate(45)\">\
                 <rect width=\"{t}\" height=\"{t}\" fill=\"{}\"/>\
                 <rect width=\"{half}\" height=\"{t}\" fill=\"{}\"/>\
                 </pattern>",
                opts.color.to_hex(),
                partner.to_hex(),
                t = n(tile),
                half = n(tile / 2.0)
            );
            format!(
                "<defs>{def}</defs>{}",
                rounded_rect(inset, w, h, rx, "url(#borderStripes)", bw, "")
            )
        }
    }
}
