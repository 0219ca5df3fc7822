use std::path::Path;

use tracing::{debug, warn};

use crate::border::{border_fragment, gradient_def};
use crate::error::Result;
use crate::geometry::{eye_center_path, eye_path, module_path};
use crate::logo;
use crate::matrix::{CellClass, ModuleMatrix};
use crate::options::QrOptions;
use crate::types::{EyeShape, ModuleShape};

// Vector document assembly
//------------------------------------------------------------------------------

/// Fraction of the logo side added as white plate padding on the vector
/// path. The raster path intentionally uses a different constant; see
/// `raster::RASTER_LOGO_PAD`.
pub const VECTOR_LOGO_PAD: f64 = 0.15;

const GRADIENT_ID: &str = "qrGradient";

/// Builds the complete SVG document for one symbol: module matrix, one path
/// per cell class, optional gradient fill, optional centered logo on a white
/// plate, optional border in an expanded canvas.
pub fn render_vector(opts: &QrOptions, asset_root: Option<&Path>) -> Result<String> {
    let matrix = ModuleMatrix::encode(&opts.payload)?;
    let total = (matrix.width() + 2 * opts.margin as usize) as f64;
    let size = opts.pixel_size as f64;
    let module = size / total;

    let border_w = opts.border.as_ref().map(|b| b.width as f64).unwrap_or(0.0);
    let canvas = size + 2.0 * border_w;
    debug!(size, canvas, modules = matrix.width(), "assembling vector document");

    // One accumulated path string per cell class.
    let mut generic = String::new();
    let mut eyes = String::new();
    let mut centers = String::new();

    let w = matrix.width();
    for y in 0..w {
        for x in 0..w {
            if matrix.classify(x, y) == CellClass::Dark {
                let px = (opts.margin as f64 + x as f64) * module + border_w;
                let py = (opts.margin as f64 + y as f64) * module + border_w;
                generic.push_str(&module_path(opts.module_shape, px, py, module));
            }
        }
    }
    for (ex, ey) in matrix.eye_origins() {
        let px = (opts.margin as f64 + ex as f64) * module + border_w;
        let py = (opts.margin as f64 + ey as f64) * module + border_w;
        eyes.push_str(&eye_path(opts.eye_shape, px, py, module));
        centers.push_str(&eye_center_path(opts.eye_shape, px, py, module));
    }

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{canvas:.0}\" height=\"{canvas:.0}\" \
         viewBox=\"0 0 {canvas:.2} {canvas:.2}\">"
    );
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        opts.background.to_hex()
    ));

    let fill = match &opts.gradient {
        Some(g) => {
            svg.push_str(&format!(
                "<defs>{}</defs>",
                gradient_def(GRADIENT_ID, g.colors, g.direction)
            ));
            format!("url(#{GRADIENT_ID})")
        }
        None => opts.foreground.to_hex(),
    };

    // Square geometry snaps to the pixel grid; curves keep antialiasing.
    let crisp = if opts.module_shape == ModuleShape::Square && opts.eye_shape == EyeShape::Square
    {
        " shape-rendering=\"crispEdges\""
    } else {
        ""
    };
    svg.push_str(&format!("<path d=\"{generic}\" fill=\"{fill}\"{crisp}/>"));
    svg.push_str(&format!("<path d=\"{eyes}\" fill=\"{fill}\" fill-rule=\"evenodd\"{crisp}/>"));
    svg.push_str(&format!("<path d=\"{centers}\" fill=\"{fill}\"{crisp}/>"));

    if let Some(logo_opts) = &opts.logo {
        match embed_logo(&logo_opts.reference, logo_opts.size_percent, canvas, asset_root) {
            Ok(fragment) => svg.push_str(&fragment),
            // Degrade: the symbol still renders without its logo.
            Err(e) => warn!(reference = %logo_opts.reference, error = %e, "omitting logo"),
        }
    }

    if let Some(border) = &opts.border {
        svg.push_str(&border_fragment(canvas, canvas, border));
    }

    svg.push_str("</svg>");
    Ok(svg)
}

/// White rounded plate plus the resized logo, dead-center. Plate side is the
/// logo side plus `floor(logo * 0.15)` of padding (115% of the logo).
fn embed_logo(
    reference: &str,
    size_percent: u32,
    canvas: f64,
    asset_root: Option<&Path>,
) -> Result<String> {
    let img = logo::load_logo(reference, asset_root)?;
    let logo_side = (canvas * size_percent.min(100) as f64 / 100.0).floor() as u32;
    let pad = (logo_side as f64 * VECTOR_LOGO_PAD).floor();
    let plate = logo_side as f64 + pad;

    let normalized = logo::normalize(&img, logo_side.max(1), logo_side.max(1));
    let href = logo::to_data_uri(&normalized)?;

    let plate_xy = (canvas - plate) / 2.0;
    let logo_xy = (canvas - logo_side as f64) / 2.0;
    Ok(format!(
        "<rect x=\"{plate_xy:.2}\" y=\"{plate_xy:.2}\" width=\"{plate:.2}\" height=\"{plate:.2}\" \
         rx=\"{pad:.2}\" fill=\"#ffffff\"/>\
         <image x=\"{logo_xy:.2}\" y=\"{logo_xy:.2}\" width=\"{logo_side}\" height=\"{logo_side}\" \
         href=\"{href}\"/>"
    ))
}
