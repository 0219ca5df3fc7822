use std::path::Path;

use image::{imageops::FilterType, DynamicImage, Rgba, RgbaImage};
use resvg::{tiny_skia, usvg};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::logo;
use crate::matrix::ModuleMatrix;
use crate::options::QrOptions;
use crate::vector::render_vector;

// Raster renderer
//------------------------------------------------------------------------------

/// Fraction of the logo side added as white plate padding on each side in
/// the raster path. Deliberately not the same constant as
/// `vector::VECTOR_LOGO_PAD`; the two paths are compared independently.
pub const RASTER_LOGO_PAD: f64 = 0.12;

/// Renders one symbol to a bitmap of exactly `pixel_size` x `pixel_size`.
///
/// Requests with custom geometry, gradients or borders go through the vector
/// document and are rasterized; the plain-square default takes a direct
/// module-fill fast path, optionally post-processed with rounded corners and
/// a centered logo plate.
pub fn render_raster(opts: &QrOptions, asset_root: Option<&Path>) -> Result<RgbaImage> {
    if opts.needs_vector_path() {
        let svg = render_vector(opts, asset_root)?;
        return rasterize_svg(&svg, opts.pixel_size, opts.pixel_size);
    }

    let matrix = ModuleMatrix::encode(&opts.payload)?;
    let mut img = fill_modules(&matrix, opts);
    debug!(size = opts.pixel_size, "raster fast path");

    if opts.corner_radius > 0 {
        round_corners(&mut img, opts.corner_radius.min(opts.pixel_size / 2));
    }
    if let Some(logo_opts) = &opts.logo {
        match logo::load_logo(&logo_opts.reference, asset_root) {
            Ok(l) => overlay_logo(&mut img, &l, logo_opts.size_percent),
            Err(e) => warn!(reference = %logo_opts.reference, error = %e, "omitting logo"),
        }
    }
    Ok(img)
}

/// Integer module fill at the largest whole pixels-per-module, then an exact
/// resize when the request is not a clean multiple.
fn fill_modules(matrix: &ModuleMatrix, opts: &QrOptions) -> RgbaImage {
    let size = opts.pixel_size.max(1);
    let modules = matrix.width() as u32;
    let total = modules + 2 * opts.margin;
    let ppm = (size / total).max(1);
    let actual = total * ppm;

    let dark = Rgba([opts.foreground.0, opts.foreground.1, opts.foreground.2, 255]);
    let light = Rgba([opts.background.0, opts.background.1, opts.background.2, 255]);
    let mut img = RgbaImage::from_pixel(actual, actual, light);

    for y in 0..modules {
        for x in 0..modules {
            if !matrix.is_dark(x as usize, y as usize) {
                continue;
            }
            let px0 = (x + opts.margin) * ppm;
            let py0 = (y + opts.margin) * ppm;
            for py in py0..(py0 + ppm) {
                for px in px0..(px0 + ppm) {
                    img.put_pixel(px, py, dark);
                }
            }
        }
    }

    if actual != size {
        DynamicImage::ImageRgba8(img).resize_exact(size, size, FilterType::Lanczos3).to_rgba8()
    } else {
        img
    }
}

/// Rasterizes a vector document to exactly `w` x `h`.
pub fn rasterize_svg(svg: &str, w: u32, h: u32) -> Result<RgbaImage> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| Error::SvgRender(e.to_string()))?;

    let mut pixmap = tiny_skia::Pixmap::new(w.max(1), h.max(1))
        .ok_or_else(|| Error::SvgRender("pixmap allocation failed".into()))?;
    let sx = w as f32 / tree.size().width();
    let sy = h as f32 / tree.size().height();
    resvg::render(&tree, tiny_skia::Transform::from_scale(sx, sy), &mut pixmap.as_mut());

    let mut img = RgbaImage::new(w.max(1), h.max(1));
    for (i, p) in pixmap.pixels().iter().enumerate() {
        let c = p.demultiply();
        let x = i as u32 % img.width();
        let y = i as u32 / img.width();
        img.put_pixel(x, y, Rgba([c.red(), c.green(), c.blue(), c.alpha()]));
    }
    Ok(img)
}

/// Clears pixels outside a quarter-circle at each corner.
fn round_corners(img: &mut RgbaImage, radius: u32) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    let r = radius as i32;
    for y in 0..h {
        for x in 0..w {
            let dx = x.min(w - 1 - x);
            let dy = y.min(h - 1 - y);
            if dx < r && dy < r {
                let cx = dx - (r - 1);
                let cy = dy - (r - 1);
                if cx * cx + cy * cy > r * r {
                    img.get_pixel_mut(x as u32, y as u32).0[3] = 0;
                }
            }
        }
    }
}

/// Centered logo over a white rounded plate. Plate side is the logo side
/// plus `floor(logo * 0.12)` of padding on each side (logo + 24%).
fn overlay_logo(img: &mut RgbaImage, raw_logo: &DynamicImage, size_percent: u32) {
    let canvas = img.width().min(img.height());
    let logo_side = (canvas as f64 * size_percent.min(100) as f64 / 100.0).floor() as u32;
    if logo_side == 0 {
        return;
    }
    let pad = (logo_side as f64 * RASTER_LOGO_PAD).floor() as u32;
    // Large logos leave no room for the padding ring; the plate caps at the
    // canvas instead of underflowing the centering math.
    let plate = (logo_side + 2 * pad).min(canvas);

    let px0 = (img.width() - plate) / 2;
    let py0 = (img.height() - plate) / 2;
    fill_rounded_rect(img, px0, py0, plate, plate, pad, Rgba([255, 255, 255, 255]));

    let normalized = logo::normalize(raw_logo, logo_side, logo_side);
    let lx0 = (img.width() - logo_side) / 2;
    let ly0 = (img.height() - logo_side) / 2;
    blend(img, &normalized, lx0, ly0);
}

fn fill_rounded_rect(img: &mut RgbaImage, x0: u32, y0: u32, w: u32, h: u32, r: u32, color: Rgba<u8>) {
    let (wi, hi, ri) = (w as i32, h as i32, r as i32);
    for yy in 0..hi {
        for xx in 0..wi {
            let dx = xx.min(wi - 1 - xx);
            let dy = yy.min(hi - 1 - yy);
            let inside = if dx < ri && dy < ri {
                let cx = dx - (ri - 1);
                let cy = dy - (ri - 1);
                cx * cx + cy * cy <= ri * ri
            } else {
                true
            };
            if inside {
                let px = x0 + xx as u32;
                let py = y0 + yy as u32;
                if px < img.width() && py < img.height() {
                    img.put_pixel(px, py, color);
                }
            }
        }
    }
}

/// Source-over alpha blend of `over` onto `base` at `(x, y)`.
pub fn blend(base: &mut RgbaImage, over: &RgbaImage, x: u32, y: u32) {
    for oy in 0..over.height() {
        for ox in 0..over.width() {
            let p = over.get_pixel(ox, oy);
            let a = p.0[3] as f32 / 255.0;
            if a <= 0.0 {
                continue;
            }
            let bx = x + ox;
            let by = y + oy;
            if bx >= base.width() || by >= base.height() {
                continue;
            }
            let dst = base.get_pixel_mut(bx, by);
            let inv = 1.0 - a;
            dst.0[0] = (p.0[0] as f32 * a + dst.0[0] as f32 * inv) as u8;
            dst.0[1] = (p.0[1] as f32 * a + dst.0[1] as f32 * inv) as u8;
            dst.0[2] = (p.0[2] as f32 * a + dst.0[2] as f32 * inv) as u8;
            dst.0[3] = dst.0[3].max(p.0[3]);
        }
    }
}

#[cfg(test)]
mod raster_tests {
    use super::*;
    use crate::options::Gradient;
    use crate::types::{GradientDirection, ModuleShape, Rgb};
    use test_case::test_case;

    #[test_case(397)]
    #[test_case(400)]
    #[test_case(512)]
    fn fast_path_output_matches_requested_size(size: u32) {
        let mut opts = QrOptions::new("https://example.com");
        opts.pixel_size = size;
        let img = render_raster(&opts, None).unwrap();
        assert_eq!((img.width(), img.height()), (size, size));
    }

    #[test_case(ModuleShape::Circle)]
    #[test_case(ModuleShape::Diamond)]
    fn vector_path_output_matches_requested_size(shape: ModuleShape) {
        let mut opts = QrOptions::new("https://example.com");
        opts.pixel_size = 300;
        opts.module_shape = shape;
        let img = render_raster(&opts, None).unwrap();
        assert_eq!((img.width(), img.height()), (300, 300));
    }

    #[test]
    fn gradient_output_matches_requested_size() {
        let mut opts = QrOptions::new("https://example.com");
        opts.pixel_size = 250;
        opts.gradient = Some(Gradient {
            colors: [Rgb(0, 0, 0), Rgb(255, 0, 0)],
            direction: GradientDirection::Horizontal,
        });
        let img = render_raster(&opts, None).unwrap();
        assert_eq!((img.width(), img.height()), (250, 250));
    }

    #[test]
    fn margin_area_is_pure_background() {
        let mut opts = QrOptions::new("https://example.com");
        // Clean multiple so the quiet zone is untouched by resampling.
        let matrix = ModuleMatrix::encode(&opts.payload).unwrap();
        let total = matrix.width() as u32 + 2 * opts.margin;
        opts.pixel_size = total * 8;
        let img = render_raster(&opts, None).unwrap();
        let ppm = 8;
        for i in 0..img.width() {
            // One-module strip along the top and left edges.
            assert_eq!(*img.get_pixel(i, ppm / 2), Rgba([255, 255, 255, 255]));
            assert_eq!(*img.get_pixel(ppm / 2, i), Rgba([255, 255, 255, 255]));
        }
    }

    #[test]
    fn rounded_corners_clear_the_extremes() {
        let mut opts = QrOptions::new("https://example.com");
        opts.pixel_size = 200;
        opts.corner_radius = 30;
        let img = render_raster(&opts, None).unwrap();
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(199, 0)[3], 0);
        assert_eq!(img.get_pixel(0, 199)[3], 0);
        assert_eq!(img.get_pixel(199, 199)[3], 0);
        assert_eq!(img.get_pixel(100, 100)[3], 255);
    }

    #[test_case(90)]
    #[test_case(100)]
    fn oversized_logos_cap_the_plate_at_the_canvas(size_percent: u32) {
        use image::Rgba;
        let tiny = RgbaImage::from_pixel(8, 8, Rgba([0, 128, 0, 255]));
        let uri = crate::logo::to_data_uri(&tiny).unwrap();

        let mut opts = QrOptions::new("https://example.com");
        opts.pixel_size = 400;
        opts.logo = Some(crate::options::LogoOptions { reference: uri, size_percent });
        let img = render_raster(&opts, None).unwrap();
        assert_eq!((img.width(), img.height()), (400, 400));
        // Logo body still lands dead-center.
        assert_eq!(*img.get_pixel(200, 200), Rgba([0, 128, 0, 255]));
    }

    #[test]
    fn logo_plate_is_white_at_center() {
        use image::Rgba;
        let tiny = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 255]));
        let uri = crate::logo::to_data_uri(&tiny).unwrap();

        let mut opts = QrOptions::new("https://example.com");
        opts.pixel_size = 400;
        opts.logo = Some(crate::options::LogoOptions { reference: uri, size_percent: 20 });
        let img = render_raster(&opts, None).unwrap();
        // Plate padding ring around the logo: logo 80px, pad 9px.
        let edge = 200 - 40 - 5;
        assert_eq!(*img.get_pixel(edge, 200), Rgba([255, 255, 255, 255]));
        // Logo body is the red fill.
        assert_eq!(*img.get_pixel(200, 200), Rgba([255, 0, 0, 255]));
    }
}
