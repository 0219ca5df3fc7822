use std::path::Path;

use image::{ImageEncoder, RgbImage, RgbaImage};

use crate::error::{Error, Result};
use crate::options::QrOptions;
use crate::pdf;
use crate::raster::render_raster;
use crate::types::{OutputFormat, Rgb};
use crate::vector::render_vector;

// Output encoding
//------------------------------------------------------------------------------

pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encoded render output plus the MIME type the HTTP layer should serve.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

/// Renders one symbol in the requested output format. `quality` applies to
/// JPEG only (1-100).
pub fn render_in_format(
    opts: &QrOptions,
    format: OutputFormat,
    quality: Option<u8>,
    asset_root: Option<&Path>,
) -> Result<Rendered> {
    let opts = opts.clone().resolve()?;
    let bytes = match format {
        OutputFormat::Svg => render_vector(&opts, asset_root)?.into_bytes(),
        OutputFormat::Pdf => {
            let svg = render_vector(&opts, asset_root)?;
            let border = opts.border.as_ref().map(|b| b.width * 2).unwrap_or(0);
            let side = opts.pixel_size + border;
            pdf::wrap_svg(&svg, side, side)
        }
        OutputFormat::Png => encode_png(&render_raster(&opts, asset_root)?)?,
        OutputFormat::Jpeg => {
            let img = render_raster(&opts, asset_root)?;
            let flat = flatten(&img, opts.background);
            encode_jpeg(&flat, quality.unwrap_or(DEFAULT_JPEG_QUALITY).clamp(1, 100))?
        }
    };
    Ok(Rendered { bytes, mime_type: format.mime_type() })
}

pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    use image::codecs::png::PngEncoder;
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(img.as_raw(), img.width(), img.height(), image::ExtendedColorType::Rgba8)
        .map_err(|_| Error::ImageEncode)?;
    Ok(buf)
}

fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    use image::codecs::jpeg::JpegEncoder;
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .write_image(img.as_raw(), img.width(), img.height(), image::ExtendedColorType::Rgb8)
        .map_err(|_| Error::ImageEncode)?;
    Ok(buf)
}

/// Flattens transparency onto an opaque background ahead of JPEG
/// compression.
fn flatten(img: &RgbaImage, background: Rgb) -> RgbImage {
    let mut out = RgbImage::new(img.width(), img.height());
    let bg = background.channels();
    for (x, y, p) in img.enumerate_pixels() {
        let a = p.0[3] as f32 / 255.0;
        let inv = 1.0 - a;
        let px = out.get_pixel_mut(x, y);
        for c in 0..3 {
            px.0[c] = (p.0[c] as f32 * a + bg[c] as f32 * inv) as u8;
        }
    }
    out
}
