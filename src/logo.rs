use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{imageops::FilterType, DynamicImage, Rgba, RgbaImage};

use crate::error::{Error, Result};

// Logo source
//------------------------------------------------------------------------------

/// Upper bound on a single logo fetch. A slow host degrades the output
/// (logo omitted), never stalls the render.
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolves a logo reference by URI scheme: `data:` URIs are decoded inline,
/// `http(s)` URLs are fetched, anything else is treated as a relative path
/// under `asset_root`. All failures surface as [`Error::Logo`]; callers log
/// and omit the logo rather than failing the render.
pub fn load_logo(reference: &str, asset_root: Option<&Path>) -> Result<DynamicImage> {
    let bytes = if let Some(rest) = reference.strip_prefix("data:") {
        let b64 = rest
            .split_once(',')
            .map(|(_, data)| data)
            .ok_or_else(|| Error::Logo("malformed data uri".into()))?;
        STANDARD.decode(b64).map_err(|e| Error::Logo(format!("data uri: {e}")))?
    } else if reference.starts_with("http://") || reference.starts_with("https://") {
        fetch(reference)?
    } else {
        let root = asset_root.map(PathBuf::from).unwrap_or_else(|| PathBuf::from("public"));
        std::fs::read(root.join(reference.trim_start_matches('/')))
            .map_err(|e| Error::Logo(format!("{reference}: {e}")))?
    };
    image::load_from_memory(&bytes).map_err(|_| Error::Logo(format!("undecodable: {reference}")))
}

fn fetch(url: &str) -> Result<Vec<u8>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| Error::Logo(e.to_string()))?;
    let resp = client.get(url).send().map_err(|e| Error::Logo(e.to_string()))?;
    if !resp.status().is_success() {
        return Err(Error::Logo(format!("http {}", resp.status())));
    }
    let bytes = resp.bytes().map_err(|e| Error::Logo(e.to_string()))?;
    Ok(bytes.to_vec())
}

/// Resizes a logo to fit within a `box_w` x `box_h` box, preserving aspect
/// ratio, centered on a transparent canvas of exactly that box size.
pub fn normalize(logo: &DynamicImage, box_w: u32, box_h: u32) -> RgbaImage {
    let fitted = logo.resize(box_w.max(1), box_h.max(1), FilterType::Lanczos3).to_rgba8();
    let mut canvas = RgbaImage::from_pixel(box_w.max(1), box_h.max(1), Rgba([0, 0, 0, 0]));
    let ox = (canvas.width() - fitted.width()) / 2;
    let oy = (canvas.height() - fitted.height()) / 2;
    image::imageops::overlay(&mut canvas, &fitted, ox as i64, oy as i64);
    canvas
}

/// Re-encodes a logo as a PNG `data:` URI for embedding in vector documents.
pub fn to_data_uri(img: &RgbaImage) -> Result<String> {
    use image::codecs::png::PngEncoder;
    use image::ImageEncoder;

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(img.as_raw(), img.width(), img.height(), image::ExtendedColorType::Rgba8)
        .map_err(|_| Error::ImageEncode)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&png)))
}
