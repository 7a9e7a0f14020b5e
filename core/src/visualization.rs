use std::path::Path;

use anyhow::{anyhow, Context, Result};
use base64::Engine;
use image::{codecs::png::PngEncoder, imageops::FilterType, ColorType, ImageEncoder};
use plotters::style::RGBColor;

/// Red-yellow-green diverging palette, low to high.
const RD_YL_GN: [(u8, u8, u8); 11] = [
    (0xa5, 0x00, 0x26),
    (0xd7, 0x30, 0x27),
    (0xf4, 0x6d, 0x43),
    (0xfd, 0xae, 0x61),
    (0xfe, 0xe0, 0x8b),
    (0xff, 0xff, 0xbf),
    (0xd9, 0xef, 0x8b),
    (0xa6, 0xd9, 0x6a),
    (0x66, 0xbd, 0x63),
    (0x1a, 0x98, 0x50),
    (0x00, 0x68, 0x37),
];

/// Parse a `#rrggbb` colour.
pub fn parse_hex_color(value: &str) -> Result<RGBColor> {
    let hex = value
        .strip_prefix('#')
        .ok_or_else(|| anyhow!("colour {} must start with '#'", value))?;
    if hex.len() != 6 || !hex.is_ascii() {
        anyhow::bail!("colour {} must have exactly six hex digits", value);
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).with_context(|| format!("invalid colour {}", value))
    };
    Ok(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Map `t` in [0, 1] onto the red-yellow-green palette.
pub fn diverging_color(t: f64) -> RGBColor {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
    let scaled = t * (RD_YL_GN.len() - 1) as f64;
    let lower = scaled.floor() as usize;
    let upper = (lower + 1).min(RD_YL_GN.len() - 1);
    let frac = scaled - lower as f64;

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (r0, g0, b0) = RD_YL_GN[lower];
    let (r1, g1, b1) = RD_YL_GN[upper];
    RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// Position of `value` between `min` and `max`, for colormap lookup.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        (value - min) / (max - min)
    } else {
        0.5
    }
}

/// Encode packed 8-bit RGB pixels as a PNG data URL.
pub fn encode_rgb_png_data_url(width: u32, height: u32, pixels: &[u8]) -> Result<String> {
    let expected_len = (width * height * 3) as usize;
    if pixels.len() != expected_len {
        anyhow::bail!(
            "pixel buffer length {} does not match RGB image size {}x{}",
            pixels.len(),
            width,
            height
        );
    }

    let mut buffer = Vec::new();
    let encoder = PngEncoder::new(&mut buffer);
    encoder
        .write_image(pixels, width, height, ColorType::Rgb8)
        .context("failed to encode RGB PNG data")?;

    let base64 = base64::engine::general_purpose::STANDARD.encode(&buffer);
    Ok(format!("data:image/png;base64,{base64}"))
}

/// Load a rendered chart, shrink it to at most `max_width` pixels wide and
/// return it as a PNG data URL for embedding in markdown.
pub fn png_thumbnail_data_url(path: &Path, max_width: u32) -> Result<String> {
    let image = image::open(path)
        .with_context(|| format!("failed to open rendered chart {}", path.display()))?;
    let image = if image.width() > max_width {
        image.resize(max_width, image.height(), FilterType::Triangle)
    } else {
        image
    };

    let rgb = image.to_rgb8();
    encode_rgb_png_data_url(rgb.width(), rgb.height(), rgb.as_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_color("#ff7f7f").unwrap(), RGBColor(255, 127, 127));
        assert_eq!(parse_hex_color("#4A90D9").unwrap(), RGBColor(74, 144, 217));
        assert!(parse_hex_color("ff7f7f").is_err());
        assert!(parse_hex_color("#ff7f").is_err());
        assert!(parse_hex_color("#gg0000").is_err());
    }

    #[test]
    fn colormap_endpoints() {
        assert_eq!(diverging_color(0.0), RGBColor(0xa5, 0x00, 0x26));
        assert_eq!(diverging_color(0.5), RGBColor(0xff, 0xff, 0xbf));
        assert_eq!(diverging_color(1.0), RGBColor(0x00, 0x68, 0x37));
        assert_eq!(diverging_color(-3.0), diverging_color(0.0));
        assert_eq!(diverging_color(f64::NAN), diverging_color(0.5));
    }

    #[test]
    fn normalize_handles_flat_range() {
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize(3.0, 3.0, 3.0), 0.5);
    }

    #[test]
    fn rejects_mismatched_buffer() {
        assert!(encode_rgb_png_data_url(2, 2, &[0u8; 5]).is_err());
    }

    #[test]
    fn thumbnail_is_downscaled() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wide.png");
        RgbImage::from_pixel(400, 100, Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let url = png_thumbnail_data_url(&path, 100).unwrap();
        let encoded = url.strip_prefix("data:image/png;base64,").unwrap();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        let thumb = image::load_from_memory(&bytes).unwrap();
        assert_eq!((thumb.width(), thumb.height()), (100, 25));
    }
}
