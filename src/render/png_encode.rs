//! PNG encoding with physical resolution metadata
//!
//! The pHYs chunk stores pixels per metre, so a figure rendered at 300 dpi
//! opens at its intended physical size (18 × 5 in by default).

use super::figure::RgbFrame;
use crate::config::PngCompression;
use crate::scaling::{ChartError, Result};

const METRES_PER_INCH: f64 = 0.0254;

/// Convert dots per inch to the pixels-per-metre unit PNG uses
pub fn pixels_per_metre(dpi: f64) -> u32 {
    (dpi / METRES_PER_INCH).round() as u32
}

fn compression_level(compression: PngCompression) -> png::Compression {
    match compression {
        PngCompression::Fast => png::Compression::Fast,
        PngCompression::Default => png::Compression::Default,
        PngCompression::Best => png::Compression::Best,
    }
}

/// Encode an RGB frame as an 8-bit RGB PNG tagged with `dpi`
pub fn encode_png(frame: &RgbFrame, dpi: f64, compression: PngCompression) -> Result<Vec<u8>> {
    let expected = frame.width as usize * frame.height as usize * 3;
    if frame.pixels.len() != expected {
        return Err(ChartError::Render(format!(
            "frame buffer has {} bytes, expected {} for {}×{} RGB",
            frame.pixels.len(),
            expected,
            frame.width,
            frame.height
        )));
    }

    let ppm = pixels_per_metre(dpi);
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, frame.width, frame.height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(compression_level(compression));
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&frame.pixels)?;
        writer.finish()?;
    }

    Ok(out)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Cursor;

    /// Decode just the header: (width, height, pixel dims)
    pub(crate) fn png_header(bytes: &[u8]) -> (u32, u32, Option<png::PixelDimensions>) {
        let decoder = png::Decoder::new(Cursor::new(bytes));
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        (info.width, info.height, info.pixel_dims)
    }

    fn white_frame(width: u32, height: u32) -> RgbFrame {
        RgbFrame {
            width,
            height,
            pixels: vec![255; width as usize * height as usize * 3],
        }
    }

    #[test]
    fn test_pixels_per_metre() {
        assert_eq!(pixels_per_metre(300.0), 11811);
        assert_eq!(pixels_per_metre(72.0), 2835);
        assert_eq!(pixels_per_metre(96.0), 3780);
    }

    #[test]
    fn test_encode_writes_dimensions_and_dpi() {
        let bytes = encode_png(&white_frame(12, 5), 300.0, PngCompression::Default).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let (w, h, dims) = png_header(&bytes);
        assert_eq!((w, h), (12, 5));
        let dims = dims.expect("pHYs chunk missing");
        assert_eq!(dims.xppu, 11811);
        assert_eq!(dims.yppu, 11811);
        assert_eq!(dims.unit, png::Unit::Meter);
    }

    #[test]
    fn test_encode_round_trips_pixels() {
        let mut frame = white_frame(3, 2);
        frame.pixels[0..3].copy_from_slice(&[31, 119, 180]);
        let bytes = encode_png(&frame, 100.0, PngCompression::Best).unwrap();

        let decoder = png::Decoder::new(Cursor::new(&bytes));
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        assert_eq!(&buf[..info.buffer_size()], frame.pixels.as_slice());
    }

    #[test]
    fn test_encode_rejects_short_buffer() {
        let frame = RgbFrame {
            width: 4,
            height: 4,
            pixels: vec![0; 10],
        };
        assert!(matches!(
            encode_png(&frame, 300.0, PngCompression::Fast),
            Err(ChartError::Render(_))
        ));
    }
}
