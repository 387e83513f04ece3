//! Image writers.  The renderer hands these a finished linear-light
//! buffer and a size; they gamma-encode and push bytes.

use std::io;
use std::io::Write;
use std::path::Path;

use image::ColorType;

use color::Rgb;

/// Writes the buffer as a plain-text PPM: a `P3 <width> <height> 255`
/// header, then one line per image row of space-separated 8-bit
/// triples, each channel gamma-encoded and truncated.
pub fn write_ppm<W: Write>(
    out: &mut W,
    width: usize,
    height: usize,
    pixels: &[Rgb],
) -> io::Result<()> {
    writeln!(out, "P3 {} {} 255", width, height)?;
    for y in 0..height {
        for x in 0..width {
            let encoded = pixels[y * width + x].encode_srgb8();
            write!(out, "{} {} {} ", encoded[0], encoded[1], encoded[2])?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Gamma-encodes the buffer into flat 8-bit RGB bytes for binary
/// encoders.
pub fn encode_srgb(pixels: &[Rgb]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(pixels.len() * 3);
    for pixel in pixels {
        bytes.extend_from_slice(&pixel.encode_srgb8());
    }
    bytes
}

/// Saves the buffer as a PNG.
pub fn save_png<P: AsRef<Path>>(
    path: P,
    width: usize,
    height: usize,
    pixels: &[Rgb],
) -> io::Result<()> {
    ::image::save_buffer(
        path,
        &encode_srgb(pixels),
        width as u32,
        height as u32,
        ColorType::RGB(8),
    )
}
