//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate and reduces them to
//! luminance. The crate is decode-only, so JPEG is never a write target.

use crate::{IoError, IoResult, luminance};
use denoise_core::FPix;
use jpeg_decoder::{Decoder, PixelFormat};
use std::io::Read;

/// Read a JPEG image from a reader as a grayscale `FPix`.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<FPix> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;
    let data: Vec<f32> = match info.pixel_format {
        PixelFormat::L8 => pixels.iter().map(|&v| v as f32).collect(),
        PixelFormat::L16 => pixels
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]) as f32 / 257.0)
            .collect(),
        PixelFormat::RGB24 => pixels
            .chunks_exact(3)
            .map(|c| luminance(c[0], c[1], c[2]))
            .collect(),
        PixelFormat::CMYK32 => pixels
            .chunks_exact(4)
            .map(|c| {
                let k = 255 - c[3] as u32;
                let ch = |v: u8| ((255 - v as u32) * k / 255) as u8;
                luminance(ch(c[0]), ch(c[1]), ch(c[2]))
            })
            .collect(),
        #[allow(unreachable_patterns)]
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {:?}",
                other
            )));
        }
    };

    Ok(FPix::from_data(width, height, data)?)
}
