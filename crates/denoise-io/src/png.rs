//! PNG image format support
//!
//! Every PNG variant is decoded to 8-bit samples (palettes expanded,
//! 16-bit samples stripped) and reduced to luminance. Alpha is ignored.
//! Writing always produces 8-bit grayscale.

use crate::{IoError, IoResult, luminance};
use denoise_core::FPix;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image as a grayscale `FPix`
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<FPix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG format: {:?} {:?}",
            color_type, bit_depth
        )));
    }
    let samples = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let mut fpix = FPix::new(width, height)?;
    for y in 0..height {
        let row_start = y as usize * bytes_per_row;
        let src = &data[row_start..row_start + width as usize * samples];
        let dst = fpix.row_mut(y);
        for (d, px) in dst.iter_mut().zip(src.chunks_exact(samples)) {
            *d = match samples {
                1 | 2 => px[0] as f32,
                _ => luminance(px[0], px[1], px[2]),
            };
        }
    }

    Ok(fpix)
}

/// Write an `FPix` as an 8-bit grayscale PNG
///
/// Values are rounded and saturated to [0, 255].
pub fn write_png<W: Write>(fpix: &FPix, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, fpix.width(), fpix.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(&fpix.to_gray8())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}
