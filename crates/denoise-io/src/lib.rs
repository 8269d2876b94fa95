//! denoise-io - Grayscale image I/O
//!
//! Reads PNG, PGM (`P2`/`P5`) and JPEG files into single-channel
//! [`FPix`] images, and writes `FPix` back out as 8-bit PNG or PGM.
//! Color inputs are converted to luminance on load.
//!
//! Format support is controlled by cargo features (`png-format`, `pnm`,
//! `jpeg`), all enabled by default.

mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use denoise_core::FPix;
use log::debug;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};
use std::path::Path;

/// ITU-R BT.601 luma of an 8-bit RGB sample
#[allow(dead_code)]
pub(crate) fn luminance(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

/// Read an image file as a grayscale `FPix`
///
/// The format is detected from the file's magic bytes, not its extension.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<FPix> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    debug!("read_image: {} as {:?}", path.display(), format);
    let reader = BufReader::new(File::open(path)?);
    read_with_format(reader, format)
}

/// Read an in-memory encoded image as a grayscale `FPix`
pub fn read_image_from_bytes(data: &[u8]) -> IoResult<FPix> {
    let format = detect_format_from_bytes(data)?;
    read_with_format(Cursor::new(data), format)
}

fn read_with_format<R>(reader: R, format: ImageFormat) -> IoResult<FPix>
where
    R: std::io::BufRead + std::io::Seek,
{
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        #[allow(unreachable_patterns)]
        _ => Err(IoError::UnsupportedFormat(format!(
            "{:?} support is not enabled",
            format
        ))),
    }
}

/// Write an `FPix` to a file as an 8-bit grayscale image
///
/// Values are rounded and saturated to [0, 255].
///
/// # Errors
///
/// Returns `IoError::UnsupportedFormat` for [`ImageFormat::Jpeg`], which
/// is read-only.
pub fn write_image<P: AsRef<Path>>(fpix: &FPix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    debug!("write_image: {} as {:?}", path.display(), format);
    // Reject before creating the file
    check_writable(format)?;
    let writer = BufWriter::new(File::create(path)?);
    write_with_format(fpix, writer, format)
}

/// Encode an `FPix` into memory as an 8-bit grayscale image
pub fn write_image_to_vec(fpix: &FPix, format: ImageFormat) -> IoResult<Vec<u8>> {
    check_writable(format)?;
    let mut buf = Vec::new();
    write_with_format(fpix, &mut buf, format)?;
    Ok(buf)
}

fn check_writable(format: ImageFormat) -> IoResult<()> {
    match format {
        ImageFormat::Jpeg => Err(IoError::UnsupportedFormat(
            "JPEG writing is not supported".to_string(),
        )),
        _ => Ok(()),
    }
}

fn write_with_format<W: std::io::Write>(
    fpix: &FPix,
    writer: W,
    format: ImageFormat,
) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(fpix, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(fpix, writer),
        #[allow(unreachable_patterns)]
        _ => Err(IoError::UnsupportedFormat(format!(
            "{:?} writing is not enabled",
            format
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_weights() {
        assert_eq!(luminance(0, 0, 0), 0.0);
        assert!((luminance(255, 255, 255) - 255.0).abs() < 1e-3);
        assert!((luminance(100, 0, 0) - 29.9).abs() < 1e-3);
    }

    #[test]
    fn test_memory_roundtrip_both_formats() {
        let fpix = FPix::from_data(3, 2, vec![0.0, 50.0, 100.0, 150.0, 200.0, 250.0]).unwrap();
        for format in [ImageFormat::Png, ImageFormat::Pnm] {
            let bytes = write_image_to_vec(&fpix, format).unwrap();
            assert_eq!(detect_format_from_bytes(&bytes).unwrap(), format);
            assert_eq!(read_image_from_bytes(&bytes).unwrap(), fpix);
        }
    }

    #[test]
    fn test_jpeg_write_rejected() {
        let fpix = FPix::new(2, 2).unwrap();
        assert!(matches!(
            write_image_to_vec(&fpix, ImageFormat::Jpeg),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
