//! PGM (Portable Gray Map) format support
//!
//! Reads ASCII `P2` and binary `P5` graymaps with any maxval up to 65535;
//! samples are rescaled to [0, 255]. Writes binary `P5` with maxval 255.

use crate::{IoError, IoResult};
use denoise_core::FPix;
use std::io::{Read, Write};

/// Read a PGM image (P2/P5) from a reader.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<FPix> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let mut header = HeaderParser::new(&bytes);

    let magic = header.magic()?;
    let width = header.next_uint()?;
    let height = header.next_uint()?;
    let maxval = header.next_uint()?;
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("invalid PGM maxval {maxval}")));
    }
    let rescale = |v: u32| v as f32 * 255.0 / maxval as f32;
    let npixels = width as usize * height as usize;

    let values: Vec<f32> = match magic {
        b'2' => {
            let mut values = Vec::with_capacity(npixels.min(bytes.len()));
            for _ in 0..npixels {
                let v = header.next_uint()?;
                if v > maxval {
                    return Err(IoError::InvalidData(format!(
                        "PGM sample {v} exceeds maxval {maxval}"
                    )));
                }
                values.push(rescale(v));
            }
            values
        }
        _ => {
            // Exactly one whitespace byte separates maxval from the raster
            let start = header.pos + 1;
            let bytes_per_sample = if maxval < 256 { 1 } else { 2 };
            let raster = npixels
                .checked_mul(bytes_per_sample)
                .and_then(|len| bytes.get(start..start.checked_add(len)?))
                .ok_or_else(|| IoError::DecodeError("truncated PGM raster".to_string()))?;
            if bytes_per_sample == 1 {
                raster.iter().map(|&b| rescale(b as u32)).collect()
            } else {
                raster
                    .chunks_exact(2)
                    .map(|c| rescale(u16::from_be_bytes([c[0], c[1]]) as u32))
                    .collect()
            }
        }
    };

    Ok(FPix::from_data(width, height, values)?)
}

/// Write an `FPix` as binary PGM (`P5`, maxval 255).
///
/// Values are rounded and saturated to [0, 255].
pub fn write_pnm<W: Write>(fpix: &FPix, mut writer: W) -> IoResult<()> {
    write!(writer, "P5\n{} {}\n255\n", fpix.width(), fpix.height())?;
    writer.write_all(&fpix.to_gray8())?;
    writer.flush()?;
    Ok(())
}

/// Tokenizer over the whitespace-separated PNM header, skipping `#` comments
struct HeaderParser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> HeaderParser<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn magic(&mut self) -> IoResult<u8> {
        match self.bytes {
            [b'P', m @ (b'2' | b'5'), ..] => {
                self.pos = 2;
                Ok(*m)
            }
            _ => Err(IoError::UnsupportedFormat(
                "not a P2/P5 graymap".to_string(),
            )),
        }
    }

    fn skip_separators(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b == b'#' {
                while let Some(&c) = self.bytes.get(self.pos) {
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                    self.pos += 1;
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn next_uint(&mut self) -> IoResult<u32> {
        self.skip_separators();
        let start = self.pos;
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_digit())
        {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(IoError::DecodeError(format!(
                "expected integer in PGM header at byte {start}"
            )));
        }
        // At most ten ASCII digits fit; parse errors mean overflow
        std::str::from_utf8(&self.bytes[start..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| IoError::InvalidData("PGM integer out of range".to_string()))
    }
}
