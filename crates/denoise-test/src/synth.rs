//! Deterministic synthetic test images
//!
//! All images use the 8-bit value range [0, 255].

use crate::TestResult;
use denoise_core::FPix;

/// Constant image
pub fn flat(width: u32, height: u32, value: f32) -> TestResult<FPix> {
    Ok(FPix::new_with_value(width, height, value)?)
}

/// Horizontal ramp from 0 at the left column to 255 at the right column
pub fn gradient(width: u32, height: u32) -> TestResult<FPix> {
    let mut fpix = FPix::new(width, height)?;
    let span = width.saturating_sub(1).max(1) as f32;
    for y in 0..height {
        for (x, v) in fpix.row_mut(y).iter_mut().enumerate() {
            *v = 255.0 * x as f32 / span;
        }
    }
    Ok(fpix)
}

/// Vertical step edge: `low` for `x < width / 2`, `high` otherwise
pub fn step_edge(width: u32, height: u32, low: f32, high: f32) -> TestResult<FPix> {
    let mut fpix = FPix::new(width, height)?;
    let split = (width / 2) as usize;
    for y in 0..height {
        let row = fpix.row_mut(y);
        row[..split].fill(low);
        row[split..].fill(high);
    }
    Ok(fpix)
}

/// Checkerboard of `cell` x `cell` squares alternating `low` and `high`
pub fn checkerboard(width: u32, height: u32, cell: u32, low: f32, high: f32) -> TestResult<FPix> {
    let cell = cell.max(1);
    let mut fpix = FPix::new(width, height)?;
    for y in 0..height {
        for (x, v) in fpix.row_mut(y).iter_mut().enumerate() {
            let parity = (x as u32 / cell + y / cell) % 2;
            *v = if parity == 0 { low } else { high };
        }
    }
    Ok(fpix)
}

/// Piecewise-constant scene: mid-gray background, a bright square in the
/// upper left quadrant and a dark disk in the lower right quadrant
pub fn shapes(width: u32, height: u32) -> TestResult<FPix> {
    let mut fpix = FPix::new_with_value(width, height, 120.0)?;
    let (w, h) = (width as f32, height as f32);
    let (cx, cy) = (0.7 * w, 0.7 * h);
    let radius = 0.2 * w.min(h);
    for y in 0..height {
        let fy = y as f32 + 0.5;
        for (x, v) in fpix.row_mut(y).iter_mut().enumerate() {
            let fx = x as f32 + 0.5;
            if fx > 0.1 * w && fx < 0.4 * w && fy > 0.1 * h && fy < 0.4 * h {
                *v = 220.0;
            } else if (fx - cx).powi(2) + (fy - cy).powi(2) <= radius * radius {
                *v = 30.0;
            }
        }
    }
    Ok(fpix)
}
