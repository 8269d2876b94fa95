//! Image comparison operations
//!
//! This module provides functions for comparing two images of equal size:
//!
//! - Mean squared error
//! - Peak signal-to-noise ratio (PSNR) in dB
//! - Maximum absolute difference
//!
//! All accumulation is done in `f64`.

use super::FPix;
use crate::error::Result;

/// Peak sample value used for PSNR (8-bit intensity range).
pub const PEAK_VALUE: f64 = 255.0;

impl FPix {
    /// Compute the mean squared error against another image.
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if dimensions differ.
    pub fn mse(&self, other: &FPix) -> Result<f64> {
        self.check_same_size(other)?;

        let sum_sq: f64 = self
            .data()
            .iter()
            .zip(other.data().iter())
            .map(|(&a, &b)| {
                let d = a as f64 - b as f64;
                d * d
            })
            .sum();

        Ok(sum_sq / self.data().len() as f64)
    }

    /// Compute the peak signal-to-noise ratio against a reference, in dB.
    ///
    /// `psnr = 10 * log10(255^2 / mse)`. Identical images give
    /// `f64::INFINITY`.
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if dimensions differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use denoise_core::FPix;
    ///
    /// let a = FPix::new_with_value(8, 8, 100.0).unwrap();
    /// assert!(a.psnr(&a).unwrap().is_infinite());
    /// ```
    pub fn psnr(&self, other: &FPix) -> Result<f64> {
        let mse = self.mse(other)?;
        if mse == 0.0 {
            return Ok(f64::INFINITY);
        }
        Ok(10.0 * (PEAK_VALUE * PEAK_VALUE / mse).log10())
    }

    /// Largest absolute pixel difference between two images.
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if dimensions differ.
    pub fn max_abs_diff(&self, other: &FPix) -> Result<f32> {
        self.check_same_size(other)?;
        Ok(self
            .data()
            .iter()
            .zip(other.data().iter())
            .map(|(&a, &b)| (a - b).abs())
            .fold(0.0, f32::max))
    }
}
