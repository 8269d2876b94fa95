//! Bilateral filtering (edge-preserving smoothing)
//!
//! Bilateral filtering is a non-linear, edge-preserving smoothing filter.
//! It combines a spatial Gaussian filter with a range (intensity) Gaussian
//! filter.
//!
//! # Algorithm
//!
//! For each pixel, the output is a weighted average of the neighbors in a
//! `k_size x k_size` window where:
//! - Spatial weight: `exp(-(k² + l²) / (2 σs²))` for offset `(k, l)`
//! - Range weight: `exp(-(I(n) - I(c))² / (2 σr²))` for neighbor `n`, center `c`
//!
//! The center always contributes weight 1, so the normalization never
//! divides by zero. Border pixels are filtered through a replicated border.
//!
//! # Example
//!
//! ```
//! use denoise_core::FPix;
//! use denoise_filter::bilateral_filter;
//!
//! let fpix = FPix::new_with_value(8, 8, 100.0).unwrap();
//! let smoothed = bilateral_filter(&fpix, 5, 15.0, 75.0).unwrap();
//! assert_eq!(smoothed.dimensions(), (8, 8));
//! ```

use crate::border::extend_by_replication;
use crate::kernel::check_kernel_size;
use crate::{FilterError, FilterResult, Kernel};
use denoise_core::FPix;
use log::debug;

/// Create the spatial weight kernel for bilateral filtering.
///
/// The center weight is exactly 1; weights are not normalized because the
/// filter divides by the per-pixel weight sum.
pub fn make_spatial_kernel(k_size: u32, sigma_spatial: f32) -> FilterResult<Kernel> {
    Kernel::gaussian_unnormalized(k_size, sigma_spatial)
}

/// Apply the exact bilateral filter.
///
/// # Arguments
/// * `fpix` - Input image
/// * `k_size` - Window side (odd, >= 3)
/// * `sigma_spatial` - Standard deviation of the spatial Gaussian (finite, > 0)
/// * `sigma_radiometric` - Standard deviation of the range Gaussian (> 0).
///   `f32::INFINITY` disables range weighting, which reduces the filter to
///   a normalized spatial Gaussian average.
///
/// # Errors
///
/// Returns `FilterError::InvalidKernelSize` for a bad window side and
/// `FilterError::InvalidParameter` for a sigma outside its range, including
/// one so small that `2σ²` underflows to zero.
pub fn bilateral_filter(
    fpix: &FPix,
    k_size: u32,
    sigma_spatial: f32,
    sigma_radiometric: f32,
) -> FilterResult<FPix> {
    check_kernel_size(k_size)?;
    if !(sigma_spatial > 0.0) || !sigma_spatial.is_finite() {
        return Err(FilterError::InvalidParameter(format!(
            "sigma_spatial must be finite and positive, got {sigma_spatial}"
        )));
    }
    let range_denom = 2.0 * sigma_radiometric * sigma_radiometric;
    if !(sigma_radiometric > 0.0) || !(range_denom > 0.0) {
        return Err(FilterError::InvalidParameter(format!(
            "sigma_radiometric must be positive with a nonzero 2σ², got {sigma_radiometric}"
        )));
    }
    debug!(
        "bilateral_filter: {}x{} image, window {}, sigma_s {}, sigma_r {}",
        fpix.width(),
        fpix.height(),
        k_size,
        sigma_spatial,
        sigma_radiometric
    );

    let spatial = make_spatial_kernel(k_size, sigma_spatial)?;

    let side = k_size as usize;
    let radius = side / 2;
    let bordered = extend_by_replication(fpix, k_size / 2)?;
    let bw = bordered.width() as usize;
    let bdata = bordered.data();
    let sdata = spatial.data();

    let w = fpix.width() as usize;
    let mut out = fpix.create_template();

    for (y, out_row) in out.data_mut().chunks_exact_mut(w).enumerate() {
        for (x, dst) in out_row.iter_mut().enumerate() {
            let center = bdata[(y + radius) * bw + x + radius];
            let mut sum = 0.0f32;
            let mut weight_sum = 0.0f32;

            for ky in 0..side {
                let start = (y + ky) * bw + x;
                let window_row = &bdata[start..start + side];
                let spatial_row = &sdata[ky * side..(ky + 1) * side];
                for (&neighbor, &spatial_weight) in window_row.iter().zip(spatial_row) {
                    let diff = neighbor - center;
                    let range_weight = (-(diff * diff) / range_denom).exp();
                    let weight = spatial_weight * range_weight;
                    sum += weight * neighbor;
                    weight_sum += weight;
                }
            }

            *dst = sum / weight_sum;
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convolve::gaussian_blur;

    fn step_edge(w: u32, h: u32, lo: f32, hi: f32) -> FPix {
        let mut fpix = FPix::new_with_value(w, h, lo).unwrap();
        for y in 0..h {
            for x in w / 2..w {
                fpix.set_pixel(x, y, hi).unwrap();
            }
        }
        fpix
    }

    #[test]
    fn test_spatial_kernel_center_is_one() {
        let k = make_spatial_kernel(5, 2.0).unwrap();
        assert_eq!(k.get(2, 2), Some(1.0));
        assert!(k.data().iter().all(|&v| v > 0.0 && v <= 1.0));
    }

    #[test]
    fn test_bilateral_flat_is_fixed_point() {
        let src = FPix::new_with_value(11, 11, 100.0).unwrap();
        for k in [3, 5, 7] {
            let out = bilateral_filter(&src, k, 10.0, 30.0).unwrap();
            for &v in out.data() {
                assert!((v - 100.0).abs() < 1e-3, "k={k}: got {v}");
            }
        }
    }

    #[test]
    fn test_bilateral_infinite_range_sigma_is_gaussian() {
        let data = (0..64).map(|i| ((i * 53) % 97) as f32).collect();
        let src = FPix::from_data(8, 8, data).unwrap();

        let bilateral = bilateral_filter(&src, 5, 1.5, f32::INFINITY).unwrap();
        let gaussian = gaussian_blur(&src, 5, 1.5).unwrap();
        assert!(bilateral.max_abs_diff(&gaussian).unwrap() < 1e-3);
    }

    #[test]
    fn test_bilateral_preserves_edges() {
        let src = step_edge(12, 6, 20.0, 220.0);
        let out = bilateral_filter(&src, 5, 3.0, 10.0).unwrap();
        // Pixels just on either side of the edge barely move
        assert!((out.get_pixel(5, 3).unwrap() - 20.0).abs() < 1.0);
        assert!((out.get_pixel(6, 3).unwrap() - 220.0).abs() < 1.0);
    }

    #[test]
    fn test_bilateral_filters_border_pixels() {
        // A noisy corner pixel must be smoothed, not skipped
        let mut src = FPix::new_with_value(6, 6, 100.0).unwrap();
        src.set_pixel(0, 0, 110.0).unwrap();
        let out = bilateral_filter(&src, 3, 5.0, 50.0).unwrap();
        let v = out.get_pixel(0, 0).unwrap();
        assert!(v < 110.0 && v > 100.0, "got {v}");
    }

    #[test]
    fn test_bilateral_rejects_bad_parameters() {
        let src = FPix::new(5, 5).unwrap();
        assert!(matches!(
            bilateral_filter(&src, 4, 1.0, 1.0),
            Err(FilterError::InvalidKernelSize(4))
        ));
        assert!(matches!(
            bilateral_filter(&src, 3, 0.0, 1.0),
            Err(FilterError::InvalidParameter(_))
        ));
        assert!(matches!(
            bilateral_filter(&src, 3, 1.0, -2.0),
            Err(FilterError::InvalidParameter(_))
        ));
        assert!(matches!(
            bilateral_filter(&src, 3, f32::NAN, 1.0),
            Err(FilterError::InvalidParameter(_))
        ));
        assert!(matches!(
            bilateral_filter(&src, 3, f32::INFINITY, 1.0),
            Err(FilterError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_bilateral_rejects_underflowing_sigmas() {
        let src = FPix::new_with_value(5, 5, 100.0).unwrap();
        for (ss, sr) in [(1e-30, 10.0), (2.0, 1e-30), (1e-30, 1e-30)] {
            assert!(
                matches!(
                    bilateral_filter(&src, 3, ss, sr),
                    Err(FilterError::InvalidParameter(_))
                ),
                "sigmas ({ss}, {sr}) accepted"
            );
        }
    }

    #[test]
    fn test_bilateral_tiny_sigmas_keep_flat_image() {
        // Smallest magnitudes whose 2σ² is still representable
        let src = FPix::new_with_value(5, 5, 100.0).unwrap();
        let out = bilateral_filter(&src, 3, 1e-10, 1e-10).unwrap();
        assert!(out.data().iter().all(|&v| v == 100.0));
    }
}
