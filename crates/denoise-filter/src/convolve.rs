//! Convolution operations
//!
//! Implements spatial convolution of an [`FPix`] with a square kernel, and
//! the average (box) filter built on top of it.
//!
//! Border handling: the source is extended by the kernel radius with
//! [`extend_by_replication`], so every output pixel sees a full window.
//! The engine applies no normalization; kernels carry their own.

use crate::border::extend_by_replication;
use crate::{FilterResult, Kernel};
use denoise_core::FPix;
use log::debug;

/// Convolve an image with a kernel.
///
/// This is true convolution: the kernel is rotated by 180 degrees once,
/// into a private copy, before the weighted sum is taken. The caller's
/// kernel is never modified, so repeated calls give identical results.
///
/// # Errors
///
/// Returns `FilterError::InvalidKernel` unless the kernel is square with
/// an odd side of at least 3.
///
/// # Examples
///
/// ```
/// use denoise_core::FPix;
/// use denoise_filter::{Kernel, convolve};
///
/// let fpix = FPix::new_with_value(6, 6, 4.0).unwrap();
/// let kernel = Kernel::box_kernel(3).unwrap();
/// let out = convolve(&fpix, &kernel).unwrap();
/// assert_eq!(out.dimensions(), (6, 6));
/// ```
pub fn convolve(fpix: &FPix, kernel: &Kernel) -> FilterResult<FPix> {
    kernel.check_square_odd()?;
    let flipped = kernel.flipped();
    correlate_unchecked(fpix, &flipped)
}

/// Correlate an image with a kernel (kernel applied in stored orientation).
///
/// `out(x, y) = sum over (kx, ky) of kernel(kx, ky) * ext(x + kx, y + ky)`
/// where `ext` is the source extended by the kernel radius.
///
/// # Errors
///
/// Same kernel requirements as [`convolve`].
pub fn correlate(fpix: &FPix, kernel: &Kernel) -> FilterResult<FPix> {
    kernel.check_square_odd()?;
    correlate_unchecked(fpix, kernel)
}

fn correlate_unchecked(fpix: &FPix, kernel: &Kernel) -> FilterResult<FPix> {
    let side = kernel.width() as usize;
    let radius = kernel.width() / 2;
    debug!(
        "correlate: {}x{} image, {}x{} kernel",
        fpix.width(),
        fpix.height(),
        side,
        side
    );

    let bordered = extend_by_replication(fpix, radius)?;
    let bw = bordered.width() as usize;
    let bdata = bordered.data();
    let kdata = kernel.data();

    let w = fpix.width() as usize;
    let mut out = fpix.create_template();

    for (y, out_row) in out.data_mut().chunks_exact_mut(w).enumerate() {
        for (x, dst) in out_row.iter_mut().enumerate() {
            let mut sum = 0.0f32;
            for ky in 0..side {
                let start = (y + ky) * bw + x;
                let window_row = &bdata[start..start + side];
                let kernel_row = &kdata[ky * side..(ky + 1) * side];
                sum += kernel_row
                    .iter()
                    .zip(window_row)
                    .map(|(&k, &p)| k * p)
                    .sum::<f32>();
            }
            *dst = sum;
        }
    }

    Ok(out)
}

/// Apply the average (box) filter.
///
/// Builds a `k_size x k_size` kernel of weights `1/k_size²` and convolves.
///
/// # Errors
///
/// Returns `FilterError::InvalidKernelSize` if `k_size` is even or < 3.
pub fn average_filter(fpix: &FPix, k_size: u32) -> FilterResult<FPix> {
    let kernel = Kernel::box_kernel(k_size)?;
    convolve(fpix, &kernel)
}

/// Apply a normalized Gaussian blur of the given odd size.
pub fn gaussian_blur(fpix: &FPix, k_size: u32, sigma: f32) -> FilterResult<FPix> {
    let kernel = Kernel::gaussian(k_size, sigma)?;
    convolve(fpix, &kernel)
}
