//! Convolution kernels
//!
//! Defines the kernel structure used by the convolution engine and by the
//! bilateral filter's spatial weights. Kernels are treated as immutable
//! value objects by the engine: flipping produces a new kernel.

use crate::{FilterError, FilterResult};

/// Smallest accepted filter window side.
pub const MIN_KERNEL_SIZE: u32 = 3;

/// Check that a filter window side is odd and at least [`MIN_KERNEL_SIZE`].
///
/// # Errors
///
/// Returns `FilterError::InvalidKernelSize` otherwise.
pub fn check_kernel_size(size: u32) -> FilterResult<()> {
    if size < MIN_KERNEL_SIZE || size % 2 == 0 {
        return Err(FilterError::InvalidKernelSize(size));
    }
    Ok(())
}

/// A 2D convolution kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// X coordinate of the center
    cx: u32,
    /// Y coordinate of the center
    cy: u32,
    /// Kernel data (row-major order)
    data: Vec<f32>,
}

impl Kernel {
    /// Create a new zero-filled kernel with the given dimensions.
    ///
    /// The center is placed at `(width / 2, height / 2)`.
    pub fn new(width: u32, height: u32) -> FilterResult<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Kernel {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![0.0; (width as usize) * (height as usize)],
        })
    }

    /// Create a kernel from a slice of values (row-major).
    pub fn from_slice(width: u32, height: u32, data: &[f32]) -> FilterResult<Self> {
        let mut kernel = Self::new(width, height)?;
        if data.len() != kernel.data.len() {
            return Err(FilterError::InvalidKernel(format!(
                "data length {} doesn't match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        kernel.data.copy_from_slice(data);
        Ok(kernel)
    }

    /// Create a box (averaging) kernel.
    ///
    /// All values are `1/(size*size)`, so the weights sum to 1.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidKernelSize` if `size` is even or < 3.
    pub fn box_kernel(size: u32) -> FilterResult<Self> {
        check_kernel_size(size)?;
        let mut kernel = Self::new(size, size)?;
        let weight = 1.0 / (size * size) as f32;
        kernel.data.fill(weight);
        Ok(kernel)
    }

    /// Create a normalized Gaussian kernel (weights sum to 1).
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is even or < 3, or `sigma` is not positive.
    pub fn gaussian(size: u32, sigma: f32) -> FilterResult<Self> {
        let mut kernel = Self::gaussian_unnormalized(size, sigma)?;
        kernel.normalize();
        Ok(kernel)
    }

    /// Create a Gaussian kernel with a center weight of exactly 1.
    ///
    /// Entry `(k, l)` relative to the center is `exp(-(k² + l²) / (2σ²))`.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidParameter` if `sigma` is not finite and
    /// positive, or if `2σ²` underflows to zero or overflows in `f32`.
    pub fn gaussian_unnormalized(size: u32, sigma: f32) -> FilterResult<Self> {
        check_kernel_size(size)?;
        let denom = 2.0 * sigma * sigma;
        if !(sigma > 0.0) || !sigma.is_finite() || !(denom > 0.0) || !denom.is_finite() {
            return Err(FilterError::InvalidParameter(format!(
                "gaussian sigma must be finite and positive with a representable 2σ², got {sigma}"
            )));
        }

        let mut kernel = Self::new(size, size)?;
        let half = (size / 2) as i32;
        for y in 0..size {
            for x in 0..size {
                let dy = y as i32 - half;
                let dx = x as i32 - half;
                let dist_sq = (dx * dx + dy * dy) as f32;
                kernel.set(x, y, (-dist_sq / denom).exp());
            }
        }
        Ok(kernel)
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the center X coordinate.
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.cx
    }

    /// Get the center Y coordinate.
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.cy
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Set a value at (x, y). Out-of-range coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = value;
        }
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// A kernel whose values sum to zero is left unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum.abs() > f32::EPSILON {
            for v in &mut self.data {
                *v /= sum;
            }
        }
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Return a copy rotated by 180 degrees.
    ///
    /// Entry `(x, y)` of the result is entry `(w-1-x, h-1-y)` of `self`.
    pub fn flipped(&self) -> Kernel {
        let mut data = self.data.clone();
        data.reverse();
        Kernel {
            width: self.width,
            height: self.height,
            cx: self.width - 1 - self.cx,
            cy: self.height - 1 - self.cy,
            data,
        }
    }

    /// Check the shape accepted by the convolution engine: square, odd
    /// side, side >= 3, centered.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidKernel` describing the violation.
    pub fn check_square_odd(&self) -> FilterResult<()> {
        if self.width != self.height {
            return Err(FilterError::InvalidKernel(format!(
                "kernel must be square, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width < MIN_KERNEL_SIZE || self.width % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel side must be odd and >= {}, got {}",
                MIN_KERNEL_SIZE, self.width
            )));
        }
        if self.cx != self.width / 2 || self.cy != self.height / 2 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel center ({}, {}) is not the middle cell",
                self.cx, self.cy
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_kernel_sums_to_one() {
        let k = Kernel::box_kernel(5).unwrap();
        assert_eq!(k.width(), 5);
        assert_eq!(k.center_x(), 2);
        assert!((k.sum() - 1.0).abs() < 1e-6);
        assert!(k.data().iter().all(|&v| v == 1.0 / 25.0));
    }

    #[test]
    fn test_box_kernel_rejects_bad_sizes() {
        for size in [0, 1, 2, 4, 6] {
            assert!(matches!(
                Kernel::box_kernel(size),
                Err(FilterError::InvalidKernelSize(s)) if s == size
            ));
        }
    }

    #[test]
    fn test_gaussian_kernel() {
        let k = Kernel::gaussian_unnormalized(5, 1.5).unwrap();
        assert_eq!(k.get(2, 2), Some(1.0));
        assert_eq!(k.get(0, 2), k.get(4, 2));
        assert!(k.get(0, 0).unwrap() < k.get(1, 1).unwrap());

        let n = Kernel::gaussian(5, 1.5).unwrap();
        assert!((n.sum() - 1.0).abs() < 1e-5);

        assert!(Kernel::gaussian(5, 0.0).is_err());
        assert!(Kernel::gaussian(5, f32::NAN).is_err());
    }

    #[test]
    fn test_gaussian_rejects_unrepresentable_sigma() {
        for sigma in [1e-30, f32::MIN_POSITIVE, 1e30, f32::INFINITY] {
            assert!(
                matches!(
                    Kernel::gaussian_unnormalized(3, sigma),
                    Err(FilterError::InvalidParameter(_))
                ),
                "sigma {sigma} accepted"
            );
        }
        // Small but representable
        let k = Kernel::gaussian_unnormalized(3, 1e-10).unwrap();
        assert_eq!(k.get(1, 1), Some(1.0));
        assert_eq!(k.get(0, 1), Some(0.0));
    }

    #[test]
    fn test_flipped_does_not_touch_original() {
        let k = Kernel::from_slice(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).unwrap();
        let f = k.flipped();
        assert_eq!(f.data(), &[9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
        assert_eq!(k.get(0, 0), Some(1.0));
        assert_eq!(f.flipped(), k);
    }

    #[test]
    fn test_check_square_odd() {
        assert!(Kernel::new(3, 3).unwrap().check_square_odd().is_ok());
        assert!(Kernel::new(3, 5).unwrap().check_square_odd().is_err());
        assert!(Kernel::new(4, 4).unwrap().check_square_odd().is_err());
        assert!(Kernel::new(1, 1).unwrap().check_square_odd().is_err());
        assert!(Kernel::new(0, 3).is_err());
    }

    #[test]
    fn test_from_slice_wrong_len() {
        assert!(Kernel::from_slice(3, 3, &[1.0; 8]).is_err());
    }
}
