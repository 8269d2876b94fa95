//! Rank filtering operations
//!
//! Provides rank (order-statistic) filters including median, min, and max
//! filters over square windows. Order statistics are robust to sparse
//! large-magnitude outliers, which makes the median the filter of choice
//! for impulse noise.
//!
//! Selection uses `select_nth_unstable_by`, which is linear time on
//! average, rather than a full sort of every window.

use crate::border::extend_by_replication;
use crate::kernel::check_kernel_size;
use crate::{FilterError, FilterResult};
use denoise_core::FPix;
use log::debug;

/// Apply a rank filter over a `k_size x k_size` window.
///
/// # Arguments
/// * `fpix` - Input image
/// * `k_size` - Window side (odd, >= 3)
/// * `rank` - Rank value in [0.0, 1.0] (0.0=min, 0.5=median, 1.0=max)
///
/// The selected element has index `round(rank * (k_size² - 1))` in the
/// sorted window.
///
/// # Errors
///
/// Returns `FilterError::InvalidKernelSize` for a bad window side and
/// `FilterError::InvalidParameter` for a rank outside [0, 1].
pub fn rank_filter(fpix: &FPix, k_size: u32, rank: f32) -> FilterResult<FPix> {
    check_kernel_size(k_size)?;
    if !(0.0..=1.0).contains(&rank) {
        return Err(FilterError::InvalidParameter(format!(
            "rank must be in [0.0, 1.0], got {rank}"
        )));
    }

    let side = k_size as usize;
    let area = side * side;
    let rank_index = ((area - 1) as f32 * rank).round() as usize;
    debug!(
        "rank_filter: {}x{} image, window {}, rank index {}",
        fpix.width(),
        fpix.height(),
        k_size,
        rank_index
    );

    let bordered = extend_by_replication(fpix, k_size / 2)?;
    let bw = bordered.width() as usize;
    let bdata = bordered.data();

    let w = fpix.width() as usize;
    let mut out = fpix.create_template();
    let mut window: Vec<f32> = Vec::with_capacity(area);

    for (y, out_row) in out.data_mut().chunks_exact_mut(w).enumerate() {
        for (x, dst) in out_row.iter_mut().enumerate() {
            window.clear();
            for ky in 0..side {
                let start = (y + ky) * bw + x;
                window.extend_from_slice(&bdata[start..start + side]);
            }
            let (_, selected, _) = window.select_nth_unstable_by(rank_index, f32::total_cmp);
            *dst = *selected;
        }
    }

    Ok(out)
}

/// Apply median filter (rank = 0.5).
///
/// For an odd window area `n = k_size²` this selects the exact middle
/// element, index `(n - 1) / 2`.
///
/// # Errors
///
/// Returns `FilterError::InvalidKernelSize` if `k_size` is even or < 3.
pub fn median_filter(fpix: &FPix, k_size: u32) -> FilterResult<FPix> {
    rank_filter(fpix, k_size, 0.5)
}

/// Apply minimum filter (rank = 0.0).
pub fn min_filter(fpix: &FPix, k_size: u32) -> FilterResult<FPix> {
    rank_filter(fpix, k_size, 0.0)
}

/// Apply maximum filter (rank = 1.0).
pub fn max_filter(fpix: &FPix, k_size: u32) -> FilterResult<FPix> {
    rank_filter(fpix, k_size, 1.0)
}
