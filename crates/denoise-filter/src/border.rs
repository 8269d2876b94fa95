//! Border extension by edge replication
//!
//! Windowed filters read `radius` pixels beyond the image on every side.
//! Those reads are served from an extended copy whose margins repeat the
//! nearest edge pixel, so borders are never darkened the way zero padding
//! would darken them.

use crate::{FilterError, FilterResult};
use denoise_core::FPix;

/// Extend an image by `radius` pixels on every side, replicating edges.
///
/// The result is `(w + 2r) x (h + 2r)`. Interior pixel `(r + x, r + y)`
/// equals `fpix(x, y)`; a margin pixel takes the value of the source pixel
/// at the clamped coordinate. A `radius` of 0 returns a copy.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameter` if the extended size overflows.
///
/// # Examples
///
/// ```
/// use denoise_core::FPix;
/// use denoise_filter::extend_by_replication;
///
/// let fpix = FPix::from_data(2, 1, vec![1.0, 2.0]).unwrap();
/// let ext = extend_by_replication(&fpix, 1).unwrap();
/// assert_eq!(ext.row(0), &[1.0, 1.0, 2.0, 2.0]);
/// ```
pub fn extend_by_replication(fpix: &FPix, radius: u32) -> FilterResult<FPix> {
    if radius == 0 {
        return Ok(fpix.clone());
    }

    let (w, h) = fpix.dimensions();
    let double = radius
        .checked_mul(2)
        .ok_or_else(|| FilterError::InvalidParameter("border radius overflow".into()))?;
    let new_w = w
        .checked_add(double)
        .ok_or_else(|| FilterError::InvalidParameter("resulting width overflow".into()))?;
    let new_h = h
        .checked_add(double)
        .ok_or_else(|| FilterError::InvalidParameter("resulting height overflow".into()))?;

    let mut out = FPix::new(new_w, new_h)?;
    let r = radius as i64;

    for oy in 0..new_h {
        let sy = (oy as i64 - r).clamp(0, h as i64 - 1) as u32;
        let src_row = fpix.row(sy);
        let dst_row = out.row_mut(oy);

        // Left margin, copied interior, right margin
        dst_row[..radius as usize].fill(src_row[0]);
        dst_row[radius as usize..(radius + w) as usize].copy_from_slice(src_row);
        dst_row[(radius + w) as usize..].fill(src_row[w as usize - 1]);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid3x3() -> FPix {
        FPix::from_data(
            3,
            3,
            vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0],
        )
        .unwrap()
    }

    #[test]
    fn test_extend_basic() {
        let result = extend_by_replication(&grid3x3(), 1).unwrap();
        assert_eq!(result.dimensions(), (5, 5));

        // Corners replicate the source corners
        assert_eq!(result.get_pixel_unchecked(0, 0), 10.0);
        assert_eq!(result.get_pixel_unchecked(4, 0), 30.0);
        assert_eq!(result.get_pixel_unchecked(0, 4), 70.0);
        assert_eq!(result.get_pixel_unchecked(4, 4), 90.0);
        // Edges
        assert_eq!(result.get_pixel_unchecked(2, 0), 20.0);
        assert_eq!(result.get_pixel_unchecked(0, 2), 40.0);
        assert_eq!(result.get_pixel_unchecked(4, 2), 60.0);
        assert_eq!(result.get_pixel_unchecked(2, 4), 80.0);
        // Center shifted by radius
        assert_eq!(result.get_pixel_unchecked(2, 2), 50.0);
    }

    #[test]
    fn test_extend_matches_clamped_lookup() {
        let src = grid3x3();
        let r = 3u32;
        let ext = extend_by_replication(&src, r).unwrap();
        for oy in 0..ext.height() {
            for ox in 0..ext.width() {
                let sx = (ox as i32 - r as i32).clamp(0, 2) as u32;
                let sy = (oy as i32 - r as i32).clamp(0, 2) as u32;
                assert_eq!(
                    ext.get_pixel_unchecked(ox, oy),
                    src.get_pixel_unchecked(sx, sy),
                    "mismatch at ({ox}, {oy})"
                );
            }
        }
    }

    #[test]
    fn test_extend_zero_radius_is_copy() {
        let src = grid3x3();
        assert_eq!(extend_by_replication(&src, 0).unwrap(), src);
    }

    #[test]
    fn test_extend_single_pixel() {
        let src = FPix::new_with_value(1, 1, 7.0).unwrap();
        let ext = extend_by_replication(&src, 2).unwrap();
        assert_eq!(ext.dimensions(), (5, 5));
        assert!(ext.data().iter().all(|&v| v == 7.0));
    }

    #[test]
    fn test_extend_overflow() {
        let src = FPix::new(2, 2).unwrap();
        assert!(extend_by_replication(&src, u32::MAX).is_err());
    }
}
