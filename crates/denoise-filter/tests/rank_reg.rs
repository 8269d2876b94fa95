//! Rank filter regression test
//!
//! Median, min and max filters on synthetic images, and median versus
//! average on impulse noise.

use denoise_core::FPix;
use denoise_filter::{
    add_impulse_noise, average_filter, max_filter, median_filter, min_filter, rank_filter,
};
use denoise_test::{RegParams, synth};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn rank_reg() {
    let mut rp = RegParams::new("rank");

    // Isolated outliers vanish under a 3x3 median
    let mut spotted = synth::flat(15, 15, 80.0).unwrap();
    for (x, y, v) in [(2, 2, 255.0), (7, 7, 0.0), (12, 4, 255.0), (0, 14, 0.0)] {
        spotted.set_pixel(x, y, v).unwrap();
    }
    let cleaned = median_filter(&spotted, 3).unwrap();
    rp.compare_fpix(&synth::flat(15, 15, 80.0).unwrap(), &cleaned, 0.0);

    // Median keeps a step edge exactly
    let edge = synth::step_edge(20, 10, 30.0, 210.0).unwrap();
    for k in [3, 5, 7] {
        rp.compare_fpix(&edge, &median_filter(&edge, k).unwrap(), 0.0);
    }

    // Rank 0 and 1 are min and max filters
    let checker = synth::checkerboard(16, 16, 4, 10.0, 200.0).unwrap();
    rp.compare_fpix(
        &rank_filter(&checker, 3, 0.0).unwrap(),
        &min_filter(&checker, 3).unwrap(),
        0.0,
    );
    rp.compare_fpix(
        &rank_filter(&checker, 3, 1.0).unwrap(),
        &max_filter(&checker, 3).unwrap(),
        0.0,
    );
    let mins = min_filter(&checker, 3).unwrap();
    let maxs = max_filter(&checker, 3).unwrap();
    rp.compare_values(10.0, mins.get_pixel(4, 4).unwrap() as f64, 0.0);
    rp.compare_values(200.0, maxs.get_pixel(3, 3).unwrap() as f64, 0.0);

    // Median beats average on salt-and-pepper noise
    let scene = synth::shapes(64, 64).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    let noisy = add_impulse_noise(&scene, 0.15, &mut rng).unwrap();
    let p_noisy = noisy.psnr(&scene).unwrap();
    let p_median = median_filter(&noisy, 3).unwrap().psnr(&scene).unwrap();
    let p_average = average_filter(&noisy, 3).unwrap().psnr(&scene).unwrap();
    eprintln!("  psnr noisy {p_noisy:.2}, median {p_median:.2}, average {p_average:.2}");
    rp.compare_values(1.0, if p_median > p_noisy { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if p_median > p_average { 1.0 } else { 0.0 }, 0.0);

    // Dimensions survive on a non-square image smaller than the window
    let tiny = FPix::from_data(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let out = median_filter(&tiny, 5).unwrap();
    rp.compare_values(2.0, out.width() as f64, 0.0);
    rp.compare_values(3.0, out.height() as f64, 0.0);

    assert!(rp.cleanup(), "rank regression test failed");
}
