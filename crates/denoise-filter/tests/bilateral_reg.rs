//! Bilateral filter regression test
//!
//! Edge preservation against a plain Gaussian, the infinite range sigma
//! limit, noise reduction on a piecewise-constant scene, and rejection of
//! sigmas whose squared width underflows.

use denoise_filter::{FilterError, add_gaussian_noise, bilateral_filter, gaussian_blur, make_spatial_kernel};
use denoise_test::{RegParams, synth};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn bilateral_reg() {
    let mut rp = RegParams::new("bilateral");

    // Spatial kernel is unnormalized with a unit center
    let spatial = make_spatial_kernel(5, 2.0).unwrap();
    rp.compare_values(1.0, spatial.get(2, 2).unwrap() as f64, 1e-6);
    rp.compare_values(
        (-1.0f64 / 8.0).exp(),
        spatial.get(3, 2).unwrap() as f64,
        1e-5,
    );

    // A small range sigma leaves a hard edge untouched; a Gaussian blurs it
    let edge = synth::step_edge(24, 12, 20.0, 200.0).unwrap();
    let kept = bilateral_filter(&edge, 5, 3.0, 10.0).unwrap();
    rp.compare_fpix(&edge, &kept, 1e-3);
    let blurred = gaussian_blur(&edge, 5, 3.0).unwrap();
    let blur_err = blurred.max_abs_diff(&edge).unwrap();
    rp.compare_values(1.0, if blur_err > 20.0 { 1.0 } else { 0.0 }, 0.0);

    // Infinite range sigma is a normalized spatial Gaussian
    let scene = synth::shapes(32, 32).unwrap();
    rp.compare_fpix(
        &gaussian_blur(&scene, 7, 2.5).unwrap(),
        &bilateral_filter(&scene, 7, 2.5, f32::INFINITY).unwrap(),
        1e-2,
    );

    // Noise reduction on the scene
    let scene = synth::shapes(64, 64).unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    let noisy = add_gaussian_noise(&scene, 25.0, &mut rng).unwrap();
    let p_noisy = noisy.psnr(&scene).unwrap();
    let p_bilateral = bilateral_filter(&noisy, 5, 15.0, 75.0)
        .unwrap()
        .psnr(&scene)
        .unwrap();
    eprintln!("  psnr noisy {p_noisy:.2}, bilateral {p_bilateral:.2}");
    rp.compare_values(1.0, if p_bilateral > p_noisy + 3.0 { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "bilateral regression test failed");
}

#[test]
fn bilateral_tiny_sigma_reg() {
    let mut rp = RegParams::new("bilateral_tiny_sigma");
    let flat = synth::flat(5, 5, 100.0).unwrap();

    // 2σ² underflows to zero in f32: an error, never a NaN image
    for (ss, sr) in [(1e-30, 10.0), (2.0, 1e-30), (1e-30, 1e-30)] {
        let rejected = matches!(
            bilateral_filter(&flat, 3, ss, sr),
            Err(FilterError::InvalidParameter(_))
        );
        rp.compare_values(1.0, if rejected { 1.0 } else { 0.0 }, 0.0);
    }

    // Representable tiny sigmas keep only the center weight
    let out = bilateral_filter(&flat, 3, 1e-10, 1e-10).unwrap();
    rp.compare_fpix(&flat, &out, 0.0);

    assert!(rp.cleanup(), "bilateral tiny sigma regression test failed");
}
