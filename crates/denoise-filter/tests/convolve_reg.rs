//! Convolution regression test
//!
//! Checks true-convolution orientation, the average (box) filter on
//! known inputs, and that smoothing reduces Gaussian noise.

use denoise_core::FPix;
use denoise_filter::{Kernel, add_gaussian_noise, average_filter, convolve, correlate, gaussian_blur};
use denoise_test::{RegParams, synth};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn convolve_reg() {
    let mut rp = RegParams::new("convolve");

    // Impulse response of convolution is the kernel itself; correlation
    // gives the kernel rotated by 180 degrees.
    let mut impulse = FPix::new(7, 7).unwrap();
    impulse.set_pixel(3, 3, 1.0).unwrap();
    let kernel = Kernel::from_slice(3, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).unwrap();
    let conv = convolve(&impulse, &kernel).unwrap();
    let corr = correlate(&impulse, &kernel).unwrap();
    for ky in 0..3u32 {
        for kx in 0..3u32 {
            let k = kernel.get(kx, ky).unwrap() as f64;
            rp.compare_values(k, conv.get_pixel(2 + kx, 2 + ky).unwrap() as f64, 1e-6);
            rp.compare_values(k, corr.get_pixel(4 - kx, 4 - ky).unwrap() as f64, 1e-6);
        }
    }

    // Symmetric kernels make both operations agree
    let scene = synth::shapes(32, 32).unwrap();
    let gauss = Kernel::gaussian(5, 1.5).unwrap();
    rp.compare_fpix(
        &convolve(&scene, &gauss).unwrap(),
        &correlate(&scene, &gauss).unwrap(),
        1e-3,
    );

    // Average of a flat image is the same flat image
    let flat = synth::flat(11, 11, 100.0).unwrap();
    for k in [3, 5, 7] {
        rp.compare_fpix(&flat, &average_filter(&flat, k).unwrap(), 1e-3);
    }

    // A linear ramp is preserved by a symmetric average away from borders
    let ramp = synth::gradient(33, 9).unwrap();
    let smoothed = average_filter(&ramp, 3).unwrap();
    for x in 1..32 {
        rp.compare_values(
            ramp.get_pixel(x, 4).unwrap() as f64,
            smoothed.get_pixel(x, 4).unwrap() as f64,
            1e-3,
        );
    }

    // Smoothing reduces additive Gaussian noise on a flat field
    let base = synth::flat(64, 64, 128.0).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let noisy = add_gaussian_noise(&base, 20.0, &mut rng).unwrap();
    let before = noisy.psnr(&base).unwrap();
    let after_avg = average_filter(&noisy, 5).unwrap().psnr(&base).unwrap();
    let after_gauss = gaussian_blur(&noisy, 5, 1.5).unwrap().psnr(&base).unwrap();
    eprintln!("  psnr noisy {before:.2}, average {after_avg:.2}, gaussian {after_gauss:.2}");
    rp.compare_values(1.0, if after_avg > before + 6.0 { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, if after_gauss > before + 3.0 { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "convolve regression test failed");
}
