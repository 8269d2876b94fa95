//! Synthetic noise generation
//!
//! Produces the two kinds of test noise the denoisers are tuned for:
//!
//! - Impulse (salt-and-pepper): a fraction of pixels forced to 0 or 255
//! - Additive Gaussian: zero-mean normal noise, clamped to [0, 255]
//!
//! The random source is passed in, so callers choose between a seeded
//! `StdRng` (reproducible runs, tests) and an entropy-seeded one.

use crate::select::NoiseType;
use crate::{FilterError, FilterResult};
use denoise_core::FPix;
use log::debug;
use rand::Rng;

/// Largest sample value produced by noise synthesis.
const MAX_VALUE: f32 = 255.0;

/// Noise strengths used by [`generate_noisy_image`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseConfig {
    /// Probability of a pixel becoming pepper (0) and, independently, of
    /// becoming salt (255)
    pub impulse_level: f32,
    /// Standard deviation of the additive Gaussian noise
    pub gaussian_sigma: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            impulse_level: 0.15,
            gaussian_sigma: 50.0,
        }
    }
}

/// Add impulse (salt-and-pepper) noise.
///
/// For each pixel a uniform `u` in [0, 1) is drawn. If `u <= level` the
/// pixel becomes 0; if `u > 1 - level` 255 is added. The result is
/// truncated to at most 255.
///
/// # Errors
///
/// Returns `FilterError::InvalidParameter` if `level` is outside [0, 1].
pub fn add_impulse_noise<R: Rng>(
    fpix: &FPix,
    level: f32,
    rng: &mut R,
) -> FilterResult<FPix> {
    if !(0.0..=1.0).contains(&level) {
        return Err(FilterError::InvalidParameter(format!(
            "impulse level must be in [0.0, 1.0], got {level}"
        )));
    }

    let mut out = fpix.clone();
    for v in out.data_mut() {
        let u: f32 = rng.random();
        let kept = if u > level { *v } else { 0.0 };
        let salt = if u > 1.0 - level { MAX_VALUE } else { 0.0 };
        *v = (kept + salt).min(MAX_VALUE);
    }
    Ok(out)
}

/// Add zero-mean Gaussian noise with standard deviation `sigma`, then
/// clamp to [0, 255].
///
/// # Errors
///
/// Returns `FilterError::InvalidParameter` if `sigma` is negative or not
/// finite.
pub fn add_gaussian_noise<R: Rng>(
    fpix: &FPix,
    sigma: f32,
    rng: &mut R,
) -> FilterResult<FPix> {
    if !(sigma >= 0.0) || !sigma.is_finite() {
        return Err(FilterError::InvalidParameter(format!(
            "gaussian sigma must be finite and >= 0, got {sigma}"
        )));
    }

    let mut sampler = GaussianSampler::default();
    let mut out = fpix.clone();
    for v in out.data_mut() {
        *v += sigma * sampler.sample(rng);
    }
    out.clamp(0.0, MAX_VALUE);
    Ok(out)
}

/// Generate a noisy copy of an image for the given noise type.
pub fn generate_noisy_image<R: Rng>(
    fpix: &FPix,
    noise_type: NoiseType,
    config: &NoiseConfig,
    rng: &mut R,
) -> FilterResult<FPix> {
    debug!("generate_noisy_image: {} with {:?}", noise_type, config);
    match noise_type {
        NoiseType::Type1 => add_impulse_noise(fpix, config.impulse_level, rng),
        NoiseType::Type2 => add_gaussian_noise(fpix, config.gaussian_sigma, rng),
    }
}

/// Standard normal sampler using the polar Box-Muller transform.
///
/// Each accepted pair of uniforms yields two normal samples; the second
/// one is cached for the next call.
#[derive(Default)]
struct GaussianSampler {
    saved: Option<f32>,
}

impl GaussianSampler {
    fn sample<R: Rng>(&mut self, rng: &mut R) -> f32 {
        if let Some(v) = self.saved.take() {
            return v;
        }
        let (xval, yval, rsq) = loop {
            let xval = 2.0 * rng.random::<f32>() - 1.0;
            let yval = 2.0 * rng.random::<f32>() - 1.0;
            let rsq = xval * xval + yval * yval;
            if rsq > 0.0 && rsq < 1.0 {
                break (xval, yval, rsq);
            }
        };
        let factor = (-2.0 * rsq.ln() / rsq).sqrt();
        self.saved = Some(xval * factor);
        yval * factor
    }
}
