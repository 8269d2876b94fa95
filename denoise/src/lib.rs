//! denoise - Spatial-domain image denoising for Rust
//!
//! Removes synthetic noise from grayscale images with classic neighborhood
//! filters, chosen per noise type:
//!
//! - Impulse (salt-and-pepper) noise: median filter
//! - Additive Gaussian noise: bilateral filter
//! - Moving average (box) filter as the baseline
//!
//! The [`pipeline`] module ties image I/O, noise synthesis, denoising and
//! PSNR reporting together; the `denoise-demo` binary runs it.
//!
//! # Example
//!
//! ```
//! use ::denoise::FPix;
//! use ::denoise::filter::{NoiseType, choose_best_algorithm, denoise};
//!
//! let noisy = FPix::new_with_value(32, 32, 90.0).unwrap();
//! let algorithm = choose_best_algorithm(NoiseType::Type2);
//! let clean = denoise(&noisy, NoiseType::Type2, algorithm).unwrap();
//! assert!(clean.max_abs_diff(&noisy).unwrap() < 1e-3);
//! ```

pub mod pipeline;

// Re-export core types (primary data structures used everywhere)
pub use denoise_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use denoise_filter as filter;
pub use denoise_io as io;
