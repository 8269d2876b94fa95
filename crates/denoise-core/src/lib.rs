//! denoise-core - Basic data structures for image denoising
//!
//! This crate provides the fundamental data structures shared by the
//! filtering, I/O and test crates:
//!
//! - [`FPix`] - Single-channel floating-point image
//! - [`Error`] / [`Result`] - Core error handling
//!
//! Image quality metrics (MSE, PSNR) live in [`fpix::compare`].

pub mod error;
pub mod fpix;

pub use error::{Error, Result};
pub use fpix::FPix;
pub use fpix::compare::PEAK_VALUE;
