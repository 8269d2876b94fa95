//! denoise-filter - Spatial-domain denoising filters
//!
//! This crate provides:
//!
//! - Border extension by edge replication
//! - Convolution with square odd-sized kernels
//! - Average (box) filtering
//! - Rank filtering (median, min, max filters)
//! - Bilateral filtering (edge-preserving smoothing)
//! - Noise type / algorithm tags and the selection policy
//! - The denoise dispatcher with per-case tuned parameters
//! - Synthetic impulse and Gaussian noise for testing

pub mod bilateral;
pub mod border;
pub mod convolve;
pub mod denoise;
mod error;
pub mod kernel;
pub mod noise;
pub mod rank;
pub mod select;

pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;

// Re-export commonly used functions
pub use bilateral::{bilateral_filter, make_spatial_kernel};
pub use border::extend_by_replication;
pub use convolve::{average_filter, convolve, correlate, gaussian_blur};
pub use denoise::{FilterParams, denoise};
pub use noise::{NoiseConfig, add_gaussian_noise, add_impulse_noise, generate_noisy_image};
pub use rank::{max_filter, median_filter, min_filter, rank_filter};
pub use select::{NoiseReductionAlgorithm, NoiseType, choose_best_algorithm};
