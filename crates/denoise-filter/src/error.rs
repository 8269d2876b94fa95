//! Error types for denoise-filter
//!
//! Every variant is terminal for the call that raised it: filters never
//! return a placeholder image in place of an error.

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] denoise_core::Error),

    /// Kernel shape rejected by the convolution engine
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Filter window side is even or smaller than 3
    #[error("invalid kernel size {0}: must be odd and >= 3")]
    InvalidKernelSize(u32),

    /// Invalid numeric parameter (sigma, rank, noise level, ...)
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Tag outside the fixed noise type enumeration
    #[error("unsupported noise type: {0}")]
    UnsupportedNoiseType(String),

    /// Tag outside the fixed algorithm enumeration
    #[error("unsupported noise reduction algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
