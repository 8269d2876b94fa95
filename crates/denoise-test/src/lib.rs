//! denoise-test - Regression test framework for denoise-rs
//!
//! This crate provides a small regression test framework supporting three
//! modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! It also synthesizes deterministic test images ([`synth`]), so tests do
//! not depend on an on-disk image corpus.
//!
//! # Usage
//!
//! ```ignore
//! use denoise_test::{RegParams, synth};
//!
//! let mut rp = RegParams::new("median");
//! let pix = synth::gradient(32, 32).unwrap();
//! rp.compare_values(32.0, pix.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // denoise-test is at crates/denoise-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
