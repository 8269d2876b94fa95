//! Noise types, noise reduction algorithms and the selection policy
//!
//! Both tag sets are closed enumerations. Their display names live in
//! static tables owned by this module. Text or integer tags coming from
//! outside (command line, config) are validated when they are parsed, so
//! everything downstream matches exhaustively and cannot hit an unhandled
//! case.

use crate::{FilterError, FilterResult};
use std::fmt;
use std::str::FromStr;

/// Kind of noise present in an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoiseType {
    /// Impulse (salt-and-pepper) noise: sparse large-magnitude outliers
    Type1,
    /// Dense additive Gaussian noise
    Type2,
}

const NOISE_TYPE_NAMES: [&str; 2] = ["NOISE_TYPE_1", "NOISE_TYPE_2"];

impl NoiseType {
    /// All noise types, in declaration order.
    pub const ALL: [NoiseType; 2] = [NoiseType::Type1, NoiseType::Type2];

    /// Position in [`NoiseType::ALL`].
    pub fn index(self) -> usize {
        match self {
            NoiseType::Type1 => 0,
            NoiseType::Type2 => 1,
        }
    }

    /// Display name, e.g. `NOISE_TYPE_1`.
    pub fn name(self) -> &'static str {
        NOISE_TYPE_NAMES[self.index()]
    }
}

impl fmt::Display for NoiseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u32> for NoiseType {
    type Error = FilterError;

    fn try_from(value: u32) -> FilterResult<Self> {
        NoiseType::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| FilterError::UnsupportedNoiseType(value.to_string()))
    }
}

impl FromStr for NoiseType {
    type Err = FilterError;

    /// Accepts the display names (case-insensitive) and the aliases
    /// `impulse` / `salt-and-pepper` and `gaussian`.
    fn from_str(s: &str) -> FilterResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "noise_type_1" | "impulse" | "salt-and-pepper" => Ok(NoiseType::Type1),
            "noise_type_2" | "gaussian" => Ok(NoiseType::Type2),
            _ => Err(FilterError::UnsupportedNoiseType(s.to_string())),
        }
    }
}

/// Noise reduction algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoiseReductionAlgorithm {
    /// Box (moving-average) filter
    MovingAverage,
    /// Median filter
    Median,
    /// Bilateral filter
    Bilateral,
}

const ALGORITHM_NAMES: [&str; 3] = [
    "NR_MOVING_AVERAGE_FILTER",
    "NR_MEDIAN_FILTER",
    "NR_BILATERAL_FILTER",
];

impl NoiseReductionAlgorithm {
    /// All algorithms, in declaration order.
    pub const ALL: [NoiseReductionAlgorithm; 3] = [
        NoiseReductionAlgorithm::MovingAverage,
        NoiseReductionAlgorithm::Median,
        NoiseReductionAlgorithm::Bilateral,
    ];

    /// Position in [`NoiseReductionAlgorithm::ALL`].
    pub fn index(self) -> usize {
        match self {
            NoiseReductionAlgorithm::MovingAverage => 0,
            NoiseReductionAlgorithm::Median => 1,
            NoiseReductionAlgorithm::Bilateral => 2,
        }
    }

    /// Display name, e.g. `NR_MEDIAN_FILTER`.
    pub fn name(self) -> &'static str {
        ALGORITHM_NAMES[self.index()]
    }
}

impl fmt::Display for NoiseReductionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u32> for NoiseReductionAlgorithm {
    type Error = FilterError;

    fn try_from(value: u32) -> FilterResult<Self> {
        NoiseReductionAlgorithm::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| FilterError::UnsupportedAlgorithm(value.to_string()))
    }
}

impl FromStr for NoiseReductionAlgorithm {
    type Err = FilterError;

    /// Accepts the display names (case-insensitive) and the short aliases
    /// `average`, `median` and `bilateral`.
    fn from_str(s: &str) -> FilterResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nr_moving_average_filter" | "average" | "moving-average" => {
                Ok(NoiseReductionAlgorithm::MovingAverage)
            }
            "nr_median_filter" | "median" => Ok(NoiseReductionAlgorithm::Median),
            "nr_bilateral_filter" | "bilateral" => Ok(NoiseReductionAlgorithm::Bilateral),
            _ => Err(FilterError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Recommend a noise reduction algorithm for a noise type.
///
/// - Impulse noise is dominated by outliers, so the order-statistic
///   median filter is used.
/// - Gaussian noise is dense, so the edge-preserving bilateral filter is
///   used instead of plain averaging.
pub fn choose_best_algorithm(noise_type: NoiseType) -> NoiseReductionAlgorithm {
    match noise_type {
        NoiseType::Type1 => NoiseReductionAlgorithm::Median,
        NoiseType::Type2 => NoiseReductionAlgorithm::Bilateral,
    }
}
