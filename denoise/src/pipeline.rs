//! Noise / denoise / PSNR pipeline
//!
//! For every noise type: synthesize noise on a clean grayscale image,
//! denoise it with the recommended (or an overridden) algorithm, save both
//! images and score the result by PSNR against the clean original.
//!
//! Output files in the output directory:
//!
//! - `noisy_<NOISE_TYPE>.png`, `denoised_<NOISE_TYPE>.png`
//! - `psnr_results.txt`, one line per noise type:
//!   `PSNR value for NOISE_TYPE_1: 31.2044 dB`

use denoise_core::FPix;
use denoise_filter::{
    FilterError, NoiseConfig, NoiseReductionAlgorithm, NoiseType, choose_best_algorithm, denoise,
    generate_noisy_image,
};
use denoise_io::{ImageFormat, IoError, read_image, write_image};
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the PSNR report written into the output directory
pub const REPORT_FILE_NAME: &str = "psnr_results.txt";

/// Command-line usage text
pub const USAGE: &str = "usage: denoise-demo <input> [--out-dir DIR] [--seed N] \
[--algorithm NAME] [--impulse-level F] [--gaussian-sigma F]";

/// Errors from parsing demo arguments
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `-h` / `--help` was given
    #[error("{}", USAGE)]
    HelpRequested,

    /// No input image path
    #[error("missing input image path")]
    MissingInput,

    /// A flag was given without its value
    #[error("missing value for {0}")]
    MissingValue(String),

    /// A flag value could not be parsed
    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: String, value: String },

    /// Unknown flag or extra positional argument
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    /// Unknown algorithm name
    #[error(transparent)]
    Algorithm(#[from] FilterError),
}

/// Errors from running the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reading or writing an image failed
    #[error("image I/O failed: {0}")]
    Image(#[from] IoError),

    /// Noise synthesis or filtering failed
    #[error("filtering failed: {0}")]
    Filter(#[from] FilterError),

    /// Image comparison failed
    #[error("comparison failed: {0}")]
    Core(#[from] denoise_core::Error),

    /// Creating the output directory or writing the report failed
    #[error("cannot write '{path}': {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Settings for one demo run
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Clean source image
    pub input: PathBuf,
    /// Directory for the output images and report
    pub out_dir: PathBuf,
    /// RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
    /// Use this algorithm for every noise type instead of the recommended one
    pub algorithm: Option<NoiseReductionAlgorithm>,
    /// Noise strengths
    pub noise: NoiseConfig,
}

impl DemoConfig {
    /// Config with defaults for everything but the input path
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            out_dir: PathBuf::from("."),
            seed: None,
            algorithm: None,
            noise: NoiseConfig::default(),
        }
    }

    /// Parse arguments, excluding the program name.
    ///
    /// Flags take their value either as the next argument or inline
    /// (`--seed=7`).
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut input = None;
        let mut config = DemoConfig::new(PathBuf::new());
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            if arg == "-h" || arg == "--help" {
                return Err(ConfigError::HelpRequested);
            }
            if !arg.starts_with("--") {
                if input.is_some() {
                    return Err(ConfigError::UnexpectedArgument(arg));
                }
                input = Some(PathBuf::from(arg));
                continue;
            }

            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg, None),
            };
            let value = match inline {
                Some(v) => v,
                None => args
                    .next()
                    .ok_or_else(|| ConfigError::MissingValue(flag.clone()))?,
            };

            match flag.as_str() {
                "--out-dir" => config.out_dir = PathBuf::from(value),
                "--seed" => config.seed = Some(parse_value(&flag, &value)?),
                "--algorithm" => config.algorithm = Some(value.parse()?),
                "--impulse-level" => {
                    let level: f32 = parse_value(&flag, &value)?;
                    if !(0.0..=1.0).contains(&level) {
                        return Err(ConfigError::InvalidValue { flag, value });
                    }
                    config.noise.impulse_level = level;
                }
                "--gaussian-sigma" => {
                    let sigma: f32 = parse_value(&flag, &value)?;
                    if !(sigma >= 0.0) || !sigma.is_finite() {
                        return Err(ConfigError::InvalidValue { flag, value });
                    }
                    config.noise.gaussian_sigma = sigma;
                }
                _ => return Err(ConfigError::UnexpectedArgument(flag)),
            }
        }

        config.input = input.ok_or(ConfigError::MissingInput)?;
        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

/// Outcome for one noise type
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseReport {
    pub noise_type: NoiseType,
    pub algorithm: NoiseReductionAlgorithm,
    /// PSNR of the noisy image against the clean one
    pub psnr_noisy: f64,
    /// PSNR of the denoised image against the clean one
    pub psnr_denoised: f64,
}

/// Process one already-loaded image for every noise type.
///
/// Nothing is written to disk.
pub fn process_image(
    clean: &FPix,
    noise: &NoiseConfig,
    algorithm: Option<NoiseReductionAlgorithm>,
    rng: &mut StdRng,
) -> Result<Vec<(NoiseReport, FPix, FPix)>, PipelineError> {
    let mut results = Vec::with_capacity(NoiseType::ALL.len());
    for noise_type in NoiseType::ALL {
        info!("processing noise type {}", noise_type);
        let noisy = generate_noisy_image(clean, noise_type, noise, rng)?;
        let algorithm = algorithm.unwrap_or_else(|| choose_best_algorithm(noise_type));
        let denoised = denoise(&noisy, noise_type, algorithm)?;

        let report = NoiseReport {
            noise_type,
            algorithm,
            psnr_noisy: noisy.psnr(clean)?,
            psnr_denoised: denoised.psnr(clean)?,
        };
        info!(
            "{} with {}: PSNR {:.2} dB -> {:.2} dB",
            noise_type, algorithm, report.psnr_noisy, report.psnr_denoised
        );
        results.push((report, noisy, denoised));
    }
    Ok(results)
}

/// Render the PSNR report, one line per noise type
pub fn format_report(reports: &[NoiseReport]) -> String {
    let mut out = String::new();
    for r in reports {
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "PSNR value for {}: {:.4} dB",
            r.noise_type, r.psnr_denoised
        );
    }
    out
}

/// Run the whole demo: load, process, write images and report.
pub fn run_pipeline(config: &DemoConfig) -> Result<Vec<NoiseReport>, PipelineError> {
    info!("loading {}", config.input.display());
    let clean = read_image(&config.input)?;
    debug!("input is {}x{}", clean.width(), clean.height());

    fs::create_dir_all(&config.out_dir).map_err(|source| PipelineError::Output {
        path: config.out_dir.clone(),
        source,
    })?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let results = process_image(&clean, &config.noise, config.algorithm, &mut rng)?;
    let mut reports = Vec::with_capacity(results.len());
    for (report, noisy, denoised) in results {
        let name = report.noise_type.name();
        write_png(&noisy, &config.out_dir, &format!("noisy_{name}.png"))?;
        write_png(&denoised, &config.out_dir, &format!("denoised_{name}.png"))?;
        reports.push(report);
    }

    let report_path = config.out_dir.join(REPORT_FILE_NAME);
    fs::write(&report_path, format_report(&reports)).map_err(|source| PipelineError::Output {
        path: report_path.clone(),
        source,
    })?;
    info!("PSNR values written to {}", report_path.display());

    Ok(reports)
}

fn write_png(fpix: &FPix, dir: &Path, file_name: &str) -> Result<(), PipelineError> {
    let path = dir.join(file_name);
    debug!("writing {}", path.display());
    write_image(fpix, &path, ImageFormat::Png)?;
    Ok(())
}
