//! Denoising demo: add impulse and Gaussian noise to an image, denoise
//! each with the recommended filter and report PSNR.
//!
//! Log level comes from `DENOISE_LOG` (default `info`).

use anyhow::Context;
use denoise::pipeline::{ConfigError, DemoConfig, USAGE, run_pipeline};
use flexi_logger::Logger;
use log::error;
use std::process::ExitCode;

fn setup_logging(default_level: &str) -> anyhow::Result<flexi_logger::LoggerHandle> {
    let spec = std::env::var("DENOISE_LOG").unwrap_or_else(|_| default_level.to_string());
    Logger::try_with_str(&spec)
        .with_context(|| format!("invalid log specification '{spec}'"))?
        .log_to_stderr()
        .start()
        .context("logger initialization failed")
}

fn run() -> anyhow::Result<()> {
    let config = match DemoConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(ConfigError::HelpRequested) => {
            println!("{USAGE}");
            return Ok(());
        }
        Err(e) => {
            eprintln!("{USAGE}");
            return Err(e).context("invalid arguments");
        }
    };

    let reports = run_pipeline(&config)
        .with_context(|| format!("denoising {} failed", config.input.display()))?;
    for r in &reports {
        println!(
            "{}: {} (PSNR {:.2} dB -> {:.2} dB)",
            r.noise_type, r.algorithm, r.psnr_noisy, r.psnr_denoised
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let _logger = match setup_logging("info") {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
