//! Shared components for CLI commands
//!
//! This module contains logging setup, layered configuration loading, input
//! handling, progress reporting and the summary report used by every command.

use crate::app::services::transcript_parser::ParseStats;
use crate::cli::args::SharedArgs;
use crate::config::Config;
use crate::constants::PROGRESS_UPDATE_INTERVAL;
use crate::{Error, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn setup_logging(log_level: &str, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("modem_scan={}", log_level)));

    let initialized = if quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        // Standard logging with timestamps
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if initialized.is_err() {
        debug!("Logging already initialized");
    } else {
        debug!("Logging initialized at level: {}", log_level);
    }
}

/// Load configuration using layered approach (file -> env -> args)
pub fn load_configuration(args: &SharedArgs) -> Result<Config> {
    let mut config = Config::load_layered(args.config_file.as_deref())?;

    // Apply CLI argument overrides
    apply_cli_overrides(&mut config, args);

    // Final validation
    config.validate()?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut Config, args: &SharedArgs) {
    if let Some(formula) = args.jitter_formula {
        config.parsing.jitter_formula = formula;
    }

    if let Some(level) = args.get_log_level() {
        config.logging.level = level.to_string();
    }
}

/// Open the transcript from a file, or stdin when no path is given
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            info!("Reading transcript from {}", path.display());
            let file = File::open(path).map_err(|e| {
                Error::io(format!("Failed to open transcript {}", path.display()), e)
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => {
            info!("Reading transcript from stdin");
            Ok(Box::new(io::stdin().lock()))
        }
    }
}

/// Create a spinner counting processed sections
pub fn create_progress(show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message("Reading transcript...");
    pb
}

/// Refresh the spinner message every few sections
pub fn update_progress(pb: &ProgressBar, stats: &ParseStats) {
    if stats.sections_total % PROGRESS_UPDATE_INTERVAL == 0 {
        pb.set_message(format!(
            "{} sections, {} records",
            stats.sections_total, stats.records_emitted
        ));
    }
}

/// Format a whole-second duration as `1h 02m 03s`
pub fn format_duration(total_seconds: i64) -> String {
    let sign = if total_seconds < 0 { "-" } else { "" };
    let seconds = total_seconds.unsigned_abs();
    let (hours, minutes, seconds) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);

    if hours > 0 {
        format!("{}{}h {:02}m {:02}s", sign, hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}{}m {:02}s", sign, minutes, seconds)
    } else {
        format!("{}{}s", sign, seconds)
    }
}

/// Print the run summary to stderr
pub fn print_summary(title: &str, stats: &ParseStats, config: &Config) {
    eprintln!();
    eprintln!("{}", title.bright_green().bold());
    eprintln!(
        "  {} {}",
        "Sections:".bright_cyan(),
        stats.sections_total.to_string().bright_white()
    );
    eprintln!(
        "  {} {} ({:.1}%)",
        "Records emitted:".bright_cyan(),
        stats.records_emitted.to_string().bright_white().bold(),
        stats.emission_rate()
    );
    if stats.sections_discarded > 0 {
        eprintln!(
            "  {} {}",
            "Sections without capture time:".bright_yellow(),
            stats.sections_discarded.to_string().bright_yellow()
        );
    }
    eprintln!(
        "  {} {} of {}",
        "Lines recognized:".bright_cyan(),
        (stats.lines_total - stats.lines_unmatched)
            .to_string()
            .bright_white(),
        stats.lines_total
    );
    eprintln!(
        "  {} {}",
        "Carrier components:".bright_cyan(),
        stats.carrier_components.to_string().bright_white()
    );
    eprintln!(
        "  {} {}",
        "Ping samples:".bright_cyan(),
        stats.ping_samples.to_string().bright_white()
    );
    eprintln!(
        "  {} {}",
        "Jitter formula:".bright_cyan(),
        config.parsing.jitter_formula.to_string().bright_white()
    );

    if let Some(window) = stats.capture_window() {
        eprintln!(
            "  {} {} .. {}",
            "Capture window:".bright_cyan(),
            window.start.bright_white(),
            window.end.bright_white()
        );
        match window.duration {
            Some(duration) => eprintln!(
                "  {} {}",
                "Capture duration:".bright_cyan(),
                format_duration(duration.num_seconds()).bright_white()
            ),
            None => eprintln!(
                "  {} {}",
                "Capture duration:".bright_cyan(),
                "unknown (timestamps are not ISO-8601)".bright_black()
            ),
        }
    }
}
