//! Validate command implementation
//!
//! Runs the full extraction over a transcript without writing records, so a
//! capture can be checked for unrecognized device responses and for sections
//! missing a capture time before it is handed to charting.

use super::shared::{
    create_progress, load_configuration, open_input, print_summary, setup_logging,
    update_progress,
};
use crate::app::services::record_writer::RecordCounter;
use crate::app::services::transcript_parser::{LineShape, ParseStats, TranscriptParser};
use crate::Result;
use crate::cli::args::ValidateArgs;
use colored::*;
use tracing::{debug, warn};

/// Validate command runner
pub fn run_validate(args: ValidateArgs) -> Result<ParseStats> {
    // Validate arguments
    args.validate()?;

    let config = load_configuration(&args.shared)?;
    setup_logging(&config.logging.level, args.shared.quiet);
    debug!("Validate arguments: {:?}", args);

    let parser = TranscriptParser::new(&config.parsing)?;
    let reader = open_input(args.shared.input_path.as_deref())?;
    let mut counter = RecordCounter::default();

    let progress = create_progress(args.shared.show_progress());
    let result = parser.run_with_progress(reader, &mut counter, |stats| {
        update_progress(&progress, stats)
    });
    progress.finish_and_clear();
    let stats = result?;

    if stats.records_emitted == 0 {
        warn!("Transcript contains no section with a capture time");
    }

    if args.shared.show_progress() {
        print_summary("Validation Summary", &stats, &config);
        print_shape_breakdown(parser.shapes(), &stats);
    }

    Ok(stats)
}

/// Print how many lines each rule recognized, including rules that never matched
fn print_shape_breakdown(shapes: impl Iterator<Item = LineShape>, stats: &ParseStats) {
    eprintln!();
    eprintln!("{}", "Lines per rule".bright_green().bold());
    for shape in shapes {
        let count = stats.shape_matches.get(shape.name()).copied().unwrap_or(0);
        let count_str = if count == 0 {
            count.to_string().bright_black()
        } else {
            count.to_string().bright_white()
        };
        eprintln!(
            "  {} {}",
            format!("{:<28}", shape.name()).bright_cyan(),
            count_str
        );
    }
}
