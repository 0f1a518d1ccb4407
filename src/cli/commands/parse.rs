//! Parse command implementation
//!
//! Reads a transcript and writes one JSON record per valid section to a file
//! or stdout.

use super::shared::{
    create_progress, load_configuration, open_input, print_summary, setup_logging,
    update_progress,
};
use crate::app::services::record_writer::JsonLinesWriter;
use crate::app::services::transcript_parser::{ParseStats, TranscriptParser};
use crate::cli::args::ParseArgs;
use crate::{Error, Result};
use std::fs::File;
use std::io::{self, Write};
use tracing::{debug, info};

/// Parse command runner
pub fn run_parse(args: ParseArgs) -> Result<ParseStats> {
    // Validate arguments
    args.validate()?;

    let mut config = load_configuration(&args.shared)?;
    if args.flush_each_record {
        config.output.flush_each_record = true;
    }

    setup_logging(&config.logging.level, args.shared.quiet);
    debug!("Parse arguments: {:?}", args);
    debug!("Loaded configuration: {:?}", config);

    let parser = TranscriptParser::new(&config.parsing)?;
    let reader = open_input(args.shared.input_path.as_deref())?;

    let output: Box<dyn Write> = match &args.output_path {
        Some(path) => {
            info!("Writing records to {}", path.display());
            Box::new(File::create(path).map_err(|e| {
                Error::io(format!("Failed to create output {}", path.display()), e)
            })?)
        }
        None => Box::new(io::stdout().lock()),
    };
    let mut writer =
        JsonLinesWriter::new(output).with_flush_each_record(config.output.flush_each_record);

    let progress = create_progress(args.shared.show_progress());
    let result = parser.run_with_progress(reader, &mut writer, |stats| {
        update_progress(&progress, stats)
    });
    progress.finish_and_clear();
    let stats = result?;

    if args.shared.show_progress() {
        print_summary("Parse Summary", &stats, &config);
    }

    Ok(stats)
}
