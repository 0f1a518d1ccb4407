use clap::Parser;
use modem_scan::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    match commands::run(command) {
        Ok(_stats) => {
            // Success - stats have already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Print the whole cause chain to stderr and exit with error code
            eprintln!("Error: {:#}", anyhow::Error::from(error));
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Modem Scan - Antenna Sweep Transcript Parser");
    println!("============================================");
    println!();
    println!("Convert the transcript of a modem antenna sweep into newline-delimited");
    println!("JSON telemetry records, one per polling interval.");
    println!();
    println!("USAGE:");
    println!("    modem_scan <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    parse       Parse a transcript and write JSON records (main command)");
    println!("    validate    Check a transcript and report what was recognized");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Parse a capture into records:");
    println!("    modem_scan parse --input sweep.log --output sweep.jsonl");
    println!();
    println!("    # Parse from a live producer, flushing each record:");
    println!("    ./scanner.py | modem_scan parse --flush-each-record > sweep.jsonl");
    println!();
    println!("    # Check a capture for unrecognized modem responses:");
    println!("    modem_scan validate --input sweep.log -v");
    println!();
    println!("For detailed help on any command, use:");
    println!("    modem_scan <COMMAND> --help");
}
