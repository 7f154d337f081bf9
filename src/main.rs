use balhist_report::cli::{
    args::Args,
    commands::{self, CommandOutcome},
};
use clap::Parser;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(commands::run(args)) {
        Ok(CommandOutcome::NoMatchingRecords) => {
            // Nothing to write is not a failure, but scripts can tell it apart
            process::exit(2);
        }
        Ok(_) => process::exit(0),
        Err(error) => {
            // `{:#}` on anyhow prints the whole source chain on one line
            eprintln!("Error: {:#}", anyhow::Error::new(error));
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("balhist-report - Balance History Pivot Report");
    println!("=============================================");
    println!();
    println!("Filters a balance-history ledger by entity and month range, joins it with");
    println!("the account catalog and entity roster, and writes one row per account with");
    println!("one column per month as an xlsx workbook.");
    println!();
    println!("USAGE:");
    println!("    balhist-report <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    serve       Serve the upload form and the /upload endpoint");
    println!("    report      Build one report from local files");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Start the upload server on port 3000:");
    println!("    balhist-report serve");
    println!();
    println!("    # Build a report from local exports:");
    println!("    balhist-report report --balhist BALHIST.TXT --cuentas CUENTAS.TXT \\");
    println!("                          --nomina NOMINA.TXT --entidad 15 \\");
    println!("                          --desde 2023-11 --hasta 2024-02 --output reports/");
    println!();
    println!("For detailed help on any command, use:");
    println!("    balhist-report <COMMAND> --help");
}
