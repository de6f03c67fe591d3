//! depspec - Dependency archive specializer CLI tool
//!
//! This tool replaces a project's dependency archives with specialized
//! variants containing only the classes the project actually uses, and
//! rewrites the dependency manifest to point at them.

use clap::Parser;
use depspec::cli::CliArgs;
use depspec::output::{create_formatter, OutputConfig};
use depspec::specializer::Specializer;
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Honor the skip flag before touching anything
    if args.skip {
        println!("Dependency specialization skipped");
        return ExitCode::SUCCESS;
    }

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    // Print version info in verbose mode
    if args.verbose {
        eprintln!("depspec v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Project: {}", args.project_dir.display());
        if args.dry_run {
            eprintln!("Mode: dry-run");
        }
    }

    // Create and run the specializer
    let specializer = Specializer::new(args.clone());
    let summary = specializer.run().await?;

    // Create output formatter based on CLI options
    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet, args.dry_run);
    let formatter = create_formatter(output_config);

    // Output results
    let mut stdout = io::stdout().lock();
    formatter.format(&summary, &mut stdout)?;
    stdout.flush()?;

    // Per-dependency or per-manifest failures leave the run partially done
    if summary.has_failures() {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
