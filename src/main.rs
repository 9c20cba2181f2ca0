//! Tally - evaluate spreadsheet formulas from the command line

mod config;

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tally_core::Sheet;
use tally_engine::engine::{NumberFormat, format_evaluation};
use tracing::debug;

fn print_usage() {
    eprintln!("Usage: tally [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [FILE]                    Sheet file to open (.tly)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <FORMULA>   Evaluate a formula and print the result");
    eprintln!("  -o, --output <FILE>       Export computed values to CSV");
    eprintln!("  --config <FILE>           Load settings from a TOML file");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Set TALLY_LOG (e.g. TALLY_LOG=debug) to enable logging.");
}

struct Options {
    file_path: Option<PathBuf>,
    command: Option<String>,
    output_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("TALLY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let mut opts = Options {
        file_path: None,
        command: None,
        output_file: None,
        config_file: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            "-c" | "--command" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --command requires a formula");
                    return ExitCode::FAILURE;
                }
                opts.command = Some(args[i].to_string());
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --output requires a file path");
                    return ExitCode::FAILURE;
                }
                opts.output_file = Some(PathBuf::from(&args[i]));
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a file path");
                    return ExitCode::FAILURE;
                }
                opts.config_file = Some(PathBuf::from(&args[i]));
            }
            arg if arg.starts_with('-') && arg.len() > 1 => {
                eprintln!("Error: Unknown option: {}", arg);
                print_usage();
                return ExitCode::FAILURE;
            }
            _ => {
                if opts.file_path.is_none() {
                    opts.file_path = Some(PathBuf::from(&args[i]));
                } else {
                    eprintln!("Error: Unexpected argument: {}", args[i]);
                    print_usage();
                    return ExitCode::FAILURE;
                }
            }
        }
        i += 1;
    }

    let (config, warnings) = config::load_config(opts.config_file.as_ref());
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    match run(&opts, &config.number_format) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(opts: &Options, fmt: &NumberFormat) -> Result<ExitCode> {
    if opts.file_path.is_none() && opts.command.is_none() {
        print_usage();
        return Ok(ExitCode::FAILURE);
    }

    let sheet = match &opts.file_path {
        Some(path) if path.exists() => Sheet::with_file(Some(path.clone()))
            .with_context(|| format!("failed to load {}", path.display()))?,
        Some(path) => anyhow::bail!("file not found: {}", path.display()),
        None => Sheet::new(),
    };
    debug!(cells = sheet.grid.len(), "sheet ready");

    if let Some(output_path) = &opts.output_file {
        sheet
            .export_csv(output_path, fmt)
            .with_context(|| format!("failed to export {}", output_path.display()))?;
        println!("Exported to {}", output_path.display());
    }

    if let Some(formula) = &opts.command {
        let evaluation = sheet.evaluate_formula(formula);
        println!("{}", format_evaluation(&evaluation, fmt));
        return Ok(if evaluation.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(2)
        });
    }

    if opts.output_file.is_none() {
        for cell_ref in sheet.cell_refs_sorted() {
            println!("{}: {}", cell_ref, sheet.cell_display(&cell_ref, fmt));
        }
    }

    Ok(ExitCode::SUCCESS)
}
