use clap::{Parser, ValueEnum};
use questcheck::prelude::*;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Output encodings for the validation report.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Validates every quest document in a repository against the reference catalogs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding the quest documents (searched recursively)
    #[arg(long, default_value = "./quests")]
    quests: PathBuf,

    /// Directory holding npcs.yaml, items.yaml, factions.yaml, resources.yaml and objects.yaml
    #[arg(long, default_value = "./data")]
    data: PathBuf,

    /// Only print issues, without the summary line
    #[arg(short, long)]
    quiet: bool,

    /// Report format written to stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Skip the journal and stage description checks at flow start and end
    #[arg(long)]
    skip_flow_bookkeeping: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("Failed to serialize report: {0}")]
    Render(#[from] serde_json::Error),
}

/// Exit code for runs that never produced a report on stdout.
const EXIT_FATAL: u8 = 2;

fn exit_code(outcome: &std::result::Result<ValidationReport, CliError>) -> u8 {
    match outcome {
        Ok(report) => report.exit_code(),
        Err(_) => EXIT_FATAL,
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "questcheck=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let outcome = run(&cli);
    if let Err(e) = &outcome {
        error!("{}", e);
        eprintln!("\nError: {}", e);
    }
    ExitCode::from(exit_code(&outcome))
}

fn run(cli: &Cli) -> std::result::Result<ValidationReport, CliError> {
    let catalog = load_catalog(&cli.data)?;
    let loaded = load_quests(&cli.quests)?;

    let validator = Validator::builder(catalog)
        .with_flow_bookkeeping(!cli.skip_flow_bookkeeping)
        .build();
    let report = validator.report(&loaded);

    match cli.format {
        OutputFormat::Text => {
            for line in ReportFormatter::format_report(&report, !cli.quiet) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(report)
}
