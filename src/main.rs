use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use devsmap_extract::data::batch::{collect_outcomes, load_paths};
use devsmap_extract::data::filter::filter_by_kind;
use devsmap_extract::data::model::ModelKind;
use devsmap_extract::data::report::{write_csv, write_json, write_text, ModelSummary};

#[derive(Parser)]
#[command(name = "devsmap-extract")]
#[command(version)]
#[command(about = "Extract model name, parameters and include_sets from DEVSMap documents")]
struct Cli {
    /// DEVSMap JSON files or directories containing them
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Only report models of this kind
    #[arg(short, long, value_enum)]
    kind: Option<CliModelKind>,

    /// Report failing documents and carry on with the rest
    #[arg(long)]
    keep_going: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliModelKind {
    Atomic,
    Coupled,
}

impl From<CliModelKind> for ModelKind {
    fn from(kind: CliModelKind) -> Self {
        match kind {
            CliModelKind::Atomic => ModelKind::Atomic,
            CliModelKind::Coupled => ModelKind::Coupled,
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let outcomes = load_paths(&cli.paths);
    let (loaded, first_failure) = collect_outcomes(outcomes, cli.keep_going, io::stderr());

    if first_failure.is_none() || cli.keep_going {
        let kind = cli.kind.map(ModelKind::from);
        let summaries: Vec<ModelSummary> = filter_by_kind(&loaded, kind.as_ref())
            .into_iter()
            .map(ModelSummary::from_loaded)
            .collect();
        if let Err(err) = print_report(cli.format, &summaries) {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    }

    match first_failure {
        Some(code) => ExitCode::from(code),
        None => ExitCode::SUCCESS,
    }
}

fn print_report(format: OutputFormat, summaries: &[ModelSummary]) -> Result<()> {
    let stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => write_text(stdout, summaries),
        OutputFormat::Json => {
            let mut stdout = stdout;
            write_json(&mut stdout, summaries)?;
            writeln!(stdout)?;
            Ok(())
        }
        OutputFormat::Csv => write_csv(stdout, summaries),
    }
}
