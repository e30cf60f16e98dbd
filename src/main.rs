use clap::{Args, Parser, Subcommand};
use lead_consolidator::config::AppConfig;
use lead_consolidator::consolidate::{
    ConsolidateSummary, Consolidator, ConsolidatorConfig, DuplicatePolicy,
};
use lead_consolidator::error::AppError;
use lead_consolidator::telemetry;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Lead Consolidator",
    about = "Join the CNPJ registry and Instagram profile exports into one lead sheet",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Consolidate both exports into the output sheet (default command)
    Consolidate(ConsolidateArgs),
}

#[derive(Args, Debug, Default)]
struct ConsolidateArgs {
    /// Override the configured path of the CNPJ registry export
    #[arg(long)]
    registry_csv: Option<PathBuf>,
    /// Override the configured path of the Instagram profile export
    #[arg(long)]
    instagram_csv: Option<PathBuf>,
    /// Override the configured path of the consolidated output sheet
    #[arg(long)]
    output_csv: Option<PathBuf>,
    /// Fail on duplicate names instead of keeping the last row read
    #[arg(long)]
    reject_duplicates: bool,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Consolidate(ConsolidateArgs::default()));

    match command {
        Command::Consolidate(args) => run_consolidate(args),
    }
}

fn run_consolidate(args: ConsolidateArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    apply_overrides(&mut config.pipeline, args);

    telemetry::init(&config.telemetry)?;

    let summary = Consolidator::new(config.pipeline).run()?;
    render_summary(&summary);

    Ok(())
}

/// Command-line flags beat the configured values for the run they are given on.
fn apply_overrides(pipeline: &mut ConsolidatorConfig, mut args: ConsolidateArgs) {
    if let Some(path) = args.registry_csv.take() {
        pipeline.registry_csv = path;
    }
    if let Some(path) = args.instagram_csv.take() {
        pipeline.instagram_csv = path;
    }
    if let Some(path) = args.output_csv.take() {
        pipeline.output_csv = path;
    }
    if args.reject_duplicates {
        pipeline.duplicates = DuplicatePolicy::Reject;
    }
}

fn render_summary(summary: &ConsolidateSummary) {
    println!("Lead consolidation complete");
    println!("- registry names: {}", summary.registry_names);
    println!("- instagram profiles: {}", summary.instagram_profiles);
    println!("- matched profiles: {}", summary.matched);
    println!(
        "- rows written: {} -> {}",
        summary.rows_written,
        summary.output_csv.display()
    );
}
