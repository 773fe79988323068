mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::analysis::AnalyzeArgs;
use commands::interpret::InterpretArgs;
use commands::metrics::CalculateArgs;
use commands::sensitivity::SensitivityArgs;
use commands::suggest::SuggestArgs;
use commands::targets::{RoasTargetsArgs, TargetArgs};

/// Profit-on-ad-spend calculations
#[derive(Parser)]
#[command(
    name = "poas",
    version,
    about = "POAS, ROAS and ad-spend target calculations",
    long_about = "A CLI for advertising profitability calculations with decimal \
                  precision. Computes POAS versus ROAS, contribution margin, \
                  target-POAS spend ceilings, margin ROAS targets, cost \
                  suggestions and ad-spend sensitivity sweeps."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Engine configuration file (YAML, or JSON with a .json extension)
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate POAS, ROAS, gross profit and contribution margin
    Calculate(CalculateArgs),
    /// Back-solve max ad spend and min gross profit for a target POAS
    Target(TargetArgs),
    /// Break-even ROAS and ROAS needed for 10/15/20% margins
    RoasTargets(RoasTargetsArgs),
    /// Suggest cost values from revenue and order count
    Suggest(SuggestArgs),
    /// Classify a POAS value
    Interpret(InterpretArgs),
    /// Full campaign analysis (metrics, tier, ROAS targets, target POAS)
    Analyze(AnalyzeArgs),
    /// Sweep ad spend and report POAS / ROAS at each level
    Sensitivity(SensitivityArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match input::file::read_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::metrics::run_calculate(args, &config),
        Commands::Target(args) => commands::targets::run_target(args),
        Commands::RoasTargets(args) => commands::targets::run_roas_targets(args),
        Commands::Suggest(args) => commands::suggest::run_suggest(args, &config),
        Commands::Interpret(args) => commands::interpret::run_interpret(args),
        Commands::Analyze(args) => commands::analysis::run_analyze(args, &config),
        Commands::Sensitivity(args) => commands::sensitivity::run_sensitivity(args),
        Commands::Version => {
            println!("poas {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
