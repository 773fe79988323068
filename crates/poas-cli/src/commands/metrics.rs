use clap::Args;
use serde_json::Value;

use poas_core::metrics::calculator::{self, CalculationInputs};
use poas_core::validation::{self, ValidationPolicy};
use poas_core::EngineConfig;

use crate::input;

/// Arguments for the core metric calculation
#[derive(Args)]
pub struct CalculateArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    /// Tolerate zero ad spend and report unbounded POAS / ROAS
    #[arg(long)]
    pub batch: bool,
}

/// Pick the validation policy: `--batch` overrides the configured one.
pub fn policy_for(batch: bool, config: &EngineConfig) -> ValidationPolicy {
    if batch {
        ValidationPolicy::batch()
    } else {
        config.validation.clone()
    }
}

pub fn run_calculate(
    args: CalculateArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let calc_input: CalculationInputs =
        input::read_input(args.input.as_deref(), "metric calculation")?;
    validation::validate_inputs(&calc_input, &policy_for(args.batch, config))?;
    let result = calculator::calculate_all(&calc_input);
    Ok(serde_json::to_value(result)?)
}
