use clap::Args;
use serde_json::Value;

use poas_core::analysis::{self, CampaignInput};
use poas_core::EngineConfig;

use crate::commands::metrics::policy_for;
use crate::input;

/// Arguments for a full campaign analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON input file ({"inputs": {...}, "target_poas": "2"})
    #[arg(long)]
    pub input: Option<String>,

    /// Tolerate zero ad spend and report unbounded POAS / ROAS
    #[arg(long)]
    pub batch: bool,
}

pub fn run_analyze(
    args: AnalyzeArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let campaign: CampaignInput = input::read_input(args.input.as_deref(), "campaign analysis")?;
    let result = analysis::analyze_campaign(&campaign, &policy_for(args.batch, config))?;
    Ok(serde_json::to_value(result)?)
}
