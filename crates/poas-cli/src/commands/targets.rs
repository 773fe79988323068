use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use poas_core::metrics::targets;
use poas_core::validation;

/// Arguments for the target-POAS solve
#[derive(Args)]
pub struct TargetArgs {
    /// Current gross profit
    #[arg(long, allow_hyphen_values = true)]
    pub gross_profit: Decimal,

    /// Current ad spend
    #[arg(long)]
    pub ad_spend: Decimal,

    /// Desired POAS (e.g. 2.0)
    #[arg(long)]
    pub target_poas: Decimal,
}

/// Arguments for margin ROAS targets
#[derive(Args)]
pub struct RoasTargetsArgs {
    /// Revenue net of VAT
    #[arg(long)]
    pub revenue: Decimal,

    /// Gross profit after variable order costs
    #[arg(long, allow_hyphen_values = true)]
    pub gross_profit: Decimal,
}

pub fn run_target(args: TargetArgs) -> Result<Value, Box<dyn std::error::Error>> {
    validation::validate_target_poas(args.target_poas)?;
    let result = targets::calculate_target_poas(args.gross_profit, args.ad_spend, args.target_poas);
    Ok(serde_json::to_value(result)?)
}

pub fn run_roas_targets(args: RoasTargetsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let result = targets::calculate_roas_targets(args.revenue, args.gross_profit);
    Ok(serde_json::to_value(result)?)
}
