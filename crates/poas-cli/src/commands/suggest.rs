use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use poas_core::metrics::defaults;
use poas_core::EngineConfig;

/// Arguments for cost suggestions
#[derive(Args)]
pub struct SuggestArgs {
    /// Revenue net of VAT
    #[arg(long)]
    pub revenue: Decimal,

    /// Number of orders in the period
    #[arg(long, default_value_t = 1)]
    pub orders: u32,
}

pub fn run_suggest(
    args: SuggestArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    if args.revenue < Decimal::ZERO {
        return Err("--revenue must be zero or greater".into());
    }
    let result = defaults::suggest_defaults(args.revenue, args.orders, &config.suggestions);
    Ok(serde_json::to_value(result)?)
}
