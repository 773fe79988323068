use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use poas_core::metrics::interpretation::{interpret_poas, PoasStatus};

/// Arguments for POAS classification
#[derive(Args)]
pub struct InterpretArgs {
    /// POAS value (gross profit / ad spend)
    #[arg(long, allow_hyphen_values = true)]
    pub poas: Decimal,
}

/// Human-readable text for each tier.
fn describe(status: PoasStatus) -> &'static str {
    match status {
        PoasStatus::Excellent => "Excellent: advertising generates strong profit",
        PoasStatus::Good => "Good: advertising is profitable",
        PoasStatus::Warning => "Warning: advertising barely covers its cost",
        PoasStatus::Critical => "Critical: advertising is losing money",
    }
}

pub fn run_interpret(args: InterpretArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let status = interpret_poas(args.poas);
    Ok(json!({
        "poas": args.poas,
        "status": status,
        "message": describe(status),
    }))
}
