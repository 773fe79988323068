use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use poas_core::metrics::calculator::CalculationInputs;
use poas_core::sensitivity::{self, SensitivityInput, SweepRange};

use crate::input;

/// Arguments for an ad-spend sensitivity sweep
#[derive(Args)]
pub struct SensitivityArgs {
    /// Path to JSON file with the full sweep input ({"base": {...}, "ad_spend": {...}})
    #[arg(long, conflicts_with = "base_inputs")]
    pub input: Option<String>,

    /// Path to JSON file with base case inputs
    #[arg(long, requires = "spend")]
    pub base_inputs: Option<String>,

    /// Ad-spend range in format min:max:step (e.g. "500:5000:500")
    #[arg(long)]
    pub spend: Option<String>,
}

fn parse_range(spec: &str) -> Result<SweepRange, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 3 {
        return Err(format!("Spend range must be min:max:step, got '{}'", spec).into());
    }
    Ok(SweepRange {
        min: parts[0].parse::<Decimal>()?,
        max: parts[1].parse::<Decimal>()?,
        step: parts[2].parse::<Decimal>()?,
    })
}

pub fn run_sensitivity(args: SensitivityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sens_input = match (&args.base_inputs, &args.spend) {
        (Some(path), Some(spend)) => {
            let base: CalculationInputs = input::file::read_json(path)?;
            SensitivityInput {
                base,
                ad_spend: parse_range(spend)?,
            }
        }
        _ => input::read_input(args.input.as_deref(), "sensitivity analysis")?,
    };
    let result = sensitivity::spend_sensitivity(&sens_input)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_range() {
        let r = parse_range("500:5000:250").unwrap();
        assert_eq!(r.min, dec!(500));
        assert_eq!(r.max, dec!(5000));
        assert_eq!(r.step, dec!(250));
    }

    #[test]
    fn test_parse_range_wrong_arity() {
        assert!(parse_range("500:5000").is_err());
        assert!(parse_range("a:b:c").is_err());
    }
}
