use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PoasError;
use crate::metrics::calculator::{calculate_all, CalculationInputs};
use crate::metrics::interpretation::{interpret_poas, PoasStatus};
use crate::types::{with_metadata, ComputationOutput, Money, Ratio};
use crate::validation::{validate_inputs, ValidationPolicy};
use crate::PoasResult;

/// Upper bound on the number of steps a single sweep may take.
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Inclusive range of ad-spend values to evaluate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRange {
    pub min: Money,
    pub max: Money,
    pub step: Money,
}

/// Input for an ad-spend sensitivity sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityInput {
    /// Base case; its `ad_spend` is replaced at each sweep point
    pub base: CalculationInputs,
    pub ad_spend: SweepRange,
}

/// Metrics at a single ad-spend level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub ad_spend: Money,
    pub poas: Ratio,
    pub roas: Ratio,
    pub contribution_margin: Money,
    pub status: PoasStatus,
}

/// Output of an ad-spend sensitivity sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensitivityOutput {
    pub gross_profit: Money,
    /// Spend at which contribution margin reaches zero (POAS = 1)
    pub breakeven_ad_spend: Money,
    /// First swept spend whose tier is below `Good`
    pub first_below_good: Option<Money>,
    pub points: Vec<SensitivityPoint>,
}

/// Generate the sweep values from min to max with step.
fn generate_sweep_values(range: &SweepRange) -> PoasResult<Vec<Decimal>> {
    if range.step <= Decimal::ZERO {
        return Err(PoasError::invalid("ad_spend.step", "Step must be positive"));
    }
    if range.min < Decimal::ZERO {
        return Err(PoasError::invalid("ad_spend.min", "Min must be zero or greater"));
    }
    if range.min > range.max {
        return Err(PoasError::invalid("ad_spend.min", "Min must be <= max"));
    }

    let too_many = || {
        PoasError::invalid(
            "ad_spend.step",
            format!("Step too small: sweep would exceed {MAX_SWEEP_POINTS} points"),
        )
    };
    let intervals = (range.max - range.min)
        .checked_div(range.step)
        .ok_or_else(too_many)?
        .floor();
    if intervals >= Decimal::from(MAX_SWEEP_POINTS) {
        return Err(too_many());
    }

    let mut values = Vec::new();
    let mut current = Some(range.min);
    while let Some(value) = current.filter(|v| *v <= range.max) {
        values.push(value);
        current = value.checked_add(range.step);
    }
    // Include max when the step doesn't land exactly on it
    if let Some(&last) = values.last() {
        if last < range.max {
            values.push(range.max);
        }
    }

    Ok(values)
}

/// Evaluate POAS, ROAS, contribution margin and tier across a range of
/// ad-spend levels, holding revenue and costs fixed.
pub fn spend_sensitivity(
    input: &SensitivityInput,
) -> PoasResult<ComputationOutput<SensitivityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // Zero spend is a legitimate sweep point, so the base is checked in batch mode
    let policy = ValidationPolicy::batch();
    validate_inputs(&input.base, &policy)?;
    let spends = generate_sweep_values(&input.ad_spend)?;
    // Contribution margin is smallest at the top of the range
    validate_inputs(&input.base.with_ad_spend(input.ad_spend.max), &policy)?;
    tracing::debug!(points = spends.len(), "running ad spend sweep");

    let points: Vec<SensitivityPoint> = spends
        .into_iter()
        .map(|spend| {
            let out = calculate_all(&input.base.with_ad_spend(spend));
            SensitivityPoint {
                ad_spend: spend,
                poas: out.poas,
                roas: out.roas,
                contribution_margin: out.contribution_margin,
                status: interpret_poas(out.poas),
            }
        })
        .collect();

    let gross_profit = calculate_all(&input.base).gross_profit;
    let breakeven_ad_spend = gross_profit.max(Decimal::ZERO);
    let first_below_good = points
        .iter()
        .find(|p| p.status < PoasStatus::Good)
        .map(|p| p.ad_spend);

    if gross_profit <= Decimal::ZERO {
        warnings.push(format!(
            "Gross profit is {gross_profit}: no ad spend level is profitable"
        ));
    }
    if points.iter().any(|p| p.poas.is_infinite()) {
        warnings.push("Sweep includes zero ad spend: POAS and ROAS are unbounded there".into());
    }

    let output = SensitivityOutput {
        gross_profit,
        breakeven_ad_spend,
        first_below_good,
        points,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Ad Spend Sensitivity (POAS / ROAS sweep)",
        &serde_json::json!({
            "revenue": input.base.revenue.to_string(),
            "min": input.ad_spend.min.to_string(),
            "max": input.ad_spend.max.to_string(),
            "step": input.ad_spend.step.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base() -> CalculationInputs {
        CalculationInputs {
            revenue: dec!(10000),
            ad_spend: dec!(2000),
            cogs: dec!(4000),
            shipping_cost: dec!(1500),
            payment_fees: dec!(500),
            handling_cost: dec!(500),
            fixed_costs: None,
        }
    }

    fn sweep(min: Decimal, max: Decimal, step: Decimal) -> SensitivityInput {
        SensitivityInput {
            base: base(),
            ad_spend: SweepRange { min, max, step },
        }
    }

    #[test]
    fn test_sweep_values_include_max() {
        let values = generate_sweep_values(&SweepRange {
            min: dec!(1000),
            max: dec!(2500),
            step: dec!(1000),
        })
        .unwrap();
        assert_eq!(values, vec![dec!(1000), dec!(2000), dec!(2500)]);
    }

    #[test]
    fn test_sweep_rejects_bad_ranges() {
        assert!(spend_sensitivity(&sweep(dec!(0), dec!(100), dec!(0))).is_err());
        assert!(spend_sensitivity(&sweep(dec!(500), dec!(100), dec!(10))).is_err());
        assert!(spend_sensitivity(&sweep(dec!(-10), dec!(100), dec!(10))).is_err());
    }

    #[test]
    fn test_sweep_rejects_too_many_points() {
        let err = spend_sensitivity(&sweep(dec!(0), dec!(1000000000), dec!(0.0000001)))
            .unwrap_err();
        assert!(matches!(err, PoasError::InvalidInput { ref field, .. } if field == "ad_spend.step"));

        // exactly at the cap is still rejected, one step fewer is fine
        let cap = Decimal::from(MAX_SWEEP_POINTS);
        assert!(generate_sweep_values(&SweepRange { min: dec!(0), max: cap, step: dec!(1) }).is_err());
        let values = generate_sweep_values(&SweepRange {
            min: dec!(0),
            max: cap - dec!(1),
            step: dec!(1),
        })
        .unwrap();
        assert_eq!(values.len(), MAX_SWEEP_POINTS);
    }

    #[test]
    fn test_sweep_near_decimal_max_terminates() {
        let step = Decimal::from_i128_with_scale(10_i128.pow(28), 0);
        let out = spend_sensitivity(&sweep(dec!(0), Decimal::MAX, step)).unwrap();
        let points = &out.result.points;
        // 0, 1e28, ..., 7e28, then MAX since 8e28 is out of range
        assert_eq!(points.len(), 9);
        assert_eq!(points[7].ad_spend, step * dec!(7));
        assert_eq!(points[8].ad_spend, Decimal::MAX);
        assert_eq!(points[8].status, PoasStatus::Critical);
    }

    #[test]
    fn test_sweep_validates_base() {
        let mut input = sweep(dec!(0), dec!(1000), dec!(500));
        input.base.cogs = dec!(-1);
        let err = spend_sensitivity(&input).unwrap_err();
        assert!(matches!(err, PoasError::InvalidInput { ref field, .. } if field == "cogs"));
    }

    #[test]
    fn test_sweep_rejects_overflowing_top_spend() {
        let mut input = sweep(dec!(0), Decimal::MAX, Decimal::MAX);
        input.base.revenue = dec!(0);
        // gross profit -6500, so MAX spend pushes contribution margin past -MAX
        let err = spend_sensitivity(&input).unwrap_err();
        assert!(
            matches!(err, PoasError::InvalidInput { ref field, .. } if field == "contribution_margin")
        );
    }

    #[test]
    fn test_sweep_points_and_tiers() {
        // gross profit 3500
        let out = spend_sensitivity(&sweep(dec!(1000), dec!(4000), dec!(500))).unwrap();
        let r = &out.result;
        assert_eq!(r.gross_profit, dec!(3500));
        assert_eq!(r.breakeven_ad_spend, dec!(3500));
        assert_eq!(r.points.len(), 7);

        // 1000 -> 3.5 excellent
        assert_eq!(r.points[0].poas, Ratio::Finite(dec!(3.5)));
        assert_eq!(r.points[0].status, PoasStatus::Excellent);
        // 2500 -> 1.4 good (inclusive), 3000 -> 1.1667 warning
        assert_eq!(r.points[3].status, PoasStatus::Good);
        assert_eq!(r.points[4].status, PoasStatus::Warning);
        assert_eq!(r.first_below_good, Some(dec!(3000)));
        // 4000 -> contribution margin -500
        assert_eq!(r.points[6].contribution_margin, dec!(-500));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_sweep_from_zero_spend_warns() {
        let out = spend_sensitivity(&sweep(dec!(0), dec!(1000), dec!(1000))).unwrap();
        assert!(out.result.points[0].poas.is_infinite());
        assert_eq!(out.warnings.len(), 1);
    }
}
