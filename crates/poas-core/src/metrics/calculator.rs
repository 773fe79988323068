use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Ratio};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Revenue and cost figures for one campaign period.
///
/// All amounts are expected to be non-negative; the input boundary
/// (`crate::validation`) enforces that; the formulas below are defined
/// for any sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInputs {
    /// Revenue net of VAT, after discounts
    pub revenue: Money,
    /// Total ad spend across channels
    pub ad_spend: Money,
    /// Cost of goods sold
    pub cogs: Money,
    /// Shipping borne by the company
    pub shipping_cost: Money,
    /// Payment gateway and commission costs
    pub payment_fees: Money,
    /// Packaging and fulfilment
    pub handling_cost: Money,
    /// Fixed costs for the period; enables net profit when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_costs: Option<Money>,
}

/// Profitability metrics derived from one `CalculationInputs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationOutputs {
    /// cogs + shipping + payment fees + handling
    pub variable_order_costs: Money,
    /// revenue - variable order costs (negative for a loss)
    pub gross_profit: Money,
    /// gross profit / ad spend
    pub poas: Ratio,
    /// poas * 100
    pub poas_percentage: Ratio,
    /// gross profit - ad spend
    pub contribution_margin: Money,
    /// contribution margin - fixed costs, only when fixed costs are known
    pub net_profit: Option<Money>,
    /// revenue / ad spend
    pub roas: Ratio,
}

// ---------------------------------------------------------------------------
// Building blocks
// ---------------------------------------------------------------------------

/// Sum of the per-order variable costs. Saturates at the Decimal range;
/// `validate_inputs` rejects records where that would happen.
pub fn variable_order_costs(inputs: &CalculationInputs) -> Money {
    inputs
        .cogs
        .saturating_add(inputs.shipping_cost)
        .saturating_add(inputs.payment_fees)
        .saturating_add(inputs.handling_cost)
}

/// Profit on ad spend.
///
/// With zero spend the result is `Infinite` for a positive gross profit and
/// `0` otherwise, so a loss with no spend also reports `0`.
pub fn calculate_poas(gross_profit: Money, ad_spend: Money) -> Ratio {
    Ratio::of(gross_profit, ad_spend)
}

/// Return on ad spend. Same zero-spend policy as [`calculate_poas`], keyed
/// on revenue.
pub fn calculate_roas(revenue: Money, ad_spend: Money) -> Ratio {
    Ratio::of(revenue, ad_spend)
}

// ---------------------------------------------------------------------------
// calculate_all
// ---------------------------------------------------------------------------

/// Derive every profitability metric from one input record.
pub fn calculate_all(inputs: &CalculationInputs) -> CalculationOutputs {
    let variable_order_costs = variable_order_costs(inputs);
    let gross_profit = inputs.revenue.saturating_sub(variable_order_costs);

    let poas = calculate_poas(gross_profit, inputs.ad_spend);
    let poas_percentage = poas.scale(dec!(100));
    let roas = calculate_roas(inputs.revenue, inputs.ad_spend);

    let contribution_margin = gross_profit.saturating_sub(inputs.ad_spend);
    let net_profit = inputs
        .fixed_costs
        .map(|fixed| contribution_margin.saturating_sub(fixed));

    CalculationOutputs {
        variable_order_costs,
        gross_profit,
        poas,
        poas_percentage,
        contribution_margin,
        net_profit,
        roas,
    }
}

impl CalculationInputs {
    /// Same record with a different ad spend. Used for what-if sweeps.
    pub fn with_ad_spend(&self, ad_spend: Money) -> Self {
        CalculationInputs {
            ad_spend,
            ..self.clone()
        }
    }
}

impl Default for CalculationInputs {
    fn default() -> Self {
        CalculationInputs {
            revenue: Decimal::ZERO,
            ad_spend: Decimal::ZERO,
            cogs: Decimal::ZERO,
            shipping_cost: Decimal::ZERO,
            payment_fees: Decimal::ZERO,
            handling_cost: Decimal::ZERO,
            fixed_costs: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_month() -> CalculationInputs {
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

    #[test]
    fn test_calculate_all_golden_case() {
        let out = calculate_all(&store_month());
        assert_eq!(
            out,
            CalculationOutputs {
                variable_order_costs: dec!(6500),
                gross_profit: dec!(3500),
                poas: Ratio::Finite(dec!(1.75)),
                poas_percentage: Ratio::Finite(dec!(175)),
                contribution_margin: dec!(1500),
                net_profit: None,
                roas: Ratio::Finite(dec!(5)),
            }
        );
    }

    #[test]
    fn test_net_profit_with_fixed_costs() {
        let mut input = store_month();
        input.fixed_costs = Some(dec!(500));
        let out = calculate_all(&input);
        assert_eq!(out.net_profit, Some(dec!(1000)));
    }

    #[test]
    fn test_zero_fixed_costs_still_computes_net_profit() {
        // Known-zero fixed costs are not the same as unknown fixed costs
        let mut input = store_month();
        input.fixed_costs = Some(Decimal::ZERO);
        let out = calculate_all(&input);
        assert_eq!(out.net_profit, Some(dec!(1500)));
    }

    #[test]
    fn test_poas_zero_spend_cases() {
        assert_eq!(calculate_poas(dec!(1000), dec!(0)), Ratio::Infinite);
        assert_eq!(calculate_poas(dec!(0), dec!(0)), Ratio::ZERO);
        assert_eq!(calculate_poas(dec!(-500), dec!(0)), Ratio::ZERO);
    }

    #[test]
    fn test_poas_negative_profit() {
        assert_eq!(
            calculate_poas(dec!(-500), dec!(2000)),
            Ratio::Finite(dec!(-0.25))
        );
    }

    #[test]
    fn test_roas_zero_spend_cases() {
        assert_eq!(calculate_roas(dec!(10000), dec!(0)), Ratio::Infinite);
        assert_eq!(calculate_roas(dec!(0), dec!(0)), Ratio::ZERO);
    }

    #[test]
    fn test_zero_spend_propagates_to_percentage() {
        let out = calculate_all(&store_month().with_ad_spend(Decimal::ZERO));
        assert!(out.poas.is_infinite());
        assert!(out.poas_percentage.is_infinite());
        assert!(out.roas.is_infinite());
        assert_eq!(out.contribution_margin, dec!(3500));
    }

    #[test]
    fn test_loss_making_order_book() {
        let input = CalculationInputs {
            revenue: dec!(5000),
            ad_spend: dec!(1000),
            cogs: dec!(4000),
            shipping_cost: dec!(1200),
            payment_fees: dec!(100),
            handling_cost: dec!(200),
            fixed_costs: Some(dec!(300)),
        };
        let out = calculate_all(&input);
        assert_eq!(out.gross_profit, dec!(-500));
        assert_eq!(out.poas, Ratio::Finite(dec!(-0.5)));
        assert_eq!(out.poas_percentage, Ratio::Finite(dec!(-50)));
        assert_eq!(out.contribution_margin, dec!(-1500));
        assert_eq!(out.net_profit, Some(dec!(-1800)));
        assert_eq!(out.roas, Ratio::Finite(dec!(5)));
    }

    #[test]
    fn test_tiny_ad_spend_is_unbounded_not_a_panic() {
        let out = calculate_all(&store_month().with_ad_spend(Decimal::new(1, 28)));
        assert_eq!(out.poas, Ratio::Infinite);
        assert_eq!(out.poas_percentage, Ratio::Infinite);
        assert_eq!(out.roas, Ratio::Infinite);
        assert_eq!(out.gross_profit, dec!(3500));
    }

    #[test]
    fn test_amounts_near_decimal_max_saturate() {
        let input = CalculationInputs {
            revenue: Decimal::MAX,
            ad_spend: dec!(1),
            cogs: Decimal::MAX,
            shipping_cost: Decimal::MAX,
            payment_fees: dec!(0),
            handling_cost: dec!(0),
            fixed_costs: Some(Decimal::MAX),
        };
        let out = calculate_all(&input);
        assert_eq!(out.variable_order_costs, Decimal::MAX);
        assert_eq!(out.gross_profit, Decimal::ZERO);
        assert_eq!(out.net_profit, Some(Decimal::MIN));
    }

    #[test]
    fn test_outputs_serialize_without_net_profit_as_null() {
        let value = serde_json::to_value(calculate_all(&store_month())).unwrap();
        assert!(value["net_profit"].is_null());
        assert_eq!(value["poas"]["kind"], "finite");
    }
}
