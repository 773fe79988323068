use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{clamped_div, Money, Multiple, Rate, Ratio};

// ---------------------------------------------------------------------------
// Types — Target POAS
// ---------------------------------------------------------------------------

/// Back-solve request for a desired POAS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPoasRequest {
    pub gross_profit: Money,
    pub ad_spend: Money,
    /// Desired gross profit / ad spend ratio
    pub target_poas: Multiple,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPoasResult {
    /// Highest ad spend that keeps the current gross profit at the target POAS
    pub max_ad_spend: Money,
    /// Gross profit needed to reach the target POAS at the current ad spend
    pub min_gross_profit: Money,
}

// ---------------------------------------------------------------------------
// Types — ROAS targets
// ---------------------------------------------------------------------------

/// The ROAS needed to keep `margin` of revenue after ad spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginTarget {
    pub margin: Rate,
    /// None when the margin cannot be reached at any ROAS
    pub roas: Option<Multiple>,
    pub impossible: bool,
}

/// Break-even ROAS and the ROAS required for 10%, 15% and 20% margins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoasTargets {
    /// ROAS at which ad spend consumes the whole gross profit
    pub breakeven_roas: Ratio,
    pub roas_10: Option<Multiple>,
    pub roas_15: Option<Multiple>,
    pub roas_20: Option<Multiple>,
    pub impossible_10: bool,
    pub impossible_15: bool,
    pub impossible_20: bool,
}

impl RoasTargets {
    /// True when none of the fixed margins can be reached.
    pub fn all_impossible(&self) -> bool {
        self.impossible_10 && self.impossible_15 && self.impossible_20
    }
}

// ---------------------------------------------------------------------------
// Target solver
// ---------------------------------------------------------------------------

/// Maximum ad spend and minimum gross profit for a target POAS.
///
/// A target of zero or below has no meaningful spend ceiling, so
/// `max_ad_spend` is 0 in that case. `min_gross_profit` is always
/// `ad_spend * target_poas`. Non-positive targets are not rejected here;
/// see `crate::validation::validate_target_poas`. Results beyond the
/// Decimal range are clamped to `Decimal::MAX` / `Decimal::MIN`.
pub fn calculate_target_poas(
    gross_profit: Money,
    ad_spend: Money,
    target_poas: Multiple,
) -> TargetPoasResult {
    let max_ad_spend = if target_poas > Decimal::ZERO {
        clamped_div(gross_profit, target_poas)
    } else {
        Decimal::ZERO
    };

    TargetPoasResult {
        max_ad_spend,
        min_gross_profit: ad_spend.saturating_mul(target_poas),
    }
}

impl TargetPoasRequest {
    pub fn solve(&self) -> TargetPoasResult {
        calculate_target_poas(self.gross_profit, self.ad_spend, self.target_poas)
    }
}

// ---------------------------------------------------------------------------
// ROAS targets
// ---------------------------------------------------------------------------

/// Solve `gross_profit - ad_spend = margin * revenue` for `revenue / ad_spend`.
///
/// Infeasible when `gross_profit - margin * revenue <= 0`.
pub fn roas_for_margin(revenue: Money, gross_profit: Money, margin: Rate) -> MarginTarget {
    let denominator = gross_profit.saturating_sub(margin.saturating_mul(revenue));
    if denominator <= Decimal::ZERO {
        MarginTarget {
            margin,
            roas: None,
            impossible: true,
        }
    } else {
        MarginTarget {
            margin,
            roas: Some(clamped_div(revenue, denominator)),
            impossible: false,
        }
    }
}

/// Break-even ROAS plus the ROAS needed for 10%, 15% and 20% margins.
/// Independent of the current ad spend. A break-even ROAS too large for a
/// Decimal is `Infinite`.
pub fn calculate_roas_targets(revenue: Money, gross_profit: Money) -> RoasTargets {
    let breakeven_roas = if gross_profit > Decimal::ZERO {
        Ratio::of(revenue, gross_profit)
    } else {
        Ratio::Infinite
    };

    let m10 = roas_for_margin(revenue, gross_profit, dec!(0.10));
    let m15 = roas_for_margin(revenue, gross_profit, dec!(0.15));
    let m20 = roas_for_margin(revenue, gross_profit, dec!(0.20));

    RoasTargets {
        breakeven_roas,
        roas_10: m10.roas,
        roas_15: m15.roas,
        roas_20: m20.roas,
        impossible_10: m10.impossible,
        impossible_15: m15.impossible,
        impossible_20: m20.impossible,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_target_poas_golden_case() {
        let result = calculate_target_poas(dec!(3500), dec!(2000), dec!(2));
        assert_eq!(
            result,
            TargetPoasResult {
                max_ad_spend: dec!(1750),
                min_gross_profit: dec!(4000),
            }
        );
    }

    #[test]
    fn test_target_poas_zero_target() {
        let result = calculate_target_poas(dec!(3500), dec!(2000), dec!(0));
        assert_eq!(result.max_ad_spend, Decimal::ZERO);
        assert_eq!(result.min_gross_profit, Decimal::ZERO);
    }

    #[test]
    fn test_target_poas_negative_target_passes_through() {
        // Spend ceiling guarded to zero, minimum profit is the plain product
        let result = calculate_target_poas(dec!(3500), dec!(2000), dec!(-1));
        assert_eq!(result.max_ad_spend, Decimal::ZERO);
        assert_eq!(result.min_gross_profit, dec!(-2000));
    }

    #[test]
    fn test_target_poas_tiny_target_clamps() {
        let result = calculate_target_poas(dec!(1000000), dec!(1), Decimal::new(1, 28));
        assert_eq!(result.max_ad_spend, Decimal::MAX);
        assert_eq!(result.min_gross_profit, Decimal::new(1, 28));

        let result = calculate_target_poas(dec!(-1000000), Decimal::MAX, Decimal::new(1, 28));
        assert_eq!(result.max_ad_spend, Decimal::MIN);
    }

    #[test]
    fn test_target_poas_huge_spend_saturates() {
        let result = calculate_target_poas(dec!(3500), Decimal::MAX, dec!(2));
        assert_eq!(result.min_gross_profit, Decimal::MAX);
    }

    #[test]
    fn test_target_poas_request_solve() {
        let req = TargetPoasRequest {
            gross_profit: dec!(3000),
            ad_spend: dec!(1000),
            target_poas: dec!(1.5),
        };
        let result = req.solve();
        assert_eq!(result.max_ad_spend, dec!(2000));
        assert_eq!(result.min_gross_profit, dec!(1500));
    }

    #[test]
    fn test_roas_targets_feasible() {
        // revenue 10000, gross profit 3500
        let t = calculate_roas_targets(dec!(10000), dec!(3500));
        // 10000 / 3500
        assert_eq!(t.breakeven_roas, Ratio::Finite(dec!(10000) / dec!(3500)));
        // 10000 / (3500 - 1000) = 4
        assert_eq!(t.roas_10, Some(dec!(4)));
        // 10000 / (3500 - 1500) = 5
        assert_eq!(t.roas_15, Some(dec!(5)));
        // 10000 / (3500 - 2000) = 6.67
        assert_eq!(t.roas_20, Some(dec!(10000) / dec!(1500)));
        assert!(!t.impossible_10 && !t.impossible_15 && !t.impossible_20);
    }

    #[test]
    fn test_roas_targets_partially_impossible() {
        // Gross margin 15%: the 15% and 20% targets are out of reach
        let t = calculate_roas_targets(dec!(10000), dec!(1500));
        assert_eq!(t.roas_10, Some(dec!(20)));
        assert!(!t.impossible_10);
        assert_eq!(t.roas_15, None);
        assert!(t.impossible_15);
        assert_eq!(t.roas_20, None);
        assert!(t.impossible_20);
        assert!(!t.all_impossible());
    }

    #[test]
    fn test_roas_targets_non_positive_gross_profit() {
        let t = calculate_roas_targets(dec!(10000), dec!(0));
        assert_eq!(t.breakeven_roas, Ratio::Infinite);
        assert!(t.all_impossible());

        let t = calculate_roas_targets(dec!(10000), dec!(-250));
        assert_eq!(t.breakeven_roas, Ratio::Infinite);
        assert!(t.all_impossible());
    }

    #[test]
    fn test_roas_targets_tiny_gross_profit() {
        let t = calculate_roas_targets(dec!(1000000), Decimal::new(1, 28));
        assert_eq!(t.breakeven_roas, Ratio::Infinite);
        assert!(t.all_impossible());
    }

    #[test]
    fn test_roas_targets_near_decimal_max() {
        // MAX / (MAX - 0.1 * MAX) stays finite
        let t = calculate_roas_targets(Decimal::MAX, Decimal::MAX);
        assert_eq!(t.breakeven_roas, Ratio::Finite(dec!(1)));
        assert!(!t.impossible_10);
        assert!(t.roas_10.unwrap() > dec!(1.1) && t.roas_10.unwrap() < dec!(1.12));

        // feasible margin over a tiny denominator clamps the ROAS
        let margin = roas_for_margin(Decimal::MAX, Decimal::new(1, 28), Decimal::ZERO);
        assert!(!margin.impossible);
        assert_eq!(margin.roas, Some(Decimal::MAX));
    }

    #[test]
    fn test_roas_for_margin_inverse() {
        let target = roas_for_margin(dec!(8000), dec!(3000), dec!(0.25));
        let roas = target.roas.unwrap();
        // 8000 / (3000 - 2000) = 8
        assert_eq!(roas, dec!(8));
        assert_eq!(roas * (dec!(3000) - dec!(0.25) * dec!(8000)), dec!(8000));
    }
}
