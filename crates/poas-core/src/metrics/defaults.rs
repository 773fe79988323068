use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

/// Ratios and per-order amounts used to suggest missing cost fields.
///
/// The per-order amounts are calibrated to a single reference currency and
/// must be scaled by the caller before use with any other currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionPolicy {
    /// COGS as a share of revenue
    pub cogs_ratio: Rate,
    /// Payment fees as a share of revenue
    pub payment_fee_ratio: Rate,
    pub shipping_per_order: Money,
    pub handling_per_order: Money,
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        SuggestionPolicy {
            cogs_ratio: dec!(0.40),
            payment_fee_ratio: dec!(0.02),
            shipping_per_order: dec!(30),
            handling_per_order: dec!(5),
        }
    }
}

/// Suggested values for the four variable cost fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedCosts {
    pub cogs: Money,
    pub payment_fees: Money,
    pub shipping_cost: Money,
    pub handling_cost: Money,
}

/// Suggest cost values from revenue and order count.
///
/// Never looks at values the user already entered; deciding which
/// suggestions to keep is up to the caller.
pub fn suggest_defaults(
    revenue: Money,
    order_count: u32,
    policy: &SuggestionPolicy,
) -> SuggestedCosts {
    let orders = Decimal::from(order_count);
    SuggestedCosts {
        cogs: revenue.saturating_mul(policy.cogs_ratio),
        payment_fees: revenue.saturating_mul(policy.payment_fee_ratio),
        shipping_cost: policy.shipping_per_order.saturating_mul(orders),
        handling_cost: policy.handling_per_order.saturating_mul(orders),
    }
}

/// [`suggest_defaults`] for a single order under the default policy.
pub fn suggest_defaults_for_revenue(revenue: Money) -> SuggestedCosts {
    suggest_defaults(revenue, 1, &SuggestionPolicy::default())
}
