//! Input checks applied before calling the calculation engine.
//!
//! The metric functions are total and will compute a result for any
//! number, including negative amounts and zero spend. Form handlers,
//! API routes and report generators use this module to reject input that
//! should be corrected by the user instead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PoasError;
use crate::metrics::calculator::CalculationInputs;
use crate::metrics::defaults::SuggestedCosts;
use crate::types::{Money, Multiple};
use crate::PoasResult;

/// How strict the boundary is about zero ad spend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Accept `ad_spend == 0` and let the engine report infinite ratios.
    /// Interactive flows reject it; batch reports may tolerate it.
    pub allow_zero_ad_spend: bool,
}

impl ValidationPolicy {
    pub fn interactive() -> Self {
        ValidationPolicy {
            allow_zero_ad_spend: false,
        }
    }

    pub fn batch() -> Self {
        ValidationPolicy {
            allow_zero_ad_spend: true,
        }
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self::interactive()
    }
}

fn non_negative(field: &str, value: Money) -> PoasResult<()> {
    if value < Decimal::ZERO {
        tracing::debug!(field, %value, "rejected negative input");
        return Err(PoasError::invalid(field, "must be zero or greater"));
    }
    Ok(())
}

/// Reject records whose derived totals fall outside the Decimal range, so
/// the calculator never has to saturate a validated record.
fn representable(inputs: &CalculationInputs) -> PoasResult<()> {
    let too_large = |field: &str| {
        tracing::debug!(field, "rejected amounts outside the decimal range");
        PoasError::invalid(field, "amounts too large: total exceeds the supported decimal range")
    };

    let variable_costs = inputs
        .cogs
        .checked_add(inputs.shipping_cost)
        .and_then(|sum| sum.checked_add(inputs.payment_fees))
        .and_then(|sum| sum.checked_add(inputs.handling_cost))
        .ok_or_else(|| too_large("variable_order_costs"))?;
    let gross_profit = inputs
        .revenue
        .checked_sub(variable_costs)
        .ok_or_else(|| too_large("gross_profit"))?;
    let contribution_margin = gross_profit
        .checked_sub(inputs.ad_spend)
        .ok_or_else(|| too_large("contribution_margin"))?;
    if let Some(fixed) = inputs.fixed_costs {
        contribution_margin
            .checked_sub(fixed)
            .ok_or_else(|| too_large("net_profit"))?;
    }
    Ok(())
}

/// Reject negative amounts, totals outside the Decimal range, and zero ad
/// spend unless the policy allows it.
pub fn validate_inputs(inputs: &CalculationInputs, policy: &ValidationPolicy) -> PoasResult<()> {
    non_negative("revenue", inputs.revenue)?;
    non_negative("ad_spend", inputs.ad_spend)?;
    non_negative("cogs", inputs.cogs)?;
    non_negative("shipping_cost", inputs.shipping_cost)?;
    non_negative("payment_fees", inputs.payment_fees)?;
    non_negative("handling_cost", inputs.handling_cost)?;
    if let Some(fixed) = inputs.fixed_costs {
        non_negative("fixed_costs", fixed)?;
    }

    representable(inputs)?;

    if inputs.ad_spend.is_zero() && !policy.allow_zero_ad_spend {
        tracing::debug!("rejected zero ad spend");
        return Err(PoasError::invalid(
            "ad_spend",
            "must be greater than zero to compute POAS and ROAS",
        ));
    }
    Ok(())
}

/// Reject a target POAS of zero or below.
pub fn validate_target_poas(target_poas: Multiple) -> PoasResult<()> {
    if target_poas <= Decimal::ZERO {
        return Err(PoasError::invalid(
            "target_poas",
            format!("must be greater than zero, got {target_poas}"),
        ));
    }
    Ok(())
}

/// A partially filled input form. Every field may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftInputs {
    pub revenue: Option<Money>,
    pub ad_spend: Option<Money>,
    pub cogs: Option<Money>,
    pub shipping_cost: Option<Money>,
    pub payment_fees: Option<Money>,
    pub handling_cost: Option<Money>,
    pub fixed_costs: Option<Money>,
}

impl DraftInputs {
    /// Fill cost fields that are still empty from `suggested`. Values the
    /// user already entered are kept.
    pub fn fill_missing(&mut self, suggested: &SuggestedCosts) {
        self.cogs.get_or_insert(suggested.cogs);
        self.shipping_cost.get_or_insert(suggested.shipping_cost);
        self.payment_fees.get_or_insert(suggested.payment_fees);
        self.handling_cost.get_or_insert(suggested.handling_cost);
    }

    /// Build validated inputs. Revenue and ad spend are required; missing
    /// cost fields count as zero; fixed costs stay optional.
    pub fn into_inputs(self, policy: &ValidationPolicy) -> PoasResult<CalculationInputs> {
        let inputs = CalculationInputs {
            revenue: self
                .revenue
                .ok_or_else(|| PoasError::MissingField("revenue".into()))?,
            ad_spend: self
                .ad_spend
                .ok_or_else(|| PoasError::MissingField("ad_spend".into()))?,
            cogs: self.cogs.unwrap_or_default(),
            shipping_cost: self.shipping_cost.unwrap_or_default(),
            payment_fees: self.payment_fees.unwrap_or_default(),
            handling_cost: self.handling_cost.unwrap_or_default(),
            fixed_costs: self.fixed_costs,
        };
        validate_inputs(&inputs, policy)?;
        Ok(inputs)
    }
}
