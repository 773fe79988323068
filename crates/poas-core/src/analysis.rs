use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::metrics::calculator::{calculate_all, CalculationInputs, CalculationOutputs};
use crate::metrics::interpretation::{interpret_poas, PoasStatus};
use crate::metrics::targets::{
    calculate_roas_targets, calculate_target_poas, RoasTargets, TargetPoasResult,
};
use crate::types::{with_metadata, ComputationOutput, Multiple};
use crate::validation::{validate_inputs, validate_target_poas, ValidationPolicy};
use crate::PoasResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One campaign period plus an optional POAS goal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignInput {
    pub inputs: CalculationInputs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_poas: Option<Multiple>,
}

/// Everything a report needs for one campaign period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignAnalysis {
    pub outputs: CalculationOutputs,
    pub status: PoasStatus,
    pub roas_targets: RoasTargets,
    /// Present when a target POAS was supplied
    pub target: Option<TargetPoasResult>,
}

// ---------------------------------------------------------------------------
// analyze_campaign
// ---------------------------------------------------------------------------

/// Validate a campaign period and run the full metric set over it: core
/// metrics, tier, ROAS targets and, when requested, the target-POAS solve.
pub fn analyze_campaign(
    input: &CampaignInput,
    policy: &ValidationPolicy,
) -> PoasResult<ComputationOutput<CampaignAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_inputs(&input.inputs, policy)?;
    if let Some(target) = input.target_poas {
        validate_target_poas(target)?;
    }

    let outputs = calculate_all(&input.inputs);
    let status = interpret_poas(outputs.poas);
    let roas_targets = calculate_roas_targets(input.inputs.revenue, outputs.gross_profit);
    let target = input
        .target_poas
        .map(|t| calculate_target_poas(outputs.gross_profit, input.inputs.ad_spend, t));

    if input.inputs.ad_spend.is_zero() {
        warnings.push(
            "Ad spend is zero: POAS and ROAS are reported as unbounded sentinels".to_string(),
        );
    }
    if !input.inputs.ad_spend.is_zero() && (outputs.poas.is_infinite() || outputs.roas.is_infinite())
    {
        warnings.push(
            "Ad spend is too small relative to revenue: POAS/ROAS exceed the decimal range and are reported as unbounded"
                .to_string(),
        );
    }
    if outputs.gross_profit < Decimal::ZERO {
        warnings.push(format!(
            "Gross profit is negative ({}): variable costs exceed revenue",
            outputs.gross_profit
        ));
    }
    if outputs.contribution_margin < Decimal::ZERO {
        warnings.push(format!(
            "Contribution margin is negative ({}): ad spend exceeds gross profit",
            outputs.contribution_margin
        ));
    }
    if roas_targets.all_impossible() {
        warnings.push(
            "No margin target (10%, 15%, 20%) is reachable at any ROAS with the current cost structure"
                .to_string(),
        );
    }

    tracing::debug!(
        poas = %outputs.poas,
        %status,
        warnings = warnings.len(),
        "campaign analysed"
    );

    let analysis = CampaignAnalysis {
        outputs,
        status,
        roas_targets,
        target,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "POAS / ROAS campaign profitability analysis",
        &serde_json::json!({
            "revenue": input.inputs.revenue.to_string(),
            "ad_spend": input.inputs.ad_spend.to_string(),
            "fixed_costs_supplied": input.inputs.fixed_costs.is_some(),
            "target_poas": input.target_poas.map(|t| t.to_string()),
            "allow_zero_ad_spend": policy.allow_zero_ad_spend,
        }),
        warnings,
        elapsed,
        analysis,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
