use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use poas_core::analysis::{self, CampaignInput};
use poas_core::metrics::calculator::{self, CalculationInputs};
use poas_core::metrics::defaults::{self, SuggestionPolicy};
use poas_core::metrics::interpretation;
use poas_core::metrics::targets::{self, TargetPoasRequest};
use poas_core::sensitivity::{self, SensitivityInput};
use poas_core::validation::ValidationPolicy;
use poas_core::Ratio;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Request shapes that only exist at the JS boundary
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RoasTargetsRequest {
    revenue: Decimal,
    gross_profit: Decimal,
}

#[derive(Deserialize)]
struct SuggestRequest {
    revenue: Decimal,
    #[serde(default = "one_order")]
    order_count: u32,
    #[serde(default)]
    policy: SuggestionPolicy,
}

fn one_order() -> u32 {
    1
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    #[serde(flatten)]
    campaign: CampaignInput,
    #[serde(default)]
    policy: ValidationPolicy,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_all(input_json: String) -> NapiResult<String> {
    let input: CalculationInputs = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = calculator::calculate_all(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_target_poas(input_json: String) -> NapiResult<String> {
    let input: TargetPoasRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    serde_json::to_string(&input.solve()).map_err(to_napi_error)
}

#[napi]
pub fn calculate_roas_targets(input_json: String) -> NapiResult<String> {
    let input: RoasTargetsRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = targets::calculate_roas_targets(input.revenue, input.gross_profit);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn suggest_defaults(input_json: String) -> NapiResult<String> {
    let input: SuggestRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = defaults::suggest_defaults(input.revenue, input.order_count, &input.policy);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Takes a serialized `Ratio` or a bare number/string POAS.
#[napi]
pub fn interpret_poas(poas_json: String) -> NapiResult<String> {
    let poas: Ratio = match serde_json::from_str::<Ratio>(&poas_json) {
        Ok(ratio) => ratio,
        Err(_) => serde_json::from_str::<Decimal>(&poas_json)
            .map(Ratio::from)
            .map_err(to_napi_error)?,
    };
    let status = interpretation::interpret_poas(poas);
    serde_json::to_string(&status).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Composite
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_campaign(input_json: String) -> NapiResult<String> {
    let input: AnalyzeRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        analysis::analyze_campaign(&input.campaign, &input.policy).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn spend_sensitivity(input_json: String) -> NapiResult<String> {
    let input: SensitivityInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = sensitivity::spend_sensitivity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
