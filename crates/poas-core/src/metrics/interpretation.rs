use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Ratio;

/// Qualitative tier for a POAS value.
///
/// Display text and colours are left to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoasStatus {
    Critical,
    Warning,
    Good,
    Excellent,
}

impl fmt::Display for PoasStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PoasStatus::Critical => "critical",
            PoasStatus::Warning => "warning",
            PoasStatus::Good => "good",
            PoasStatus::Excellent => "excellent",
        };
        f.write_str(s)
    }
}

/// Classify a POAS. Lower bounds are inclusive: 2.0 is excellent, 1.4 is
/// good, 1.0 is warning. An infinite POAS is excellent.
pub fn interpret_poas(poas: impl Into<Ratio>) -> PoasStatus {
    let poas = poas.into();
    match poas {
        p if p.at_least(dec!(2.0)) => PoasStatus::Excellent,
        p if p.at_least(dec!(1.4)) => PoasStatus::Good,
        p if p.at_least(dec!(1.0)) => PoasStatus::Warning,
        _ => PoasStatus::Critical,
    }
}
