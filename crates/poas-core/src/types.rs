use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.10 = 10%). Never as percentages.
pub type Rate = Decimal;

/// Multiples (e.g., 5.0x ROAS)
pub type Multiple = Decimal;

/// A ratio whose denominator may be zero.
///
/// Decimal arithmetic has no infinity, so the "unbounded" outcome of a
/// division by zero is carried as its own variant instead of a panic.
/// Serialized as `{"kind":"finite","value":"1.75"}` or `{"kind":"infinite"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Ratio {
    Finite(Decimal),
    Infinite,
}

impl Ratio {
    pub const ZERO: Ratio = Ratio::Finite(Decimal::ZERO);

    /// `numerator / denominator`, with the zero-denominator policy used by
    /// every spend-based metric: a positive numerator over zero is
    /// `Infinite`, a zero or negative numerator over zero is `0`.
    ///
    /// A positive quotient too large for a Decimal is also `Infinite`; a
    /// negative one is clamped to `Decimal::MIN`.
    pub fn of(numerator: Decimal, denominator: Decimal) -> Self {
        if denominator.is_zero() {
            if numerator > Decimal::ZERO {
                Ratio::Infinite
            } else {
                Ratio::ZERO
            }
        } else {
            match numerator.checked_div(denominator) {
                Some(q) => Ratio::Finite(q),
                None if same_sign(numerator, denominator) => Ratio::Infinite,
                None => Ratio::Finite(Decimal::MIN),
            }
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Ratio::Infinite)
    }

    /// The finite value, if any.
    pub fn finite(&self) -> Option<Decimal> {
        match self {
            Ratio::Finite(v) => Some(*v),
            Ratio::Infinite => None,
        }
    }

    /// Multiply by a non-negative factor. Infinity absorbs the factor.
    pub fn scale(self, factor: Decimal) -> Self {
        match self {
            Ratio::Finite(v) => Ratio::Finite(v.saturating_mul(factor)),
            Ratio::Infinite => Ratio::Infinite,
        }
    }

    /// True when the ratio is at or above `threshold`.
    pub fn at_least(&self, threshold: Decimal) -> bool {
        match self {
            Ratio::Finite(v) => *v >= threshold,
            Ratio::Infinite => true,
        }
    }
}

fn same_sign(a: Decimal, b: Decimal) -> bool {
    a.is_sign_negative() == b.is_sign_negative()
}

/// `numerator / denominator` clamped to `Decimal::MIN..=Decimal::MAX` when
/// the quotient overflows. `denominator` must be non-zero.
pub(crate) fn clamped_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or_else(|| {
        if same_sign(numerator, denominator) {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

impl From<Decimal> for Ratio {
    fn from(value: Decimal) -> Self {
        Ratio::Finite(value)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ratio::Finite(v) => write!(f, "{}", v.normalize()),
            Ratio::Infinite => write!(f, "∞"),
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
