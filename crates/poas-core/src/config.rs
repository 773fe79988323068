use serde::{Deserialize, Serialize};

use crate::metrics::defaults::SuggestionPolicy;
use crate::validation::ValidationPolicy;
use crate::PoasResult;

/// Overridable engine policy. Every section falls back to its default when
/// omitted, so an empty document is a valid configuration.
///
/// ```yaml
/// suggestions:
///   cogs_ratio: "0.35"
///   shipping_per_order: "4.95"
/// validation:
///   allow_zero_ad_spend: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub suggestions: SuggestionPolicy,
    pub validation: ValidationPolicy,
}

impl EngineConfig {
    pub fn from_yaml_str(s: &str) -> PoasResult<Self> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> PoasResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(EngineConfig::from_yaml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_yaml_overrides_single_field() {
        let cfg = EngineConfig::from_yaml_str(
            "suggestions:\n  shipping_per_order: \"4.95\"\nvalidation:\n  allow_zero_ad_spend: true\n",
        )
        .unwrap();
        assert_eq!(cfg.suggestions.shipping_per_order, dec!(4.95));
        assert_eq!(cfg.suggestions.cogs_ratio, dec!(0.40));
        assert!(cfg.validation.allow_zero_ad_spend);
    }

    #[test]
    fn test_json_config() {
        let cfg = EngineConfig::from_json_str(r#"{"suggestions": {"cogs_ratio": "0.5"}}"#).unwrap();
        assert_eq!(cfg.suggestions.cogs_ratio, dec!(0.5));
        assert!(!cfg.validation.allow_zero_ad_spend);
    }

    #[test]
    fn test_malformed_yaml_is_configuration_error() {
        let err = EngineConfig::from_yaml_str("suggestions: [1, 2").unwrap_err();
        assert!(matches!(err, crate::PoasError::Configuration(_)));
    }
}
