use serde::{Deserialize, Serialize};

/// Scoring configuration.
///
/// Base weights are fixed; the configurable parts are how out-of-range
/// sub-scores are treated and the optional calibration model.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   input_policy: reject
///   calibration:
///     a: 0.1
///     b: -5
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// How sub-scores outside [0, 100] (or NaN) are handled (default: clamp)
    #[serde(default)]
    pub input_policy: Option<InputPolicy>,

    /// Logistic calibration coefficients. Without them the probability is score / 100.
    #[serde(default)]
    pub calibration: Option<CalibrationModel>,
}

impl ScoringConfig {
    pub fn policy(&self) -> InputPolicy {
        self.input_policy.unwrap_or_default()
    }
}

/// Treatment of sub-scores outside [0, 100].
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Force values into [0, 100]; NaN reads as 0
    #[default]
    Clamp,
    /// Fail the evaluation, listing every offending field
    Reject,
}

/// Logistic model `p = 1 / (1 + e^-(a * score + b))`.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CalibrationModel {
    pub a: f64,
    pub b: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();
        assert!(config.input_policy.is_none());
        assert!(config.calibration.is_none());
        assert_eq!(config.policy(), InputPolicy::Clamp);
    }

    #[test]
    fn test_scoring_config_serde_roundtrip() {
        let config = ScoringConfig {
            input_policy: Some(InputPolicy::Reject),
            calibration: Some(CalibrationModel { a: 0.1, b: -5.0 }),
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_full_scoring_config_parse() {
        let yaml = r#"
input_policy: reject
calibration:
  a: 0.1
  b: -5
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.policy(), InputPolicy::Reject);
        assert_eq!(config.calibration, Some(CalibrationModel { a: 0.1, b: -5.0 }));
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, ScoringConfig::default());
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result: Result<ScoringConfig, _> = serde_saphyr::from_str("input_policy: ignore\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<ScoringConfig, _> = serde_saphyr::from_str("weights: {}\n");
        assert!(result.is_err());
    }
}
