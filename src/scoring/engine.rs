use anyhow::{bail, Result};
use serde::Serialize;

use super::breakdown::Breakdown;
use super::config::{CalibrationModel, InputPolicy, ScoringConfig};
use super::explain::explain;
use super::factors::Category;
use super::validation::validate_breakdown;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryContribution {
    pub category: Category,
    pub value: f64,
    pub weight_share: f64, // base weight / sum of present base weights
    pub points: f64,       // value * weight_share
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitResult {
    pub score: u8,
    pub probability: f64,
    pub explanations: Vec<String>,
    pub contributions: Vec<CategoryContribution>,
    /// Categories whose values were clamped into range before scoring
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub adjusted: Vec<Category>,
}

/// Weighted contribution of every present category, renormalized so the
/// shares sum to 1 over the present keys only.
pub fn contributions(breakdown: &Breakdown) -> Vec<CategoryContribution> {
    let total_weight: f64 = breakdown.present().map(|(c, _)| c.base_weight()).sum();
    if total_weight <= 0.0 {
        return Vec::new();
    }

    breakdown
        .present()
        .map(|(category, value)| {
            let weight_share = category.base_weight() / total_weight;
            CategoryContribution {
                category,
                value,
                weight_share,
                points: value * weight_share,
            }
        })
        .collect()
}

/// Unrounded weighted average over the present categories.
pub fn weighted_score(breakdown: &Breakdown) -> f64 {
    contributions(breakdown).iter().map(|c| c.points).sum()
}

/// Round half up: 62.5 -> 63, 62.49 -> 62.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Fit score in [0, 100].
///
/// Sub-scores are clamped into [0, 100] first (NaN reads as 0), so the result
/// is always in range. Use [`evaluate`] to reject bad input instead.
pub fn compute_fit_score(breakdown: &Breakdown) -> u8 {
    let (sane, _) = breakdown.clamped();
    let rounded = round_half_up(weighted_score(&sane));
    rounded.clamp(0.0, 100.0) as u8
}

/// Map a score to a probability-like value.
///
/// Without a model this is the linear `score / 100`; with one it is the
/// logistic `1 / (1 + e^-(a * score + b))`.
pub fn calibrate(score: f64, model: Option<&CalibrationModel>) -> f64 {
    match model {
        None => score / 100.0,
        Some(m) => 1.0 / (1.0 + (-(m.a * score + m.b)).exp()),
    }
}

/// Score, calibrate and explain one breakdown under the configured input policy.
pub fn evaluate(breakdown: &Breakdown, config: &ScoringConfig) -> Result<FitResult> {
    let (sane, adjusted) = match config.policy() {
        InputPolicy::Reject => {
            if let Err(errors) = validate_breakdown(breakdown) {
                bail!("invalid breakdown: {}", errors.join("; "));
            }
            (*breakdown, Vec::new())
        }
        InputPolicy::Clamp => {
            let (sane, adjusted) = breakdown.clamped();
            for category in &adjusted {
                tracing::warn!(
                    category = %category,
                    original = breakdown.get(*category).unwrap_or(f64::NAN),
                    clamped = sane.get(*category).unwrap_or(f64::NAN),
                    "sub-score outside [0, 100], clamped"
                );
            }
            (sane, adjusted)
        }
    };

    let score = compute_fit_score(&sane);
    let probability = calibrate(f64::from(score), config.calibration.as_ref());
    let explanations = explain(&sane);

    tracing::debug!(score, probability, lines = explanations.len(), "evaluated breakdown");

    Ok(FitResult {
        score,
        probability,
        explanations,
        contributions: contributions(&sane),
        adjusted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(value: f64) -> Breakdown {
        Breakdown {
            skills: value,
            experience: value,
            education: value,
            location: value,
            salary: value,
            culture: value,
            reliability: Some(value),
        }
    }

    fn scenario_one() -> Breakdown {
        Breakdown {
            skills: 80.0,
            experience: 70.0,
            education: 60.0,
            location: 50.0,
            salary: 40.0,
            culture: 30.0,
            reliability: None,
        }
    }

    #[test]
    fn test_skills_and_experience_pull_score_up() {
        let score = compute_fit_score(&scenario_one());
        assert!(score > 50);
        // 80*.30 + 70*.25 + 60*.15 + 50*.10 + 40*.10 + 30*.10 = 62.5
        assert!((weighted_score(&scenario_one()) - 62.5).abs() < 1e-9);
        assert!(score == 62 || score == 63);
    }

    #[test]
    fn test_renormalizes_without_reliability() {
        let b = Breakdown {
            skills: 90.0,
            experience: 10.0,
            education: 40.0,
            location: 70.0,
            salary: 20.0,
            culture: 100.0,
            reliability: None,
        };
        let expected = (90.0 * 0.30
            + 10.0 * 0.25
            + 40.0 * 0.15
            + 70.0 * 0.10
            + 20.0 * 0.10
            + 100.0 * 0.10)
            / 1.0;
        assert!((weighted_score(&b) - expected).abs() < 1e-9);
        let shares: f64 = contributions(&b).iter().map(|c| c.weight_share).sum();
        assert!((shares - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_reliability_only_share() {
        let mut b = full(0.0);
        b.reliability = Some(80.0);
        // 80 * (0.10 / 1.10) = 7.27
        assert_eq!(compute_fit_score(&b), 7);
    }

    #[test]
    fn test_uniform_breakdown_scores_its_value() {
        assert_eq!(compute_fit_score(&full(100.0)), 100);
        assert_eq!(compute_fit_score(&full(0.0)), 0);
        assert_eq!(compute_fit_score(&full(64.0)), 64);
    }

    #[test]
    fn test_score_bounds_on_grid() {
        for value in [0.0, 12.5, 33.3, 49.5, 50.0, 77.7, 99.9, 100.0] {
            let mut b = full(value);
            b.skills = 100.0 - value;
            assert!(compute_fit_score(&b) <= 100);
            b.reliability = None;
            assert!(compute_fit_score(&b) <= 100);
        }
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped() {
        let b = full(250.0);
        assert_eq!(compute_fit_score(&b), 100);
        let b = full(-40.0);
        assert_eq!(compute_fit_score(&b), 0);
        let b = full(f64::NAN);
        assert_eq!(compute_fit_score(&b), 0);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(62.5), 63.0);
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(62.49), 62.0);
        assert_eq!(round_half_up(7.27), 7.0);
        assert_eq!(round_half_up(0.0), 0.0);
    }

    #[test]
    fn test_calibrate_without_model_is_linear() {
        assert_eq!(calibrate(75.0, None), 0.75);
        assert_eq!(calibrate(0.0, None), 0.0);
        assert_eq!(calibrate(150.0, None), 1.5);
    }

    #[test]
    fn test_calibrate_with_model() {
        let model = CalibrationModel { a: 0.1, b: -5.0 };
        let p = calibrate(75.0, Some(&model));
        let expected = 1.0 / (1.0 + (-2.5f64).exp());
        assert!((p - expected).abs() < 1e-12);
        assert!((p - 0.924).abs() < 1e-3);
    }

    #[test]
    fn test_calibrate_is_strictly_increasing() {
        let model = CalibrationModel { a: 0.08, b: -4.0 };
        let mut previous = calibrate(0.0, Some(&model));
        for score in 1..=100 {
            let p = calibrate(score as f64, Some(&model));
            assert!(p > previous);
            previous = p;
        }
    }

    #[test]
    fn test_calibrate_stays_in_open_unit_interval() {
        for model in [
            CalibrationModel { a: 0.1, b: -5.0 },
            CalibrationModel { a: 0.01, b: 3.0 },
            CalibrationModel { a: 0.2, b: -20.0 },
        ] {
            for score in [0.0, 25.0, 50.0, 75.0, 100.0] {
                let p = calibrate(score, Some(&model));
                assert!(p > 0.0 && p < 1.0);
            }
        }
    }

    #[test]
    fn test_evaluate_clamp_policy_reports_adjusted() {
        let mut b = scenario_one();
        b.skills = 120.0;
        let result = evaluate(&b, &ScoringConfig::default()).unwrap();
        assert_eq!(result.adjusted, vec![Category::Skills]);
        assert_eq!(result.contributions[0].value, 100.0);
        assert!(result.score <= 100);
    }

    #[test]
    fn test_evaluate_reject_policy() {
        let mut b = scenario_one();
        b.salary = -1.0;
        b.culture = f64::NAN;
        let config = ScoringConfig {
            input_policy: Some(InputPolicy::Reject),
            calibration: None,
        };
        let err = evaluate(&b, &config).unwrap_err().to_string();
        assert!(err.contains("salary"));
        assert!(err.contains("culture"));
    }

    #[test]
    fn test_evaluate_combines_all_parts() {
        let b = Breakdown {
            skills: 85.0,
            experience: 75.0,
            education: 60.0,
            location: 30.0,
            salary: 40.0,
            culture: 50.0,
            reliability: None,
        };
        let config = ScoringConfig {
            input_policy: None,
            calibration: Some(CalibrationModel { a: 0.1, b: -5.0 }),
        };
        let result = evaluate(&b, &config).unwrap();
        assert_eq!(result.score, compute_fit_score(&b));
        assert_eq!(
            result.probability,
            calibrate(f64::from(result.score), config.calibration.as_ref())
        );
        assert_eq!(result.explanations.len(), 3);
        assert_eq!(result.contributions.len(), 6);
        assert!(result.adjusted.is_empty());
    }
}
