use super::breakdown::{Breakdown, MAX_SUB_SCORE, MIN_SUB_SCORE};
use super::config::ScoringConfig;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref model) = config.calibration {
        if !model.a.is_finite() {
            errors.push(format!("scoring.calibration.a: must be finite, got {}", model.a));
        } else if model.a <= 0.0 {
            errors.push(format!(
                "scoring.calibration.a: must be positive so higher scores map to higher probabilities, got {}",
                model.a
            ));
        }
        if !model.b.is_finite() {
            errors.push(format!("scoring.calibration.b: must be finite, got {}", model.b));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check every present sub-score is a finite number in [0, 100].
pub fn validate_breakdown(breakdown: &Breakdown) -> Result<(), Vec<String>> {
    let errors: Vec<String> = breakdown
        .present()
        .filter_map(|(category, value)| {
            if value.is_nan() {
                Some(format!("{}: not a number", category))
            } else if !(MIN_SUB_SCORE..=MAX_SUB_SCORE).contains(&value) {
                Some(format!("{}: {} is outside [0, 100]", category, value))
            } else {
                None
            }
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
