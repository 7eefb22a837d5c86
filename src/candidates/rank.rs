use std::cmp::Ordering;
use std::path::PathBuf;

use super::types::{CandidateFile, ScoredCandidate, SkillsSource};
use crate::scoring::{evaluate, ScoringConfig};

/// Score every candidate in the loaded files.
///
/// Returns all per-candidate errors at once, prefixed with
/// `<file>: candidates[i] (<name>)`.
pub fn score_candidates(
    files: &[(PathBuf, CandidateFile)],
    config: &ScoringConfig,
) -> Result<Vec<ScoredCandidate>, Vec<String>> {
    let mut scored = Vec::new();
    let mut errors = Vec::new();

    for (path, file) in files {
        let source = path.display().to_string();
        for (i, entry) in file.candidates.iter().enumerate() {
            let outcome = entry
                .to_breakdown(file.job.as_deref())
                .and_then(|(breakdown, skills)| {
                    evaluate(&breakdown, config).map(|result| (result, skills))
                });

            match outcome {
                Ok((result, skills)) => {
                    let skills_derived = matches!(skills, SkillsSource::Derived(_));
                    if skills_derived {
                        tracing::debug!(
                            candidate = %entry.name,
                            skills = skills.value(),
                            "derived skills from proof text"
                        );
                    }
                    scored.push(ScoredCandidate {
                        name: entry.name.clone(),
                        source: source.clone(),
                        skills_derived,
                        result,
                    });
                }
                Err(e) => errors.push(format!(
                    "{}: candidates[{}] ({}): {}",
                    source, i, entry.name, e
                )),
            }
        }
    }

    if errors.is_empty() {
        Ok(scored)
    } else {
        Err(errors)
    }
}

/// Sort by score descending, then probability descending, then name ascending.
pub fn rank(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(|a, b| {
        let score_cmp = b.result.score.cmp(&a.result.score);
        if score_cmp != Ordering::Equal {
            return score_cmp;
        }
        let prob_cmp = b
            .result
            .probability
            .partial_cmp(&a.result.probability)
            .unwrap_or(Ordering::Equal);
        if prob_cmp != Ordering::Equal {
            return prob_cmp;
        }
        a.name.cmp(&b.name)
    });
}
