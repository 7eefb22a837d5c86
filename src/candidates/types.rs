use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::matching::keyword_overlap_score;
use crate::scoring::{Breakdown, FitResult};

pub const REPORT_VERSION: u32 = 1;

/// A batch of candidates for one role, as read from YAML or JSON.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CandidateFile {
    /// Job description, used to derive skills from proof text
    #[serde(default)]
    pub job: Option<String>,
    pub candidates: Vec<CandidateEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CandidateEntry {
    pub name: String,
    /// May be omitted when both `proof` and the file's `job` are present
    #[serde(default)]
    pub skills: Option<f64>,
    pub experience: f64,
    pub education: f64,
    pub location: f64,
    pub salary: f64,
    pub culture: f64,
    #[serde(default)]
    pub reliability: Option<f64>,
    /// Free text describing what the candidate has done
    #[serde(default)]
    pub proof: Option<String>,
}

/// Skills sub-score and where it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkillsSource {
    Given(f64),
    Derived(f64),
}

impl SkillsSource {
    pub fn value(self) -> f64 {
        match self {
            SkillsSource::Given(v) | SkillsSource::Derived(v) => v,
        }
    }
}

/// Resolve the skills sub-score: an explicit value wins, otherwise it is
/// derived from keyword overlap between proof text and job description.
pub fn resolve_skills(
    skills: Option<f64>,
    proof: Option<&str>,
    job: Option<&str>,
) -> Result<SkillsSource> {
    if let Some(value) = skills {
        return Ok(SkillsSource::Given(value));
    }
    match (proof, job) {
        (Some(proof), Some(job)) => match keyword_overlap_score(proof, job) {
            Some(value) => Ok(SkillsSource::Derived(value)),
            None => bail!("skills missing and the job description has no usable keywords"),
        },
        _ => bail!("skills missing; provide a skills score or both proof text and a job description"),
    }
}

impl CandidateEntry {
    pub fn to_breakdown(&self, job: Option<&str>) -> Result<(Breakdown, SkillsSource)> {
        let skills = resolve_skills(self.skills, self.proof.as_deref(), job)?;
        let breakdown = Breakdown {
            skills: skills.value(),
            experience: self.experience,
            education: self.education,
            location: self.location,
            salary: self.salary,
            culture: self.culture,
            reliability: self.reliability,
        };
        Ok((breakdown, skills))
    }
}

/// One candidate after scoring.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub name: String,
    pub source: String, // file the candidate came from
    pub skills_derived: bool,
    #[serde(flatten)]
    pub result: FitResult,
}

/// JSON report written by `rank --output`.
#[derive(Debug, Clone, Serialize)]
pub struct RankReport<'a> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub results: &'a [ScoredCandidate],
}

impl<'a> RankReport<'a> {
    pub fn new(results: &'a [ScoredCandidate]) -> Self {
        Self {
            version: REPORT_VERSION,
            generated_at: Utc::now(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> CandidateEntry {
        CandidateEntry {
            name: "Ada".to_string(),
            skills: Some(85.0),
            experience: 75.0,
            education: 60.0,
            location: 30.0,
            salary: 40.0,
            culture: 50.0,
            reliability: None,
            proof: None,
        }
    }

    #[test]
    fn test_explicit_skills_win() {
        let mut e = entry();
        e.proof = Some("nothing relevant".to_string());
        let (b, source) = e.to_breakdown(Some("rust tokio")).unwrap();
        assert_eq!(b.skills, 85.0);
        assert_eq!(source, SkillsSource::Given(85.0));
    }

    #[test]
    fn test_skills_derived_from_proof() {
        let mut e = entry();
        e.skills = None;
        e.proof = Some("Shipped a Rust service on tokio".to_string());
        let (b, source) = e.to_breakdown(Some("rust tokio kafka postgres")).unwrap();
        assert!((b.skills - 50.0).abs() < 1e-9);
        assert!(matches!(source, SkillsSource::Derived(_)));
    }

    #[test]
    fn test_missing_skills_without_job_fails() {
        let mut e = entry();
        e.skills = None;
        e.proof = Some("Rust".to_string());
        let err = e.to_breakdown(None).unwrap_err().to_string();
        assert!(err.contains("skills missing"));
    }

    #[test]
    fn test_missing_skills_with_empty_job_fails() {
        let mut e = entry();
        e.skills = None;
        e.proof = Some("Rust".to_string());
        assert!(e.to_breakdown(Some("the and")).is_err());
    }

    #[test]
    fn test_reliability_carried_through() {
        let mut e = entry();
        e.reliability = Some(80.0);
        let (b, _) = e.to_breakdown(None).unwrap();
        assert_eq!(b.reliability, Some(80.0));
    }

    #[test]
    fn test_parse_candidate_file_yaml() {
        let yaml = r#"
job: "Rust backend engineer"
candidates:
  - name: Ada
    skills: 85
    experience: 75
    education: 60
    location: 30
    salary: 40
    culture: 50
  - name: Linus
    experience: 90
    education: 40
    location: 80
    salary: 70
    culture: 60
    reliability: 95
    proof: "Rust kernels"
"#;
        let file: CandidateFile = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(file.job.as_deref(), Some("Rust backend engineer"));
        assert_eq!(file.candidates.len(), 2);
        assert!(file.candidates[1].skills.is_none());
        assert_eq!(file.candidates[1].reliability, Some(95.0));
    }

    #[test]
    fn test_parse_rejects_unknown_field() {
        let json = r#"{"candidates": [{"name": "A", "experience": 1, "education": 1,
            "location": 1, "salary": 1, "culture": 1, "charisma": 100}]}"#;
        let result: Result<CandidateFile, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
