pub mod rank;
pub mod storage;
pub mod types;

pub use rank::{rank, score_candidates};
pub use storage::{expand_inputs, load_candidate_file, save_report};
pub use types::{
    resolve_skills, CandidateEntry, CandidateFile, RankReport, ScoredCandidate, SkillsSource,
};
