pub mod breakdown;
pub mod config;
pub mod factors;
pub mod engine;
pub mod explain;
pub mod validation;

pub use breakdown::Breakdown;
pub use config::*;
pub use factors::{Category, BASE_WEIGHTS};
pub use engine::{calibrate, compute_fit_score, evaluate, CategoryContribution, FitResult};
pub use explain::{explain, explanations};
pub use validation::{validate_breakdown, validate_scoring};
