pub mod keywords;

pub use keywords::{extract_keywords, keyword_overlap_score};
