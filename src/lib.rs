pub mod candidates;
pub mod config;
pub mod matching;
pub mod output;
pub mod scoring;
