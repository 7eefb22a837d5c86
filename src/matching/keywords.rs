use std::collections::BTreeSet;

// Common English filler plus words that show up in every job ad.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "have", "in", "is",
    "it", "of", "on", "or", "our", "that", "the", "this", "to", "we", "will", "with", "you",
    "your", "experience", "years", "role", "team", "work", "working", "strong", "ability",
    "knowledge", "skills", "using", "plus", "etc",
];

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '+' | '#' | '.')
}

/// Extract normalized keywords: lower-cased, at least two characters, stop
/// words removed. `c++`, `c#` and `node.js` survive as single tokens.
pub fn extract_keywords(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !is_token_char(c))
        .map(|raw| raw.trim_matches('.').to_lowercase())
        .filter(|token| token.chars().count() >= 2)
        .filter(|token| token.chars().any(char::is_alphanumeric))
        .filter(|token| !STOP_WORDS.contains(&token.as_str()))
        .collect()
}

/// Percentage of job keywords found in the proof text.
///
/// `None` when the job description has no usable keywords.
pub fn keyword_overlap_score(proof: &str, job: &str) -> Option<f64> {
    let wanted = extract_keywords(job);
    if wanted.is_empty() {
        return None;
    }
    let offered = extract_keywords(proof);
    let matched = wanted.intersection(&offered).count();

    tracing::debug!(
        wanted = wanted.len(),
        matched,
        "keyword overlap between proof and job description"
    );

    Some(matched as f64 / wanted.len() as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_lowercases_and_dedups() {
        let keywords = extract_keywords("Rust rust RUST Tokio");
        assert_eq!(
            keywords.into_iter().collect::<Vec<_>>(),
            vec!["rust".to_string(), "tokio".to_string()]
        );
    }

    #[test]
    fn test_extract_drops_stop_words_and_short_tokens() {
        let keywords = extract_keywords("We are looking for a Go engineer with 5 years experience");
        assert!(keywords.contains("go"));
        assert!(keywords.contains("engineer"));
        assert!(keywords.contains("looking"));
        assert!(!keywords.contains("we"));
        assert!(!keywords.contains("5"));
        assert!(!keywords.contains("years"));
    }

    #[test]
    fn test_extract_keeps_symbol_tokens() {
        let keywords = extract_keywords("C++, C# and Node.js.");
        assert!(keywords.contains("c++"));
        assert!(keywords.contains("c#"));
        assert!(keywords.contains("node.js"));
    }

    #[test]
    fn test_overlap_full_match() {
        let score = keyword_overlap_score("Built services in Rust on Postgres", "rust postgres");
        assert_eq!(score, Some(100.0));
    }

    #[test]
    fn test_overlap_partial_match() {
        let score = keyword_overlap_score("Rust CLI tools", "rust kubernetes").unwrap();
        assert!((score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_overlap_no_match() {
        assert_eq!(keyword_overlap_score("gardening", "rust kafka"), Some(0.0));
    }

    #[test]
    fn test_overlap_empty_job() {
        assert_eq!(keyword_overlap_score("rust", "the and of"), None);
        assert_eq!(keyword_overlap_score("rust", ""), None);
    }
}
