use std::io::IsTerminal;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{Width, terminal_size};

use crate::candidates::ScoredCandidate;
use crate::scoring::FitResult;

const EMPTY_RANKING: &str = "No candidates found.";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a probability as a percentage with one decimal: 0.924 -> "92.4%"
pub fn format_probability(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn colored_score(score: u8, padded: &str) -> String {
    if score >= 75 {
        padded.green().bold().to_string()
    } else if score >= 50 {
        padded.yellow().bold().to_string()
    } else {
        padded.red().bold().to_string()
    }
}

/// Format ranked candidates as a table: Index, Score, Probability, Name, Source.
/// No headers. Derived skills are marked with `~` after the score.
pub fn format_ranked_table(candidates: &[ScoredCandidate], use_colors: bool) -> String {
    if candidates.is_empty() {
        return EMPTY_RANKING.to_string();
    }

    let term_width = get_terminal_width();

    // Index "99." + space, score "100~" in 4, probability "100.0%" in 6
    let index_width = 3;
    let score_width = 4;
    let prob_width = 6;
    let separator = "  ";

    candidates
        .iter()
        .enumerate()
        .map(|(idx, c)| {
            let index_str = format!("{:>2}.", idx + 1);
            let marker = if c.skills_derived { "~" } else { "" };
            let score_str = format!("{}{}", c.result.score, marker);
            let score_padded = format!("{:>width$}", score_str, width = score_width);
            let prob_padded = format!(
                "{:>width$}",
                format_probability(c.result.probability),
                width = prob_width
            );

            let fixed_width = index_width + 1 + score_width + prob_width + separator.len() * 3
                + c.source.chars().count();

            let name = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate_name(&c.name, width - fixed_width)
                } else {
                    truncate_name(&c.name, 20)
                }
            } else {
                c.name.clone()
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    colored_score(c.result.score, &score_padded),
                    separator,
                    prob_padded,
                    separator,
                    name.bold(),
                    separator,
                    c.source.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, score_padded, separator, prob_padded, separator, name, separator,
                    c.source
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranked candidates as tab-separated values for scripting
/// Columns: score, probability (4 decimals), name, source (no headers, no colors)
pub fn format_tsv(candidates: &[ScoredCandidate]) -> String {
    candidates
        .iter()
        .map(|c| {
            format!(
                "{}\t{:.4}\t{}\t{}",
                c.result.score, c.result.probability, c.name, c.source
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line view of one result: score, probability, per-category
/// contributions and explanation lines.
pub fn format_detail(name: Option<&str>, result: &FitResult, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let heading = match name {
        Some(n) => format!("{}  fit {}/100", n, result.score),
        None => format!("Fit score: {}/100", result.score),
    };
    lines.push(if use_colors {
        heading.bold().to_string()
    } else {
        heading
    });
    lines.push(format!(
        "  Probability: {}",
        format_probability(result.probability)
    ));

    lines.push("  Breakdown:".to_string());
    for c in &result.contributions {
        let clamped = if result.adjusted.contains(&c.category) {
            " (clamped)"
        } else {
            ""
        };
        lines.push(format!(
            "    {:<12}{:>6.1} x {:>5.1}% = {:>5.1}{}",
            c.category.label(),
            c.value,
            c.weight_share * 100.0,
            c.points,
            clamped
        ));
    }

    if !result.explanations.is_empty() {
        lines.push("  Notes:".to_string());
        for line in &result.explanations {
            let bullet = format!("    - {}", line);
            lines.push(if use_colors {
                bullet.cyan().to_string()
            } else {
                bullet
            });
        }
    }

    lines.join("\n")
}

/// Pretty JSON for any serializable output
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
}
