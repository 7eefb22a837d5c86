use super::types::{CandidateFile, RankReport};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::path::{Path, PathBuf};

/// Expand file arguments into concrete paths.
///
/// Arguments containing glob metacharacters are expanded (sorted, as `glob`
/// yields them); plain paths are passed through unchanged. A pattern that
/// matches nothing is an error.
pub fn expand_inputs(args: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for arg in args {
        if arg.contains(&['*', '?', '['][..]) {
            let before = paths.len();
            for entry in glob::glob(arg).with_context(|| format!("Invalid glob pattern '{}'", arg))? {
                paths.push(entry.with_context(|| format!("Failed to read match for '{}'", arg))?);
            }
            if paths.len() == before {
                anyhow::bail!("No candidate files match '{}'", arg);
            }
        } else {
            paths.push(PathBuf::from(arg));
        }
    }
    paths.dedup();
    Ok(paths)
}

/// Load a candidate file, choosing the parser by extension.
///
/// `.json` is read as JSON; anything else (`.yaml`, `.yml`, no extension) as YAML.
pub fn load_candidate_file(path: &Path) -> Result<CandidateFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read candidate file at {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let file: CandidateFile = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse candidates: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse candidates: invalid YAML in {}", path.display()))?
    };

    tracing::info!(
        path = %path.display(),
        candidates = file.candidates.len(),
        "loaded candidate file"
    );

    Ok(file)
}

/// Save a ranking report to a JSON file atomically.
pub fn save_report(path: &Path, report: &RankReport<'_>) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, report).context("Failed to serialize ranking report")?;

    file.commit()
        .with_context(|| format!("Failed to save ranking report to {}", path.display()))?;

    Ok(())
}
