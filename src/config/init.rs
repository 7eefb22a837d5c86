use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, Config, OutputConfig};
use crate::scoring::{validate_scoring, CalibrationModel, InputPolicy, ScoringConfig};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

fn parse_policy(input: &str) -> Option<InputPolicy> {
    match input.trim().to_lowercase().as_str() {
        "clamp" | "c" => Some(InputPolicy::Clamp),
        "reject" | "r" => Some(InputPolicy::Reject),
        _ => None,
    }
}

fn parse_top(input: &str) -> Result<Option<usize>, String> {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    match input.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(Some(n)),
        Err(_) => Err("must be a whole number or 'all'".to_string()),
    }
}

fn prompt_coefficient(name: &str, default: &str) -> Result<f64> {
    loop {
        let input = prompt_with_default(name, default)?;
        match input.parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(v),
            _ => println!("  Invalid: must be a finite number. Try again."),
        }
    }
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the suggested config file path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("proof-fit configuration");
    println!("=======================");
    println!();

    println!("Sub-scores are expected in [0, 100]. Out-of-range values can be clamped or rejected.");
    let input_policy = loop {
        let input = prompt_with_default("Input policy (clamp/reject)", "clamp")?;
        match parse_policy(&input) {
            Some(policy) => break policy,
            None => println!("  Invalid: answer 'clamp' or 'reject'. Try again."),
        }
    };

    println!();
    println!("Calibration maps a score to a probability with 1 / (1 + e^-(a * score + b)).");
    println!("Without it the probability is score / 100.");
    let calibration = if prompt_yes_no("Configure calibration?", false)? {
        loop {
            let model = CalibrationModel {
                a: prompt_coefficient("  Slope a", "0.1")?,
                b: prompt_coefficient("  Intercept b", "-5")?,
            };
            let candidate = ScoringConfig {
                input_policy: None,
                calibration: Some(model),
            };
            match validate_scoring(&candidate) {
                Ok(()) => break Some(model),
                Err(errors) => {
                    for error in errors {
                        println!("  Invalid: {}", error);
                    }
                }
            }
        }
    } else {
        None
    };

    println!();
    let top = loop {
        let input = prompt_with_default("Rows shown by `rank` (number or 'all')", "all")?;
        match parse_top(&input) {
            Ok(top) => break top,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = Config {
        scoring: Some(ScoringConfig {
            input_policy: Some(input_policy),
            calibration,
        }),
        output: top.map(|top| OutputConfig { top: Some(top) }),
    };

    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    tracing::info!(path = %config_path.display(), "config written");
    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `proof-fit rank <files>` to get started.");

    Ok(())
}
