use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use proof_fit::candidates::{self, SkillsSource};
use proof_fit::config::Config;
use proof_fit::scoring::{self, Breakdown, ScoringConfig};
use proof_fit::output;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_OUTPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScoreFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RankFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a single breakdown given on the command line
    Score {
        /// Skills sub-score; derived from --proof and --job when omitted
        #[arg(long)]
        skills: Option<f64>,
        #[arg(long)]
        experience: f64,
        #[arg(long)]
        education: f64,
        #[arg(long)]
        location: f64,
        #[arg(long)]
        salary: f64,
        #[arg(long)]
        culture: f64,
        /// Optional; carries no weight when omitted
        #[arg(long)]
        reliability: Option<f64>,
        /// File with the candidate's proof text
        #[arg(long, requires = "job")]
        proof: Option<PathBuf>,
        /// File with the job description
        #[arg(long, requires = "proof")]
        job: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "table")]
        format: ScoreFormat,
    },
    /// Score and rank candidates from YAML/JSON files (globs allowed)
    Rank {
        /// Candidate files or glob patterns
        #[arg(required = true)]
        inputs: Vec<String>,
        #[arg(long, value_enum, default_value = "table")]
        format: RankFormat,
        /// Show only the best N candidates
        #[arg(long)]
        top: Option<usize>,
        /// Also write a JSON report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Create a config file interactively
    Init {
        /// Suggested location for the config file
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "proof-fit")]
#[command(about = "Candidate/role fit scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/proof-fit/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "proof_fit=debug" } else { "proof_fit=warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_text(path: &Path, what: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Failed to read {} at {}: {}", what, path.display(), e);
            std::process::exit(EXIT_INPUT);
        }
    }
}

/// Load the config file and validate its scoring section, exiting on failure.
fn load_settings(config_path: Option<PathBuf>) -> (Config, ScoringConfig) {
    let config = match proof_fit::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let effective_scoring = config.scoring.clone().unwrap_or_default();
    if let Err(errors) = scoring::validate_scoring(&effective_scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    (config, effective_scoring)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);
    let use_colors = output::should_use_colors();

    match cli.command {
        Commands::Score {
            skills,
            experience,
            education,
            location,
            salary,
            culture,
            reliability,
            proof,
            job,
            format,
        } => {
            let (_, effective_scoring) = load_settings(config_path);
            let proof_text = proof.as_deref().map(|p| read_text(p, "proof text"));
            let job_text = job.as_deref().map(|p| read_text(p, "job description"));

            let skills = match candidates::resolve_skills(
                skills,
                proof_text.as_deref(),
                job_text.as_deref(),
            ) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Input error: {}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };
            if let SkillsSource::Derived(value) = skills {
                tracing::info!(skills = value, "skills derived from keyword overlap");
            }

            let breakdown = Breakdown {
                skills: skills.value(),
                experience,
                education,
                location,
                salary,
                culture,
                reliability,
            };

            let result = match scoring::evaluate(&breakdown, &effective_scoring) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Input error: {}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            match format {
                ScoreFormat::Table => {
                    println!("{}", output::format_detail(None, &result, use_colors));
                }
                ScoreFormat::Json => match output::format_json(&result) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Output error: {:#}", e);
                        std::process::exit(EXIT_OUTPUT);
                    }
                },
            }
        }
        Commands::Rank {
            inputs,
            format,
            top,
            output: report_path,
        } => {
            let (config, effective_scoring) = load_settings(config_path);
            let paths = match candidates::expand_inputs(&inputs) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Input error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };

            let mut files = Vec::with_capacity(paths.len());
            for path in paths {
                match candidates::load_candidate_file(&path) {
                    Ok(file) => files.push((path, file)),
                    Err(e) => {
                        eprintln!("Input error: {:#}", e);
                        std::process::exit(EXIT_INPUT);
                    }
                }
            }

            let mut scored = match candidates::score_candidates(&files, &effective_scoring) {
                Ok(s) => s,
                Err(errors) => {
                    eprintln!("Candidate errors:");
                    for error in errors {
                        eprintln!("  - {}", error);
                    }
                    std::process::exit(EXIT_INPUT);
                }
            };

            candidates::rank(&mut scored);

            let limit = top.or_else(|| config.output.as_ref().and_then(|o| o.top));
            if let Some(limit) = limit {
                scored.truncate(limit);
            }

            if let Some(ref path) = report_path {
                let report = candidates::RankReport::new(&scored);
                if let Err(e) = candidates::save_report(path, &report) {
                    eprintln!("Output error: {:#}", e);
                    std::process::exit(EXIT_OUTPUT);
                }
                tracing::info!(path = %path.display(), "ranking report written");
            }

            match format {
                RankFormat::Table => {
                    if cli.verbose && !scored.is_empty() {
                        for c in &scored {
                            println!(
                                "{}",
                                output::format_detail(Some(&c.name), &c.result, use_colors)
                            );
                            println!();
                        }
                    } else {
                        println!("{}", output::format_ranked_table(&scored, use_colors));
                    }
                }
                RankFormat::Tsv => {
                    let tsv = output::format_tsv(&scored);
                    if !tsv.is_empty() {
                        println!("{}", tsv);
                    }
                }
                RankFormat::Json => match output::format_json(&scored) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Output error: {:#}", e);
                        std::process::exit(EXIT_OUTPUT);
                    }
                },
            }

            tracing::debug!(
                candidates = scored.len(),
                elapsed = ?start_time.elapsed(),
                "ranking complete"
            );
        }
        Commands::Init { path } => {
            if let Err(e) = proof_fit::config::init::run_init_wizard(path) {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
