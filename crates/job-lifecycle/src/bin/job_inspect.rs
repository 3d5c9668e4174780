//! Inspect Job and Pod manifests offline
//!
//! Run with: cargo run --bin job-inspect -- [OPTIONS] <COMMAND>

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use job_lifecycle::{
    config::{Config, OutputFormat},
    inspect::{load_jobs, load_pods, read_manifest, JobReport, PodOrderReport},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Check Job terminal state and order failed pods", long_about = None)]
struct Cli {
    /// Log level (debug, info, warn, error); overrides JOB_INSPECT_LOG_LEVEL
    #[arg(short, long)]
    log_level: Option<String>,

    /// Output format (text, json); overrides JOB_INSPECT_OUTPUT
    #[arg(short, long)]
    output: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether each Job has reached Complete or Failed
    Finished {
        /// Job manifests (YAML or JSON, single object or List)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Sort Pods by the probe time of their first True condition
    SortPods {
        /// Pod manifest (YAML or JSON, single object or List)
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
    debug!("Loaded configuration: {:?}", config);

    match cli.command {
        Commands::Finished { files } => {
            let mut reports = Vec::new();
            for file in &files {
                let text = read_manifest(file)
                    .with_context(|| format!("Failed to read {}", file.display()))?;
                let jobs = load_jobs(&text)
                    .with_context(|| format!("Failed to parse Jobs from {}", file.display()))?;
                info!("Loaded {} job(s) from {}", jobs.len(), file.display());
                reports.extend(jobs.iter().map(JobReport::from_job));
            }

            match config.output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
                OutputFormat::Text => {
                    for report in &reports {
                        println!("{}", report);
                    }
                }
            }
        }
        Commands::SortPods { file } => {
            let text = read_manifest(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let mut pods = load_pods(&text)
                .with_context(|| format!("Failed to parse Pods from {}", file.display()))?;
            info!("Loaded {} pod(s) from {}", pods.len(), file.display());

            let report = PodOrderReport::from_pods(&mut pods);
            match config.output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => println!("{}", report),
            }
        }
    }

    Ok(())
}
