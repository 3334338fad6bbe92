//! CLI tool for offline text scanning
//!
//! Runs the full analysis pipeline against local model artifacts without
//! starting the API server.
//!
//! # Usage
//!
//! ```bash
//! # Analyze one text and print the report as JSON
//! scan-text scan "WINNER! Claim your free prize now!"
//!
//! # List the loaded model artifacts
//! scan-text models
//!
//! # Use a non-default config file
//! scan-text --config /etc/spamcheck.toml scan "hello"
//! ```

use clap::{Parser, Subcommand};
use spamcheck_rs::analysis::AnalysisEngine;
use spamcheck_rs::config::Config;
use spamcheck_rs::model::ModelRegistry;
use std::path::Path;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "scan-text")]
#[command(about = "Scan texts with local spam models", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "spamcheck.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one text and print the full report
    Scan {
        /// Text to analyze
        text: String,
    },
    /// List loaded model artifacts
    Models,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = if Path::new(&cli.config).exists() {
        Config::from_file(&cli.config)?
    } else {
        Config::default()
    };

    let registry = ModelRegistry::load(Path::new(&config.models.dir), &config.models.primary)?;

    match cli.command {
        Commands::Scan { text } => {
            let engine = AnalysisEngine::new(Arc::new(registry), (&config.analysis).into())?;
            let report = engine.analyze(&text)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Models => {
            let primary_name = registry.primary().name.clone();

            println!("{:<24} {:<22} {:<8} Capabilities", "Name", "Kind", "Primary");
            println!("{:-<80}", "");

            for m in registry.models() {
                let primary = if m.name == primary_name { "yes" } else { "" };
                println!(
                    "{:<24} {:<22} {:<8} {}",
                    m.name,
                    m.kind,
                    primary,
                    m.profile.describe()
                );
            }

            println!("\nTotal: {} model(s)", registry.len());
        }
    }

    Ok(())
}
