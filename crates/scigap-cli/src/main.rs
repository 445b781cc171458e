//! Scigap CLI - Command-line interface
//!
//! Usage:
//!   scigap analyze <file.pdf>
//!   scigap score <analysis.json>
//!   scigap gaps <analysis.json>

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use scigap_analysis::DocumentAnalyzer;
use scigap_core::{AppConfig, DocumentAnalysis, ValidationRequest};
use scigap_extractor::RuleBasedNer;
use scigap_remote::create_gap_client;
use scigap_text::PdfExtractor;

#[derive(Parser)]
#[command(name = "scigap")]
#[command(about = "Scientific-article diversity analysis CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract sections and entity tables from a PDF
    Analyze {
        /// Path to the PDF file
        file: PathBuf,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Score a saved analysis result for diversity
    Score {
        /// Path to a saved analysis JSON file
        file: PathBuf,
        /// Research gap text to score alongside the tables
        #[arg(long)]
        research_gaps: Option<String>,
    },
    /// Ask the configured language model for research gaps
    Gaps {
        /// Path to a saved analysis JSON file
        file: PathBuf,
    },
}

fn load_analysis(path: &PathBuf) -> anyhow::Result<DocumentAnalysis> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

fn build_analyzer(config: &AppConfig) -> DocumentAnalyzer {
    DocumentAnalyzer::new(Arc::new(RuleBasedNer::new()), config.analysis.clone())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = AppConfig::from_env().unwrap_or_default();

    match cli.command {
        Commands::Analyze { file, pretty } => {
            let extracted = PdfExtractor::new().extract_file(&file)?;
            let analysis = build_analyzer(&config).analyze_text(&extracted.text)?;

            let output = if pretty {
                serde_json::to_string_pretty(&analysis)?
            } else {
                serde_json::to_string(&analysis)?
            };
            println!("{output}");
        }
        Commands::Score {
            file,
            research_gaps,
        } => {
            let analysis = load_analysis(&file)?;
            let request = ValidationRequest {
                research_gaps,
                authors: Some(analysis.authors),
                institutions: Some(analysis.institutions),
                technologies: Some(analysis.technologies),
                sections: Some(analysis.sections),
            };

            let report = build_analyzer(&config).score(&request)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Gaps { file } => {
            let analysis = load_analysis(&file)?;
            let gap_model = create_gap_client(&config.llm)?;
            let gaps = gap_model.identify_gaps(&analysis.sections).await?;
            println!("{gaps}");
        }
    }

    Ok(())
}
