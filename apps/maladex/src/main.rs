//! # Maladex - Diagnostic Ranking Pipeline
//!
//! The main binary for the Maladex symptom-to-disease ranking engine.
//!
//! This application provides:
//! - Knowledge graph construction from association tables
//! - Diagnosis ranking from observed symptoms
//! - Graph inspection and export
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                apps/maladex (THE BINARY)             │
//! │                                                      │
//! │  ┌─────────────┐   ┌──────────────┐   ┌──────────┐  │
//! │  │    CLI      │   │  File I/O    │   │  Config  │  │
//! │  │   (clap)    │   │ (csv, graph) │   │  (toml)  │  │
//! │  └──────┬──────┘   └──────┬───────┘   └────┬─────┘  │
//! │         │                 │                │        │
//! │         └─────────────────┼────────────────┘        │
//! │                           ▼                         │
//! │                  ┌─────────────────┐                │
//! │                  │  maladex-core   │                │
//! │                  │   (THE LOGIC)   │                │
//! │                  └─────────────────┘                │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Build the knowledge graph from an association table
//! maladex build --table knowledge.csv --output knowledge.mldx
//!
//! # Rank diagnoses for a symptom list
//! maladex diagnose --graph knowledge.mldx --symptoms symptoms.txt
//!
//! # Inspect the graph
//! maladex status --graph knowledge.mldx
//! ```

use clap::Parser;
use maladex::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing — MALADEX_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("MALADEX_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "maladex=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Maladex startup banner.
fn print_banner() {
    println!(
        r#"
  ███╗   ███╗ █████╗ ██╗      █████╗ ██████╗ ███████╗██╗  ██╗
  ████╗ ████║██╔══██╗██║     ██╔══██╗██╔══██╗██╔════╝╚██╗██╔╝
  ██╔████╔██║███████║██║     ███████║██║  ██║█████╗   ╚███╔╝
  ██║╚██╔╝██║██╔══██║██║     ██╔══██║██║  ██║██╔══╝   ██╔██╗
  ██║ ╚═╝ ██║██║  ██║███████╗██║  ██║██████╔╝███████╗██╔╝ ██╗
  ╚═╝     ╚═╝╚═╝  ╚═╝╚══════╝╚═╝  ╚═╝╚═════╝ ╚══════╝╚═╝  ╚═╝

  Diagnostic Ranking Pipeline v{}

  Deterministic • Weighted • Reproducible
"#,
        env!("CARGO_PKG_VERSION")
    );
}
