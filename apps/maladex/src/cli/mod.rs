//! # Maladex CLI Module
//!
//! This module implements the CLI interface for Maladex.
//!
//! ## Available Commands
//!
//! - `build` - Build a knowledge graph from an association table
//! - `diagnose` - Rank candidate diseases for a symptom list
//! - `status` - Show graph statistics
//! - `export` - Export graph to JSON or GraphViz DOT

mod commands;

use crate::config::Config;
use clap::{Parser, Subcommand};
use maladex_core::MaladexError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Maladex - Diagnostic Ranking Pipeline
///
/// Ranks candidate diagnoses for a set of observed symptoms by searching a
/// weighted disease-symptom knowledge graph. Lower scores mean more likely.
#[derive(Parser, Debug)]
#[command(name = "maladex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a config file (default: ./maladex.toml if present)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a knowledge graph from a disease-symptom association table
    Build {
        /// Path to the input CSV table (Diseases | Symptoms columns)
        #[arg(short, long)]
        table: PathBuf,

        /// Output graph path (default: config `graph`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rank candidate diseases for a symptom list
    Diagnose {
        /// Path to the knowledge graph (default: config `graph`)
        #[arg(short, long)]
        graph: Option<PathBuf>,

        /// Path to the symptoms file, one symptom per line
        #[arg(short, long)]
        symptoms: PathBuf,

        /// Output ranking path (default: config `diagnosis_output`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show graph statistics
    Status {
        /// Path to the knowledge graph (default: config `graph`)
        #[arg(short, long)]
        graph: Option<PathBuf>,
    },

    /// Export the graph for inspection or visualization
    Export {
        /// Path to the knowledge graph (default: config `graph`)
        #[arg(short, long)]
        graph: Option<PathBuf>,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Export format (json, dot)
        #[arg(short = 't', long, default_value = "json")]
        format: String,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), MaladexError> {
    let config = Config::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Commands::Build { table, output } => {
            cmd_build(&table, &output.unwrap_or_else(|| config.graph.clone()))
        }
        Commands::Diagnose {
            graph,
            symptoms,
            output,
        } => cmd_diagnose(
            &graph.unwrap_or_else(|| config.graph.clone()),
            &symptoms,
            &output.unwrap_or_else(|| config.diagnosis_output.clone()),
        ),
        Commands::Status { graph } => {
            cmd_status(&graph.unwrap_or_else(|| config.graph.clone()), json_mode)
        }
        Commands::Export {
            graph,
            output,
            format,
        } => cmd_export(
            &graph.unwrap_or_else(|| config.graph.clone()),
            &output,
            &format,
        ),
    }
}
