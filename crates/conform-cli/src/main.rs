//! conform CLI tool.
//!
//! Usage:
//! ```bash
//! conform check --graph graph.json --config conform.toml
//! conform dump --graph graph.json --namespace "App.Domain.*"
//! conform init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

/// Architecture conformance checker for compiled symbol graphs
#[derive(Parser)]
#[command(name = "conform")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run conformance rules against a graph document
    Check {
        /// Path to the graph JSON document
        #[arg(short, long)]
        graph: PathBuf,

        /// Path to the rule configuration (default: conform.toml)
        #[arg(short, long, default_value = "conform.toml")]
        config: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names)
        #[arg(long)]
        rules: Option<String>,

        /// Abort evaluation after this many milliseconds; remaining rules
        /// are reported as not run
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Dump every symbol matched by a selection (for debugging predicates)
    Dump {
        /// Path to the graph JSON document
        #[arg(short, long)]
        graph: PathBuf,

        /// Namespace pattern ("A.B" exact, "A.B.*" subtree)
        #[arg(short, long)]
        namespace: String,

        /// Restrict to one symbol kind (class, interface, method, property)
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Write a starter conform.toml
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for conformance reports.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("conform: {e:#}");
            std::process::exit(2);
        }
    }
}

fn run(command: Commands) -> Result<i32> {
    match command {
        Commands::Check {
            graph,
            config,
            format,
            rules,
            timeout_ms,
        } => commands::check::run(&graph, &config, format, rules.as_deref(), timeout_ms),
        Commands::Dump {
            graph,
            namespace,
            kind,
        } => commands::dump::run(&graph, &namespace, kind.as_deref()),
        Commands::Init { force } => commands::init::run(force),
    }
}
