// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Seitenwerk: PDF document structure analysis
//
// Entry point. Parses the command line, initialises logging and runs the
// requested command on a tokio runtime.

mod commands;
mod report;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use seitenwerk_core::SmartActionType;

use commands::AnalysisArgs;

#[derive(Parser, Debug)]
#[command(name = "seitenwerk")]
#[command(version, about = "Find blank, duplicate and sideways pages, chapters and tables of contents in PDFs", long_about = None)]
struct Cli {
    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyse a PDF and list recommended actions
    Analyze {
        /// Input PDF file path
        input: PathBuf,

        /// Print the full analysis and actions as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        analysis: AnalysisArgs,
    },

    /// Analyse a PDF and write a cleaned-up copy
    Apply {
        /// Input PDF file path
        input: PathBuf,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// Only apply these action types (default: all recommended)
        #[arg(long = "action")]
        actions: Vec<SmartActionType>,

        #[command(flatten)]
        analysis: AnalysisArgs,
    },

    /// Print the built-in heading and table-of-contents patterns as JSON
    Patterns,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = match cli.command {
        Commands::Analyze {
            input,
            json,
            analysis,
        } => commands::analyze::run(&input, json, &analysis).await,
        Commands::Apply {
            input,
            output,
            actions,
            analysis,
        } => commands::apply::run(&input, &output, &actions, &analysis).await,
        Commands::Patterns => commands::patterns::run(),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "Command failed");
            eprint!("{}", report::ErrorReport(&err));
            ExitCode::FAILURE
        }
    }
}
