use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lexigrade_config::Config;
use lexigrade_lang_english::EnglishPipeline;

pub mod report;

#[cfg(test)]
mod tests;

#[derive(Parser)]
#[command(
    name = "lexigrade",
    about = "CEFR vocabulary classification and text difficulty scoring"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify each distinct word of a text by CEFR level
    Classify {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,
        /// Include aggregate statistics in the output
        #[arg(long)]
        stats: bool,
    },
    /// Score the overall difficulty of a text
    Score {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,
        /// Genre tag to adjust the score with, repeatable
        #[arg(long = "genre")]
        genres: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut pipeline = EnglishPipeline::from_config(&Config::new());
    tracing::info!("English pipeline ready");

    match cli.command {
        Command::Classify { file, stats } => {
            let text = read_input(file.as_deref())?;
            tracing::info!("Classifying {} bytes of input", text.len());
            let report = report::classify(&mut pipeline, &text, stats);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Score { file, genres } => {
            let text = read_input(file.as_deref())?;
            tracing::info!("Scoring {} bytes of input", text.len());
            let genres = (!genres.is_empty()).then_some(genres);
            let report = report::score(&mut pipeline, &text, genres.as_deref());
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
