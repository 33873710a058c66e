use std::io::BufRead;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use khaters_core::PredictOptions;
use khaters_model::{DirSource, ModelState};

mod display;

#[derive(Parser)]
#[command(name = "khaters", version, about = "Hate-speech severity classifier")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Classify one or more texts (or stdin lines when no text is given).
    Classify {
        /// Exported model directory, or a base URL with the `http` feature.
        #[arg(long, env = "KHATERS_MODEL", default_value = "./model")]
        model: String,

        /// Emit one JSON object per input instead of the human card.
        #[arg(long)]
        json: bool,

        /// Offensive-head threshold (strict; equality routes past normal).
        #[arg(long, default_value_t = 0.5)]
        off_threshold: f32,

        /// Target gate for the hate branch.
        #[arg(long, default_value_t = 0.45)]
        target_gate: f32,

        /// Threat gate for L2 over L1 (inclusive).
        #[arg(long, default_value_t = 0.45)]
        l2_threat_gate: f32,

        /// Drop the diagnostic block from results.
        #[arg(long)]
        no_debug: bool,

        /// Texts to classify.
        texts: Vec<String>,
    },

    /// Print model metadata and vocabulary statistics.
    Info {
        /// Exported model directory, or a base URL with the `http` feature.
        #[arg(long, env = "KHATERS_MODEL", default_value = "./model")]
        model: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    match Cli::parse().command {
        Command::Classify {
            model,
            json,
            off_threshold,
            target_gate,
            l2_threat_gate,
            no_debug,
            texts,
        } => {
            let state = load_model(&model).await?;
            let opts = PredictOptions {
                offensive_threshold: off_threshold,
                target_gate,
                l2_threat_gate,
                debug: !no_debug,
            };

            let texts = if texts.is_empty() {
                read_stdin_lines()?
            } else {
                texts
            };

            for text in &texts {
                let prediction = state.predict(text, &opts);
                if json {
                    println!("{}", serde_json::to_string(&prediction)?);
                } else {
                    display::print_prediction_card(text, &prediction);
                }
            }
        }

        Command::Info { model } => {
            let state = load_model(&model).await?;
            let meta = state.meta();
            let (nmin, nmax) = meta.ngram_range();
            println!("dim         {}", meta.dim);
            println!("ngram range {nmin}..={nmax}");
            println!("vocabulary  {} n-grams", state.vocab_len());
            println!("targets     {}", meta.targets.join(", "));
            println!("fine        {}", meta.fine.join(", "));
            println!("labels      {}", meta.labels.join(", "));
        }
    }

    Ok(())
}

/// Load a model from a local directory, or from an HTTP(S) base URL when
/// built with the `http` feature.
async fn load_model(spec: &str) -> anyhow::Result<ModelState> {
    let start = Instant::now();

    #[cfg(feature = "http")]
    let state = if spec.starts_with("http://") || spec.starts_with("https://") {
        ModelState::load(&khaters_model::HttpSource::new(spec.to_string()))
            .await
            .with_context(|| format!("loading model from {spec}"))?
    } else {
        ModelState::load(&DirSource::new(spec))
            .await
            .with_context(|| format!("loading model from {spec}"))?
    };

    #[cfg(not(feature = "http"))]
    let state = ModelState::load(&DirSource::new(spec))
        .await
        .with_context(|| format!("loading model from {spec}"))?;

    tracing::info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        model = spec,
        "model ready"
    );
    Ok(state)
}

fn read_stdin_lines() -> anyhow::Result<Vec<String>> {
    let stdin = std::io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}
