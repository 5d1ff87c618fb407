use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tribune::{
    aggregate_directory, score_directory, write_stance_file, AggregateConfig, ChunkTiming,
    HashEmbedder, ReferenceSet, StanceScorer,
};

#[derive(Parser)]
#[command(name = "tribune")]
#[command(author, version, about = "Debate timeline fusion pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score transcription files in a directory and write the batch stance file
    Stance {
        /// Directory containing per-chunk transcription (.txt) files
        dir: PathBuf,

        /// Output filename, written inside the directory
        #[arg(long, default_value = "stance_analysis.json")]
        output: String,

        /// Embedding dimension for the built-in hashing embedder
        #[arg(long, default_value = "256")]
        embedding_dim: usize,

        /// JSON file with custom reference statements per category
        #[arg(long)]
        references: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Merge chunk transcripts, diarization, and stance results into one timeline
    Aggregate {
        /// Directory containing processed audio chunks
        dir: PathBuf,

        /// Output filename, written inside the directory
        #[arg(long, default_value = "debate_data.json")]
        output: String,

        /// Chunk window length in seconds
        #[arg(long, default_value = "10.0")]
        window_secs: f64,

        /// Chunk hop (stride) in seconds
        #[arg(long, default_value = "9.0")]
        hop_secs: f64,

        /// Batch stance filename to look for inside the directory
        #[arg(long, default_value = "stance_analysis.json")]
        stance_file: String,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Stance {
            dir,
            output,
            embedding_dim,
            references,
            verbose,
        } => {
            setup_logging(verbose);
            run_stance(dir, output, embedding_dim, references)
        }
        Commands::Aggregate {
            dir,
            output,
            window_secs,
            hop_secs,
            stance_file,
            verbose,
        } => {
            setup_logging(verbose);
            run_aggregate(dir, output, window_secs, hop_secs, stance_file)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn run_stance(
    dir: PathBuf,
    output: String,
    embedding_dim: usize,
    references: Option<PathBuf>,
) -> Result<()> {
    let references = match references {
        Some(path) => ReferenceSet::from_file(&path)
            .context("Failed to load custom reference statements")?,
        None => ReferenceSet::default(),
    };

    let scorer = StanceScorer::new(HashEmbedder::new(embedding_dim), &references);
    let records = score_directory(&scorer, &dir)?;

    let scored = records
        .iter()
        .filter(|r| matches!(r, tribune::io::StanceRecord::Scored(_)))
        .count();
    info!(
        "Scored {} of {} transcription files",
        scored,
        records.len()
    );

    let output_path = dir.join(&output);
    write_stance_file(&records, &output_path)?;
    info!("Stance results written to {:?}", output_path);
    Ok(())
}

fn run_aggregate(
    dir: PathBuf,
    output: String,
    window_secs: f64,
    hop_secs: f64,
    stance_file: String,
) -> Result<()> {
    let config = AggregateConfig {
        timing: ChunkTiming {
            window_secs,
            hop_secs,
        },
        stance_file,
        ..AggregateConfig::default()
    };

    info!("Aggregating chunk data from {:?}", dir);
    let document = aggregate_directory(&dir, &config)?;

    let output_path = dir.join(&output);
    document.write_json(&output_path)?;
    info!("Timeline written to {:?}", output_path);

    let stats = &document.statistics;
    println!("Summary");
    println!("=======");
    println!("Total chunks: {}", stats.total_chunks);
    println!("Duration: {:.1}s", stats.total_duration);
    println!(
        "Speakers: {} ({})",
        stats.speaker_count,
        stats.speakers.join(", ")
    );
    println!("Transcribed chunks: {}", stats.chunks_with_transcription);
    println!("Diarized chunks: {}", stats.chunks_with_diarization);
    println!("Stance analyzed chunks: {}", stats.chunks_with_stance);

    Ok(())
}
