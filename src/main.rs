//! # Tweetsong
//!
//! Turns a captured batch of social-media posts into a short three-track
//! piece. Post length, retweets and likes become pitches snapped to fixed
//! scales; sentiment sets loudness and spacing; batch totals set tempo and
//! note length.
//!
//! ## Usage
//!
//! ```bash
//! # Make some input
//! tweetsong generate -n 100 --seed 1 -o posts.jsonl
//!
//! # Compose and write MIDI
//! tweetsong compose posts.jsonl -o posts.mid
//!
//! # Only the totals
//! tweetsong stats posts.jsonl
//! ```

mod cli;
mod completion;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::info;
use std::fs;
use std::io::{self, Write};
use tweetsong::aggregate::{aggregate, AggregateStats};
use tweetsong::composition::compose;
use tweetsong::sentiment::LexiconScorer;
use tweetsong::tempo::{self, GlobalParams};
use tweetsong::{config, midi, source};

/// Print the batch totals the way a reader wants to see them.
fn print_summary(out: &mut dyn Write, posts: usize, stats: &AggregateStats, params: &GlobalParams) -> io::Result<()> {
    writeln!(out, "posts:               {posts}")?;
    writeln!(out, "total length:        {}", stats.total_length)?;
    writeln!(out, "total likes:         {}", stats.total_likes)?;
    writeln!(out, "total retweets:      {}", stats.total_retweets)?;
    writeln!(out, "overall sentiment:   {}", stats.total_sentiment)?;
    writeln!(out, "tempo:               {} bpm", params.tempo)?;
    writeln!(out, "note duration:       {} beats", params.duration)
}

/// Main entry point for Tweetsong.
///
/// Logging is controlled via `RUST_LOG`:
/// - `RUST_LOG=debug tweetsong compose posts.jsonl`
/// - `RUST_LOG=tweetsong::sequence=trace tweetsong compose posts.jsonl`
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    match args.command {
        cli::Command::Compose { input, output, config: config_path, json } => {
            let composer_config = config::load_config(config_path.as_deref())?;
            let batch = source::load_batch(&input, &LexiconScorer::default())?;
            let outcome = compose(&batch, &composer_config)
                .with_context(|| format!("Could not compose {}", input.display()))?;
            let composition = &outcome.composition;

            // keep stdout clean for the JSON document
            let params = GlobalParams { tempo: composition.tempo, duration: composition.duration };
            if json {
                print_summary(&mut io::stderr(), batch.len(), &outcome.stats, &params)?;
                println!("{}", serde_json::to_string_pretty(composition)?);
            } else {
                print_summary(&mut io::stdout(), batch.len(), &outcome.stats, &params)?;
                println!("notes:               {}", composition.events.len());
            }

            if let Some(path) = output {
                info!("Writing MIDI to {}", path.display());
                midi::write_midi(composition, &path)?;
                eprintln!("Wrote {}", path.display());
            }
        }
        cli::Command::Stats { input } => {
            let batch = source::load_batch(&input, &LexiconScorer::default())?;
            let (stats, _) = aggregate(&batch)
                .with_context(|| format!("Could not summarize {}", input.display()))?;
            print_summary(&mut io::stdout(), batch.len(), &stats, &tempo::select(&stats))?;
        }
        cli::Command::Generate { count, seed, output } => {
            let seed = seed.unwrap_or_else(rand::random);
            info!("Generating {count} posts with seed {seed}");
            let posts = source::generate_posts(count, seed);

            let mut lines = String::new();
            for post in &posts {
                lines.push_str(&serde_json::to_string(post)?);
                lines.push('\n');
            }

            match output {
                Some(path) => fs::write(&path, lines)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => io::stdout().write_all(lines.as_bytes())?,
            }
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(&shell), &mut cmd);
        }
    }

    Ok(())
}
