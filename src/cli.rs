//! # Command-Line Interface Module
//!
//! Clap derive definitions for the `tweetsong` binary.
//!
//! ## Commands
//!
//! - `compose`: Turn a capture file into a composition (and optionally MIDI)
//! - `stats`: Show batch sums and the tempo/duration they select
//! - `generate`: Write a synthetic capture file
//! - `completion`: Print a shell completion script
//!
//! ## Examples
//!
//! ```bash
//! tweetsong generate -n 100 --seed 7 -o nhs.jsonl
//! tweetsong compose nhs.jsonl -o nhs.mid
//! RUST_LOG=debug tweetsong stats nhs.jsonl
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "tweetsong")]
#[command(about = "Tweetsong: turn a batch of social-media posts into a short multi-track MIDI piece")]
#[command(version)]
pub struct Args {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compose a piece from a capture file
    ///
    /// Reads posts (JSON array or JSON lines), scores their sentiment,
    /// derives tempo and note length from the batch totals and places three
    /// notes per post. Prints a summary of the batch.
    Compose {
        /// Capture file with one post object per line, or a JSON array
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,

        /// Write a Standard MIDI File here
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Composer config (scales, track name). Defaults to the user config
        /// file when present.
        #[arg(long, env = "TWEETSONG_CONFIG", value_hint = clap::ValueHint::FilePath)]
        config: Option<PathBuf>,

        /// Print the full composition as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Show batch totals and the tempo and duration they select
    Stats {
        /// Capture file with one post object per line, or a JSON array
        #[arg(value_hint = clap::ValueHint::FilePath)]
        input: PathBuf,
    },

    /// Write a synthetic capture file for demos and testing
    Generate {
        /// Number of posts
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,

        /// Seed for the generator; random when omitted
        #[arg(long)]
        seed: Option<u64>,

        /// Destination file; stdout when omitted
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    ///
    /// Usage: tweetsong completion bash > ~/.local/share/bash-completion/completions/tweetsong
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}
