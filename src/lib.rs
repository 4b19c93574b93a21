//! Deterministic mapping from a batch of social-media posts to a short
//! three-track composition.
//!
//! Core modules, in data-flow order:
//! - [`aggregate`] - Per-item metric columns and batch sums
//! - [`tempo`] - Tempo and note duration from the sums
//! - [`scale`] - Fixed pitch scales and nearest-value quantization
//! - [`sentiment`] - Polarity reduction and the velocity/spacing tables
//! - [`sequence`] - Three notes per post on a sentiment-driven time cursor
//! - [`composition`] - Packaging, and [`composition::compose`] for the whole pipeline
//!
//! ### Supporting Modules
//!
//! - [`error`] - Error taxonomy of the core
//! - [`config`] - Scale and track-name configuration
//! - [`source`] - Loading captured posts, synthetic batches
//! - [`midi`] - Standard MIDI File encoding
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use tweetsong::{composition, config, midi, source};
//! use tweetsong::sentiment::LexiconScorer;
//! use std::path::Path;
//!
//! let batch = source::load_batch(Path::new("posts.jsonl"), &LexiconScorer::default())?;
//! let outcome = composition::compose(&batch, &config::ComposerConfig::default())?;
//! println!("tempo {} with {} notes", outcome.composition.tempo, outcome.composition.events.len());
//! midi::write_midi(&outcome.composition, Path::new("posts.mid"))?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Mapping
//!
//! - Overall sentiment above 20 plays at 75 bpm, above 10 at 65, else 55.
//! - 12000+ characters in total give 10-beat notes, 11000+ give 6, else 4.
//! - Post length minus 40 snaps to a C/G scale; `(count + 1) * 50` snaps
//!   retweets to E and likes to G.
//! - Positive posts are loud and land on the same beat as the previous one;
//!   neutral posts advance one beat, negative posts three.
//!
//! ## Error Handling
//!
//! The core returns [`error::ComposeError`]; I/O-facing functions return
//! `anyhow::Result` with context. An empty batch is always an error.

pub mod aggregate;
pub mod composition;
pub mod config;
pub mod error;
pub mod midi;
pub mod scale;
pub mod sentiment;
pub mod sequence;
pub mod source;
pub mod tempo;
