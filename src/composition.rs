//! Composition assembly and the batch-to-composition pipeline.
//!
//! [`compose`] runs the whole data flow: aggregate the batch, pick tempo and
//! duration from the sums, sequence the notes, then package everything into
//! a [`Composition`] for an encoder or player.

use crate::aggregate::{aggregate, AggregateStats, Batch};
use crate::config::ComposerConfig;
use crate::error::ComposeError;
use crate::sequence::{build_sequence, NoteEvent};
use crate::tempo::{self, GlobalParams};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Length, retweet and like tracks.
pub const TRACK_COUNT: u8 = 3;

pub const DEFAULT_TRACK_NAME: &str = "Tweetsong Track";

/// The encoder-agnostic result of one composition run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composition {
    pub track_count: u8,
    pub track_name: String,
    pub tempo: u32,
    pub duration: u32,
    pub events: Vec<NoteEvent>,
}

impl Composition {
    /// Earliest and latest start times, `None` when there are no events.
    pub fn time_span(&self) -> Option<(i64, i64)> {
        let starts = self.events.iter().map(|e| e.start_time);
        Some((starts.clone().min()?, starts.max()?))
    }
}

/// Package already-computed parts. Performs no computation.
#[must_use]
pub fn assemble(params: GlobalParams, track_name: &str, events: Vec<NoteEvent>) -> Composition {
    Composition {
        track_count: TRACK_COUNT,
        track_name: track_name.to_string(),
        tempo: params.tempo,
        duration: params.duration,
        events,
    }
}

/// Everything one run produced, for callers that report on the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeOutcome {
    pub stats: AggregateStats,
    pub final_cursor: i64,
    pub composition: Composition,
}

/// Turn a batch into a composition.
///
/// Pure function of the batch and configuration: the same inputs always give
/// an identical [`Composition`].
///
/// # Errors
///
/// Any [`ComposeError`]; the batch is never partially composed.
///
/// # Examples
///
/// ```
/// use tweetsong::aggregate::{Batch, Item};
/// use tweetsong::composition::compose;
/// use tweetsong::config::ComposerConfig;
/// use tweetsong::sentiment::Sentiment;
///
/// let batch = Batch::new(vec![Item::new("hello world", 1, 2, Sentiment::Neutral)]);
/// let outcome = compose(&batch, &ComposerConfig::default())?;
/// assert_eq!(outcome.composition.events.len(), 3);
/// # Ok::<(), tweetsong::error::ComposeError>(())
/// ```
pub fn compose(batch: &Batch, config: &ComposerConfig) -> Result<ComposeOutcome, ComposeError> {
    config.scales.validate()?;

    let (stats, columns) = aggregate(batch)?;
    let params = tempo::select(&stats);
    info!(
        "Batch of {} posts: length={} likes={} retweets={} sentiment={} -> tempo={} duration={}",
        batch.len(),
        stats.total_length,
        stats.total_likes,
        stats.total_retweets,
        stats.total_sentiment,
        params.tempo,
        params.duration
    );

    let sequence = build_sequence(columns, params.duration, &config.scales)?;
    debug!("Sequenced {} notes, cursor ended at {}", sequence.events.len(), sequence.final_cursor);

    Ok(ComposeOutcome {
        stats,
        final_cursor: sequence.final_cursor,
        composition: assemble(params, &config.track_name, sequence.events),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Item;
    use crate::scale::Scale;
    use crate::sentiment::Sentiment;

    fn reference_batch() -> Batch {
        Batch::new(vec![
            Item::new("a".repeat(100), 5, 10, Sentiment::Positive),
            Item::new("b".repeat(50), 0, 0, Sentiment::Negative),
        ])
    }

    #[test]
    fn test_reference_scenario() {
        let outcome = compose(&reference_batch(), &ComposerConfig::default()).unwrap();

        assert_eq!(outcome.stats.total_length, 150);
        assert_eq!(outcome.stats.total_sentiment, 0);

        let comp = &outcome.composition;
        assert_eq!(comp.duration, 4);
        assert_eq!(comp.tempo, 55);
        assert_eq!(comp.track_count, 3);
        assert_eq!(comp.track_name, DEFAULT_TRACK_NAME);
        assert_eq!(comp.events.len(), 6);

        assert_eq!(
            comp.events[..3],
            [
                NoteEvent { track: 0, pitch: 60, start_time: 0, duration: 4, velocity: 100 },
                NoteEvent { track: 1, pitch: 88, start_time: 0, duration: 4, velocity: 50 },
                NoteEvent { track: 2, pitch: 103, start_time: 0, duration: 4, velocity: 50 },
            ]
        );
        assert!(comp.events[3..].iter().all(|e| e.start_time == 0 && e.velocity <= 35));
        assert_eq!(outcome.final_cursor, 3);
        assert_eq!(comp.time_span(), Some((0, 0)));
    }

    #[test]
    fn test_compose_is_idempotent() {
        let config = ComposerConfig::default();
        let first = compose(&reference_batch(), &config).unwrap();
        let second = compose(&reference_batch(), &config).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_vec(&first.composition).unwrap(),
            serde_json::to_vec(&second.composition).unwrap()
        );
    }

    #[test]
    fn test_empty_batch_produces_nothing() {
        assert_eq!(
            compose(&Batch::default(), &ComposerConfig::default()),
            Err(ComposeError::EmptyBatch)
        );
    }

    #[test]
    fn test_bad_scale_config_is_reported_before_data() {
        let mut config = ComposerConfig::default();
        config.scales.length = Scale::new("length", &[]);
        assert_eq!(
            compose(&Batch::default(), &config),
            Err(ComposeError::EmptyScale { scale: "length".to_string() })
        );
    }

    #[test]
    fn test_assemble_only_packages() {
        let events = vec![NoteEvent { track: 0, pitch: 60, start_time: -2, duration: 6, velocity: 55 }];
        let comp = assemble(GlobalParams { tempo: 65, duration: 6 }, "x", events.clone());
        assert_eq!(comp.events, events);
        assert_eq!(comp.tempo, 65);
        assert_eq!(comp.track_name, "x");
        assert_eq!(comp.time_span(), Some((-2, -2)));
    }
}
