//! Global tempo and note duration from batch sums.
//!
//! Both are threshold ladders evaluated top to bottom, first match wins.
//! Duration is one value for the whole piece; there is no per-note length.

use crate::aggregate::AggregateStats;
use serde::{Deserialize, Serialize};

/// `(exclusive lower bound on total sentiment, tempo in BPM)`.
pub const TEMPO_LADDER: [(i64, u32); 2] = [(20, 75), (10, 65)];
pub const FALLBACK_TEMPO: u32 = 55;

/// `(inclusive lower bound on total length, duration in beats)`.
pub const DURATION_LADDER: [(i64, u32); 2] = [(12_000, 10), (11_000, 6)];
pub const FALLBACK_DURATION: u32 = 4;

/// Global playback parameters for one composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalParams {
    pub tempo: u32,
    pub duration: u32,
}

/// More positive batches play faster.
#[must_use]
pub fn select_tempo(total_sentiment: i64) -> u32 {
    TEMPO_LADDER
        .iter()
        .find(|&&(bound, _)| total_sentiment > bound)
        .map_or(FALLBACK_TEMPO, |&(_, tempo)| tempo)
}

/// More characters overall give longer notes.
#[must_use]
pub fn select_duration(total_length: i64) -> u32 {
    DURATION_LADDER
        .iter()
        .find(|&&(bound, _)| total_length >= bound)
        .map_or(FALLBACK_DURATION, |&(_, duration)| duration)
}

#[must_use]
pub fn select(stats: &AggregateStats) -> GlobalParams {
    GlobalParams {
        tempo: select_tempo(stats.total_sentiment),
        duration: select_duration(stats.total_length),
    }
}
