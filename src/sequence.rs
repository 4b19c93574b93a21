//! Note sequencing: three notes per item, placed by a sentiment-driven cursor.
//!
//! For every item the three metrics are offset, snapped to their scale and
//! emitted together at the current cursor position. The cursor then moves by
//! the item's [`Sentiment::cursor_delta`], so positive posts pile up on the
//! same beat and negative ones spread the piece out.

use crate::aggregate::MetricColumns;
use crate::error::ComposeError;
use crate::scale::ScaleSet;
use crate::sentiment::Sentiment;
use log::trace;
use serde::{Deserialize, Serialize};

pub const LENGTH_TRACK: u8 = 0;
pub const RETWEET_TRACK: u8 = 1;
pub const LIKE_TRACK: u8 = 2;

/// Subtracted from post length to widen the spread before quantizing.
pub const LENGTH_OFFSET: i64 = 40;

/// Engagement counters become `(count + 1) * ENGAGEMENT_FACTOR`.
pub const ENGAGEMENT_FACTOR: i64 = 50;

/// A single note. `start_time` may be negative; it is a relative offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteEvent {
    pub track: u8,
    pub pitch: i64,
    pub start_time: i64,
    pub duration: u32,
    pub velocity: u8,
}

/// Notes in emission order plus where the cursor ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceOutput {
    pub events: Vec<NoteEvent>,
    pub final_cursor: i64,
}

#[inline]
#[must_use]
pub fn adjust_length(length: i64) -> i64 {
    length.saturating_sub(LENGTH_OFFSET)
}

#[inline]
#[must_use]
pub fn adjust_engagement(count: i64) -> i64 {
    count.saturating_add(1).saturating_mul(ENGAGEMENT_FACTOR)
}

/// Build the note sequence for a whole batch.
///
/// Emits exactly three events per row, in track order 0, 1, 2, rows in
/// column order. Velocity on the retweet and like tracks is half the
/// length-track velocity, truncated.
///
/// # Errors
///
/// - [`ComposeError::LengthMismatch`] if the columns disagree on length
/// - [`ComposeError::EmptyBatch`] if they are empty
/// - [`ComposeError::EmptyScale`] if any scale has no pitches
pub fn build_sequence(
    columns: MetricColumns,
    duration: u32,
    scales: &ScaleSet,
) -> Result<SequenceOutput, ComposeError> {
    let rows = columns.row_count()?;
    if rows == 0 {
        return Err(ComposeError::EmptyBatch);
    }
    scales.validate()?;

    let mut events = Vec::with_capacity(rows * 3);
    let mut cursor: i64 = 0;

    for i in 0..rows {
        let sentiment: Sentiment = columns.sentiments[i];

        let pitch_length = scales.length.quantize(adjust_length(columns.lengths[i]))?;
        let pitch_retweets = scales.retweet.quantize(adjust_engagement(columns.retweets[i]))?;
        let pitch_likes = scales.like.quantize(adjust_engagement(columns.likes[i]))?;

        let velocity = sentiment.velocity();
        let echo_velocity = velocity / 2;

        trace!(
            "item {i}: cursor={cursor} sentiment={sentiment} pitches=({pitch_length}, {pitch_retweets}, {pitch_likes})"
        );

        events.extend([
            NoteEvent { track: LENGTH_TRACK, pitch: pitch_length, start_time: cursor, duration, velocity },
            NoteEvent { track: RETWEET_TRACK, pitch: pitch_retweets, start_time: cursor, duration, velocity: echo_velocity },
            NoteEvent { track: LIKE_TRACK, pitch: pitch_likes, start_time: cursor, duration, velocity: echo_velocity },
        ]);

        cursor += sentiment.cursor_delta();
    }

    Ok(SequenceOutput { events, final_cursor: cursor })
}
