//! Error taxonomy for the composition core.
//!
//! Every failure is detected synchronously and aborts composition of the
//! current batch. Nothing is retried or defaulted here.

use thiserror::Error;

/// Errors raised while turning a batch into a [`crate::composition::Composition`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    /// The batch holds no items; sums, ladders and sequencing are undefined.
    #[error("batch is empty: at least one post is required to compose")]
    EmptyBatch,

    /// A scale has no members. This is a configuration defect, not bad data.
    #[error("scale '{scale}' has no pitches")]
    EmptyScale { scale: String },

    /// The parallel metric columns disagree on length.
    #[error(
        "metric columns differ in length (length: {lengths}, retweets: {retweets}, likes: {likes}, sentiment: {sentiments})"
    )]
    LengthMismatch {
        lengths: usize,
        retweets: usize,
        likes: usize,
        sentiments: usize,
    },

    /// A note value cannot be represented by the MIDI encoder (0..=127).
    #[error("{field} {value} on track {track} is outside the MIDI range 0..=127")]
    PitchOutOfRange {
        field: &'static str,
        track: u8,
        value: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = ComposeError::EmptyScale { scale: "likes".to_string() };
        assert!(err.to_string().contains("likes"));

        let err = ComposeError::LengthMismatch { lengths: 3, retweets: 3, likes: 2, sentiments: 3 };
        let msg = err.to_string();
        assert!(msg.contains("likes: 2"));
        assert!(msg.contains("length: 3"));
    }

    #[test]
    fn test_converts_into_anyhow() {
        fn fails() -> anyhow::Result<()> {
            Err(ComposeError::EmptyBatch)?
        }
        let err = fails().unwrap_err();
        assert_eq!(err.downcast_ref::<ComposeError>(), Some(&ComposeError::EmptyBatch));
    }
}
