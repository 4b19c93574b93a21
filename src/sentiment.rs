//! Sentiment reduction and the lookup tables keyed on it.
//!
//! A polarity scorer produces a real number; composition only ever sees the
//! three-way [`Sentiment`] code. Velocity and cursor advance are total
//! functions of that code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trichotomous reduction of a polarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    /// Reduce a continuous polarity: `> 0` is positive, `== 0` neutral,
    /// anything else (including NaN) negative.
    #[must_use]
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            Self::Positive
        } else if polarity == 0.0 {
            Self::Neutral
        } else {
            Self::Negative
        }
    }

    /// The integer code summed into `totalSentiment`.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Negative => -1,
            Self::Neutral => 0,
            Self::Positive => 1,
        }
    }

    /// Note velocity for the length track. The other two tracks use half.
    #[must_use]
    pub const fn velocity(self) -> u8 {
        match self {
            Self::Positive => 100,
            Self::Neutral => 55,
            Self::Negative => 35,
        }
    }

    /// Net ticks the time cursor moves after this item's notes are placed.
    #[must_use]
    pub const fn cursor_delta(self) -> i64 {
        match self {
            Self::Positive => 0,
            Self::Neutral => 1,
            Self::Negative => 3,
        }
    }
}

impl From<Sentiment> for i8 {
    fn from(sentiment: Sentiment) -> Self {
        sentiment.code() as i8
    }
}

impl TryFrom<i8> for Sentiment {
    type Error = String;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(Self::Negative),
            0 => Ok(Self::Neutral),
            1 => Ok(Self::Positive),
            other => Err(format!("sentiment code must be -1, 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Negative => "negative",
            Self::Neutral => "neutral",
            Self::Positive => "positive",
        };
        f.write_str(label)
    }
}

/// Anything that can score the polarity of a piece of text.
pub trait PolarityScorer {
    fn polarity(&self, text: &str) -> f64;
}

/// Word-list scorer used when a post arrives without a polarity.
///
/// Polarity is `(pos - neg) / (pos + neg)` over the cleaned, lowercased
/// tokens, and 0.0 when no listed word appears.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    positive: Vec<String>,
    negative: Vec<String>,
}

const POSITIVE_WORDS: &[&str] = &[
    "amazing", "awesome", "best", "better", "brilliant", "care", "excellent", "fantastic", "good",
    "grateful", "great", "happy", "hero", "heroes", "hope", "kind", "love", "lovely", "nice",
    "proud", "safe", "support", "thank", "thanks", "well", "wonderful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "angry", "awful", "bad", "broken", "crisis", "cut", "cuts", "disgrace", "fail", "failed",
    "failing", "hate", "horrible", "poor", "sad", "scandal", "shame", "sick", "terrible", "unsafe",
    "worse", "worst", "wrong",
];

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new(POSITIVE_WORDS, NEGATIVE_WORDS)
    }
}

impl LexiconScorer {
    pub fn new(positive: &[&str], negative: &[&str]) -> Self {
        Self {
            positive: positive.iter().map(|w| w.to_lowercase()).collect(),
            negative: negative.iter().map(|w| w.to_lowercase()).collect(),
        }
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let cleaned = clean_text(text).to_lowercase();
        let (pos, neg) = cleaned.split_whitespace().fold((0u32, 0u32), |(pos, neg), word| {
            let word = word.to_string();
            match (self.positive.contains(&word), self.negative.contains(&word)) {
                (true, _) => (pos + 1, neg),
                (_, true) => (pos, neg + 1),
                _ => (pos, neg),
            }
        });

        match pos + neg {
            0 => 0.0,
            total => (f64::from(pos) - f64::from(neg)) / f64::from(total),
        }
    }
}

/// Strip mentions, URLs and punctuation from a post before scoring.
///
/// `@name` runs and any token containing `://` are removed, every character
/// that is not an ASCII letter or digit becomes a space, and runs of
/// whitespace collapse to one space.
#[must_use]
pub fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for token in text.split_whitespace() {
        if token.contains("://") {
            continue;
        }
        let mut chars = token.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '@' && chars.peek().is_some_and(|n| n.is_ascii_alphanumeric()) {
                while chars.peek().is_some_and(|n| n.is_ascii_alphanumeric()) {
                    chars.next();
                }
                out.push(' ');
            } else if c.is_ascii_alphanumeric() {
                out.push(c);
            } else {
                out.push(' ');
            }
        }
        out.push(' ');
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
