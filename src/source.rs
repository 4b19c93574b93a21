//! Captured posts: loading them from disk and turning them into a [`Batch`].
//!
//! A capture file holds raw post objects either as one JSON array or as JSON
//! lines, one object per line, the way a streaming listener appends them.
//! Only `text`, `favorite_count` and `retweet_count` are read; anything else
//! in the object is ignored. A post may carry its own `polarity`, in which
//! case no scorer is consulted.

use crate::aggregate::{Batch, Item};
use crate::sentiment::{PolarityScorer, Sentiment};
use anyhow::{Context, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A post as captured from the source, before any scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPost {
    pub text: String,
    #[serde(default)]
    pub favorite_count: u32,
    #[serde(default)]
    pub retweet_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polarity: Option<f64>,
}

/// Parse capture text as a JSON array or as JSON lines.
///
/// # Errors
///
/// A malformed document, or a malformed line (reported with its 1-based
/// line number). Blank lines are skipped.
pub fn parse_posts(raw: &str) -> Result<Vec<RawPost>> {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).context("Capture is not a valid JSON array of posts");
    }

    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str::<RawPost>(line)
                .with_context(|| format!("Malformed post on line {}", idx + 1))
        })
        .collect()
}

/// Read and parse a capture file.
pub fn load_posts(path: &Path) -> Result<Vec<RawPost>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read capture file {}", path.display()))?;
    let posts = parse_posts(&raw).with_context(|| format!("While parsing {}", path.display()))?;
    info!("Loaded {} posts from {}", posts.len(), path.display());
    Ok(posts)
}

/// Score and reduce each post, keeping source order.
pub fn posts_to_batch(posts: &[RawPost], scorer: &dyn PolarityScorer) -> Batch {
    posts
        .iter()
        .map(|post| {
            let polarity = post.polarity.unwrap_or_else(|| scorer.polarity(&post.text));
            let sentiment = Sentiment::from_polarity(polarity);
            debug!("polarity {polarity:.3} -> {sentiment}");
            Item::new(post.text.clone(), post.retweet_count, post.favorite_count, sentiment)
        })
        .collect()
}

/// Load a capture file straight into a batch.
pub fn load_batch(path: &Path, scorer: &dyn PolarityScorer) -> Result<Batch> {
    Ok(posts_to_batch(&load_posts(path)?, scorer))
}

const OPENERS: &[&str] = &[
    "Huge thanks to the",
    "Still waiting on the",
    "Another shift done at the",
    "Can't believe the state of the",
    "Proud of everyone at the",
    "Four hours in A&E at the",
];

const SUBJECTS: &[&str] = &["#NHS", "night staff", "local hospital", "ambulance crews", "GP surgery"];

const CLOSERS: &[&str] = &[
    "today. Absolute heroes.",
    "and nobody seems to care.",
    "on a Tuesday.",
    "- this is a disgrace.",
    "- wonderful people, every one of them.",
    "https://t.co/x1y2z3",
];

/// Build `count` plausible posts from a seed. Same seed, same posts.
pub fn generate_posts(count: usize, seed: u64) -> Vec<RawPost> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let text = format!(
                "{} {} {}",
                OPENERS.choose(&mut rng).copied().unwrap_or_default(),
                SUBJECTS.choose(&mut rng).copied().unwrap_or_default(),
                CLOSERS.choose(&mut rng).copied().unwrap_or_default(),
            );
            // most posts get little engagement, a few take off
            let viral = rng.gen_bool(0.1);
            let (favorite_count, retweet_count) = match viral {
                true => (rng.gen_range(50..2_000), rng.gen_range(10..500)),
                false => (rng.gen_range(0..8), rng.gen_range(0..3)),
            };
            RawPost { text, favorite_count, retweet_count, polarity: None }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::LexiconScorer;

    struct FixedScorer(f64);

    impl PolarityScorer for FixedScorer {
        fn polarity(&self, _text: &str) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_parse_json_lines_skips_blanks_and_extra_fields() {
        let raw = r#"{"text": "first", "favorite_count": 3, "retweet_count": 1, "id": 99}

{"text": "second"}
"#;
        let posts = parse_posts(raw).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].favorite_count, 3);
        assert_eq!(posts[1].retweet_count, 0);
    }

    #[test]
    fn test_parse_json_array() {
        let raw = r#" [{"text": "a", "favorite_count": 1}, {"text": "b", "polarity": -0.5}]"#;
        let posts = parse_posts(raw).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].polarity, Some(-0.5));
    }

    #[test]
    fn test_malformed_line_is_reported_with_number() {
        let raw = "{\"text\": \"ok\"}\n{\"text\": \"bad\", \"favorite_count\": -4}\n";
        let err = parse_posts(raw).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn test_empty_capture_gives_empty_batch() {
        let posts = parse_posts("\n\n").unwrap();
        assert!(posts_to_batch(&posts, &LexiconScorer::default()).is_empty());
    }

    #[test]
    fn test_counters_map_to_the_right_metrics() {
        let posts = vec![RawPost {
            text: "hello".to_string(),
            favorite_count: 7,
            retweet_count: 2,
            polarity: None,
        }];
        let batch = posts_to_batch(&posts, &FixedScorer(0.0));
        let item = &batch.items()[0];
        assert_eq!(item.like_count, 7);
        assert_eq!(item.retweet_count, 2);
        assert_eq!(item.length, 5);
        assert_eq!(item.sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_explicit_polarity_wins_over_scorer() {
        let posts = vec![
            RawPost { text: "x".to_string(), favorite_count: 0, retweet_count: 0, polarity: Some(-0.2) },
            RawPost { text: "y".to_string(), favorite_count: 0, retweet_count: 0, polarity: None },
        ];
        let batch = posts_to_batch(&posts, &FixedScorer(0.9));
        let sentiments: Vec<Sentiment> = batch.items().iter().map(|i| i.sentiment).collect();
        assert_eq!(sentiments, vec![Sentiment::Negative, Sentiment::Positive]);
    }

    #[test]
    fn test_generation_is_seeded() {
        let a = generate_posts(25, 7);
        let b = generate_posts(25, 7);
        assert_eq!(a, b);
        assert_eq!(a.len(), 25);
        assert!(a.iter().all(|p| !p.text.is_empty()));
    }

    #[test]
    fn test_load_batch_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capture.json");
        fs::write(&path, "{\"text\": \"what a wonderful team\", \"favorite_count\": 4}\n").unwrap();

        let batch = load_batch(&path, &LexiconScorer::default()).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.items()[0].sentiment, Sentiment::Positive);
        assert!(load_batch(&dir.path().join("missing.json"), &LexiconScorer::default()).is_err());
    }
}
