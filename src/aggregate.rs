//! Batch metrics: per-item columns and batch-wide sums.
//!
//! A [`Batch`] is consumed once and its order is authoritative. The columns
//! produced here are indexed exactly like the batch and are handed by value
//! to the sequence builder.

use crate::error::ComposeError;
use crate::sentiment::Sentiment;
use log::debug;
use serde::{Deserialize, Serialize};

/// One source post, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub text: String,
    /// Character count of `text`.
    pub length: i64,
    pub retweet_count: i64,
    pub like_count: i64,
    pub sentiment: Sentiment,
}

impl Item {
    pub fn new(text: impl Into<String>, retweet_count: u32, like_count: u32, sentiment: Sentiment) -> Self {
        let text = text.into();
        let length = text.chars().count() as i64;
        Self {
            text,
            length,
            retweet_count: i64::from(retweet_count),
            like_count: i64::from(like_count),
            sentiment,
        }
    }
}

/// Ordered, closed collection of items processed by one composition run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    items: Vec<Item>,
}

impl Batch {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Item> for Batch {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Four parallel arrays, one value per item, in batch order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricColumns {
    pub lengths: Vec<i64>,
    pub retweets: Vec<i64>,
    pub likes: Vec<i64>,
    pub sentiments: Vec<Sentiment>,
}

impl MetricColumns {
    /// Shared length of all four columns.
    ///
    /// # Errors
    ///
    /// [`ComposeError::LengthMismatch`] when any two columns differ.
    pub fn row_count(&self) -> Result<usize, ComposeError> {
        let n = self.lengths.len();
        match [self.retweets.len(), self.likes.len(), self.sentiments.len()]
            .iter()
            .all(|&len| len == n)
        {
            true => Ok(n),
            false => Err(ComposeError::LengthMismatch {
                lengths: n,
                retweets: self.retweets.len(),
                likes: self.likes.len(),
                sentiments: self.sentiments.len(),
            }),
        }
    }
}

/// Batch-wide sums, computed once and read-only afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total_length: i64,
    pub total_retweets: i64,
    pub total_likes: i64,
    pub total_sentiment: i64,
}

impl AggregateStats {
    fn from_columns(columns: &MetricColumns) -> Self {
        Self {
            total_length: columns.lengths.iter().sum(),
            total_retweets: columns.retweets.iter().sum(),
            total_likes: columns.likes.iter().sum(),
            total_sentiment: columns.sentiments.iter().map(|s| s.code()).sum(),
        }
    }
}

/// Split a batch into metric columns and compute its sums.
///
/// # Errors
///
/// [`ComposeError::EmptyBatch`] when the batch has no items.
pub fn aggregate(batch: &Batch) -> Result<(AggregateStats, MetricColumns), ComposeError> {
    if batch.is_empty() {
        return Err(ComposeError::EmptyBatch);
    }

    let items = batch.items();
    let columns = MetricColumns {
        lengths: items.iter().map(|item| item.length).collect(),
        retweets: items.iter().map(|item| item.retweet_count).collect(),
        likes: items.iter().map(|item| item.like_count).collect(),
        sentiments: items.iter().map(|item| item.sentiment).collect(),
    };
    let stats = AggregateStats::from_columns(&columns);

    debug!(
        "Aggregated {} items: length={} retweets={} likes={} sentiment={}",
        items.len(),
        stats.total_length,
        stats.total_retweets,
        stats.total_likes,
        stats.total_sentiment
    );

    Ok((stats, columns))
}
