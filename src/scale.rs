//! Fixed pitch scales and nearest-value quantization.
//!
//! A scale is an ordered list of MIDI pitch numbers. Declaration order is not
//! sorted order: the two-octave-family length scale lists every C first and
//! then every G. Order only matters when two members are equally close to the
//! target, in which case the earlier declaration wins.

use crate::error::ComposeError;
use serde::{Deserialize, Serialize};

/// C and G across seven octaves. Quantizes post length.
pub const LENGTH_PITCHES: [i64; 14] = [48, 60, 72, 84, 96, 108, 120, 55, 67, 79, 91, 103, 115, 127];

/// E across four octaves. Quantizes retweet counts.
pub const RETWEET_PITCHES: [i64; 4] = [52, 64, 76, 88];

/// G across five octaves. Quantizes like counts.
pub const LIKE_PITCHES: [i64; 5] = [55, 67, 79, 91, 103];

/// A named, ordered set of candidate pitches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    pub name: String,
    pub pitches: Vec<i64>,
}

impl Scale {
    pub fn new(name: impl Into<String>, pitches: &[i64]) -> Self {
        Self {
            name: name.into(),
            pitches: pitches.to_vec(),
        }
    }

    /// Snap `target` to this scale. See [`quantize`].
    pub fn quantize(&self, target: i64) -> Result<i64, ComposeError> {
        quantize(&self.pitches, target).map_err(|_| ComposeError::EmptyScale {
            scale: self.name.clone(),
        })
    }

    pub fn validate(&self) -> Result<(), ComposeError> {
        match self.pitches.is_empty() {
            true => Err(ComposeError::EmptyScale { scale: self.name.clone() }),
            false => Ok(()),
        }
    }
}

/// The three scales used by the note builder, one per metric channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleSet {
    pub length: Scale,
    pub retweet: Scale,
    pub like: Scale,
}

impl Default for ScaleSet {
    fn default() -> Self {
        Self {
            length: Scale::new("length", &LENGTH_PITCHES),
            retweet: Scale::new("retweet", &RETWEET_PITCHES),
            like: Scale::new("like", &LIKE_PITCHES),
        }
    }
}

impl ScaleSet {
    /// Reject any empty scale before composition starts.
    pub fn validate(&self) -> Result<(), ComposeError> {
        self.length.validate()?;
        self.retweet.validate()?;
        self.like.validate()
    }
}

/// Return the member of `pitches` closest to `target`.
///
/// Ties go to the member with the lowest index in `pitches`, not to the
/// numerically smaller one: `[20, 10]` with target 15 yields 20.
///
/// # Errors
///
/// [`ComposeError::EmptyScale`] when `pitches` is empty.
///
/// # Examples
///
/// ```
/// use tweetsong::scale::quantize;
///
/// assert_eq!(quantize(&[10, 20], 15).unwrap(), 10);
/// assert_eq!(quantize(&[52, 64, 76, 88], 300).unwrap(), 88);
/// ```
pub fn quantize(pitches: &[i64], target: i64) -> Result<i64, ComposeError> {
    // min_by_key keeps the first of several equal minima
    pitches
        .iter()
        .copied()
        .min_by_key(|pitch| pitch.abs_diff(target))
        .ok_or_else(|| ComposeError::EmptyScale { scale: "<anonymous>".to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tie_goes_to_first_declared() {
        assert_eq!(quantize(&[10, 20], 15).unwrap(), 10);
        assert_eq!(quantize(&[20, 10], 15).unwrap(), 20);
    }

    #[test]
    fn test_result_is_always_a_member() {
        let scales: [&[i64]; 3] = [&LENGTH_PITCHES, &RETWEET_PITCHES, &LIKE_PITCHES];
        for pitches in scales {
            for target in (-500..2000).step_by(7) {
                let pitch = quantize(pitches, target).unwrap();
                assert!(pitches.contains(&pitch), "{pitch} not in {pitches:?}");
            }
        }
    }

    #[test]
    fn test_extremes_do_not_overflow() {
        assert_eq!(quantize(&LIKE_PITCHES, i64::MAX).unwrap(), 103);
        assert_eq!(quantize(&LIKE_PITCHES, i64::MIN).unwrap(), 55);
    }

    #[test]
    fn test_length_scale_snaps_across_octave_families() {
        // 60 is an exact member
        assert_eq!(quantize(&LENGTH_PITCHES, 60).unwrap(), 60);
        // 10 is below the whole scale
        assert_eq!(quantize(&LENGTH_PITCHES, 10).unwrap(), 48);
        // 58 is 2 from 60 and 3 from 55
        assert_eq!(quantize(&LENGTH_PITCHES, 58).unwrap(), 60);
        // 124 is 4 from 120 and 3 from 127
        assert_eq!(quantize(&LENGTH_PITCHES, 124).unwrap(), 127);
    }

    #[test]
    fn test_empty_scale_is_rejected() {
        assert!(matches!(quantize(&[], 5), Err(ComposeError::EmptyScale { .. })));

        let scale = Scale::new("retweet", &[]);
        assert_eq!(
            scale.quantize(5),
            Err(ComposeError::EmptyScale { scale: "retweet".to_string() })
        );
        assert!(scale.validate().is_err());
    }

    #[test]
    fn test_default_scale_set_matches_constants() {
        let set = ScaleSet::default();
        assert_eq!(set.length.pitches.len(), 14);
        assert_eq!(set.retweet.pitches.len(), 4);
        assert_eq!(set.like.pitches.len(), 5);
        assert!(set.validate().is_ok());

        let broken = ScaleSet {
            like: Scale::new("like", &[]),
            ..ScaleSet::default()
        };
        assert_eq!(broken.validate(), Err(ComposeError::EmptyScale { scale: "like".to_string() }));
    }
}
