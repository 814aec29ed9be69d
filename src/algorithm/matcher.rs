//! Greedy nearest-signature matching with a cooldown against near-term repeats
//!
//! `find_best` is the bulk-assignment search: it threads cooldown state across
//! calls, so its answers depend on call order. `find_best_excluding` is the
//! interactive alternate search: it ignores cooldowns and skips a caller
//! supplied set instead.

use crate::index::{ColorIndex, EntryId, Signature};
use crate::io::configuration::{DEFAULT_DISTANCE_WEIGHTS, cooldown_for};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Per-channel divisors of the luma/chroma distance
///
/// The triple is ordered (Y, Cr, Cb) wherever it is written or typed, while
/// signatures store (Y, Cb, Cr). `[4, 8, 12]` divides Cr by 8 and Cb by 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceWeights([u32; 3]);

impl DistanceWeights {
    /// Validate a weight triple
    ///
    /// # Errors
    ///
    /// Returns an error if any weight is zero
    pub fn new(weights: [u32; 3]) -> Result<Self> {
        if weights.contains(&0) {
            return Err(invalid_parameter(
                "weights",
                &format!("{weights:?}"),
                &"every weight must be positive",
            ));
        }
        Ok(Self(weights))
    }

    /// Weight values in (Y, Cr, Cb) order
    pub const fn values(self) -> [u32; 3] {
        self.0
    }

    /// Divisors lined up with signature channels (Y, Cb, Cr)
    pub const fn channel_divisors(self) -> [u32; 3] {
        let [y, cr, cb] = self.0;
        [y, cb, cr]
    }

    /// Weighted squared distance between two signatures
    ///
    /// Each channel difference is divided by its weight (truncating toward
    /// zero) before squaring.
    pub fn distance(self, a: Signature, b: Signature) -> u32 {
        a.channels()
            .into_iter()
            .zip(b.channels())
            .zip(self.channel_divisors())
            .map(|((x, y), weight)| {
                let diff = (i64::from(x) - i64::from(y)) / i64::from(weight);
                (diff * diff) as u32
            })
            .sum()
    }
}

impl Default for DistanceWeights {
    fn default() -> Self {
        Self(DEFAULT_DISTANCE_WEIGHTS)
    }
}

impl FromStr for DistanceWeights {
    type Err = MosaicError;

    /// Parse three whitespace separated positive integers
    fn from_str(input: &str) -> Result<Self> {
        let values: Option<Vec<u32>> = input
            .split_whitespace()
            .map(|token| token.parse().ok())
            .collect();

        match values.as_deref() {
            Some(&[y, cr, cb]) if y > 0 && cr > 0 && cb > 0 => Ok(Self([y, cr, cb])),
            _ => Err(MosaicError::MalformedWeights {
                input: input.to_string(),
            }),
        }
    }
}

impl fmt::Display for DistanceWeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [y, cr, cb] = self.0;
        write!(f, "{y} {cr} {cb}")
    }
}

/// Signature matcher holding the current weights and the cooldown length
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: DistanceWeights,
    cooldown: u32,
}

impl Matcher {
    /// Matcher with explicit weights and cooldown length
    pub const fn new(weights: DistanceWeights, cooldown: u32) -> Self {
        Self { weights, cooldown }
    }

    /// Matcher whose cooldown spans 1.5 rows of `tile_count` cells
    pub const fn for_tile_count(weights: DistanceWeights, tile_count: u32) -> Self {
        Self::new(weights, cooldown_for(tile_count))
    }

    /// Current distance weights
    pub const fn weights(&self) -> DistanceWeights {
        self.weights
    }

    /// Replace the weights for every subsequent match
    pub const fn set_weights(&mut self, weights: DistanceWeights) {
        self.weights = weights;
    }

    /// Cooldown given to each winner
    pub const fn cooldown(&self) -> u32 {
        self.cooldown
    }

    /// Closest entry to `target` among entries not cooling down
    ///
    /// The first entry is always scored and its counter is left alone. Every
    /// other entry decays its cooldown by one and is scored only if it is not
    /// (or no longer) cooling. Ties go to the earlier entry. The winner's
    /// cooldown is reset. Returns `None` only for an empty index.
    pub fn find_best(&self, index: &mut ColorIndex, target: Signature) -> Option<EntryId> {
        let mut candidates = index.entries_mut().iter_mut().enumerate();

        let (_, first) = candidates.next()?;
        let mut best_position = 0;
        let mut best_distance = self.weights.distance(target, first.luma_chroma());

        for (position, entry) in candidates {
            if !entry.tick_cooldown() {
                continue;
            }
            let distance = self.weights.distance(target, entry.luma_chroma());
            if distance < best_distance {
                best_distance = distance;
                best_position = position;
            }
        }

        let winner = EntryId::new(best_position);
        if let Some(entry) = index.entry_mut(winner) {
            entry.set_cooldown(self.cooldown);
        }
        Some(winner)
    }

    /// Closest entry to `target` outside `excluded`, ignoring cooldowns
    ///
    /// Never touches cooldown state. Returns `None` iff every entry is excluded.
    pub fn find_best_excluding(
        &self,
        index: &ColorIndex,
        target: Signature,
        excluded: &HashSet<EntryId>,
    ) -> Option<EntryId> {
        index
            .entries()
            .iter()
            .enumerate()
            .map(|(position, entry)| (EntryId::new(position), entry))
            .filter(|(id, _)| !excluded.contains(id))
            .fold(None, |best: Option<(EntryId, u32)>, (id, entry)| {
                let distance = self.weights.distance(target, entry.luma_chroma());
                match best {
                    Some((_, best_distance)) if best_distance <= distance => best,
                    _ => Some((id, distance)),
                }
            })
            .map(|(id, _)| id)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::for_tile_count(
            DistanceWeights::default(),
            crate::io::configuration::DEFAULT_TILE_COUNT,
        )
    }
}
