// Copyright 2025 the Travelmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic priority scoring for bucket members.
//!
//! Each candidate gets a score from curatorial signals plus a small stable
//! hash of its identity key. The hash spreads otherwise-equal photos across a
//! fixed order that does not depend on how the photo collection happens to be
//! ordered, so the same photos and viewport always pick the same winners.

use alloc::string::String;

/// Score bonus for favorited photos.
///
/// Favorites are filtered out before bucketing by the sampler, so this bonus
/// never decides a winner there. It is kept so the score stays meaningful for
/// callers that rank mixed sets.
pub const FAVORITE_BONUS: u32 = 1_000_000;

/// Score bonus for photos with a non-empty caption.
///
/// One above [`HASH_MASK`], so a caption always outweighs the hash.
pub const CAPTION_BONUS: u32 = 1_024;

/// Mask applied to the key hash.
pub const HASH_MASK: u32 = 0x3ff;

/// Stable 10-bit hash of an identity key.
///
/// This is the classic 32-bit `h * 31 + c` string hash over UTF-16 code units
/// with wrapping arithmetic, masked to its low 10 bits. It is stable across
/// runs and platforms.
#[must_use]
pub fn key_hash(key: &str) -> u32 {
    let mut h: i32 = 0;
    for unit in key.encode_utf16() {
        h = h
            .wrapping_shl(5)
            .wrapping_sub(h)
            .wrapping_add(i32::from(unit));
    }
    h.cast_unsigned() & HASH_MASK
}

/// Priority score of a candidate.
#[must_use]
pub fn priority_score(key: &str, is_favorite: bool, has_caption: bool) -> u32 {
    let mut score = 0;
    if is_favorite {
        score += FAVORITE_BONUS;
    }
    if has_caption {
        score += CAPTION_BONUS;
    }
    score + key_hash(key)
}

/// A scored bucket member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// Index of the item in the caller's collection.
    pub index: usize,
    /// Identity key of the item.
    pub key: String,
    /// Score from [`priority_score`].
    pub score: u32,
}

impl Candidate {
    /// Returns `true` if `self` outranks `other`.
    ///
    /// Higher scores win. Equal scores fall back to the smaller identity key,
    /// giving a total order independent of collection order.
    #[must_use]
    pub fn outranks(&self, other: &Self) -> bool {
        match self.score.cmp(&other.score) {
            core::cmp::Ordering::Greater => true,
            core::cmp::Ordering::Less => false,
            core::cmp::Ordering::Equal => self.key < other.key,
        }
    }
}

/// Picks the highest-ranked candidate, or `None` for an empty input.
pub fn select_winner<I>(candidates: I) -> Option<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    candidates.into_iter().reduce(|best, next| {
        if next.outranks(&best) { next } else { best }
    })
}
