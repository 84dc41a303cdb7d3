//! Shuffle-commit: Turns sanitized text into chunks of shuffled slots.
//!
//! Each committed chunk gets a bounded local shuffle. Every position `p`
//! draws a jitter key `p + U(-R, R)`; positions are stably sorted by key
//! and each one records how far its sorted rank moved:
//!
//! ```text
//! p         0    1    2    3
//! key       1   -1    2    2
//! rank      1    0    2    3     (stable: 2 stays before 3)
//! delta    +1   -1    0    0
//! ```
//!
//! Because the ranks come from a sort, `p + delta` is a permutation of
//! `0..M` for a chunk of `M` characters. Slots are emitted in natural
//! order; only `readable_delta` carries the shuffle.

use super::sanitize::sanitize;
use super::slot::CharSlot;
use crate::error::{Error, Result};
use rand::Rng;
use tracing::{debug, trace};

/// Commit policy for a text stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStreamConfig {
    /// Characters per committed chunk. A non-forced append only commits
    /// whole chunks of exactly this size.
    pub chunk_size: usize,
    /// Maximum jitter applied to a position's sort key, in characters.
    pub shuffle_radius: usize,
}

impl Default for TextStreamConfig {
    fn default() -> Self {
        Self {
            chunk_size: 32,
            shuffle_radius: 3,
        }
    }
}

impl TextStreamConfig {
    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `chunk_size` is zero.
    pub const fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::InvalidArgument("chunk size must be positive"));
        }
        Ok(())
    }
}

/// Everything one append produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitBatch {
    /// The sanitized text that was ingested.
    pub sanitized: String,
    /// Chunks committed by this append, in order. May be empty when the
    /// text only went to `pending`.
    pub chunks: Vec<Vec<CharSlot>>,
}

impl CommitBatch {
    /// Total number of committed slots across all chunks.
    pub fn committed_len(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }
}

/// Shuffle one chunk of characters.
///
/// Returns slots in natural order with `readable_delta` set so that
/// `index + readable_delta` is the shuffled rank.
///
/// Positions are stored as `i32`, so `chars` must be shorter than
/// [`MAX_CHUNK_LEN`]; [`ChunkCommitter`] never builds a longer chunk.
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
pub fn shuffle_chunk<R: Rng>(chars: &[char], radius: usize, rng: &mut R) -> Vec<CharSlot> {
    debug_assert!(chars.len() <= MAX_CHUNK_LEN);
    let radius = i64::try_from(radius).unwrap_or(i64::MAX);
    let keys: Vec<i64> = (0..chars.len())
        .map(|p| (p as i64).saturating_add(rng.random_range(-radius..=radius)))
        .collect();

    // Stable, so equal keys keep natural order.
    let mut ranked: Vec<usize> = (0..chars.len()).collect();
    ranked.sort_by_key(|&p| keys[p]);

    let mut deltas = vec![0i32; chars.len()];
    for (rank, &p) in ranked.iter().enumerate() {
        deltas[p] = rank as i32 - p as i32;
    }

    chars
        .iter()
        .zip(deltas)
        .enumerate()
        .map(|(p, (&ch, delta))| CharSlot::new(p as i32, ch, delta))
        .collect()
}

/// Longest chunk whose positions fit a [`CharSlot`] index.
pub const MAX_CHUNK_LEN: usize = i32::MAX as usize;

/// Write side of a text stream: sanitizes, batches and shuffles.
///
/// Holds text that has arrived but not yet filled a chunk. The random
/// source is injected so tests can pin exact permutations.
#[derive(Debug)]
pub struct ChunkCommitter<R> {
    config: TextStreamConfig,
    rng: R,
    pending: String,
}

impl<R: Rng> ChunkCommitter<R> {
    /// Create a committer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the configuration is invalid.
    pub fn new(config: TextStreamConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            pending: String::new(),
        })
    }

    /// The configuration this committer was built with.
    #[inline]
    pub const fn config(&self) -> &TextStreamConfig {
        &self.config
    }

    /// Sanitized text waiting for a full chunk.
    #[inline]
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Ingest a raw chunk.
    ///
    /// Returns `None` when the raw chunk is whitespace only or sanitizes to
    /// nothing. A token like `" ,"` still contributes its space. Otherwise
    /// commits as many full chunks as `pending` holds, or, when `force` is
    /// set, all of `pending` as a single chunk.
    pub fn ingest(&mut self, raw: &str, force: bool) -> Option<CommitBatch> {
        if raw.trim().is_empty() {
            trace!(raw_len = raw.len(), "append ignored: whitespace only");
            return None;
        }
        let sanitized = sanitize(raw);
        if sanitized.is_empty() {
            trace!(raw_len = raw.len(), "append ignored: nothing to commit");
            return None;
        }
        self.pending.push_str(&sanitized);

        let mut chunks = Vec::new();
        if force {
            while !self.pending.is_empty() {
                let whole = self.pending.len().min(MAX_CHUNK_LEN);
                chunks.push(self.commit_front(whole));
            }
        } else {
            while self.pending.len() >= self.config.chunk_size {
                chunks.push(self.commit_front(self.config.chunk_size));
            }
        }

        if !chunks.is_empty() {
            debug!(
                chunks = chunks.len(),
                pending = self.pending.len(),
                force,
                "committed text chunks"
            );
        }

        Some(CommitBatch { sanitized, chunks })
    }

    /// Commit everything pending as one chunk without adding text.
    ///
    /// Returns `None` when nothing is pending. Used at end of stream, where
    /// a forced append would need non-empty text to take effect.
    pub fn flush(&mut self) -> Option<CommitBatch> {
        if self.pending.is_empty() {
            return None;
        }
        let mut chunks = Vec::new();
        while !self.pending.is_empty() {
            let whole = self.pending.len().min(MAX_CHUNK_LEN);
            chunks.push(self.commit_front(whole));
        }
        debug!(chunks = chunks.len(), "flushed pending text");
        Some(CommitBatch {
            sanitized: String::new(),
            chunks,
        })
    }

    /// Remove `n` characters from the front of `pending` and shuffle them.
    fn commit_front(&mut self, n: usize) -> Vec<CharSlot> {
        // Sanitized text is ASCII, so byte and char offsets agree.
        let chars: Vec<char> = self.pending.drain(..n).collect();
        shuffle_chunk(&chars, self.config.shuffle_radius, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::QuickCheck;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    fn committer(chunk_size: usize, shuffle_radius: usize) -> ChunkCommitter<StdRng> {
        let config = TextStreamConfig {
            chunk_size,
            shuffle_radius,
        };
        ChunkCommitter::new(config, StdRng::seed_from_u64(7)).unwrap()
    }

    fn displaced_ranks(slots: &[CharSlot]) -> Vec<i32> {
        let mut ranks: Vec<i32> = slots.iter().map(CharSlot::displaced_position).collect();
        ranks.sort_unstable();
        ranks
    }

    #[test]
    fn test_config_rejects_zero_chunk() {
        let config = TextStreamConfig {
            chunk_size: 0,
            shuffle_radius: 1,
        };
        assert!(ChunkCommitter::new(config, StdRng::seed_from_u64(0)).is_err());
    }

    #[test]
    fn test_shuffle_zero_radius_is_identity() {
        let chars: Vec<char> = "ABCDEF".chars().collect();
        let slots = shuffle_chunk(&chars, 0, &mut StdRng::seed_from_u64(1));
        assert!(slots.iter().all(|s| s.readable_delta == 0));
    }

    #[test]
    fn test_shuffle_natural_order() {
        let chars: Vec<char> = "SPIRAL TEXT".chars().collect();
        let slots = shuffle_chunk(&chars, 4, &mut StdRng::seed_from_u64(3));
        let text: String = slots.iter().map(|s| s.ch).collect();
        assert_eq!(text, "SPIRAL TEXT");
        let indices: Vec<i32> = slots.iter().map(|s| s.index).collect();
        assert_eq!(indices, (0..11).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_is_deterministic_for_seed() {
        let chars: Vec<char> = "DETERMINISTIC".chars().collect();
        let a = shuffle_chunk(&chars, 3, &mut StdRng::seed_from_u64(42));
        let b = shuffle_chunk(&chars, 3, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    /// Replays a fixed sequence of raw 64-bit draws.
    struct ScriptedRng {
        draws: Vec<u64>,
        at: usize,
    }

    impl RngCore for ScriptedRng {
        #[allow(clippy::cast_possible_truncation)]
        fn next_u32(&mut self) -> u32 {
            self.next_u64() as u32
        }

        fn next_u64(&mut self) -> u64 {
            let draw = self.draws[self.at % self.draws.len()];
            self.at += 1;
            draw
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for chunk in dst.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }

    #[test]
    fn test_shuffle_pins_exact_permutation() {
        // With radius 2 a draw of 0 maps to jitter -2 and 2^63 to jitter 0,
        // so the keys are 0, -1, 2, 1, 4, 3 and neighbours swap pairwise.
        let mut rng = ScriptedRng {
            draws: vec![1 << 63, 0],
            at: 0,
        };
        let chars: Vec<char> = "SPIRAL".chars().collect();
        let slots = shuffle_chunk(&chars, 2, &mut rng);

        let deltas: Vec<i32> = slots.iter().map(|s| s.readable_delta).collect();
        assert_eq!(deltas, vec![1, -1, 1, -1, 1, -1]);
        let mut shuffled = slots.clone();
        shuffled.sort_by_key(CharSlot::displaced_position);
        let text: String = shuffled.iter().map(|s| s.ch).collect();
        assert_eq!(text, "PSRILA");
    }

    #[test]
    fn test_shuffle_delta_bounded() {
        // A position can only be overtaken by keys within 2R of its own.
        let chars: Vec<char> = std::iter::repeat('X').take(200).collect();
        let slots = shuffle_chunk(&chars, 2, &mut StdRng::seed_from_u64(9));
        assert!(slots.iter().all(|s| s.readable_delta.abs() <= 4));
    }

    #[test]
    fn test_shuffle_bijection_quickcheck() {
        fn prop(len: u8, radius: u8, seed: u64) -> bool {
            let chars: Vec<char> = std::iter::repeat('A').take(usize::from(len)).collect();
            let slots = shuffle_chunk(
                &chars,
                usize::from(radius % 16),
                &mut StdRng::seed_from_u64(seed),
            );
            displaced_ranks(&slots) == (0..i32::from(len)).collect::<Vec<_>>()
        }

        QuickCheck::new()
            .tests(1_000)
            .quickcheck(prop as fn(u8, u8, u64) -> bool);
    }

    #[test]
    fn test_ingest_below_chunk_stays_pending() {
        let mut c = committer(8, 2);
        let batch = c.ingest("abc", false).unwrap();
        assert_eq!(batch.sanitized, "ABC");
        assert!(batch.chunks.is_empty());
        assert_eq!(c.pending(), "ABC");
    }

    #[test]
    fn test_ingest_commits_fixed_chunks() {
        let mut c = committer(4, 1);
        let batch = c.ingest("abcdefghij", false).unwrap();
        assert_eq!(batch.chunks.len(), 2);
        assert!(batch.chunks.iter().all(|chunk| chunk.len() == 4));
        assert_eq!(c.pending(), "IJ");
    }

    #[test]
    fn test_ingest_force_drains_pending_as_one_chunk() {
        let mut c = committer(8, 2);
        let batch = c.ingest("the quick", true).unwrap();
        assert_eq!(batch.chunks.len(), 1);
        assert_eq!(batch.committed_len(), 9);
        assert_eq!(c.pending(), "");
        assert_eq!(displaced_ranks(&batch.chunks[0]), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_flush_commits_pending() {
        let mut c = committer(8, 2);
        assert!(c.flush().is_none());
        c.ingest("abc", false).unwrap();
        let batch = c.flush().unwrap();
        assert_eq!(batch.committed_len(), 3);
        assert_eq!(c.pending(), "");
        assert!(c.flush().is_none());
    }

    #[test]
    fn test_ingest_whitespace_only_is_noop() {
        let mut c = committer(8, 2);
        assert!(c.ingest("", false).is_none());
        assert!(c.ingest(" \n\t", true).is_none());
        assert!(c.ingest("?!", false).is_none());
        assert_eq!(c.pending(), "");
    }

    #[test]
    fn test_ingest_keeps_space_of_punctuation_token() {
        let mut c = committer(32, 0);
        c.ingest("hello", false).unwrap();
        let batch = c.ingest(" ,", false).unwrap();
        assert_eq!(batch.sanitized, " ");
        c.ingest("world", false).unwrap();
        assert_eq!(c.pending(), "HELLO WORLD");
    }

    #[test]
    fn test_huge_chunk_size_does_not_reserve() {
        let config = TextStreamConfig {
            chunk_size: usize::MAX,
            shuffle_radius: 3,
        };
        let mut c = ChunkCommitter::new(config, StdRng::seed_from_u64(0)).unwrap();
        assert!(c.ingest("hi", false).unwrap().chunks.is_empty());
        assert_eq!(c.flush().unwrap().committed_len(), 2);
    }
}
