//! Text Stream Buffer: Committed character slots with a draining cursor.
//!
//! This module holds the read side of a text stream ([`SlotStore`]) and the
//! single-threaded buffer that pairs it with a [`ChunkCommitter`]
//! ([`TextStreamBuffer`]).
//!
//! # Layout
//!
//! ```text
//!  processed: [ consumed ... | unread ............... ]
//!               0         start_at               len
//! ```
//!
//! Appends only push at the tail. Drains only move `start_at`. Once
//! `start_at` passes `chunk_size`, the consumed prefix is dropped and
//! `start_at` resets to 0. Positions into `processed` are therefore only
//! meaningful together with the `start_at` read in the same call.

use super::shuffle::{ChunkCommitter, CommitBatch, TextStreamConfig};
use super::slot::CharSlot;
use crate::error::Result;
use crate::window::SlotSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use tracing::trace;

/// Committed slots, read cursor and change token.
#[derive(Debug, Clone)]
pub struct SlotStore {
    /// Committed slots in natural order, chunk after chunk.
    processed: Vec<CharSlot>,
    /// Read cursor into `processed`.
    start_at: usize,
    /// Every sanitized character seen so far.
    unique_chars: BTreeSet<char>,
    /// Bumped on every mutation.
    state: u64,
    /// Compaction threshold for `start_at`.
    compact_after: usize,
}

impl SlotStore {
    /// Create an empty store that compacts once the cursor passes
    /// `compact_after`.
    pub fn new(compact_after: usize) -> Self {
        Self {
            processed: Vec::new(),
            start_at: 0,
            unique_chars: BTreeSet::from([' ']),
            state: 0,
            compact_after,
        }
    }

    /// Record the output of one append.
    pub fn record(&mut self, batch: CommitBatch) {
        self.unique_chars.extend(batch.sanitized.chars());
        for chunk in batch.chunks {
            self.processed.extend(chunk);
        }
        self.state += 1;
    }

    /// Pop the next slot.
    ///
    /// The final committed slot is held back as a one-slot lookahead: this
    /// returns `None` while fewer than two unread slots remain. Only
    /// [`SlotStore::advance`] can move the cursor past the last slot.
    pub fn shift(&mut self) -> Option<CharSlot> {
        if self.start_at + 1 >= self.processed.len() {
            return None;
        }
        let slot = self.processed[self.start_at];
        self.start_at += 1;
        self.state += 1;
        self.compact();
        Some(slot)
    }

    /// Move the cursor forward by `n`, clamped to the committed length.
    ///
    /// No-op when nothing is unread.
    pub fn advance(&mut self, n: usize) {
        if self.start_at >= self.processed.len() {
            return;
        }
        self.start_at = (self.start_at + n).min(self.processed.len());
        self.state += 1;
        self.compact();
    }

    /// Drop the consumed prefix once the cursor has passed the threshold.
    fn compact(&mut self) {
        if self.start_at > self.compact_after {
            let dropped = self.start_at;
            self.processed.drain(..dropped);
            self.start_at = 0;
            trace!(dropped, remaining = self.processed.len(), "compacted slot store");
        }
    }

    /// Unread slots.
    #[inline]
    pub fn available(&self) -> &[CharSlot] {
        &self.processed[self.start_at..]
    }

    /// All retained slots, including the consumed prefix not yet compacted.
    #[inline]
    pub fn processed(&self) -> &[CharSlot] {
        &self.processed
    }

    /// Current read cursor into [`SlotStore::processed`].
    #[inline]
    pub const fn start_at(&self) -> usize {
        self.start_at
    }

    /// Unread characters joined in order.
    pub fn text(&self) -> String {
        self.available().iter().map(|s| s.ch).collect()
    }

    /// Number of unread slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.processed.len() - self.start_at
    }

    /// Check if no slots are unread.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every sanitized character seen. Always contains the space.
    #[inline]
    pub const fn unique_chars(&self) -> &BTreeSet<char> {
        &self.unique_chars
    }

    /// Change-detection token, bumped on every mutation.
    #[inline]
    pub const fn state(&self) -> u64 {
        self.state
    }
}

impl SlotSource for SlotStore {
    fn available(&self) -> &[CharSlot] {
        Self::available(self)
    }

    fn shift(&mut self) -> Option<CharSlot> {
        Self::shift(self)
    }

    fn advance(&mut self, n: usize) {
        Self::advance(self, n);
    }
}

/// A single-threaded text stream: append raw text, drain shuffled slots.
///
/// ```
/// use spiral::{TextStreamBuffer, TextStreamConfig};
///
/// let config = TextStreamConfig { chunk_size: 8, shuffle_radius: 2 };
/// let mut buffer = TextStreamBuffer::with_seed("", config, 1).unwrap();
/// buffer.append_forced("the quick");
/// assert_eq!(buffer.text(), "THE QUICK");
/// ```
#[derive(Debug)]
pub struct TextStreamBuffer<R = StdRng> {
    committer: ChunkCommitter<R>,
    store: SlotStore,
}

impl TextStreamBuffer<StdRng> {
    /// Create a buffer whose jitter comes from a seeded [`StdRng`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_seed(initial: &str, config: TextStreamConfig, seed: u64) -> Result<Self> {
        Self::new(initial, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TextStreamBuffer<R> {
    /// Create a buffer, committing `initial` immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(initial: &str, config: TextStreamConfig, rng: R) -> Result<Self> {
        let mut buffer = Self {
            committer: ChunkCommitter::new(config, rng)?,
            store: SlotStore::new(config.chunk_size),
        };
        buffer.append_forced(initial);
        Ok(buffer)
    }

    /// Append raw text, committing whole chunks as they fill.
    pub fn append(&mut self, chunk: &str) {
        self.ingest(chunk, false);
    }

    /// Append raw text and commit everything pending as one chunk.
    pub fn append_forced(&mut self, chunk: &str) {
        self.ingest(chunk, true);
    }

    /// Commit whatever is pending as a final short chunk.
    pub fn flush(&mut self) {
        if let Some(batch) = self.committer.flush() {
            self.store.record(batch);
        }
    }

    fn ingest(&mut self, chunk: &str, force: bool) {
        if let Some(batch) = self.committer.ingest(chunk, force) {
            self.store.record(batch);
        }
    }

    /// The configuration this buffer was built with.
    #[inline]
    pub const fn config(&self) -> &TextStreamConfig {
        self.committer.config()
    }

    /// Sanitized text not yet committed.
    #[inline]
    pub fn pending(&self) -> &str {
        self.committer.pending()
    }
}

impl<R> TextStreamBuffer<R> {
    /// Pop the next slot. See [`SlotStore::shift`] for the lookahead rule.
    pub fn shift(&mut self) -> Option<CharSlot> {
        self.store.shift()
    }

    /// Move the read cursor forward by `n`.
    pub fn advance(&mut self, n: usize) {
        self.store.advance(n);
    }

    /// Unread characters joined in order.
    pub fn text(&self) -> String {
        self.store.text()
    }

    /// Number of unread slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Check if no slots are unread.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Every sanitized character seen. Always contains the space.
    #[inline]
    pub const fn unique_chars(&self) -> &BTreeSet<char> {
        self.store.unique_chars()
    }

    /// Change-detection token.
    #[inline]
    pub const fn state(&self) -> u64 {
        self.store.state()
    }

    /// The committed store.
    #[inline]
    pub const fn store(&self) -> &SlotStore {
        &self.store
    }
}

impl<R> SlotSource for TextStreamBuffer<R> {
    fn available(&self) -> &[CharSlot] {
        self.store.available()
    }

    fn shift(&mut self) -> Option<CharSlot> {
        self.store.shift()
    }

    fn advance(&mut self, n: usize) {
        self.store.advance(n);
    }
}
