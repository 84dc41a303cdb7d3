//! Buffer module: Core data structures for the text stream.
//!
//! This module contains:
//! - [`CharSlot`]: One committed character and its shuffle offset
//! - [`RingBuffer`]: Fixed-capacity circular storage with a sliding origin
//! - [`sanitize`]: Reduction of raw text to the glyph alphabet
//! - [`ChunkCommitter`]: Batching and bounded local shuffling of chunks
//! - [`TextStreamBuffer`]: Committed slots with a draining, compacting cursor

mod ring;
mod sanitize;
mod shuffle;
mod slot;
mod text_stream;

pub use ring::RingBuffer;
pub use sanitize::sanitize;
pub use shuffle::{shuffle_chunk, ChunkCommitter, CommitBatch, TextStreamConfig, MAX_CHUNK_LEN};
pub use slot::{CharSlot, BLANK_INDEX};
pub use text_stream::{SlotStore, TextStreamBuffer};
