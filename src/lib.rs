//! # Spiral
//!
//! Streaming text windowing for spiral glyph animations.
//!
//! Spiral turns an unbounded, asynchronously arriving text stream (typically
//! an LLM chat completion) into fixed-size windows of character slots that
//! an animation consumes one character per reveal.
//!
//! ## Core Concepts
//!
//! - **Shuffle-commit**: Text is sanitized, batched into chunks, and each
//!   chunk gets a bounded local shuffle recorded as a per-slot offset
//! - **Natural-order storage**: Committed slots stay in reading order; the
//!   shuffled rank is `index + readable_delta`, always a permutation
//! - **Compaction**: The consumed prefix is dropped once the cursor passes
//!   one chunk, bounding memory for endless streams
//! - **Slot window**: A ring of slots primed from the stream and advanced
//!   one slot in, one slot out
//!
//! ## Example
//!
//! ```rust
//! use spiral::{SlotWindow, TextStreamBuffer, TextStreamConfig};
//!
//! let config = TextStreamConfig { chunk_size: 8, shuffle_radius: 2 };
//! let mut buffer = TextStreamBuffer::with_seed("", config, 7)?;
//! buffer.append_forced("the quick");
//!
//! let mut window = SlotWindow::new(4)?;
//! window.sync_from(&mut buffer);
//! assert_eq!(window.text(), "THE ");
//!
//! window.advance_from(&mut buffer);
//! assert_eq!(window.text(), "HE Q");
//! # Ok::<(), spiral::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod buffer;
pub mod error;
pub mod ffi;
pub mod terminal;
pub mod window;

// Re-exports for convenience
pub use actor::{
    feed_channel, DriverConfig, FeedReader, FeedStatus, FeedWriter, RevealClock, RevealTicker,
    Tick, WindowDriver,
};
pub use buffer::{
    sanitize, shuffle_chunk, CharSlot, ChunkCommitter, CommitBatch, RingBuffer, SlotStore,
    TextStreamBuffer, TextStreamConfig,
};
pub use error::{Error, Result};
pub use terminal::{MarqueeRenderer, OutputBuffer, Rgb, TerminalSession};
pub use window::{SlotSource, SlotWindow};
