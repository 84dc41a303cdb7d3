//! Feed Channel: A text stream split across a producer and a consumer thread.
//!
//! The network side owns sanitization and the shuffle; the animation side
//! owns the committed store and its cursor. Commit batches cross between
//! them over a FIFO channel, so the "append at the tail, drain from the
//! front" contract of [`TextStreamBuffer`](crate::TextStreamBuffer) holds
//! without any shared state.
//!
//! ```text
//! ┌──────────────┐   CommitBatch    ┌──────────────┐
//! │  FeedWriter  │ ───────────────▶ │  FeedReader  │ ◀── window / driver
//! │ (net thread) │                  │ (tick thread)│
//! └──────────────┘                  └──────────────┘
//! ```

use crate::buffer::{CharSlot, ChunkCommitter, CommitBatch, SlotStore, TextStreamConfig};
use crate::error::{Error, Result};
use crate::window::SlotSource;
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use rand::Rng;
use std::collections::BTreeSet;
use tracing::debug;

/// Outcome of draining the channel into the reader's store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// Nothing arrived since the last pump.
    Idle,
    /// This many batches were recorded.
    Received(usize),
    /// The writer is gone and every batch it sent has been recorded.
    Closed,
}

/// Producer half: accepts raw text from the stream client.
#[derive(Debug)]
pub struct FeedWriter<R> {
    committer: ChunkCommitter<R>,
    tx: Sender<CommitBatch>,
}

/// Consumer half: the committed store, fed from the channel.
#[derive(Debug)]
pub struct FeedReader {
    store: SlotStore,
    rx: Receiver<CommitBatch>,
    closed: bool,
}

/// Create a connected writer/reader pair.
///
/// `initial` is committed immediately and is readable before the first
/// [`FeedReader::pump`].
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the configuration is invalid.
pub fn feed_channel<R: Rng>(
    initial: &str,
    config: TextStreamConfig,
    rng: R,
) -> Result<(FeedWriter<R>, FeedReader)> {
    let mut committer = ChunkCommitter::new(config, rng)?;
    let mut store = SlotStore::new(config.chunk_size);
    if let Some(batch) = committer.ingest(initial, true) {
        store.record(batch);
    }

    let (tx, rx) = unbounded();
    Ok((
        FeedWriter { committer, tx },
        FeedReader {
            store,
            rx,
            closed: false,
        },
    ))
}

impl<R: Rng> FeedWriter<R> {
    /// Append raw text, sending any committed chunks to the reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Disconnected`] if the reader was dropped.
    pub fn append(&mut self, chunk: &str) -> Result<()> {
        self.send(chunk, false)
    }

    /// Append raw text and commit everything pending as one chunk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Disconnected`] if the reader was dropped.
    pub fn append_forced(&mut self, chunk: &str) -> Result<()> {
        self.send(chunk, true)
    }

    /// Commit whatever is pending as a final short chunk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Disconnected`] if the reader was dropped.
    pub fn flush(&mut self) -> Result<()> {
        let batch = self.committer.flush();
        self.dispatch(batch)
    }

    fn send(&mut self, chunk: &str, force: bool) -> Result<()> {
        let batch = self.committer.ingest(chunk, force);
        self.dispatch(batch)
    }

    fn dispatch(&self, batch: Option<CommitBatch>) -> Result<()> {
        match batch {
            Some(batch) => self.tx.send(batch).map_err(|_| Error::Disconnected),
            None => Ok(()),
        }
    }

    /// Sanitized text not yet committed.
    #[inline]
    pub fn pending(&self) -> &str {
        self.committer.pending()
    }
}

impl FeedReader {
    /// Record every batch that has arrived, in send order.
    pub fn pump(&mut self) -> FeedStatus {
        let mut received = 0;
        loop {
            match self.rx.try_recv() {
                Ok(batch) => {
                    self.store.record(batch);
                    received += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.closed {
                        debug!("feed writer disconnected");
                    }
                    self.closed = true;
                    break;
                }
            }
        }

        match received {
            0 if self.closed => FeedStatus::Closed,
            0 => FeedStatus::Idle,
            n => FeedStatus::Received(n),
        }
    }

    /// Check whether the writer has been observed as dropped.
    #[inline]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Pop the next slot, holding back the final one as lookahead.
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

    /// Every sanitized character recorded so far.
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

impl SlotSource for FeedReader {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::TextStreamBuffer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::thread;

    fn config() -> TextStreamConfig {
        TextStreamConfig {
            chunk_size: 4,
            shuffle_radius: 2,
        }
    }

    fn channel(initial: &str, seed: u64) -> (FeedWriter<StdRng>, FeedReader) {
        feed_channel(initial, config(), StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_initial_text_readable_without_pump() {
        let (_writer, reader) = channel("seed", 1);
        assert_eq!(reader.text(), "SEED");
    }

    #[test]
    fn test_pump_records_batches() {
        let (mut writer, mut reader) = channel("", 1);
        writer.append("hello").unwrap();
        writer.append(" world").unwrap();
        assert_eq!(reader.len(), 0);

        assert_eq!(reader.pump(), FeedStatus::Received(2));
        assert_eq!(reader.text(), "HELLO WO");
        assert_eq!(writer.pending(), "RLD");
        assert_eq!(reader.pump(), FeedStatus::Idle);
    }

    #[test]
    fn test_noop_append_sends_nothing() {
        let (mut writer, mut reader) = channel("", 1);
        writer.append("  ").unwrap();
        assert_eq!(reader.pump(), FeedStatus::Idle);
        assert_eq!(reader.state(), 0);
    }

    #[test]
    fn test_matches_single_threaded_buffer() {
        let pieces = ["The ", "quick brown", " fox ", "jumps!"];
        let (mut writer, mut reader) = channel("go", 9);
        let mut buffer = TextStreamBuffer::new("go", config(), StdRng::seed_from_u64(9)).unwrap();
        for piece in pieces {
            writer.append(piece).unwrap();
            buffer.append(piece);
        }
        writer.append_forced("").unwrap();
        reader.pump();

        // The forced empty append was a no-op on both sides.
        assert_eq!(reader.store().processed(), buffer.store().processed());
        assert_eq!(reader.unique_chars(), buffer.unique_chars());
    }

    #[test]
    fn test_closed_after_writer_dropped() {
        let (mut writer, mut reader) = channel("", 1);
        writer.append_forced("bye").unwrap();
        drop(writer);

        assert_eq!(reader.pump(), FeedStatus::Received(1));
        assert_eq!(reader.pump(), FeedStatus::Closed);
        assert!(reader.is_closed());
        assert_eq!(reader.text(), "BYE");
    }

    #[test]
    fn test_writer_reports_disconnect() {
        let (mut writer, reader) = channel("", 1);
        drop(reader);
        assert_eq!(writer.append_forced("lost"), Err(Error::Disconnected));
        // Nothing committed means nothing sent.
        assert_eq!(writer.append("?"), Ok(()));
    }

    #[test]
    fn test_cross_thread_fifo() {
        let (mut writer, mut reader) = channel("", 3);
        let producer = thread::spawn(move || {
            for i in 0..50 {
                writer.append(&format!("w{i} ")).unwrap();
            }
            writer.flush().unwrap();
            writer.append_forced("done").unwrap();
        });
        producer.join().unwrap();

        while reader.pump() != FeedStatus::Closed {}

        let expected: String = (0..50).map(|i| format!("W{i} ")).collect::<String>() + "DONE";
        assert_eq!(reader.text(), expected);
    }
}
