//! Slot source trait: The drain API a window reads through.
//!
//! A window never owns or back-references its source. It is handed a
//! `&mut impl SlotSource` for the duration of each call, so the only
//! mutations it can make are the cursor moves defined here.

use crate::buffer::CharSlot;

/// A committed, front-drainable sequence of character slots.
pub trait SlotSource {
    /// Committed slots not yet consumed, in reading order.
    ///
    /// Only valid until the next `shift` or `advance`; compaction may move
    /// the underlying storage.
    fn available(&self) -> &[CharSlot];

    /// Pop the next slot, if the source is willing to release one.
    fn shift(&mut self) -> Option<CharSlot>;

    /// Move the read cursor forward by `n` slots without returning them.
    fn advance(&mut self, n: usize);
}
