//! Slot Window: A fixed-size ring of slots fed from a text stream.
//!
//! The window has two entry points:
//!
//! - **Priming** ([`SlotWindow::sync_from`]): fill every position from the
//!   source's unread head, left-padding with blanks, and consume what was
//!   taken.
//! - **Steady state** ([`SlotWindow::advance`]): one slot out at the front,
//!   one slot in at the back, once per revealed character.
//!
//! ```text
//! available = 3, capacity = 5
//!
//! window: [ _  _  T  H  E ]      _ = blank sentinel
//! ```

use super::source::SlotSource;
use crate::buffer::{CharSlot, RingBuffer};
use crate::error::Result;
use tracing::debug;

/// The visible window of character slots.
#[derive(Debug, Clone)]
pub struct SlotWindow {
    ring: RingBuffer<CharSlot>,
}

impl SlotWindow {
    /// Create a window of `capacity` blank slots.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            ring: RingBuffer::new(capacity)?,
        })
    }

    /// Number of visible slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.ring.size()
    }

    /// A fresh blank sentinel.
    #[inline]
    pub const fn create_blank_slot() -> CharSlot {
        CharSlot::blank()
    }

    /// Refill the whole window from the source's unread head.
    ///
    /// With fewer unread slots than the capacity, the real slots land at
    /// the tail after leading blanks. The slots taken are consumed from the
    /// source.
    pub fn sync_from<S: SlotSource + ?Sized>(&mut self, source: &mut S) {
        let capacity = self.capacity();
        let available = source.available();
        let taken = available.len().min(capacity);
        let padding = capacity - taken;

        let fill: Vec<CharSlot> = std::iter::repeat_n(Self::create_blank_slot(), padding)
            .chain(available[..taken].iter().copied())
            .collect();
        self.ring.set(0, fill);

        source.advance(taken);
        debug!(capacity, taken, padding, "synced slot window");
    }

    /// Drop the oldest slot and append `slot`, or a blank if `None`.
    pub fn advance(&mut self, slot: Option<CharSlot>) {
        self.ring.shift();
        let tail = self.capacity() - 1;
        self.ring
            .set(tail, [slot.unwrap_or_else(Self::create_blank_slot)]);
    }

    /// Advance by one slot shifted from `source`.
    ///
    /// Returns the slot that entered the window, or `None` if the source had
    /// nothing to release and a blank entered instead.
    pub fn advance_from<S: SlotSource + ?Sized>(&mut self, source: &mut S) -> Option<CharSlot> {
        let slot = source.shift();
        self.advance(slot);
        slot
    }

    /// Slot at visible position `i`, wrapping.
    #[inline]
    pub fn get(&self, i: usize) -> CharSlot {
        *self.ring.get(i)
    }

    /// Iterate over visible slots, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &CharSlot> {
        self.ring.iter()
    }

    /// Visible characters joined in order, blanks as spaces.
    pub fn text(&self) -> String {
        self.iter().map(|s| s.ch).collect()
    }
}
