//! Window module: The fixed-size visible run of slots.
//!
//! A [`SlotWindow`] mirrors the unconsumed head of a [`SlotSource`] and is
//! advanced one slot per revealed character by the animation driver:
//!
//! ```rust,ignore
//! use spiral::{SlotWindow, TextStreamBuffer, TextStreamConfig};
//!
//! let mut buffer = TextStreamBuffer::with_seed("hello", TextStreamConfig::default(), 1)?;
//! let mut window = SlotWindow::new(16)?;
//! window.sync_from(&mut buffer);
//! window.advance_from(&mut buffer);
//! ```

mod slot_window;
mod source;

pub use slot_window::SlotWindow;
pub use source::SlotSource;
