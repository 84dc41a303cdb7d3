//! Actor Model: Threads and timing around the text stream.
//!
//! - **Feed**: Splits a text stream into a network-side writer and a
//!   tick-side reader joined by a crossbeam channel
//! - **Ticker**: Paces frames and counts the reveals each one owes
//! - **Driver**: Spends those reveals on the slot window
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   CommitBatch    ┌──────────────┐
//! │ Net Thread   │ ───────────────▶ │              │
//! └──────────────┘                  │  Main Loop   │
//!                                   │  (reader +   │
//! ┌──────────────┐       Tick       │   driver)    │
//! │Ticker Thread │ ───────────────▶ │              │
//! └──────────────┘                  └──────────────┘
//!                                          │
//!                                          │ SlotWindow
//!                                          ▼
//!                                   ┌──────────────┐
//!                                   │   Renderer   │
//!                                   └──────────────┘
//! ```

mod driver;
mod feed;
mod ticker;

pub use driver::{DriverConfig, RevealClock, WindowDriver};
pub use feed::{feed_channel, FeedReader, FeedStatus, FeedWriter};
pub use ticker::{RevealTicker, Tick};
