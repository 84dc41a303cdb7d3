//! Terminal module: A text-mode stand-in for the glyph renderer.
//!
//! - [`OutputBuffer`]: ANSI sequences accumulated for a single write
//! - [`MarqueeRenderer`]: One-row rendering of a slot window
//! - [`TerminalSession`]: Raw-mode / alternate-screen guard

mod marquee;
mod output;
mod session;

pub use marquee::{marquee_columns, MarqueeGlyph, MarqueeRenderer};
pub use output::{OutputBuffer, Rgb};
pub use session::TerminalSession;
