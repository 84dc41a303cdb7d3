//! Marquee: A one-row terminal rendering of a slot window.
//!
//! Each visible slot has two candidate columns: its natural position in
//! the window and its shuffled position (`readable_delta` columns away).
//! A blend factor interpolates between them, so sweeping it from 1 to 0
//! makes scrambled text settle into readable order.

use super::output::{OutputBuffer, Rgb};
use crate::window::SlotWindow;

/// Placement of one visible slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarqueeGlyph {
    /// Interpolated column, relative to the window's first slot. May fall
    /// outside the window near its edges.
    pub column: i32,
    /// Character to draw.
    pub ch: char,
    /// Absolute distance from the natural column, in columns.
    pub displacement: u32,
}

/// Compute glyph columns for every non-blank slot in the window.
///
/// `blend` is clamped to `[0, 1]`: 0 places every glyph at its natural
/// column, 1 at its shuffled column.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn marquee_columns(window: &SlotWindow, blend: f32) -> Vec<MarqueeGlyph> {
    let blend = blend.clamp(0.0, 1.0);
    window
        .iter()
        .enumerate()
        .filter(|(_, slot)| !slot.is_blank())
        .map(|(i, slot)| {
            let offset = (slot.readable_delta as f32 * blend).round() as i32;
            MarqueeGlyph {
                column: i as i32 + offset,
                ch: slot.ch,
                displacement: offset.unsigned_abs(),
            }
        })
        .collect()
}

/// Draws a window as a single row of colored glyphs.
#[derive(Debug, Clone, Copy)]
pub struct MarqueeRenderer {
    /// Leftmost terminal column of the window.
    pub x: u16,
    /// Terminal row.
    pub y: u16,
    /// Visible width in columns; glyphs outside are clipped.
    pub width: u16,
    /// Color of a glyph at its natural column.
    pub settled: Rgb,
    /// Color of a glyph at the largest displacement.
    pub scrambled: Rgb,
}

impl MarqueeRenderer {
    /// Create a renderer with the default palette.
    pub const fn new(x: u16, y: u16, width: u16) -> Self {
        Self {
            x,
            y,
            width,
            settled: Rgb::new(220, 220, 220),
            scrambled: Rgb::new(90, 140, 255),
        }
    }

    /// Append the ANSI sequences for one frame to `out`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn render(&self, window: &SlotWindow, blend: f32, out: &mut OutputBuffer) {
        out.cursor_move(self.x, self.y);
        out.clear_line();

        let glyphs = marquee_columns(window, blend);
        let max_shift = glyphs.iter().map(|g| g.displacement).max().unwrap_or(0).max(1);

        for glyph in glyphs {
            if glyph.column < 0 || glyph.column >= i32::from(self.width) {
                continue;
            }
            let heat = glyph.displacement as f32 / max_shift as f32;
            out.cursor_move(self.x.saturating_add(glyph.column as u16), self.y);
            out.set_fg(self.settled.lerp(self.scrambled, heat));
            out.write_char(glyph.ch);
        }
        out.reset_attrs();
    }
}
