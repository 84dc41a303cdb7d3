//! Window Driver: Turns frame ticks into window advancement.
//!
//! The spiral rotates continuously; each time it has turned far enough to
//! expose one more glyph position, the window advances by one slot. The
//! [`RevealClock`] accumulates frame time and reports how many whole
//! characters are due, carrying the fractional remainder forward. The
//! clock runs on the ticker thread; the driver only spends the reveals
//! each [`Tick`] carries.

use super::ticker::Tick;
use crate::error::Result;
use crate::window::{SlotSource, SlotWindow};
use std::time::Duration;
use tracing::trace;

/// Configuration for the window driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverConfig {
    /// Visible slots in the window.
    pub window_size: usize,
    /// Characters revealed per second of animation.
    pub chars_per_second: f32,
    /// Upper bound on reveals in a single tick, so a stalled frame does not
    /// flush the whole window at once.
    pub max_reveals_per_tick: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            window_size: 64,
            chars_per_second: 12.0,
            max_reveals_per_tick: 4,
        }
    }
}

impl DriverConfig {
    /// A fresh reveal clock running at `chars_per_second`.
    pub fn clock(&self) -> RevealClock {
        RevealClock::new(self.chars_per_second)
    }
}

/// Converts elapsed time into a count of whole characters to reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealClock {
    chars_per_second: f32,
    carry: f32,
}

impl RevealClock {
    /// Create a clock revealing `chars_per_second` characters.
    ///
    /// Negative or non-finite rates are treated as zero.
    pub fn new(chars_per_second: f32) -> Self {
        let rate = if chars_per_second.is_finite() {
            chars_per_second.max(0.0)
        } else {
            0.0
        };
        Self {
            chars_per_second: rate,
            carry: 0.0,
        }
    }

    /// Advance the clock and return how many characters are now due.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn advance(&mut self, dt: Duration) -> usize {
        self.carry += dt.as_secs_f32() * self.chars_per_second;
        let due = self.carry.floor();
        self.carry -= due;
        due as usize
    }

    /// Fraction of the way to the next reveal, in `[0, 1)`.
    ///
    /// Renderers use this to rotate smoothly between reveals.
    #[inline]
    pub const fn phase(&self) -> f32 {
        self.carry
    }
}

/// Drives a [`SlotWindow`] from frame ticks.
#[derive(Debug, Clone)]
pub struct WindowDriver {
    window: SlotWindow,
    config: DriverConfig,
    phase: f32,
    primed: bool,
}

impl WindowDriver {
    /// Create a driver with an unprimed window.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] if `window_size` is zero.
    pub fn new(config: DriverConfig) -> Result<Self> {
        Ok(Self {
            window: SlotWindow::new(config.window_size)?,
            config,
            phase: 0.0,
            primed: false,
        })
    }

    /// The driven window.
    #[inline]
    pub const fn window(&self) -> &SlotWindow {
        &self.window
    }

    /// Reveal phase carried by the last tick.
    #[inline]
    pub const fn phase(&self) -> f32 {
        self.phase
    }

    /// Check whether the window has been filled from the source.
    #[inline]
    pub const fn is_primed(&self) -> bool {
        self.primed
    }

    /// Refill the window from `source` now.
    pub fn prime<S: SlotSource + ?Sized>(&mut self, source: &mut S) {
        self.window.sync_from(source);
        self.primed = true;
    }

    /// Handle one frame tick.
    ///
    /// The first tick primes the window. Every tick then advances it by the
    /// reveals the tick carries, capped per tick. Returns how many real
    /// (non-blank) slots entered the window.
    pub fn on_tick<S: SlotSource + ?Sized>(&mut self, tick: &Tick, source: &mut S) -> usize {
        if !self.primed {
            self.prime(source);
        }
        self.phase = tick.phase;

        let due = tick.reveals.min(self.config.max_reveals_per_tick);
        let mut revealed = 0;
        for _ in 0..due {
            if self.window.advance_from(source).is_some() {
                revealed += 1;
            }
        }

        if due > 0 {
            trace!(frame = tick.frame, due, revealed, "advanced slot window");
        }
        revealed
    }
}
