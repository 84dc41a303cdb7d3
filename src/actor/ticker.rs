//! Reveal Ticker: Frame pacing thread that owns the reveal clock.
//!
//! Every frame the ticker advances a [`RevealClock`] and reports how many
//! characters the spiral has turned far enough to expose. The consumer
//! only performs the reveals; it never measures time itself.
//!
//! ```text
//! metronome ──▶ RevealClock ──▶ owed reveals ──try_send──▶ Tick
//!                                    ▲                    │
//!                                    └──── kept if full ──┘
//! ```
//!
//! Frames the consumer is too slow to take are dropped, but their reveals
//! are not: they stay owed and ride on the next delivered tick.

use super::driver::RevealClock;
use crossbeam_channel::{bounded, select, tick, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::trace;

/// One delivered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Frame number, counting frames that were dropped.
    pub frame: u64,
    /// Time since the ticker started.
    pub elapsed: Duration,
    /// Characters due since the previous delivered tick.
    pub reveals: usize,
    /// Fraction of the way to the next reveal, in `[0, 1)`.
    pub phase: f32,
}

/// Background thread emitting [`Tick`]s at a fixed frame interval.
pub struct RevealTicker {
    handle: Option<JoinHandle<()>>,
    /// Dropping this sender stops the thread.
    stop_tx: Option<Sender<()>>,
    tick_rx: Receiver<Tick>,
}

impl RevealTicker {
    /// Spawn a ticker that advances `clock` every `interval`.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the ticker thread.
    pub fn spawn(interval: Duration, clock: RevealClock) -> Self {
        let (stop_tx, stop_rx) = bounded::<()>(0);
        // One frame of slack; anything more would let reveals pile up in
        // the channel instead of in the owed count.
        let (tick_tx, tick_rx) = bounded(1);

        let handle = thread::Builder::new()
            .name("spiral-ticker".to_string())
            .spawn(move || pace(&tick_tx, &stop_rx, interval, clock))
            .expect("Failed to spawn ticker thread");

        Self {
            handle: Some(handle),
            stop_tx: Some(stop_tx),
            tick_rx,
        }
    }

    /// The tick receiver, for `recv` or a `select!` arm.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Tick> {
        &self.tick_rx
    }

    /// Stop the thread and wait for it to exit.
    pub fn join(mut self) {
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Frame loop run on the ticker thread.
fn pace(
    tick_tx: &Sender<Tick>,
    stop_rx: &Receiver<()>,
    interval: Duration,
    mut clock: RevealClock,
) {
    let metronome = tick(interval);
    let start = Instant::now();
    let mut last = start;
    let mut frame = 0u64;
    let mut owed = 0usize;

    loop {
        select! {
            recv(stop_rx) -> _ => break,
            recv(metronome) -> now => {
                let Ok(now) = now else { break };
                owed = owed.saturating_add(clock.advance(now.saturating_duration_since(last)));
                last = now;

                let next = Tick {
                    frame,
                    elapsed: now.saturating_duration_since(start),
                    reveals: owed,
                    phase: clock.phase(),
                };
                frame += 1;

                match tick_tx.try_send(next) {
                    Ok(()) => owed = 0,
                    Err(err) if err.is_disconnected() => break,
                    Err(_) => trace!(frame, owed, "consumer behind, frame dropped"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_advance_frames() {
        let ticker = RevealTicker::spawn(Duration::from_millis(5), RevealClock::new(0.0));

        let first = ticker.receiver().recv_timeout(Duration::from_millis(200)).unwrap();
        let second = ticker.receiver().recv_timeout(Duration::from_millis(200)).unwrap();
        assert!(second.frame > first.frame);
        assert!(second.elapsed > first.elapsed);
        assert_eq!(first.reveals + second.reveals, 0);

        ticker.join();
    }

    #[test]
    fn test_dropped_frames_keep_their_reveals() {
        let ticker = RevealTicker::spawn(Duration::from_millis(5), RevealClock::new(100.0));

        // Let the channel fill and several frames be dropped.
        thread::sleep(Duration::from_millis(200));
        let mut total = 0;
        for _ in 0..2 {
            total += ticker
                .receiver()
                .recv_timeout(Duration::from_millis(200))
                .unwrap()
                .reveals;
        }
        // About 20 reveals are due; the owed count carries most of them.
        assert!(total >= 10, "only {total} reveals delivered");

        ticker.join();
    }

    #[test]
    fn test_join_stops_thread() {
        let ticker = RevealTicker::spawn(Duration::from_millis(100), RevealClock::new(1.0));
        let rx = ticker.receiver().clone();
        ticker.join();
        // Any tick in flight may still be read; after that the channel is closed.
        while rx.try_recv().is_ok() {}
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }
}
