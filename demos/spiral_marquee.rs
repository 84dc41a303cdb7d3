//! Spiral Marquee: Streams simulated LLM output through a slot window.
//!
//! A producer thread plays the role of the network client, pushing tokens
//! into a feed writer. The main loop pumps the feed, advances the window
//! on every tick, and renders it as a marquee whose glyphs drift from
//! their shuffled columns back into reading order.
//!
//! Press 'q' or Escape to quit. Set `RUST_LOG=spiral=debug` and redirect
//! stderr to see commit and compaction logs.

use rand::rngs::StdRng;
use rand::SeedableRng;
use spiral::{
    feed_channel, DriverConfig, FeedStatus, MarqueeRenderer, OutputBuffer, TerminalSession,
    RevealTicker, TextStreamConfig, WindowDriver,
};
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Sample text to stream (simulating an LLM response).
const SAMPLE_TEXT: &str = "Letters arrive in bursts from the network, \
are cleaned and grouped into chunks, and every chunk is shuffled a little. \
The window keeps a fixed number of them in view and lets one new letter in \
each time the spiral turns far enough to show it. Nothing here ever waits \
on the stream: when it runs dry, blanks roll in until more text arrives.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let stream_config = TextStreamConfig {
        chunk_size: 24,
        shuffle_radius: 3,
    };
    let (mut writer, mut reader) = feed_channel("", stream_config, StdRng::from_os_rng())?;

    let producer = thread::spawn(move || {
        for token in SAMPLE_TEXT.split_inclusive(' ') {
            if writer.append(token).is_err() {
                return;
            }
            thread::sleep(Duration::from_millis(60));
        }
        let _ = writer.flush();
    });

    let mut session = TerminalSession::enter()?;
    let width = session.width().saturating_sub(4).max(1);
    let row = session.height() / 2;

    let driver_config = DriverConfig {
        window_size: usize::from(width),
        chars_per_second: 14.0,
        max_reveals_per_tick: 4,
    };
    let mut driver = WindowDriver::new(driver_config)?;
    let renderer = MarqueeRenderer::new(2, row, width);
    let ticker = RevealTicker::spawn(Duration::from_millis(16), driver_config.clock());
    let mut out = OutputBuffer::new();

    loop {
        if session.poll_quit(Duration::ZERO)? {
            break;
        }
        let Ok(tick) = ticker.receiver().recv_timeout(Duration::from_millis(100)) else {
            continue;
        };

        let status = reader.pump();
        driver.on_tick(&tick, &mut reader);

        // Glyphs start scrambled and settle as the spiral turns toward the
        // next reveal.
        let blend = 1.0 - driver.phase();
        out.clear();
        renderer.render(driver.window(), blend, &mut out);
        out.flush_to(session.stdout())?;

        // The final slot stays behind as the feed's lookahead.
        if status == FeedStatus::Closed
            && reader.len() <= 1
            && driver.window().iter().all(|slot| slot.is_blank())
        {
            break;
        }
    }

    ticker.join();
    drop(session);
    let _ = producer.join();
    Ok(())
}
