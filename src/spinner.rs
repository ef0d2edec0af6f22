use crate::formatter::SPINNER_FRAMES;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

pub const FRAME_INTERVAL: Duration = Duration::from_millis(120);

/// Animates the pending placeholder for as long as the guard is alive.
/// Dropping it stops the ticker and runs the `on_stop` hook, whichever way
/// the awaited request ended.
pub struct Spinner {
    ticker: JoinHandle<()>,
    on_stop: Option<Box<dyn FnOnce() + Send>>,
}

impl Spinner {
    /// `draw` receives the frame index, starting at 0 and wrapping after the last frame.
    pub fn start<F>(mut draw: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        let ticker = tokio::spawn(async move {
            let mut ticks = interval(FRAME_INTERVAL);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut frame = 0;
            loop {
                ticks.tick().await;
                draw(frame);
                frame = (frame + 1) % SPINNER_FRAMES.len();
            }
        });
        Self { ticker, on_stop: None }
    }

    /// Runs once, after the ticker is aborted.
    pub fn on_stop(mut self, hook: Box<dyn FnOnce() + Send>) -> Self {
        self.on_stop = Some(hook);
        self
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.ticker.abort();
        if let Some(hook) = self.on_stop.take() {
            hook();
        }
    }
}
