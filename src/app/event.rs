//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// The terminal lost focus; treated as the pointer leaving.
    FocusLost,
    FocusGained,
}

/// Spawns a blocking task that polls the terminal for events and sends them
/// through the returned channel.  The task exits once the receiver is dropped.
///
/// `crossterm::event::poll` blocks the calling thread, so the loop must stay
/// off the async workers or it starves the frame loop and timers.
pub fn spawn_event_reader(poll_timeout: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        loop {
            // Poll with a timeout so a dropped receiver is noticed even when
            // the user is idle.
            let has_event = event::poll(poll_timeout).unwrap_or(false);
            if !has_event {
                if tx.is_closed() {
                    break;
                }
                continue;
            }
            let Ok(ev) = event::read() else {
                continue;
            };
            let app_event = match ev {
                CtEvent::Key(k) => AppEvent::Key(k),
                CtEvent::Mouse(m) => AppEvent::Mouse(m),
                CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                CtEvent::FocusLost => AppEvent::FocusLost,
                CtEvent::FocusGained => AppEvent::FocusGained,
                _ => continue,
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
        tracing::debug!("event reader stopped");
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::frame::FrameLoop;

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn reader_leaves_the_only_worker_free_for_frames() {
        let events = spawn_event_reader(Duration::from_millis(20));
        let mut frames = FrameLoop::start(60);

        let frame = tokio::time::timeout(Duration::from_secs(2), frames.next()).await;
        assert!(matches!(frame, Ok(Some(_))));

        frames.cancel();
        drop(events);
    }
}
