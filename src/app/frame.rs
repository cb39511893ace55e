//! Cancellable frame pacing.
//!
//! A tokio task ticks an interval and offers each frame instant on a channel
//! of capacity one.  If the main loop has not consumed the previous frame
//! yet, the new one is dropped instead of queued, so a slow draw never builds
//! a backlog.  The cancel flag is checked before every reschedule.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub struct FrameLoop {
    rx: mpsc::Receiver<Instant>,
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl FrameLoop {
    /// Start ticking at `fps` frames per second.  Must be called inside a
    /// tokio runtime.
    pub fn start(fps: u32) -> Self {
        let period = Duration::from_secs_f64(1.0 / fps.clamp(1, 240) as f64);
        let (tx, rx) = mpsc::channel(1);
        let cancel = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&cancel);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                let at = interval.tick().await;
                if flag.load(Ordering::Relaxed) {
                    break;
                }
                match tx.try_send(at.into_std()) {
                    Ok(()) | Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Closed(_)) => break,
                }
            }
        });

        tracing::debug!(fps, "frame loop started");
        Self {
            rx,
            cancel,
            handle: Some(handle),
        }
    }

    /// Wait for the next frame.  `None` once the loop has been cancelled and
    /// any frame already in flight has been drained.
    pub async fn next(&mut self) -> Option<Instant> {
        self.rx.recv().await
    }

    /// Stop scheduling frames.  Returns `true` only on the first call.
    pub fn cancel(&mut self) -> bool {
        if self.cancel.swap(true, Ordering::Relaxed) {
            return false;
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        tracing::debug!("frame loop cancelled");
        true
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_frames_until_cancelled() {
        let mut frames = FrameLoop::start(200);
        let first = tokio::time::timeout(Duration::from_secs(2), frames.next())
            .await
            .expect("frame within timeout");
        assert!(first.is_some());

        assert!(frames.cancel());
        assert!(!frames.cancel());

        // The channel closes once the aborted task drops its sender.
        let drained = tokio::time::timeout(Duration::from_secs(2), async {
            while frames.next().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok());
    }

    #[tokio::test]
    async fn slow_consumer_sees_no_backlog() {
        let mut frames = FrameLoop::start(240);
        tokio::time::sleep(Duration::from_millis(100)).await;
        frames.cancel();

        let mut buffered = 0;
        while tokio::time::timeout(Duration::from_secs(2), frames.next())
            .await
            .ok()
            .flatten()
            .is_some()
        {
            buffered += 1;
        }
        assert!(buffered <= 1);
    }
}
