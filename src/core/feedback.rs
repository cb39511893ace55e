//! "Copied!" confirmation state.
//!
//! There is a single slot for the whole page rather than one per item:
//! confirming a second item silently replaces the first.  The reset timer is
//! the expiry stored in the slot, so replacing the state also replaces the
//! timer and at most one reset is ever pending.

use std::time::{Duration, Instant};

use super::clipboard::ClipboardSink;

/// Default confirmation lifetime.
pub const DEFAULT_FEEDBACK: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedbackState {
    #[default]
    Idle,
    Confirmed { item: String, expiry: Instant },
}

#[derive(Debug, Clone)]
pub struct CopyFeedbackController {
    state: FeedbackState,
    duration: Duration,
}

impl CopyFeedbackController {
    pub fn new(duration: Duration) -> Self {
        Self {
            state: FeedbackState::Idle,
            duration,
        }
    }

    /// Write `text` to `clipboard` and, on success, confirm `item` until
    /// `now + duration`.  On failure the state is left untouched and no
    /// timer is armed.
    pub fn copy(
        &mut self,
        clipboard: &mut dyn ClipboardSink,
        item: &str,
        text: &str,
        now: Instant,
    ) -> bool {
        match clipboard.write_text(text) {
            Ok(()) => {
                if let FeedbackState::Confirmed { item: prev, .. } = &self.state {
                    if prev != item {
                        tracing::debug!(previous = %prev, "confirmation taken over");
                    }
                }
                self.state = FeedbackState::Confirmed {
                    item: item.to_owned(),
                    expiry: now + self.duration,
                };
                tracing::info!(item, "copied to clipboard");
                true
            }
            Err(e) => {
                tracing::warn!(item, error = %e, "copy failed");
                false
            }
        }
    }

    pub fn is_confirmed(&self, item: &str, now: Instant) -> bool {
        match &self.state {
            FeedbackState::Confirmed { item: current, expiry } => current == item && now < *expiry,
            FeedbackState::Idle => false,
        }
    }

    /// When the pending reset fires, if one is armed.
    pub fn pending_deadline(&self) -> Option<Instant> {
        match &self.state {
            FeedbackState::Confirmed { expiry, .. } => Some(*expiry),
            FeedbackState::Idle => None,
        }
    }

    /// Fire the reset if it is due.  Returns `true` on a transition to idle.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending_deadline() {
            Some(expiry) if now >= expiry => {
                self.state = FeedbackState::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn state(&self) -> &FeedbackState {
        &self.state
    }
}

impl Default for CopyFeedbackController {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clipboard::ClipboardError;

    /// Records writes; fails every write while `broken` is set.
    #[derive(Default)]
    struct FakeClipboard {
        written: Vec<String>,
        broken: bool,
    }

    impl ClipboardSink for FakeClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.broken {
                return Err(ClipboardError::Unavailable("no display".into()));
            }
            self.written.push(text.to_owned());
            Ok(())
        }
    }

    #[test]
    fn copy_confirms_then_expires() {
        let mut cb = FakeClipboard::default();
        let mut ctl = CopyFeedbackController::default();
        let t0 = Instant::now();

        assert!(ctl.copy(&mut cb, "sol", "9Sqc", t0));
        assert_eq!(cb.written, vec!["9Sqc".to_string()]);
        assert!(ctl.is_confirmed("sol", t0));
        assert!(ctl.is_confirmed("sol", t0 + Duration::from_millis(1999)));
        assert!(!ctl.is_confirmed("sol", t0 + DEFAULT_FEEDBACK));
    }

    #[test]
    fn poll_resets_only_at_the_deadline() {
        let mut cb = FakeClipboard::default();
        let mut ctl = CopyFeedbackController::new(Duration::from_millis(500));
        let t0 = Instant::now();
        ctl.copy(&mut cb, "evm", "0x2d", t0);

        assert_eq!(ctl.pending_deadline(), Some(t0 + Duration::from_millis(500)));
        assert!(!ctl.poll(t0 + Duration::from_millis(499)));
        assert!(ctl.poll(t0 + Duration::from_millis(500)));
        assert_eq!(ctl.state(), &FeedbackState::Idle);
        assert_eq!(ctl.pending_deadline(), None);
        assert!(!ctl.poll(t0 + Duration::from_secs(5)));
    }

    #[test]
    fn second_copy_takes_over_the_slot() {
        let mut cb = FakeClipboard::default();
        let mut ctl = CopyFeedbackController::default();
        let t0 = Instant::now();
        ctl.copy(&mut cb, "sol", "9Sqc", t0);

        let t1 = t0 + Duration::from_millis(1500);
        ctl.copy(&mut cb, "btc", "bc1q", t1);
        assert!(!ctl.is_confirmed("sol", t1));
        assert!(ctl.is_confirmed("btc", t1));

        // The first reset is gone; the new one is a full duration later.
        assert_eq!(ctl.pending_deadline(), Some(t1 + DEFAULT_FEEDBACK));
        assert!(!ctl.poll(t0 + DEFAULT_FEEDBACK));
        assert!(ctl.is_confirmed("btc", t0 + DEFAULT_FEEDBACK));
    }

    #[test]
    fn recopying_the_same_item_extends_it() {
        let mut cb = FakeClipboard::default();
        let mut ctl = CopyFeedbackController::default();
        let t0 = Instant::now();
        ctl.copy(&mut cb, "sol", "9Sqc", t0);
        let t1 = t0 + Duration::from_millis(1000);
        ctl.copy(&mut cb, "sol", "9Sqc", t1);
        assert!(ctl.is_confirmed("sol", t0 + Duration::from_millis(2500)));
    }

    #[test]
    fn failed_write_confirms_nothing_and_arms_no_timer() {
        let mut cb = FakeClipboard {
            broken: true,
            ..Default::default()
        };
        let mut ctl = CopyFeedbackController::default();
        let t0 = Instant::now();

        assert!(!ctl.copy(&mut cb, "abc", "abc", t0));
        assert!(!ctl.is_confirmed("abc", t0));
        assert_eq!(ctl.pending_deadline(), None);

        // Retry once the clipboard comes back.
        cb.broken = false;
        assert!(ctl.copy(&mut cb, "abc", "abc", t0));
        assert!(ctl.is_confirmed("abc", t0));
    }

    #[test]
    fn failure_leaves_an_existing_confirmation_alone() {
        let mut cb = FakeClipboard::default();
        let mut ctl = CopyFeedbackController::default();
        let t0 = Instant::now();
        ctl.copy(&mut cb, "sol", "9Sqc", t0);

        cb.broken = true;
        ctl.copy(&mut cb, "btc", "bc1q", t0);
        assert!(ctl.is_confirmed("sol", t0));
        assert!(!ctl.is_confirmed("btc", t0));
    }
}
