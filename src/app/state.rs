//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Instant;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    clipboard::ClipboardSink,
    feedback::CopyFeedbackController,
    pointer::PointerTracker,
    profile::Profile,
};
use crate::ui::effects::EffectRenderer;
use crate::ui::layout::AppLayout;

/// Top-level application state.
pub struct AppState {
    pub profile: Profile,
    pub config: AppConfig,
    pub pointer: PointerTracker,
    pub effects: EffectRenderer,
    pub feedback: CopyFeedbackController,
    pub clipboard: Box<dyn ClipboardSink>,
    /// Full terminal area as last reported by the host.
    pub viewport: Rect,
    /// Section card under the pointer.
    pub hovered_section: Option<usize>,
    /// Wallet targeted by keyboard copy.
    pub selected_wallet: usize,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// When `status_message` gives way to the key hint again.
    pub status_until: Option<Instant>,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    pub fn new(
        profile: Profile,
        config: AppConfig,
        clipboard: Box<dyn ClipboardSink>,
        viewport: Rect,
    ) -> Self {
        let pointer = PointerTracker::new();
        let effects = EffectRenderer::mount(
            config.mode,
            config.effects.clone(),
            viewport.width,
            background_rows(viewport),
            &pointer,
        );
        let feedback = CopyFeedbackController::new(config.effects.copy_feedback);
        Self {
            profile,
            config,
            pointer,
            effects,
            feedback,
            clipboard,
            viewport,
            hovered_section: None,
            selected_wallet: 0,
            status_message: None,
            status_until: None,
            should_quit: false,
        }
    }

    pub fn layout(&self) -> AppLayout {
        AppLayout::from_area(
            self.viewport,
            self.profile.sections.len(),
            self.profile.wallets.len(),
        )
    }

    /// Copy wallet `index`'s address and report the outcome in the status bar.
    pub fn copy_wallet(&mut self, index: usize, now: Instant) {
        let Some(wallet) = self.profile.wallets.get(index) else {
            return;
        };
        self.selected_wallet = index;
        let copied = self.feedback.copy(
            self.clipboard.as_mut(),
            wallet.address,
            wallet.address,
            now,
        );
        let message = if copied {
            format!("Copied {} address", wallet.label)
        } else {
            "Clipboard unavailable, nothing copied".to_string()
        };
        self.set_status(message, now);
    }

    /// Show `message` in the status bar for the feedback duration.
    pub fn set_status(&mut self, message: String, now: Instant) {
        self.status_message = Some(message);
        self.status_until = Some(now + self.config.effects.copy_feedback);
    }

    /// Earliest pending reset: the copy confirmation or the status message.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.feedback.pending_deadline(), self.status_until) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Apply every reset due at `now`.  Returns `true` if anything changed.
    pub fn expire(&mut self, now: Instant) -> bool {
        let mut changed = self.feedback.poll(now);
        if self.status_until.is_some_and(|until| now >= until) {
            self.status_message = None;
            self.status_until = None;
            changed = true;
        }
        changed
    }

    /// Wallet whose confirmation is showing at `now`.
    pub fn confirmed_wallet(&self, now: Instant) -> Option<usize> {
        self.profile
            .wallets
            .iter()
            .position(|w| self.feedback.is_confirmed(w.address, now))
    }
}

/// Rows covered by the effect surface (everything above the status bar).
pub fn background_rows(viewport: Rect) -> u16 {
    viewport.height.saturating_sub(1)
}
