//! Input handling: maps key/mouse/focus events to state mutations.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;

use super::state::{background_rows, AppState};

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    let wallet_count = state.profile.wallets.len();

    match action {
        Action::Quit => state.should_quit = true,
        Action::SelectPrev if wallet_count > 0 => {
            state.selected_wallet = (state.selected_wallet + wallet_count - 1) % wallet_count;
        }
        Action::SelectNext if wallet_count > 0 => {
            state.selected_wallet = (state.selected_wallet + 1) % wallet_count;
        }
        Action::SelectPrev | Action::SelectNext => {}
        Action::CopySelected => state.copy_wallet(state.selected_wallet, now),
        Action::CycleMode => {
            let next = state.effects.mode().next();
            state.effects.remount(next, &state.pointer);
            state.set_status(format!("Effect: {}", next.label()), now);
        }
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            let (x, y) = state
                .config
                .effects
                .metrics
                .cell_center(mouse.column, mouse.row);
            state.pointer.on_move(x, y);
            state.effects.on_pointer_move(&state.pointer);
            state.hovered_section = state.layout().section_at(mouse.column, mouse.row);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = state.layout().wallet_at(mouse.column, mouse.row) {
                state.copy_wallet(index, now);
            }
        }
        _ => {}
    }
}

// ── Focus / resize ──────────────────────────────────────────────

/// Terminal lost focus: the pointer has left the viewport.
pub fn handle_focus_lost(state: &mut AppState) {
    state.pointer.on_leave();
    state.hovered_section = None;
}

pub fn handle_resize(state: &mut AppState, cols: u16, rows: u16) {
    state.viewport = ratatui::layout::Rect::new(0, 0, cols, rows);
    state
        .effects
        .resize(cols, background_rows(state.viewport), &state.pointer);
    tracing::debug!(cols, rows, "viewport resized");
}
