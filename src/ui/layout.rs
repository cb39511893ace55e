//! Layout helpers: split the terminal area into regions.
//!
//! The same [`AppLayout`] is computed by the renderer and by the mouse
//! handler, so hit-testing always matches what is on screen.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Widest the profile card gets on large terminals.
const CARD_MAX_WIDTH: u16 = 96;
const CARD_HEIGHT: u16 = 27;

/// Primary screen layout: the profile card floating over the background,
/// and a bottom status bar.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Everything above the status bar; the effect surface covers this.
    pub background_area: Rect,
    pub status_area: Rect,
    pub card: Rect,
    pub title: Rect,
    pub sections: Vec<Rect>,
    pub skills: Rect,
    pub wallets: Vec<Rect>,
    pub socials: Rect,
    pub stats: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect, section_count: usize, wallet_count: usize) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // background + card
                Constraint::Length(1), // status bar
            ])
            .split(area);
        let background_area = chunks[0];

        let card = centered_fixed(
            CARD_MAX_WIDTH.min(background_area.width.saturating_sub(2)),
            CARD_HEIGHT,
            background_area,
        );
        // One column/row of padding inside the card border.
        let inner = Rect::new(
            card.x.saturating_add(2),
            card.y.saturating_add(1),
            card.width.saturating_sub(4),
            card.height.saturating_sub(2),
        );

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // title
                Constraint::Length(6), // section cards
                Constraint::Length(1),
                Constraint::Length(4), // skills
                Constraint::Length(1),
                Constraint::Length(7), // wallets
                Constraint::Length(1), // socials
                Constraint::Length(1), // stats link
                Constraint::Min(0),
            ])
            .split(inner);

        Self {
            background_area,
            status_area: chunks[1],
            card,
            title: rows[0],
            sections: columns(rows[1], section_count),
            skills: rows[3],
            wallets: columns(rows[5], wallet_count),
            socials: rows[6],
            stats: rows[7],
        }
    }

    /// Index of the section card under `(col, row)`.
    pub fn section_at(&self, col: u16, row: u16) -> Option<usize> {
        self.sections.iter().position(|r| point_in_rect(*r, col, row))
    }

    /// Index of the wallet card under `(col, row)`.
    pub fn wallet_at(&self, col: u16, row: u16) -> Option<usize> {
        self.wallets.iter().position(|r| point_in_rect(*r, col, row))
    }
}

/// Split `area` into `n` equal columns with a one-column gutter.
fn columns(area: Rect, n: usize) -> Vec<Rect> {
    if n == 0 {
        return Vec::new();
    }
    let n = n as u16;
    let width = area.width.saturating_sub(n - 1) / n;
    (0..n)
        .map(|i| Rect::new(area.x + i * (width + 1), area.y, width, area.height))
        .collect()
}

fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

pub fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
