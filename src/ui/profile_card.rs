//! The profile card drawn on top of the effect background.
//!
//! Nothing here clears cells: the card darkens what is already in the buffer
//! and then writes text and borders with foreground-only styles, so the
//! background stays visible through it.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use crate::core::profile::Profile;

use super::layout::AppLayout;
use super::theme::Theme;

const COPIED_BADGE: &str = " Copied! ";

pub struct ProfileCard<'a> {
    pub profile: &'a Profile,
    pub layout: &'a AppLayout,
    /// Section card under the pointer; its content is revealed.
    pub hovered_section: Option<usize>,
    /// Keyboard selection among the wallets.
    pub selected_wallet: usize,
    /// Wallet currently showing the copy confirmation.
    pub confirmed_wallet: Option<usize>,
}

impl Widget for ProfileCard<'_> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let layout = self.layout;
        if layout.card.width < 8 || layout.card.height < 4 {
            return;
        }
        shade(layout.card, buf, Theme::CARD_SHADE);

        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style())
            .render(layout.card, buf);

        self.render_title(buf);
        self.render_sections(buf);
        self.render_skills(buf);
        self.render_wallets(buf);
        self.render_links(buf);
    }
}

impl ProfileCard<'_> {
    fn render_title(&self, buf: &mut Buffer) {
        let p = self.profile;
        let title = Line::from(vec![
            Span::styled(p.name, Theme::name_style()),
            Span::styled(p.name_accent, Theme::accent_style()),
            Span::styled(p.tagline, Theme::name_style()),
        ])
        .centered();
        Paragraph::new(title).render(self.layout.title, buf);
    }

    fn render_sections(&self, buf: &mut Buffer) {
        for (i, (section, area)) in self
            .profile
            .sections
            .iter()
            .zip(&self.layout.sections)
            .enumerate()
        {
            let active = self.hovered_section == Some(i);
            if active {
                tint(*area, buf, (124, 45, 18), 0.5);
            }
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if active {
                    Theme::active_border_style()
                } else {
                    Theme::border_style()
                });
            let mut lines = vec![Line::styled(section.title, Theme::heading_style()).centered()];
            if active {
                lines.push(Line::styled(section.content, Theme::body_style()).centered());
            }
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(block)
                .render(*area, buf);
        }
    }

    fn render_skills(&self, buf: &mut Buffer) {
        let mut spans = Vec::new();
        for skill in &self.profile.skills {
            let (r, g, b) = skill.color;
            spans.push(Span::styled(
                format!(" ◆ {} ", skill.name),
                Style::default().fg(Color::Rgb(r, g, b)),
            ));
            spans.push(Span::raw("  "));
        }
        let block = Block::default()
            .title(Span::styled(" Skills & Tools ", Theme::heading_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        Paragraph::new(Line::from(spans))
            .block(block)
            .render(self.layout.skills, buf);
    }

    fn render_wallets(&self, buf: &mut Buffer) {
        for (i, (wallet, area)) in self
            .profile
            .wallets
            .iter()
            .zip(&self.layout.wallets)
            .enumerate()
        {
            let confirmed = self.confirmed_wallet == Some(i);
            let address_style = if confirmed {
                Theme::copied_style()
            } else if self.selected_wallet == i {
                Theme::selected_address_style()
            } else {
                Theme::address_style()
            };
            let (r, g, b) = wallet.label_color;
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Theme::border_style());
            let lines = vec![
                Line::styled(wallet.label, Style::default().fg(Color::Rgb(r, g, b))),
                Line::styled(wallet.address, address_style),
            ];
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(block)
                .render(*area, buf);

            let badge_w = COPIED_BADGE.len() as u16;
            if confirmed && area.width > badge_w + 2 {
                let x = area.x + area.width - badge_w - 1;
                buf.set_string(x, area.y, COPIED_BADGE, Theme::badge_style());
            }
        }
    }

    fn render_links(&self, buf: &mut Buffer) {
        let mut spans = Vec::new();
        for (i, social) in self.profile.socials.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ·  ", Theme::border_style()));
            }
            spans.push(Span::styled(format!("{} ", social.name), Theme::heading_style()));
            spans.push(Span::styled(social.link, Theme::link_style()));
        }
        Paragraph::new(Line::from(spans).centered()).render(self.layout.socials, buf);

        let stats = Line::from(vec![
            Span::styled("GitHub Stats ", Theme::heading_style()),
            Span::styled(self.profile.stats_image_url, Theme::link_style()),
        ])
        .centered();
        Paragraph::new(stats).render(self.layout.stats, buf);
    }
}

/// Darken every RGB colour in `area` toward black.
fn shade(area: Rect, buf: &mut Buffer, keep: f64) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                let fg = scale(cell.fg, keep);
                let bg = scale(cell.bg, keep);
                cell.set_fg(fg).set_bg(bg);
            }
        }
    }
}

/// Blend `color` into every RGB colour in `area`.
fn tint(area: Rect, buf: &mut Buffer, color: (u8, u8, u8), alpha: f64) {
    let mix = |c: Color| match c {
        Color::Rgb(r, g, b) => {
            let m = |u: u8, t: u8| (u as f64 + (t as f64 - u as f64) * alpha).round() as u8;
            Color::Rgb(m(r, color.0), m(g, color.1), m(b, color.2))
        }
        other => other,
    };
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                let fg = mix(cell.fg);
                let bg = mix(cell.bg);
                cell.set_fg(fg).set_bg(bg);
            }
        }
    }
}

fn scale(c: Color, k: f64) -> Color {
    match c {
        Color::Rgb(r, g, b) => {
            let s = |v: u8| (v as f64 * k).round() as u8;
            Color::Rgb(s(r), s(g), s(b))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(hovered: Option<usize>, confirmed: Option<usize>) -> (Buffer, AppLayout) {
        let area = Rect::new(0, 0, 120, 40);
        let profile = Profile::builtin();
        let layout = AppLayout::from_area(area, profile.sections.len(), profile.wallets.len());
        let mut buf = Buffer::empty(area);
        ProfileCard {
            profile: &profile,
            layout: &layout,
            hovered_section: hovered,
            selected_wallet: 0,
            confirmed_wallet: confirmed,
        }
        .render(area, &mut buf);
        (buf, layout)
    }

    fn row_text(buf: &Buffer, rect: Rect, row: u16) -> String {
        (rect.left()..rect.right())
            .map(|x| buf[Position::new(x, row)].symbol().to_string())
            .collect()
    }

    fn rect_text(buf: &Buffer, rect: Rect) -> String {
        (rect.top()..rect.bottom())
            .map(|y| row_text(buf, rect, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn badge_only_on_the_confirmed_wallet() {
        let (buf, layout) = render(None, Some(1));
        let top = |i: usize| row_text(&buf, layout.wallets[i], layout.wallets[i].y);
        assert!(top(1).contains("Copied!"));
        assert!(!top(0).contains("Copied!"));
        assert!(!top(2).contains("Copied!"));
    }

    #[test]
    fn no_badge_when_idle() {
        let (buf, layout) = render(None, None);
        assert!(!rect_text(&buf, layout.card).contains("Copied!"));
    }

    #[test]
    fn hover_reveals_section_content() {
        let (buf, layout) = render(Some(2), None);
        assert!(rect_text(&buf, layout.sections[2]).contains("Innovating"));
        assert!(!rect_text(&buf, layout.sections[0]).contains("Crafting"));
    }

    #[test]
    fn shading_darkens_rgb_and_keeps_named_colours() {
        assert_eq!(scale(Color::Rgb(200, 100, 10), 0.5), Color::Rgb(100, 50, 5));
        assert_eq!(scale(Color::Reset, 0.5), Color::Reset);
    }
}
